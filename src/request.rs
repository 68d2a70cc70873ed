//! Request specification built per call.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::endpoint::Endpoint;

/// A file to attach to a multipart operation.
///
/// The file is streamed to the transport at send time, so large media files
/// are never fully buffered in memory.
#[derive(Debug, Clone)]
pub struct FileAttachment {
    pub path: PathBuf,
    pub file_name: String,
    pub mime_type: String,
}

impl FileAttachment {
    pub fn new(
        path: impl Into<PathBuf>,
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            file_name: file_name.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Attachment for the PDF extraction endpoint, which expects a fixed
    /// name and MIME type regardless of the source path.
    pub(crate) fn pdf(path: &Path) -> Self {
        Self::new(path, "file.pdf", "application/pdf")
    }
}

/// One outbound request: endpoint plus optional JSON body and attachment.
///
/// Constructed per call and consumed by the executor; never reused. A spec
/// is multipart exactly when it carries a file, so a multipart request
/// always has exactly one attachment by construction.
#[derive(Debug)]
pub struct RequestSpec {
    pub(crate) endpoint: Endpoint,
    pub(crate) body: Option<Map<String, Value>>,
    pub(crate) file: Option<FileAttachment>,
}

impl RequestSpec {
    /// A plain JSON request.
    pub fn json(endpoint: Endpoint, body: Map<String, Value>) -> Self {
        Self {
            endpoint,
            body: Some(body),
            file: None,
        }
    }

    /// A multipart request carrying one file and zero or more form fields.
    pub fn multipart(
        endpoint: Endpoint,
        body: Option<Map<String, Value>>,
        file: FileAttachment,
    ) -> Self {
        Self {
            endpoint,
            body,
            file: Some(file),
        }
    }

    pub fn is_multipart(&self) -> bool {
        self.file.is_some()
    }
}
