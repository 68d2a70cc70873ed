//! The fixed set of Daypia machine API endpoints.

use reqwest::Method;

/// One remote operation of the Daypia machine API.
///
/// The set is closed: every outbound request maps to exactly one variant,
/// so an unmapped operation cannot exist at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    CreateMediafile,
    CreateChunk,
    SearchChunk,
    CreateChapter,
    SetPreviousChapter,
    SetMediafileFirstChapter,
    SetChapterContent,
    ChunkChapter,
    PdfToText,
    GenerateJson,
    GenerateSheets,
    GenerateExcel,
}

impl Endpoint {
    /// URL path relative to the configured base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Self::CreateMediafile => "/v1/machine/createmediafile",
            Self::CreateChunk => "/v1/machine/chunk/create",
            Self::SearchChunk => "/v1/machine/chunk/search",
            Self::CreateChapter => "/v1/machine/createchapter",
            Self::SetPreviousChapter => "/v1/machine/setpreviouschapter",
            Self::SetMediafileFirstChapter => "/v1/machine/setmediafilefirstchapter",
            Self::SetChapterContent => "/v1/machine/setchaptercontent",
            Self::ChunkChapter => "/v1/machine/chunk-chapter",
            Self::PdfToText => "/v1/machine/pdf/get_content",
            Self::GenerateJson => "/v1/machine/generate/json",
            Self::GenerateSheets => "/v1/machine/sheets/generate",
            Self::GenerateExcel => "/v1/machine/excel/generate",
        }
    }

    /// Every machine endpoint takes POST.
    pub fn method(&self) -> Method {
        Method::POST
    }
}
