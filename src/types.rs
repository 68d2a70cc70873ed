//! Data types returned by the Daypia API.

use serde::Deserialize;

/// A unit of text retrievable by semantic similarity search.
///
/// Value object deserialized from a search response. The id is opaque to
/// this client and the `similarity` score is returned exactly as the
/// remote side assigned it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Chunk {
    pub id: String,
    pub text: String,
    pub similarity: f64,
}
