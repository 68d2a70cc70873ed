//! Async client for the Daypia document & AI processing API.
//!
//! The crate converts typed domain operations (upload a media file, store a
//! chapter, search semantic chunks, generate structured JSON and
//! spreadsheets) into HTTP requests against the Daypia machine API and maps
//! the responses back into typed results. Every call funnels through one
//! execution engine that assembles headers, encodes JSON or multipart
//! bodies, propagates distributed-tracing context when available and
//! normalizes every failure into a single error type.
//!
//! ```rust,no_run
//! use daypia_client::{DaypiaClient, DEFAULT_MAX_RESULTS};
//! use uuid::Uuid;
//!
//! # async fn run() -> Result<(), daypia_client::DaypiaError> {
//! let client = DaypiaClient::from_env()?;
//! let project_id = Uuid::new_v4();
//!
//! client.create_chunk(project_id, "Rust in production").await?;
//! let chunks = client
//!     .search_chunk(project_id, "production", DEFAULT_MAX_RESULTS)
//!     .await?;
//! for chunk in chunks {
//!     println!("{} ({:.2})", chunk.text, chunk.similarity);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The client performs no retries and caches nothing: each call is a single
//! network round-trip, and any retry or sequencing policy belongs to the
//! caller.

mod client;
mod decode;
mod endpoint;
mod error;
mod execution;
mod request;
mod trace;
mod types;

pub use client::{DEFAULT_BASE_URL, DEFAULT_MAX_RESULTS, DaypiaClient, DaypiaClientBuilder};
pub use endpoint::Endpoint;
pub use error::DaypiaError;
pub use request::{FileAttachment, RequestSpec};
pub use trace::{
    NoopTraceContextProvider, StaticTraceContextProvider, TraceContext, TraceContextProvider,
};
pub use types::Chunk;
