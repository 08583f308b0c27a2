//! civica-common: Shared types, errors, and the complaints reader used across all Civica crates.

pub mod error;
pub mod models;
pub mod complaints;

// Re-export commonly used types
pub use error::{CivicaError, Result};
pub use models::{
    Complaint, DocumentMetadata, ErrorBody, GeoPoint, IngestResponse, QueryRequest,
    QueryResponse, Source, Stats, StatusResponse,
};
pub use complaints::{load_complaints, parse_complaints, ComplaintFilter};
