//! civica-agent: Client for the external AI/RAG agent service.
//!
//! The agent exposes `POST /query`, `GET /status`, `POST /ingest` and
//! `GET /health`. This crate only calls them.

pub mod client;

pub use client::{AgentClient, UpstreamReply, QUERY_FAILED, STATUS_FAILED, UPLOAD_FAILED};
