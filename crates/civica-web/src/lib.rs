//! civica-web: HTTP gateway between the Civica front-end and the agent service.
//! Routes:
//!   - `POST /api/ai/query`   chat questions, relayed to the agent's `/query`
//!   - `POST /api/ai/upload`  document uploads, relayed to `/ingest`
//!   - `GET  /api/ai/status`  dashboard stats, relayed from `/status`
//!   - `GET  /api/complaints` complaints read from the local CSV
//!   - `GET  /health`         gateway liveness

pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
