//! Plain-text rendering of agent replies and complaints.

use std::fmt::Write;

use civica_common::{Complaint, IngestResponse, QueryResponse, StatusResponse};
use console::style;

/// Uptime as `"{hours}h {minutes}m"`.
pub fn format_uptime(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    format!("{}h {}m", total / 3600, (total % 3600) / 60)
}

pub fn render_answer(resp: &QueryResponse) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", resp.answer);
    let _ = writeln!(out);

    let mut meta = format!("agent: {}", resp.agent_used);
    if let Some(confidence) = resp.confidence {
        let _ = write!(meta, "  confidence: {:.0}%", confidence * 100.0);
    }
    if resp.fallback {
        meta.push_str("  (fallback)");
    }
    let _ = writeln!(out, "{}", style(meta).dim());

    if !resp.sources.is_empty() {
        let _ = writeln!(out, "\n{}", style("Sources").bold());
        for (i, source) in resp.sources.iter().enumerate() {
            let page = source.page.map(|p| format!(", p. {p}")).unwrap_or_default();
            let _ = writeln!(out, "  [{}] {}{}", i + 1, source.title, page);
            if !source.snippet.is_empty() {
                let _ = writeln!(out, "      {}", style(&source.snippet).dim());
            }
        }
    }
    out
}

pub fn render_status(status: &StatusResponse) -> String {
    let stats = &status.stats;
    let mode = if stats.use_mock_llm {
        style("Mock Mode").yellow()
    } else {
        style("Live").green()
    };

    let mut out = String::new();
    let _ = writeln!(out, "{} {} ({})", style("Agent service").bold(), status.status, mode);
    let _ = writeln!(out, "  Total Documents     {}", stats.documents);
    let _ = writeln!(out, "  Queries Today       {}", stats.queries_today);
    let _ = writeln!(out, "  Documents Ingested  {}", stats.documents_ingested);
    let _ = writeln!(out, "  System Uptime       {}", format_uptime(stats.uptime_seconds));
    if !status.version.is_empty() {
        let _ = writeln!(out, "  Version             {}", status.version);
    }
    out
}

pub fn upload_message(resp: &IngestResponse) -> String {
    format!("Successfully uploaded! {} chunks indexed.", resp.ingested)
}

pub fn render_complaints(complaints: &[Complaint]) -> String {
    if complaints.is_empty() {
        return "No complaints found.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<6} {:<14} {:<10} {:<10} {:<20} {:<10} {}",
        "ID", "TYPE", "WARD", "STATUS", "LOCATION", "DATE", "DESCRIPTION"
    );
    for c in complaints {
        let _ = writeln!(
            out,
            "{:<6} {:<14} {:<10} {:<10} {:<20} {:<10} {}",
            c.id,
            c.kind,
            c.ward,
            c.status,
            format!("{:.4},{:.4}", c.lat, c.lon),
            c.date,
            c.description
        );
    }
    let open = complaints.iter().filter(|c| c.status.eq_ignore_ascii_case("open")).count();
    let _ = writeln!(out, "\n{} complaints, {} open", complaints.len(), open);
    out
}
