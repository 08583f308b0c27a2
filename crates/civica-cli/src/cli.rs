use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "civica", version, about = "Smart City assistant from the terminal")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(long, global = true, help = "Agent service base URL (overrides config and PYTHON_AGENT_URL)")]
    pub agent_url: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask the assistant a question
    Ask {
        question: String,
        #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u32).range(1..=10))]
        top_k: u32,
        #[arg(long = "agent", help = "Restrict routing to these agents (repeatable)")]
        agents: Vec<String>,
    },
    /// Upload a document into the knowledge base
    Upload {
        path: PathBuf,
        #[arg(long, default_value = "user")]
        uploaded_by: String,
        #[arg(long = "tag", help = "Tag the document (repeatable, default: uploaded)")]
        tags: Vec<String>,
        #[arg(long)]
        ward: Option<String>,
    },
    /// Show agent service statistics
    Status,
    /// List complaints from the local CSV
    Complaints {
        #[arg(long)]
        ward: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long = "type")]
        kind: Option<String>,
        #[arg(long, help = "CSV path (overrides data.complaints_csv)")]
        csv: Option<PathBuf>,
    },
}
