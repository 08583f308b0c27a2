//! civica: terminal client for the Smart City assistant.
//!
//! Talks to the agent service directly for chat, uploads and stats, and reads
//! complaints from the local CSV.

mod cli;
mod render;

use std::process::ExitCode;

use clap::Parser;
use civica_agent::AgentClient;
use civica_common::{load_complaints, ComplaintFilter, DocumentMetadata, QueryRequest};
use civica_config::Config;
use console::style;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", style("error:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let mut config = Config::load()?;
    if let Some(url) = cli.agent_url {
        config.agent.base_url = url;
    }

    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = log_filter(rust_log.as_deref(), &config.logging.level);
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    match cli.command {
        Commands::Ask { question, top_k, agents } => {
            let client = AgentClient::new(&config.agent)?;
            let request = QueryRequest::new(question).with_top_k(top_k).with_agents(agents);
            let response = client.query(&request).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                print!("{}", render::render_answer(&response));
            }
        }

        Commands::Upload { path, uploaded_by, tags, ward } => {
            let client = AgentClient::new(&config.agent)?;
            let source_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .ok_or_else(|| anyhow::anyhow!("{} is not a file", path.display()))?;
            let metadata = DocumentMetadata {
                source_name,
                uploaded_by: Some(uploaded_by),
                geo: None,
                ward,
                tags: if tags.is_empty() { vec!["uploaded".to_string()] } else { tags },
            };
            let response = client.ingest_file(&path, Some(&metadata)).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                println!("{}", style(render::upload_message(&response)).green());
            }
        }

        Commands::Status => {
            let client = AgentClient::new(&config.agent)?;
            let status = client.status().await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                print!("{}", render::render_status(&status));
            }
        }

        Commands::Complaints { ward, status, kind, csv } => {
            let path = csv.unwrap_or(config.data.complaints_csv);
            let filter = ComplaintFilter { ward, status, kind };
            let complaints = filter.apply(load_complaints(&path).await?);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&complaints)?);
            } else {
                print!("{}", render::render_complaints(&complaints));
            }
        }
    }

    Ok(())
}

/// RUST_LOG wins over the configured level.
fn log_filter(rust_log: Option<&str>, level: &str) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(level))
}
