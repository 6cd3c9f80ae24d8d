//! talent8: Command-line interface for the job-openings search MCP server

use anyhow::Result;
use clap::{Parser, Subcommand};
use rmcp::{
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    schemars, tool, ServerHandler, ServiceExt,
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use talent8::config::AppConfig;
use talent8::kb::KnowledgeBaseClient;
use talent8::query::{JobQuery, DEFAULT_MAX_RESULTS};
use talent8::report::format_job_openings;
use tokio::io::{stdin, stdout};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// ============================================================================
// MCP Server Implementation
// ============================================================================

/// MCP server exposing the job-openings retrieval tool
#[derive(Clone)]
struct JobOpeningsServer {
    kb: Arc<KnowledgeBaseClient>,
}

/// Request parameters for the get_job_openings tool
#[derive(Debug, Deserialize, JsonSchema)]
struct GetJobOpeningsParams {
    /// Search query for job openings (e.g. "software engineer")
    #[serde(default)]
    query_text: String,
    /// Maximum number of results to return (default: 10, max: 100)
    #[serde(default = "default_max_results")]
    max_results: i32,
}

fn default_max_results() -> i32 {
    DEFAULT_MAX_RESULTS
}

#[tool(tool_box)]
impl JobOpeningsServer {
    fn new(kb: KnowledgeBaseClient) -> Self {
        Self { kb: Arc::new(kb) }
    }

    /// Search the knowledge base for job openings
    #[tool(
        description = "Search the job openings knowledge base. Returns matching openings with relevance scores, job attributes and source locations."
    )]
    async fn get_job_openings(
        &self,
        #[tool(aggr)] params: GetJobOpeningsParams,
    ) -> Result<CallToolResult, rmcp::Error> {
        let query = match JobQuery::new(params.query_text, Some(params.max_results)) {
            Ok(query) => query,
            Err(e) => {
                tracing::warn!("rejected get_job_openings call: {e}");
                return Ok(CallToolResult::error(vec![Content::text(e.to_string())]));
            }
        };

        tracing::info!(
            query = query.query_text(),
            max_results = query.max_results(),
            "processing get_job_openings call"
        );

        match self.kb.retrieve_job_openings(&query).await {
            Ok(openings) => Ok(CallToolResult::success(vec![Content::text(
                format_job_openings(&openings),
            )])),
            Err(e) => {
                tracing::error!("retrieval failed: {e}");
                Ok(CallToolResult::error(vec![Content::text(
                    "Failed to retrieve job openings. Please try again later.",
                )]))
            }
        }
    }
}

#[tool(tool_box)]
impl ServerHandler for JobOpeningsServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Job openings search server backed by an AWS Bedrock Knowledge Base".into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

// ============================================================================
// CLI Implementation
// ============================================================================

/// talent8: MCP server for job-openings search over an AWS Bedrock Knowledge Base
#[derive(Parser)]
#[command(name = "talent8")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the MCP server on stdio
    Serve,
    /// Run a single retrieval and print the report (for testing)
    Search {
        /// Search query
        query: String,

        /// Maximum number of results to return
        #[arg(short, long, default_value = "10")]
        max_results: i32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging (to stderr to not interfere with MCP stdio)
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve => {
            let kb = KnowledgeBaseClient::new(&config).await?;
            eprintln!("talent8 MCP server starting... (stdio transport)");

            let server = JobOpeningsServer::new(kb);
            let transport = (stdin(), stdout());
            let service = server.serve(transport).await?;

            // Wait for service to complete
            let _quit_reason = service.waiting().await?;
            Ok(())
        }
        Commands::Search { query, max_results } => {
            let kb = KnowledgeBaseClient::new(&config).await?;
            let query = JobQuery::new(query, Some(max_results))?;

            let openings = kb.retrieve_job_openings(&query).await?;
            println!("{}", format_job_openings(&openings));
            Ok(())
        }
    }
}
