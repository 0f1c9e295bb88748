//! Command-line arguments

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use informado_domain::constants::DEFAULT_PAGE_SIZE;
use informado_domain::StorageBackend;

#[derive(Debug, Parser)]
#[command(name = "informado", version, about = "Trujillo Informado client")]
pub struct Cli {
    /// Config file (JSON or TOML); probed in standard locations when absent
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the backend base URL
    #[arg(long, global = true, env = "INFORMADO_API_BASE_URL")]
    pub base_url: Option<String>,

    /// Override where the session is kept
    #[arg(long, global = true, value_parser = parse_backend)]
    pub storage: Option<StorageBackend>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign in and store the session
    Login { email: String, password: String },
    /// End the session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Verify the session belongs to a role
    Check { role: String },
    /// Exchange the refresh token for a new pair
    Refresh,
    /// Authenticated GET of an API path, printing status and body
    Get { path: String },
    /// List reports, newest first
    Reports {
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        size: u32,
    },
    /// Reports awaiting supervisor triage
    Incoming {
        #[arg(long, default_value_t = 0)]
        page: u32,
    },
    /// Assign a report to a worker
    Assign {
        report_id: i64,
        worker_id: String,
        #[arg(long)]
        report_type: Option<String>,
        #[arg(long)]
        comment: Option<String>,
    },
    /// Tasks assigned to the signed-in worker
    Tasks {
        #[arg(long, default_value_t = 0)]
        page: u32,
    },
    /// Upload a report photo (JPEG or PNG) and print its URL
    Upload { photo: PathBuf },
    /// Mark a task resolved with an evidence photo
    Complete {
        task_id: i64,
        evidence: PathBuf,
        #[arg(long, default_value = "")]
        comment: String,
    },
}

fn parse_backend(raw: &str) -> Result<StorageBackend, String> {
    raw.parse().map_err(|err: informado_domain::InformadoError| err.to_string())
}
