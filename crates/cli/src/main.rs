//! `informado` command-line client

use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use informado_core::AccessDecision;
use informado_domain::{Assignment, Attachment, Role};
use informado_infra::GatewayError;

use crate::cli::{Cli, Commands};
use crate::context::AppContext;

mod cli;
mod context;
mod logging;
mod navigator;

#[tokio::main]
async fn main() -> Result<()> {
    let loaded_env = dotenvy::dotenv();
    let cli = Cli::parse();
    logging::init(cli.json_logs);

    match loaded_env {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env"),
        Err(err) => tracing::debug!(error = %err, "No .env loaded"),
    }

    let ctx = AppContext::new(&cli)?;
    run(&ctx, cli.command).await
}

async fn run(ctx: &AppContext, command: Commands) -> Result<()> {
    match command {
        Commands::Login { email, password } => {
            let pair = ctx.session.login(&email, &password).await?;
            println!("Signed in as {}", pair.role);
            report_destination(ctx);
        }
        Commands::Logout => {
            ctx.session.logout();
            println!("Signed out");
        }
        Commands::Whoami => {
            if !ctx.session.is_authenticated() {
                bail!("not signed in");
            }
            println!("{}", serde_json::to_string_pretty(&ctx.session.current_user())?);
        }
        Commands::Check { role } => {
            let expected: Role = role.parse().map_err(anyhow::Error::msg)?;
            match ctx.session.check_access(expected) {
                AccessDecision::Granted(role) => println!("Access granted ({role})"),
                AccessDecision::Redirected(role) => {
                    println!("Signed in as {role}, not {expected}");
                    report_destination(ctx);
                }
                AccessDecision::Denied => bail!("not signed in"),
            }
        }
        Commands::Refresh => {
            if !ctx.session.refresh().await.is_refreshed() {
                bail!("session ended, sign in again");
            }
            println!("Tokens refreshed");
        }
        Commands::Get { path } => match ctx.gateway.get(&path).await {
            Ok(response) => {
                println!("{}", response.status());
                println!("{}", response.text());
            }
            Err(GatewayError::Unauthenticated) => bail!("not signed in"),
            Err(err) => return Err(err.into()),
        },
        Commands::Reports { page, size } => {
            print_json(&ctx.reports.list_reports(page, size).await?)?;
        }
        Commands::Incoming { page } => {
            print_json(&ctx.reports.incoming_reports(page).await?)?;
        }
        Commands::Assign { report_id, worker_id, report_type, comment } => {
            let assignment =
                Assignment { report_id, worker_id, new_report_type: report_type, comment };
            ctx.reports.assign_report(&assignment).await?;
            println!("Report {report_id} assigned");
        }
        Commands::Tasks { page } => {
            print_json(&ctx.reports.assigned_tasks(page).await?)?;
        }
        Commands::Upload { photo } => {
            let url = ctx.reports.upload_photo(&read_attachment(&photo)?).await?;
            println!("{url}");
        }
        Commands::Complete { task_id, evidence, comment } => {
            ctx.reports.complete_task(task_id, &read_attachment(&evidence)?, &comment).await?;
            println!("Task {task_id} completed");
        }
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn read_attachment(path: &Path) -> Result<Attachment> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let file_name =
        path.file_name().map_or_else(|| "photo".to_string(), |name| name.to_string_lossy().into_owned());
    Ok(Attachment::new(file_name, content_type_for(path), bytes))
}

fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()).map(str::to_ascii_lowercase).as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        _ => "application/octet-stream",
    }
}

fn report_destination(ctx: &AppContext) {
    if let Some(destination) = ctx.navigator.last() {
        println!("-> {destination}");
    }
}
