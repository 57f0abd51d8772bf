use crate::api::ApiClient;
use crate::model::{ClientConfig, Hurricane};
use anyhow::{Context, Result};
use clap::Parser;

#[derive(Debug, Parser, Clone)]
#[command(
    name = "hurricane-landfall-cli",
    version,
    about = "Browse Florida hurricane landfall records with optional TUI"
)]
pub struct Cli {
    /// Base URL for the landfall records API
    #[arg(long, default_value = "http://127.0.0.1:5000")]
    pub base_url: String,

    /// Print records as JSON and exit (no TUI)
    #[arg(long)]
    pub json: bool,

    /// Print a text table and exit (no TUI)
    #[arg(long)]
    pub text: bool,

    /// Run silently: suppress all output except errors (for cron usage)
    #[arg(long)]
    pub silent: bool,

    /// Trigger the server-side CSV export (after the load in JSON/text mode)
    #[arg(long)]
    pub export: bool,
}

pub async fn run(args: Cli) -> Result<()> {
    // Validate that --silent can only be used with --export
    if args.silent && !args.export {
        return Err(anyhow::anyhow!(
            "--silent can only be used with --export. Use --silent --export together."
        ));
    }

    // Silent mode takes precedence over other output modes
    if args.silent {
        return run_export_only(args).await;
    }

    if !args.json && !args.text {
        #[cfg(feature = "tui")]
        {
            return crate::tui::run(args).await;
        }
        #[cfg(not(feature = "tui"))]
        {
            // Fallback when built without TUI support.
            return run_text(args).await;
        }
    }

    if args.json {
        return run_json(args).await;
    }

    run_text(args).await
}

/// Build a `ClientConfig` from CLI arguments.
pub fn build_config(args: &Cli) -> ClientConfig {
    ClientConfig {
        base_url: args.base_url.clone(),
        user_agent: format!("hurricane-landfall-cli/{}", env!("CARGO_PKG_VERSION")),
    }
}

async fn fetch_records(client: &ApiClient) -> Result<Vec<Hurricane>> {
    client
        .fetch_florida_landfalls()
        .await
        .context("fetch Florida landfall records")
}

/// Trigger the export with no output; the exit code carries the outcome.
async fn run_export_only(args: Cli) -> Result<()> {
    let client = ApiClient::new(&build_config(&args))?;
    client
        .request_csv_export()
        .await
        .context("server-side CSV export failed")?;
    Ok(())
}

async fn run_json(args: Cli) -> Result<()> {
    let client = ApiClient::new(&build_config(&args))?;
    let records = fetch_records(&client).await?;

    if args.export {
        client
            .request_csv_export()
            .await
            .context("server-side CSV export failed")?;
        eprintln!("CSV exported successfully");
    }

    let out = serde_json::to_string_pretty(&records)?;
    println!("{}", out);
    Ok(())
}

async fn run_text(args: Cli) -> Result<()> {
    let client = ApiClient::new(&build_config(&args))?;
    let records = fetch_records(&client).await?;

    let summary = crate::text_summary::build_text_summary(&records);
    for line in summary.lines {
        println!("{}", line);
    }

    if args.export {
        client
            .request_csv_export()
            .await
            .context("server-side CSV export failed")?;
        println!("CSV exported successfully");
    }

    Ok(())
}
