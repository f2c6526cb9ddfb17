//! Polling client for the llms.txt generator service.
//!
//! Starts a crawl job, then polls the status endpoint on a fixed interval
//! until a terminal response arrives. A 202 means "still working": the
//! progress body is rendered and the loop sleeps before retrying. 200 ends
//! the loop with the final document; any other status (or a network error
//! polling) is reported and ends the loop as a failure.

use std::env;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use console::style;
use reqwest::StatusCode;
use serde::Deserialize;

/// Fixed wait between polls. Cadence lives entirely in this client; the
/// service never sleeps on its side.
const POLL_INTERVAL: Duration = Duration::from_secs(5);

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

#[derive(Parser)]
#[command(
    name = "llmstxt",
    about = "Crawl a website and generate an llms.txt document"
)]
struct Args {
    /// Target site to crawl
    url: String,

    /// Maximum number of pages to crawl (1-500, service defaults to 20)
    #[arg(long)]
    limit: Option<u32>,

    /// Base URL of the generator service (falls back to LLMSTXT_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,
}

#[derive(Deserialize)]
struct JobStarted {
    job_id: String,
    status_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let base_url = args
        .base_url
        .or_else(|| env::var("LLMSTXT_BASE_URL").ok())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .context("Failed to build HTTP client")?;

    println!(
        "{} {}",
        "🚀 Starting crawl for:".bright_cyan().bold(),
        args.url
    );

    let job = start_job(&client, &base_url, &args.url, args.limit).await?;
    println!(
        "{} Job started successfully! {} {}",
        "✔".green(),
        "job_id:".bold(),
        job.job_id
    );

    let status_url = format!("{}{}", base_url, job.status_url);
    println!("{}", style(format!("Polling status at: {}", status_url)).yellow());

    poll_until_done(&client, &status_url, &args.url).await
}

/// Start the crawl job and return the handle the service hands back.
async fn start_job(
    client: &reqwest::Client,
    base_url: &str,
    url: &str,
    limit: Option<u32>,
) -> Result<JobStarted> {
    let mut body = serde_json::json!({ "url": url });
    if let Some(limit) = limit {
        body["limit"] = limit.into();
    }

    let response = client
        .post(format!("{}/generate-llms-txt", base_url))
        .json(&body)
        .send()
        .await
        .context("Error starting job")?;

    let status = response.status();
    if !status.is_success() {
        let detail = response.text().await.unwrap_or_default();
        bail!("Error starting job ({}): {}", status, detail);
    }

    let job: JobStarted = response
        .json()
        .await
        .context("No job_id returned from API")?;
    Ok(job)
}

/// Poll the status endpoint until a terminal response.
async fn poll_until_done(client: &reqwest::Client, status_url: &str, target: &str) -> Result<()> {
    loop {
        let response = match client.get(status_url).send().await {
            Ok(response) => response,
            Err(err) => {
                // Network failure polling is terminal, not retried
                eprintln!("{} {}", "Error polling for status:".bright_red().bold(), err);
                bail!("Polling failed");
            }
        };

        match response.status() {
            StatusCode::ACCEPTED => {
                let progress = response.text().await.unwrap_or_default();
                println!("{}", style(progress).yellow().dim());
                tokio::time::sleep(POLL_INTERVAL).await;
            }
            StatusCode::OK => {
                let document = response.text().await.context("Failed to read document")?;
                println!("{}", "✔ Crawl completed!".green().bold());
                println!();
                println!(
                    "{}",
                    style(format!("─── llms.txt for {} ───", target)).green()
                );
                println!("{}", document);
                return Ok(());
            }
            status => {
                let detail = response.text().await.unwrap_or_default();
                bail!("Job ended with an error ({}): {}", status, detail);
            }
        }
    }
}
