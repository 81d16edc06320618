//! CLI administration tool for url-shortener.
//!
//! Talks to a running service over its HTTP API, so it works against any
//! deployment the operator can reach.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL (prompts for the URL when omitted)
//! cargo run --bin admin -- shorten https://example.com --validity 60
//!
//! # Shorten with a custom code
//! cargo run --bin admin -- shorten https://example.com --shortcode promo2025
//!
//! # View statistics for a code
//! cargo run --bin admin -- stats promo2025
//!
//! # Check service health
//! cargo run --bin admin -- health
//! ```
//!
//! # Environment Variables
//!
//! - `SHORTENER_URL` (optional): service base URL (default: `http://localhost:3000`)

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Input;
use reqwest::{Client, Response};
use serde_json::{Value, json};

/// CLI tool for managing url-shortener.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the running service
    #[arg(
        short,
        long,
        env = "SHORTENER_URL",
        default_value = "http://localhost:3000",
        global = true
    )]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Create a short link
    Shorten {
        /// URL to shorten
        url: Option<String>,

        /// Minutes until the link expires
        #[arg(short, long)]
        validity: Option<i64>,

        /// Custom shortcode (3-32 alphanumeric characters)
        #[arg(short = 'c', long)]
        shortcode: Option<String>,
    },

    /// Show statistics for a shortcode
    Stats {
        /// Shortcode to inspect
        code: String,
    },

    /// Check service health
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let server = cli.server.trim_end_matches('/').to_string();
    let client = Client::new();

    match cli.command {
        Commands::Shorten {
            url,
            validity,
            shortcode,
        } => shorten(&client, &server, url, validity, shortcode).await?,
        Commands::Stats { code } => show_stats(&client, &server, &code).await?,
        Commands::Health => show_health(&client, &server).await?,
    }

    Ok(())
}

/// Creates a short link, prompting for the URL if it was not given.
async fn shorten(
    client: &Client,
    server: &str,
    url: Option<String>,
    validity: Option<i64>,
    shortcode: Option<String>,
) -> Result<()> {
    println!("{}", "🔗 Shorten URL".bright_blue().bold());
    println!();

    let url = match url {
        Some(u) => u,
        None => Input::new()
            .with_prompt("URL to shorten")
            .with_initial_text("https://")
            .interact_text()?,
    };

    let mut body = json!({ "url": url });
    if let Some(minutes) = validity {
        body["validity"] = json!(minutes);
    }
    if let Some(code) = &shortcode {
        body["shortcode"] = json!(code);
    }

    let response = client
        .post(format!("{}/shorturls", server))
        .json(&body)
        .send()
        .await
        .with_context(|| format!("Failed to reach {}", server))?;

    let payload = read_success(response).await?;

    println!("{}", "✅ Short link created!".green().bold());
    println!();
    println!(
        "  Short link: {}",
        payload["shortLink"].as_str().unwrap_or("-").bright_yellow().bold()
    );
    println!(
        "  Expires:    {}",
        payload["expiry"].as_str().unwrap_or("-").bright_black()
    );
    println!();

    Ok(())
}

/// Displays statistics and the click history of a shortcode.
///
/// # Output Format
///
/// ```text
/// 📊 Statistics for abc123
///
///   URL:          https://example.com
///   Created:      2025-01-01T12:00:00Z
///   Expires:      2025-01-01T12:30:00Z (ACTIVE)
///   Total clicks: 2
///
///   Timestamp                    Referrer                       Origin
///   ─────────────────────────────────────────────────────────────────────────
///   2025-01-01T12:01:00Z         direct                         203.0.113.7
/// ```
async fn show_stats(client: &Client, server: &str, code: &str) -> Result<()> {
    println!("{} {}", "📊 Statistics for".bright_blue().bold(), code.cyan());
    println!();

    let response = client
        .get(format!("{}/shorturls/{}", server, code))
        .send()
        .await
        .with_context(|| format!("Failed to reach {}", server))?;

    let stats = read_success(response).await?;

    let status = if stats["isExpired"].as_bool().unwrap_or(false) {
        "EXPIRED".red()
    } else {
        "ACTIVE".green()
    };

    println!("  URL:          {}", stats["longUrl"].as_str().unwrap_or("-").cyan());
    println!("  Created:      {}", stats["createdAt"].as_str().unwrap_or("-"));
    println!(
        "  Expires:      {} ({})",
        stats["expiresAt"].as_str().unwrap_or("-"),
        status
    );
    println!(
        "  Last access:  {}",
        stats["lastAccessedAt"].as_str().unwrap_or("never")
    );
    println!(
        "  Total clicks: {}",
        stats["totalClicks"].to_string().bright_white().bold()
    );
    println!();

    let clicks = stats["clicks"].as_array().cloned().unwrap_or_default();
    if clicks.is_empty() {
        println!("{}", "  No clicks recorded".yellow());
        println!();
        return Ok(());
    }

    println!(
        "  {:<28} {:<30} {}",
        "Timestamp".bright_white().bold(),
        "Referrer".bright_white().bold(),
        "Origin".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for click in &clicks {
        println!(
            "  {:<28} {:<30} {}",
            click["timestamp"].as_str().unwrap_or("-").bright_black(),
            click["referrer"].as_str().unwrap_or("-"),
            click["origin"].as_str().unwrap_or("-").cyan()
        );
    }
    println!();

    Ok(())
}

/// Displays service health.
async fn show_health(client: &Client, server: &str) -> Result<()> {
    println!("{}", "🏥 Service Health".bright_blue().bold());
    println!();

    let response = client
        .get(format!("{}/api/health", server))
        .send()
        .await
        .with_context(|| format!("Failed to reach {}", server))?;

    let health = read_success(response).await?;

    let status = health["status"].as_str().unwrap_or("unknown");
    let status = if status == "ok" {
        status.green().bold()
    } else {
        status.red().bold()
    };

    println!("  Status:  {}", status);
    println!(
        "  Service: {} {}",
        health["service"].as_str().unwrap_or("-").cyan(),
        health["version"].as_str().unwrap_or("").bright_black()
    );
    println!("  Links:   {}", health["links"].to_string().bright_white().bold());
    if let Some(queue) = health["audit_queue"]["message"].as_str() {
        println!("  Audit:   {}", queue.bright_black());
    }
    println!();

    Ok(())
}

/// Returns the JSON body of a successful response, or an error carrying the
/// service's error message.
async fn read_success(response: Response) -> Result<Value> {
    let status = response.status();
    let body: Value = response
        .json()
        .await
        .context("Service returned a non-JSON body")?;

    if status.is_success() {
        return Ok(body);
    }

    let message = body["error"]["message"]
        .as_str()
        .unwrap_or("unknown error")
        .to_string();
    println!("{} {}", "❌".red(), message.red());
    anyhow::bail!("Request failed with status {}: {}", status, message)
}
