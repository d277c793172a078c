// src/bin/safety_check.rs
// Interactive safety alert lookup against a running travel-guide service
use anyhow::{bail, Context, Result};
use dotenv::dotenv;
use reqwest::Client;
use serde::Deserialize;
use std::env;
use std::io::{self, BufRead, Write};
use std::time::Duration;

// --- ANSI colors ---
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

#[derive(Deserialize, Debug)]
struct Alert {
    #[serde(default)]
    alert: String,
    #[serde(default)]
    date: String,
    #[serde(default)]
    link: String,
}

#[derive(Deserialize, Debug)]
struct AlertsResponse {
    #[serde(default)]
    alerts: Vec<Alert>,
}

#[derive(Deserialize, Debug)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize, Debug)]
struct ErrorDetail {
    message: String,
}

struct SafetyChecker {
    base_url: String,
    client: Client,
}

impl SafetyChecker {
    fn new(base_url: String) -> Result<Self> {
        // Each lookup can run several scrape queries back to back
        let client = Client::builder()
            .timeout(Duration::from_secs(600))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { base_url, client })
    }

    async fn check_service_health(&self) -> bool {
        match self.client.get(format!("{}/health", self.base_url)).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    async fn fetch_alerts(&self, destination: &str) -> Result<Vec<Alert>> {
        let response = self
            .client
            .get(format!("{}/api/safety_alerts", self.base_url))
            .query(&[("destination", destination)])
            .send()
            .await
            .context("Request to safety endpoint failed")?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ErrorBody>().await {
                Ok(body) => body.error.message,
                Err(_) => "Unknown error".to_string(),
            };
            bail!("HTTP {} - {}", status, message);
        }

        let body: AlertsResponse = response
            .json()
            .await
            .context("Failed to parse response JSON")?;
        Ok(body.alerts)
    }

    fn print_alerts(&self, destination: &str, alerts: &[Alert]) {
        if alerts.is_empty() {
            println!(
                "{}No immediate safety alerts found for {}.{}",
                GREEN, destination, RESET
            );
            println!("Note: Please always check official travel advisories for the most up-to-date information.");
            return;
        }

        println!(
            "\n{}Found {} safety alert(s):{}",
            BOLD,
            alerts.len(),
            RESET
        );
        for (idx, alert) in alerts.iter().enumerate() {
            println!("\n{}Alert {}:{}", YELLOW, idx + 1, RESET);
            println!("Date: {}", or_na(&alert.date));
            println!("Alert: {}", or_na(&alert.alert));
            println!("Source: {}", or_na(&alert.link));
            println!("{}", "-".repeat(80));
        }
    }
}

fn or_na(value: &str) -> &str {
    if value.trim().is_empty() {
        "N/A"
    } else {
        value
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let base_url = env::var("TRAVEL_GUIDE_API_URL")
        .unwrap_or_else(|_| "http://localhost:5000".to_string());
    let checker = SafetyChecker::new(base_url)?;

    println!("\n{}Checking service status...{}", CYAN, RESET);
    if !checker.check_service_health().await {
        println!("{}Service unavailable at {}.{}", RED, checker.base_url, RESET);
        println!("{}Please ensure travel-guide is running (cargo run){}", YELLOW, RESET);
        std::process::exit(1);
    }
    println!("{}Service available{}", GREEN, RESET);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("\nEnter destination address (or 'quit' to exit): ");
        io::stdout().flush()?;

        let destination = match lines.next() {
            Some(line) => line?.trim().to_string(),
            None => break,
        };

        if destination.eq_ignore_ascii_case("quit") {
            break;
        }
        if destination.is_empty() {
            println!("Please enter a valid destination.");
            continue;
        }

        println!("\n{}Checking safety alerts for {}...{}", CYAN, destination, RESET);
        match checker.fetch_alerts(&destination).await {
            Ok(alerts) => checker.print_alerts(&destination, &alerts),
            Err(e) => {
                println!("{}Error checking alerts: {:#}{}", RED, e, RESET);
                println!("Please try again or check official travel advisory websites.");
            }
        }
    }

    println!("\nExiting safely...");
    Ok(())
}
