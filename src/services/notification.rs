// src/services/notification.rs
// DOCUMENTATION: Itinerary email rendering and delivery
// PURPOSE: Turn an ItineraryResult into an HTML + plain-text email and hand it to a Mailer

use crate::errors::GuideError;
use crate::models::ItineraryResult;
use crate::services::{Mailer, OutgoingEmail};
use async_trait::async_trait;
use pulldown_cmark::{escape::escape_html, html, Options, Parser};
use reqwest::Client;
use serde::Serialize;
use std::sync::Arc;

const SENDGRID_SEND_URL: &str = "https://api.sendgrid.com/v3/mail/send";

// =============================================================================
// SendGrid transport
// =============================================================================

#[derive(Serialize)]
struct SendGridRequest<'a> {
    personalizations: Vec<SendGridPersonalization<'a>>,
    from: SendGridAddress<'a>,
    subject: &'a str,
    content: Vec<SendGridContent<'a>>,
}

#[derive(Serialize)]
struct SendGridPersonalization<'a> {
    to: Vec<SendGridAddress<'a>>,
}

#[derive(Serialize)]
struct SendGridAddress<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Serialize)]
struct SendGridContent<'a> {
    #[serde(rename = "type")]
    content_type: &'a str,
    value: &'a str,
}

pub struct SendGridMailer {
    client: Client,
    api_key: String,
    sender: String,
    sender_name: String,
}

impl SendGridMailer {
    pub fn new(api_key: String, sender: String, sender_name: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            sender,
            sender_name,
        }
    }

    fn request<'a>(&'a self, email: &'a OutgoingEmail) -> SendGridRequest<'a> {
        SendGridRequest {
            personalizations: vec![SendGridPersonalization {
                to: vec![SendGridAddress {
                    email: &email.to,
                    name: None,
                }],
            }],
            from: SendGridAddress {
                email: &self.sender,
                name: Some(&self.sender_name),
            },
            subject: &email.subject,
            // SendGrid requires text/plain before text/html
            content: vec![
                SendGridContent {
                    content_type: "text/plain",
                    value: &email.text_body,
                },
                SendGridContent {
                    content_type: "text/html",
                    value: &email.html_body,
                },
            ],
        }
    }
}

#[async_trait]
impl Mailer for SendGridMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), GuideError> {
        let response = self
            .client
            .post(SENDGRID_SEND_URL)
            .bearer_auth(&self.api_key)
            .json(&self.request(email))
            .send()
            .await
            .map_err(|e| GuideError::ExternalApiError(format!("Mail request failed: {}", e)))?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(GuideError::ExternalApiError(format!(
                "Mail API status: {}, body: {}",
                status, body
            )))
        }
    }
}

/// Used when no mail transport is configured
pub struct DisabledMailer;

#[async_trait]
impl Mailer for DisabledMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), GuideError> {
        log::warn!("Mail transport not configured; not sending to {}", email.to);
        Err(GuideError::ConfigurationError(
            "SENDGRID_API_KEY is not set".to_string(),
        ))
    }
}

// =============================================================================
// Dispatcher
// =============================================================================

pub struct NotificationDispatcher {
    mailer: Arc<dyn Mailer>,
}

impl NotificationDispatcher {
    pub fn new(mailer: Arc<dyn Mailer>) -> Self {
        Self { mailer }
    }

    /// Render and send the guide to its email address
    /// DOCUMENTATION: Returns InvalidInput when the guide carries no address
    pub async fn dispatch(&self, guide: &ItineraryResult) -> Result<(), GuideError> {
        let email = render(guide)?;
        self.mailer.send(&email).await?;
        log::info!("Travel guide for {} sent to {}", guide.destination, email.to);
        Ok(())
    }
}

/// Build the outgoing email for a guide
pub fn render(guide: &ItineraryResult) -> Result<OutgoingEmail, GuideError> {
    let to = guide
        .email
        .clone()
        .ok_or_else(|| GuideError::InvalidInput("guide has no email address".to_string()))?;

    Ok(OutgoingEmail {
        to,
        subject: format!("Your Travel Itinerary for {}", guide.destination),
        html_body: render_html(guide),
        text_body: render_text(guide),
    })
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    match escape_html(&mut out, text) {
        Ok(()) => out,
        Err(_) => String::new(),
    }
}

fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let mut out = String::new();
    html::push_html(&mut out, Parser::new_ext(markdown, options));
    out
}

fn detail_rows(guide: &ItineraryResult) -> Vec<(&'static str, String)> {
    vec![
        ("Destination", guide.destination.clone()),
        (
            "Dates",
            format!("{} to {}", guide.start_date, guide.end_date),
        ),
        ("Duration", format!("{} days", guide.number_of_days)),
        ("Travelers", guide.travelers.to_string()),
        ("Budget", guide.budget.clone()),
        ("Interests", guide.interests.clone()),
        ("Special requests", guide.special_requests.clone()),
    ]
}

fn render_html(guide: &ItineraryResult) -> String {
    let details: String = detail_rows(guide)
        .into_iter()
        .map(|(label, value)| {
            format!(
                "<li><strong>{}:</strong> {}</li>",
                label,
                escape(&value)
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<style>
  body {{ font-family: Arial, sans-serif; line-height: 1.6; color: #333; }}
  .container {{ max-width: 680px; margin: 0 auto; padding: 20px; }}
  .header {{ background: #2c7be5; color: #fff; padding: 16px 20px; border-radius: 6px 6px 0 0; }}
  .details {{ background: #f5f8fc; padding: 12px 20px; }}
  .details ul {{ list-style: none; padding: 0; margin: 0; }}
  .itinerary {{ padding: 8px 20px; }}
  .footer {{ font-size: 12px; color: #888; padding: 12px 20px; }}
</style>
</head>
<body>
<div class="container">
  <div class="header"><h1>Your trip to {destination}</h1></div>
  <div class="details">
    <h2>Trip Details</h2>
    <ul>{details}</ul>
  </div>
  <div class="itinerary">
    <h2>Your Itinerary</h2>
    {itinerary}
  </div>
  <div class="footer">Have a great trip! Your Travel Guide Team</div>
</div>
</body>
</html>
"#,
        destination = escape(&guide.destination),
        details = details,
        itinerary = markdown_to_html(&guide.itinerary),
    )
}

fn render_text(guide: &ItineraryResult) -> String {
    let details: String = detail_rows(guide)
        .into_iter()
        .map(|(label, value)| format!("- {}: {}\n", label, value))
        .collect();

    format!(
        "Hello!\n\nHere's your personalized travel guide for {}!\n\n\
         Trip Details:\n{}\nYour Itinerary:\n{}\n\n\
         Have a great trip!\n\nBest regards,\nYour Travel Guide Team\n",
        guide.destination, details, guide.itinerary
    )
}
