//! User feedback intake and optional delivery through an HTTP mail API.

pub mod handlers;

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::scoring::contact::looks_like_email;

const MAX_RETRIES: u32 = 3;
const DEFAULT_SUBJECT: &str = "Resume Analyzer Feedback";

#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub rating: Option<u8>,
}

impl FeedbackRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("Name is required".to_string()));
        }
        if !looks_like_email(self.email.trim()) {
            return Err(AppError::Validation(
                "A valid email address is required".to_string(),
            ));
        }
        if self.message.trim().is_empty() {
            return Err(AppError::Validation("Message is required".to_string()));
        }
        if let Some(rating) = self.rating {
            if !(1..=5).contains(&rating) {
                return Err(AppError::Validation(
                    "Rating must be between 1 and 5".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub fn subject_line(&self) -> String {
        match self.subject.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => format!("[Feedback] {s}"),
            _ => DEFAULT_SUBJECT.to_string(),
        }
    }

    pub fn body_text(&self) -> String {
        let rating = self
            .rating
            .map(|r| format!("{r}/5"))
            .unwrap_or_else(|| "not given".to_string());
        format!(
            "From: {} <{}>\nRating: {rating}\n\n{}\n",
            self.name.trim(),
            self.email.trim(),
            self.message.trim()
        )
    }
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Mail API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Mail API still failing after {retries} attempts")]
    RetriesExhausted { retries: u32 },
}

/// Connection settings for the mail API; present only when configured.
#[derive(Debug, Clone)]
pub struct MailSettings {
    pub api_url: String,
    pub api_key: String,
    pub from: String,
    pub recipient: String,
}

#[derive(Debug, Serialize)]
struct OutgoingMail<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
    reply_to: &'a str,
}

#[derive(Clone)]
pub struct FeedbackMailer {
    client: Client,
    settings: MailSettings,
    base_delay: Duration,
}

impl FeedbackMailer {
    pub fn new(settings: MailSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .context("Failed to build mail HTTP client")?;
        Ok(Self {
            client,
            settings,
            base_delay: Duration::from_secs(1),
        })
    }

    #[cfg(test)]
    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    /// Posts the feedback to the mail API.
    /// Retries on 429 and 5xx with exponential backoff.
    pub async fn send(&self, feedback: &FeedbackRequest) -> Result<(), MailError> {
        let subject = feedback.subject_line();
        let text = feedback.body_text();
        let mail = OutgoingMail {
            from: &self.settings.from,
            to: &self.settings.recipient,
            subject: &subject,
            text: &text,
            reply_to: feedback.email.trim(),
        };

        let mut last_error: Option<MailError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = self.base_delay * (1 << (attempt - 1));
                warn!(
                    "Mail delivery attempt {attempt} failed, retrying after {}ms",
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self
                .client
                .post(&self.settings.api_url)
                .bearer_auth(&self.settings.api_key)
                .json(&mail)
                .send()
                .await
            {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(MailError::Http(e));
                    continue;
                }
            };

            let status = response.status();
            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                last_error = Some(MailError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(MailError::Api {
                    status: status.as_u16(),
                    message: body,
                });
            }

            debug!("Feedback mail accepted with status {status}");
            return Ok(());
        }

        Err(last_error.unwrap_or(MailError::RetriesExhausted {
            retries: MAX_RETRIES,
        }))
    }
}
