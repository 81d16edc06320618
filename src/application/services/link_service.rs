//! Link creation and redirect service.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::debug;

use crate::domain::entities::{ClickEvent, NewShortLink, ShortLinkRecord};
use crate::domain::expiry::{DEFAULT_VALIDITY_MINUTES, compute_expiry, resolve_validity};
use crate::domain::repositories::{ClickOutcome, LinkRegistry};
use crate::error::AppError;
use crate::utils::code_generator::{
    DEFAULT_CODE_LENGTH, generate_candidate, is_valid_shortcode, validate_custom_code,
};
use crate::utils::url_validator::validate_long_url;

/// Default number of random candidates tried before creation gives up.
pub const DEFAULT_MAX_GENERATION_ATTEMPTS: usize = 5;

/// Tunables for link creation.
#[derive(Debug, Clone, Copy)]
pub struct CreationPolicy {
    pub default_validity_minutes: i64,
    pub code_length: usize,
    pub max_generation_attempts: usize,
}

impl Default for CreationPolicy {
    fn default() -> Self {
        Self {
            default_validity_minutes: DEFAULT_VALIDITY_MINUTES,
            code_length: DEFAULT_CODE_LENGTH,
            max_generation_attempts: DEFAULT_MAX_GENERATION_ATTEMPTS,
        }
    }
}

/// Input for creating a short link.
#[derive(Debug, Clone)]
pub struct CreateShortLink {
    pub url: String,
    pub validity: Option<i64>,
    pub shortcode: Option<String>,
}

/// Service for creating short links and resolving redirects.
///
/// All validation runs before the registry is touched, so a rejected request
/// never leaves a partial record behind.
pub struct LinkService<R: LinkRegistry> {
    registry: Arc<R>,
    policy: CreationPolicy,
}

impl<R: LinkRegistry> LinkService<R> {
    /// Creates a new link service.
    pub fn new(registry: Arc<R>, policy: CreationPolicy) -> Self {
        Self { registry, policy }
    }

    /// Creates a short link.
    ///
    /// # Code Assignment
    ///
    /// - A custom `shortcode` is validated and inserted atomically; if the
    ///   code is taken the request fails with a conflict
    /// - Otherwise up to `max_generation_attempts` random codes are tried
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a bad URL, validity or shortcode.
    /// Returns [`AppError::Conflict`] if the custom shortcode is in use.
    /// Returns [`AppError::Capacity`] if every generated candidate collided.
    pub async fn create_short_link(
        &self,
        request: CreateShortLink,
    ) -> Result<ShortLinkRecord, AppError> {
        validate_long_url(&request.url).map_err(|e| {
            AppError::bad_request(
                "Invalid or missing 'url' field",
                json!({ "reason": e.to_string() }),
            )
        })?;

        let validity = resolve_validity(request.validity, self.policy.default_validity_minutes)?;

        if let Some(code) = &request.shortcode {
            validate_custom_code(code)?;
        }

        let created_at = Utc::now();
        let expires_at = compute_expiry(created_at, validity).ok_or_else(|| {
            AppError::bad_request(
                "'validity' is too large",
                json!({ "validity": validity }),
            )
        })?;

        let CreateShortLink { url, shortcode, .. } = request;

        match shortcode {
            Some(code) => {
                let record = ShortLinkRecord::from_new(NewShortLink {
                    shortcode: code.clone(),
                    long_url: url,
                    created_at,
                    expires_at,
                });

                if !self.registry.insert_if_absent(record.clone()).await? {
                    return Err(AppError::conflict(
                        "Shortcode already in use",
                        json!({ "shortcode": code }),
                    ));
                }

                metrics::counter!("links_created_total", "kind" => "custom").increment(1);
                Ok(record)
            }
            None => self.insert_generated(url, created_at, expires_at).await,
        }
    }

    /// Follows a short link, recording the click if the link is live.
    ///
    /// Returns the updated record; its `long_url` is the redirect target.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a malformed code.
    /// Returns [`AppError::NotFound`] for an unknown code.
    /// Returns [`AppError::Expired`] if the link expired before `click.timestamp`.
    pub async fn follow(&self, code: &str, click: ClickEvent) -> Result<ShortLinkRecord, AppError> {
        ensure_well_formed(code)?;

        let now = click.timestamp;
        let outcome = self.registry.record_click(code, click, now).await?;

        match outcome {
            ClickOutcome::Recorded(record) => {
                metrics::counter!("redirects_total", "outcome" => "recorded").increment(1);
                Ok(record)
            }
            ClickOutcome::Expired(record) => {
                metrics::counter!("redirects_total", "outcome" => "expired").increment(1);
                Err(AppError::expired(
                    "Short link has expired",
                    json!({ "shortcode": code, "expiresAt": record.expires_at }),
                ))
            }
            ClickOutcome::NotFound => {
                metrics::counter!("redirects_total", "outcome" => "not_found").increment(1);
                Err(shortcode_not_found(code))
            }
        }
    }

    /// Constructs the full short URL from a base URL and a code.
    pub fn get_short_url(&self, base_url: &str, code: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), code)
    }

    /// Tries random candidates until one is free or the attempt budget runs out.
    async fn insert_generated(
        &self,
        long_url: String,
        created_at: chrono::DateTime<Utc>,
        expires_at: chrono::DateTime<Utc>,
    ) -> Result<ShortLinkRecord, AppError> {
        for attempt in 1..=self.policy.max_generation_attempts {
            let code = generate_candidate(self.policy.code_length)?;
            let record = ShortLinkRecord::from_new(NewShortLink {
                shortcode: code,
                long_url: long_url.clone(),
                created_at,
                expires_at,
            });

            if self.registry.insert_if_absent(record.clone()).await? {
                metrics::counter!("links_created_total", "kind" => "generated").increment(1);
                return Ok(record);
            }

            debug!(attempt, shortcode = %record.shortcode, "Generated shortcode collided");
        }

        Err(AppError::capacity(
            "Failed to generate unique shortcode",
            json!({ "attempts": self.policy.max_generation_attempts }),
        ))
    }
}

/// Rejects codes that could never have been registered.
pub(crate) fn ensure_well_formed(code: &str) -> Result<(), AppError> {
    if is_valid_shortcode(code) {
        Ok(())
    } else {
        Err(AppError::bad_request(
            "Invalid shortcode",
            json!({ "shortcode": code }),
        ))
    }
}

pub(crate) fn shortcode_not_found(code: &str) -> AppError {
    AppError::not_found("Shortcode not found", json!({ "shortcode": code }))
}
