//! Link creation and resolution service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::{debug, warn};

use crate::domain::entities::{Link, NewLink, default_expiry};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::generate_code;

/// Service for creating and resolving shortened links.
///
/// Owns the expiry and single-use policy; the repository only stores rows.
#[derive(Clone)]
pub struct LinkService {
    link_repository: Arc<dyn LinkRepository>,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(link_repository: Arc<dyn LinkRepository>) -> Self {
        Self { link_repository }
    }

    /// Checks that the link store is reachable.
    pub async fn check_storage(&self) -> Result<(), AppError> {
        self.link_repository.ping().await
    }

    /// Creates a short link.
    ///
    /// # Arguments
    ///
    /// - `url` - The destination URL, stored verbatim
    /// - `single_use` - Delete after the first redirect (default `false`)
    /// - `expires` - Expiry as Unix seconds (default: a thousand years from now)
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `expires` is not a representable instant.
    /// Returns [`AppError::Conflict`] if the generated code is already taken,
    /// which only happens for two creates within the same nanosecond.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn create_link(
        &self,
        url: String,
        single_use: Option<bool>,
        expires: Option<i64>,
    ) -> Result<Link, AppError> {
        let expires_at = match expires {
            Some(secs) => DateTime::<Utc>::from_timestamp(secs, 0).ok_or_else(|| {
                AppError::bad_request(
                    "Expiry timestamp is out of range",
                    json!({ "expires": secs }),
                )
            })?,
            None => default_expiry(Utc::now()),
        };

        let new_link = NewLink {
            code: generate_code(),
            url,
            single_use: single_use.unwrap_or(false),
            expires_at,
        };

        let link = self.link_repository.create(new_link).await?;
        metrics::counter!("links_created_total").increment(1);
        debug!(code = %link.code, single_use = link.single_use, "Link created");

        Ok(link)
    }

    /// Resolves a code to a live link.
    ///
    /// # Resolution
    ///
    /// - Unknown code, or a store error during lookup: [`AppError::NotFound`]
    /// - `now >= expires_at`: the link is deleted (best-effort) and
    ///   [`AppError::Gone`] is returned
    /// - Otherwise the link is returned. Single-use links are **not** deleted
    ///   here; the caller consumes them once the redirect has been issued.
    pub async fn resolve(&self, code: &str, now: DateTime<Utc>) -> Result<Link, AppError> {
        let link = match self.link_repository.find_by_code(code).await {
            Ok(Some(link)) => link,
            Ok(None) => return Err(not_found(code)),
            Err(e) => {
                warn!(code, error = %e, "Lookup failed, reporting link as missing");
                return Err(not_found(code));
            }
        };

        if link.is_expired_at(now) {
            metrics::counter!("links_expired_total").increment(1);
            self.discard(code).await;
            return Err(AppError::gone(
                "URL has expired",
                json!({ "code": code, "expires_at": link.expires_at }),
            ));
        }

        metrics::counter!("links_resolved_total").increment(1);
        Ok(link)
    }

    /// Deletes a single-use link after it has been delivered.
    ///
    /// Failures are logged and never reported to the caller.
    pub async fn consume(&self, code: &str) {
        self.discard(code).await;
    }

    async fn discard(&self, code: &str) {
        match self.link_repository.delete(code).await {
            Ok(true) => debug!(code, "Link deleted"),
            Ok(false) => debug!(code, "Link already deleted"),
            Err(e) => warn!(code, error = %e, "Failed to delete link"),
        }
    }
}

fn not_found(code: &str) -> AppError {
    AppError::not_found("URL not found", json!({ "code": code }))
}
