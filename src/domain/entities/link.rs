//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Months, Utc};

/// How far in the future a link expires when the caller gives no expiry.
pub const DEFAULT_LIFETIME_YEARS: u32 = 1000;

/// A shortened URL with its delivery policy.
///
/// Links are immutable once created. They disappear when they expire, when a
/// single-use link is consumed, or when the expiration sweep removes them.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Link {
    pub id: i64,
    pub code: String,
    pub url: String,
    pub single_use: bool,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        code: String,
        url: String,
        single_use: bool,
        expires_at: DateTime<Utc>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            code,
            url,
            single_use,
            expires_at,
            created_at,
        }
    }

    /// Returns true if the link can no longer be resolved at `now`.
    ///
    /// A link is live strictly before `expires_at`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Returns true if the link has passed its expiry time.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub code: String,
    pub url: String,
    pub single_use: bool,
    pub expires_at: DateTime<Utc>,
}

/// Expiry used for links created without one: `now` plus a thousand years.
pub fn default_expiry(now: DateTime<Utc>) -> DateTime<Utc> {
    now.checked_add_months(Months::new(12 * DEFAULT_LIFETIME_YEARS))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn link_expiring_at(expires_at: DateTime<Utc>) -> Link {
        Link::new(
            1,
            "abc123".to_string(),
            "https://example.com".to_string(),
            false,
            expires_at,
            Utc::now(),
        )
    }

    #[test]
    fn test_link_creation() {
        let now = Utc::now();
        let link = Link::new(
            1,
            "abc123".to_string(),
            "https://example.com".to_string(),
            true,
            default_expiry(now),
            now,
        );

        assert_eq!(link.id, 1);
        assert_eq!(link.code, "abc123");
        assert_eq!(link.url, "https://example.com");
        assert!(link.single_use);
        assert_eq!(link.created_at, now);
        assert!(!link.is_expired());
    }

    #[test]
    fn test_link_is_expired_in_past() {
        let link = link_expiring_at(Utc::now() - Duration::seconds(1));
        assert!(link.is_expired());
    }

    #[test]
    fn test_link_expires_exactly_at_deadline() {
        let deadline = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let link = link_expiring_at(deadline);

        assert!(!link.is_expired_at(deadline - Duration::nanoseconds(1)));
        assert!(link.is_expired_at(deadline));
        assert!(link.is_expired_at(deadline + Duration::seconds(1)));
    }

    #[test]
    fn test_default_expiry_is_a_thousand_years_out() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        let expiry = default_expiry(now);

        assert_eq!(expiry, Utc.with_ymd_and_hms(3024, 6, 15, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_default_expiry_saturates() {
        let expiry = default_expiry(DateTime::<Utc>::MAX_UTC - Duration::days(1));
        assert_eq!(expiry, DateTime::<Utc>::MAX_UTC);
    }
}
