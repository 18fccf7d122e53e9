//! Per-account removal-URL quota and submission validation.
//!
//! Every account may track [`DEFAULT_URL_QUOTA`] removal URLs; support can
//! grant more via a per-account override record (`user_url_limits`). The
//! quota is checked read-then-write at the service layer, not enforced by a
//! database constraint, so two concurrent submissions can jointly exceed it.
//! That race is a documented property of the system, not an oversight.

use crate::error::CoreError;

/// Base number of removal URLs every account may track.
pub const DEFAULT_URL_QUOTA: u32 = 3;

/// A customer's effective URL quota: the base allowance plus any
/// support-granted extra slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrlQuota {
    pub base: u32,
    pub additional: u32,
}

impl UrlQuota {
    pub fn new(additional: u32) -> Self {
        Self {
            base: DEFAULT_URL_QUOTA,
            additional,
        }
    }

    /// Total number of URLs the account may track.
    pub fn limit(self) -> u32 {
        self.base + self.additional
    }

    /// Slots still available given the current stored row count.
    pub fn remaining(self, used: u32) -> u32 {
        self.limit().saturating_sub(used)
    }

    /// Whether `requested` new URLs fit next to `used` existing ones.
    pub fn allows(self, used: u32, requested: u32) -> bool {
        requested <= self.remaining(used)
    }
}

impl Default for UrlQuota {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Normalize a submitted URL batch: trim entries and drop blanks.
///
/// An empty result is a validation error; the portal surfaces it as a
/// localized toast rather than letting an empty insert through.
pub fn normalize_urls(urls: &[String]) -> Result<Vec<String>, CoreError> {
    let cleaned: Vec<String> = urls
        .iter()
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .collect();

    if cleaned.is_empty() {
        return Err(CoreError::Validation(
            "At least one non-empty URL is required".to_string(),
        ));
    }
    Ok(cleaned)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn default_quota_is_three() {
        let quota = UrlQuota::default();
        assert_eq!(quota.limit(), 3);
        assert_eq!(quota.remaining(0), 3);
    }

    #[test]
    fn additional_urls_raise_the_limit() {
        let quota = UrlQuota::new(2);
        assert_eq!(quota.limit(), 5);
        assert!(quota.allows(3, 2));
        assert!(!quota.allows(3, 3));
    }

    #[test]
    fn fourth_url_is_rejected_at_the_default_quota() {
        let quota = UrlQuota::default();
        assert!(!quota.allows(3, 1));
        assert_eq!(quota.remaining(3), 0);
    }

    #[test]
    fn remaining_saturates_when_over_quota() {
        // Rows inserted past the limit (the known write race) must not
        // underflow the remaining count.
        let quota = UrlQuota::default();
        assert_eq!(quota.remaining(5), 0);
    }

    #[test]
    fn normalize_trims_and_drops_blanks() {
        let urls = vec![
            "  https://example.com/profile/42  ".to_string(),
            "".to_string(),
            "   ".to_string(),
            "https://other.example/page".to_string(),
        ];
        let cleaned = normalize_urls(&urls).unwrap();
        assert_eq!(
            cleaned,
            vec![
                "https://example.com/profile/42".to_string(),
                "https://other.example/page".to_string(),
            ]
        );
    }

    #[test]
    fn all_blank_batch_is_a_validation_error() {
        let urls = vec!["".to_string(), "  ".to_string()];
        assert_matches!(normalize_urls(&urls), Err(CoreError::Validation(_)));
        assert_matches!(normalize_urls(&[]), Err(CoreError::Validation(_)));
    }
}
