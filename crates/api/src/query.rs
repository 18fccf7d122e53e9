//! Shared query parameter types for API handlers.

use serde::Deserialize;
use skydd_core::error::CoreError;
use skydd_core::status::Locale;
use skydd_core::types::DbId;

/// Generic pagination parameters (`?limit=&offset=`).
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Upper bound for page sizes.
const MAX_LIMIT: i64 = 100;
/// Default page size.
const DEFAULT_LIMIT: i64 = 50;

impl PaginationParams {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

/// Locale selector (`?locale=sv|en`), defaulting to Swedish.
#[derive(Debug, Deserialize)]
pub struct LocaleParams {
    pub locale: Option<String>,
}

impl LocaleParams {
    pub fn locale(&self) -> Result<Locale, CoreError> {
        match &self.locale {
            Some(raw) => Locale::parse(raw),
            None => Ok(Locale::default()),
        }
    }
}

/// Optional member scoping (`?member_id=`); absent means the primary
/// account holder.
#[derive(Debug, Deserialize)]
pub struct MemberParams {
    pub member_id: Option<DbId>,
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn pagination_clamps_to_bounds() {
        let params = PaginationParams {
            limit: Some(10_000),
            offset: Some(-5),
        };
        assert_eq!(params.limit(), MAX_LIMIT);
        assert_eq!(params.offset(), 0);

        let defaults = PaginationParams {
            limit: None,
            offset: None,
        };
        assert_eq!(defaults.limit(), DEFAULT_LIMIT);
        assert_eq!(defaults.offset(), 0);
    }

    #[test]
    fn locale_defaults_to_swedish() {
        let params = LocaleParams { locale: None };
        assert_eq!(params.locale().unwrap(), Locale::Sv);

        let en = LocaleParams {
            locale: Some("en".to_string()),
        };
        assert_eq!(en.locale().unwrap(), Locale::En);

        let bad = LocaleParams {
            locale: Some("de".to_string()),
        };
        assert_matches!(bad.locale(), Err(CoreError::Validation(_)));
    }
}
