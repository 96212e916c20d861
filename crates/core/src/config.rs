//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into
//! request state. Environment variables are never read during request
//! handling; the binary reads them in `main` and hands the values here.

use crate::{CdmError, CdmResult};

/// Default page size for the paginated listing endpoints.
pub const DEFAULT_PAGE_LIMIT: i64 = 100;

/// Default upper bound on `limit`. The upstream behaviour was unbounded;
/// the cap is a deliberate change, configurable via `CDM_MAX_PAGE_LIMIT`.
pub const DEFAULT_MAX_PAGE_LIMIT: i64 = 1000;

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    database_url: String,
    max_page_limit: i64,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    pub fn new(database_url: String, max_page_limit: i64) -> CdmResult<Self> {
        if database_url.trim().is_empty() {
            return Err(CdmError::Configuration("DB_URL"));
        }
        if max_page_limit < 1 {
            return Err(CdmError::InvalidInput(
                "max_page_limit must be at least 1".into(),
            ));
        }

        Ok(Self {
            database_url,
            max_page_limit,
        })
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn max_page_limit(&self) -> i64 {
        self.max_page_limit
    }

    /// Clamp a requested page size into `[1, max_page_limit]`.
    pub fn clamp_limit(&self, limit: i64) -> i64 {
        limit.clamp(1, self.max_page_limit)
    }
}

/// Parse the maximum page limit from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_MAX_PAGE_LIMIT`].
pub fn max_page_limit_from_env_value(value: Option<String>) -> CdmResult<i64> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    let parsed = value
        .map(|v| {
            v.parse::<i64>()
                .map_err(|e| CdmError::InvalidInput(format!("CDM_MAX_PAGE_LIMIT: {e}")))
        })
        .transpose()?;

    match parsed {
        Some(limit) if limit < 1 => Err(CdmError::InvalidInput(
            "CDM_MAX_PAGE_LIMIT must be at least 1".into(),
        )),
        Some(limit) => Ok(limit),
        None => Ok(DEFAULT_MAX_PAGE_LIMIT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_rejects_empty_database_url() {
        let cfg = CoreConfig::new("  ".into(), DEFAULT_MAX_PAGE_LIMIT);
        assert!(matches!(cfg, Err(CdmError::Configuration("DB_URL"))));
    }

    #[test]
    fn clamp_limit_bounds_both_ends() {
        let cfg = CoreConfig::new("postgresql://localhost/cdm".into(), 500).unwrap();
        assert_eq!(cfg.clamp_limit(0), 1);
        assert_eq!(cfg.clamp_limit(-7), 1);
        assert_eq!(cfg.clamp_limit(100), 100);
        assert_eq!(cfg.clamp_limit(10_000), 500);
    }

    #[test]
    fn max_page_limit_defaults_when_unset_or_blank() {
        assert_eq!(
            max_page_limit_from_env_value(None).unwrap(),
            DEFAULT_MAX_PAGE_LIMIT
        );
        assert_eq!(
            max_page_limit_from_env_value(Some("  ".into())).unwrap(),
            DEFAULT_MAX_PAGE_LIMIT
        );
    }

    #[test]
    fn max_page_limit_parses_and_validates() {
        assert_eq!(max_page_limit_from_env_value(Some("250".into())).unwrap(), 250);
        assert!(max_page_limit_from_env_value(Some("0".into())).is_err());
        assert!(max_page_limit_from_env_value(Some("abc".into())).is_err());
    }
}
