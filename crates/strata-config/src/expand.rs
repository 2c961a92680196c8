//! `${VAR}` and `${VAR:-default}` expansion for configuration strings.

use crate::ConfigError;

/// Expand environment variable references in `value`.
///
/// Only the braced forms are recognized. A string without `${` is returned
/// unchanged, including any bare `$` it contains.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, LookupError> {
        std::env::var(var).map(Some).map_err(|_| LookupError {
            var_name: var.to_owned(),
        })
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{0}}} not set", e.cause.var_name),
    })
}

struct LookupError {
    var_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_site_url() {
        // SAFETY: the variable name is unique to this test
        unsafe {
            std::env::set_var("STRATA_TEST_SITE_HOST", "docs.example.com");
        }
        let result = expand_env("https://${STRATA_TEST_SITE_HOST}/", "site.url").unwrap();
        assert_eq!(result, "https://docs.example.com/");
        unsafe {
            std::env::remove_var("STRATA_TEST_SITE_HOST");
        }
    }

    #[test]
    fn test_expand_with_default_uses_default() {
        // SAFETY: the variable name is unique to this test
        unsafe {
            std::env::remove_var("STRATA_TEST_UNSET");
        }
        let result = expand_env("${STRATA_TEST_UNSET:-catalog.yaml}", "catalog.manifest").unwrap();
        assert_eq!(result, "catalog.yaml");
    }

    #[test]
    fn test_expand_missing_var_error() {
        // SAFETY: the variable name is unique to this test
        unsafe {
            std::env::remove_var("STRATA_TEST_MISSING");
        }
        let err = expand_env("${STRATA_TEST_MISSING}", "site.url").unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("STRATA_TEST_MISSING"));
        assert!(err.to_string().contains("site.url"));
    }

    #[test]
    fn test_bare_dollar_not_expanded() {
        let result = expand_env("https://example.com/$path", "site.url").unwrap();
        assert_eq!(result, "https://example.com/$path");
    }
}
