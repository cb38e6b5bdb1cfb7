/// Per-request credential resolution
///
/// Every tool call carries the inbound HTTP headers; the platform
/// credential is resolved from them fresh on each call and never cached.
///
/// # Precedence (first match wins)
///
/// 1. `Authorization: Bearer <token>` (case-insensitive scheme) → token,
///    trimmed of surrounding whitespace
/// 2. `Authorization: <anything else>` → entire value, verbatim
/// 3. `X-Api-Key: <key>` → value, verbatim
/// 4. none → [`ToolError::AuthRequired`]
///
/// The precedence is an explicit ordered rule list rather than ad-hoc
/// lookups, so the order is visible in one place and testable.
///
/// # Logging
///
/// Successful resolution logs the credential in masked form only; the raw
/// credential never appears in any log output.

use axum::http::HeaderMap;

use crate::error::{ToolError, ToolResult};

/// How a credential is extracted from a matched header value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Extraction {
    /// Strip a case-insensitive `Bearer ` prefix and trim; a value without
    /// the prefix is used verbatim
    BearerOrVerbatim,

    /// Entire header value, verbatim
    Verbatim,
}

/// Credential sources in precedence order
const CREDENTIAL_RULES: &[(&str, Extraction)] = &[
    ("authorization", Extraction::BearerOrVerbatim),
    ("x-api-key", Extraction::Verbatim),
];

/// Resolves the caller's platform credential from request headers
///
/// # Errors
///
/// Returns [`ToolError::AuthRequired`] when no rule matches. This is
/// terminal for the call; no remote request is attempted.
pub fn resolve_credential(headers: &HeaderMap) -> ToolResult<String> {
    for (header_name, extraction) in CREDENTIAL_RULES {
        let Some(value) = headers.get(*header_name).and_then(|v| v.to_str().ok()) else {
            continue;
        };

        let credential = extract(*extraction, value);
        tracing::info!(
            header = *header_name,
            credential = %mask_credential(&credential),
            "API credential resolved from request headers"
        );
        return Ok(credential);
    }

    Err(ToolError::AuthRequired)
}

/// Applies one extraction rule to a header value
fn extract(extraction: Extraction, value: &str) -> String {
    match extraction {
        Extraction::BearerOrVerbatim => match value.get(..7) {
            Some(prefix) if prefix.eq_ignore_ascii_case("bearer ") => {
                value[7..].trim().to_string()
            }
            _ => value.to_string(),
        },
        Extraction::Verbatim => value.to_string(),
    }
}

/// Masks a credential for logging
///
/// Credentials of 12 characters or fewer are fully masked; longer ones keep
/// exactly the first 4 and last 4 characters with the middle elided.
pub fn mask_credential(credential: &str) -> String {
    let chars: Vec<char> = credential.chars().collect();
    if chars.len() <= 12 {
        return "***".to_string();
    }

    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(
                axum::http::HeaderName::from_bytes(name.as_bytes()).unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        map
    }

    #[test]
    fn test_bearer_token_is_stripped_and_trimmed() {
        let map = headers(&[("authorization", "Bearer   my-secret-token  ")]);
        assert_eq!(resolve_credential(&map).unwrap(), "my-secret-token");
    }

    #[test]
    fn test_bearer_scheme_is_case_insensitive() {
        for scheme in ["bearer", "BEARER", "BeArEr"] {
            let map = headers(&[("authorization", &format!("{scheme} tok-123"))]);
            assert_eq!(resolve_credential(&map).unwrap(), "tok-123");
        }
    }

    #[test]
    fn test_non_bearer_authorization_used_verbatim() {
        let map = headers(&[("authorization", "raw-api-key-value")]);
        assert_eq!(resolve_credential(&map).unwrap(), "raw-api-key-value");
    }

    #[test]
    fn test_x_api_key_used_verbatim() {
        let map = headers(&[("x-api-key", "key-from-header")]);
        assert_eq!(resolve_credential(&map).unwrap(), "key-from-header");
    }

    #[test]
    fn test_authorization_takes_precedence_over_x_api_key() {
        let map = headers(&[
            ("x-api-key", "ignored"),
            ("authorization", "Bearer winner"),
        ]);
        assert_eq!(resolve_credential(&map).unwrap(), "winner");
    }

    #[test]
    fn test_missing_headers_fail_with_auth_required() {
        let map = HeaderMap::new();
        assert!(matches!(
            resolve_credential(&map),
            Err(ToolError::AuthRequired)
        ));
    }

    #[test]
    fn test_short_credentials_fully_masked() {
        assert_eq!(mask_credential(""), "***");
        assert_eq!(mask_credential("abc"), "***");
        assert_eq!(mask_credential("twelve-chars"), "***");
    }

    #[test]
    fn test_long_credentials_keep_first_and_last_four() {
        let masked = mask_credential("abcd-middle-part-wxyz");
        assert_eq!(masked, "abcd...wxyz");

        // The full credential never appears as a substring of its mask
        assert!(!masked.contains("abcd-middle-part-wxyz"));
        assert!(!"abcd-middle-part-wxyz".contains(&masked));
    }
}
