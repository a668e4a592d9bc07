//! Access token lookup
//!
//! The LWA access token is never written to disk. It comes from the
//! command line or the SP_API_ACCESS_TOKEN environment variable.

use std::env;

pub const ACCESS_TOKEN_ENV: &str = "SP_API_ACCESS_TOKEN";

/// Resolve the access token: explicit value first, then the environment.
///
/// Empty values count as unset.
pub fn resolve_access_token(explicit: Option<&str>) -> Option<String> {
    explicit
        .map(str::to_string)
        .filter(|t| !t.trim().is_empty())
        .or_else(|| env::var(ACCESS_TOKEN_ENV).ok().filter(|t| !t.trim().is_empty()))
}

/// Token with everything but the last four characters masked
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), visible)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_token_wins() {
        assert_eq!(
            resolve_access_token(Some("Atza|explicit")),
            Some("Atza|explicit".to_string())
        );
    }

    #[test]
    fn test_blank_explicit_token_is_ignored() {
        // Falls through to the environment, which may or may not be set
        assert_eq!(
            resolve_access_token(Some("  ")),
            resolve_access_token(None)
        );
    }

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("Atza|abcdef"), "*******cdef");
        assert_eq!(mask_token("abc"), "***");
        assert_eq!(mask_token(""), "");
    }
}
