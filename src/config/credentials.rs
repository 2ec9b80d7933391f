//! API token handling
//!
//! The Odin bearer token is never logged in full: Debug prints `SecretString(***)` and
//! Display prints the `abcd...wxyz` form.

use std::fmt;

/// Secure string wrapper that masks sensitive data in logs
#[derive(Clone, PartialEq, Eq)]
pub struct SecretString(String);

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        SecretString(value.into())
    }

    /// Returns the raw secret
    ///
    /// Only for building the `Authorization` header.
    pub fn expose_secret(&self) -> &str {
        &self.0
    }

    /// `first4...last4`, or `***` for short secrets
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 8 {
            return "***".to_string();
        }
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretString(***)")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.masked())
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        SecretString::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        SecretString::new(s)
    }
}

/// Parses an optional token value: trimmed, empty means absent
pub fn parse_token(raw: Option<String>) -> Option<SecretString> {
    raw.map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(SecretString::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_never_shows_secret() {
        let secret = SecretString::new("eyJhbGciOiJIUzI1NiJ9.payload");
        assert_eq!(format!("{:?}", secret), "SecretString(***)");
    }

    #[test]
    fn test_display_is_masked() {
        let secret = SecretString::new("abcdefghijklmnopwxyz");
        assert_eq!(secret.to_string(), "abcd...wxyz");
        assert_eq!(SecretString::new("short").to_string(), "***");
    }

    #[test]
    fn test_parse_token() {
        assert_eq!(parse_token(None), None);
        assert_eq!(parse_token(Some("   ".into())), None);
        assert_eq!(
            parse_token(Some("  tok  ".into())).map(|t| t.expose_secret().to_string()),
            Some("tok".to_string())
        );
    }
}
