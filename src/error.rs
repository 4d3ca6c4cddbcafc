// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Store(String),
    Token(TokenError),
}

/// Specific error types for signed-token validation.
/// Used to provide user-friendly, localized error messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The token string could not be decoded at all
    Malformed,

    /// The authentication tag does not match the payload
    Tampered,

    /// The token is well-formed but past its expiry time
    Expired,

    /// The token was issued for a different flow (join vs. recover)
    WrongPurpose,
}

impl TokenError {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            TokenError::Malformed => "error-token-malformed",
            TokenError::Tampered => "error-token-tampered",
            TokenError::Expired => "error-token-expired",
            TokenError::WrongPurpose => "error-token-wrong-purpose",
        }
    }
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenError::Malformed => write!(f, "Token is malformed"),
            TokenError::Tampered => write!(f, "Token signature does not match"),
            TokenError::Expired => write!(f, "Token has expired"),
            TokenError::WrongPurpose => write!(f, "Token was issued for a different flow"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Store(e) => write!(f, "Store Error: {}", e),
            Error::Token(e) => write!(f, "Token Error: {}", e),
        }
    }
}

impl From<TokenError> for Error {
    fn from(err: TokenError) -> Self {
        Error::Token(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn store_error_formats_properly() {
        let err = Error::Store("users file unreadable".into());
        assert_eq!(format!("{}", err), "Store Error: users file unreadable");
    }

    #[test]
    fn token_error_converts_to_error() {
        let err: Error = TokenError::Expired.into();
        assert!(matches!(err, Error::Token(TokenError::Expired)));
    }

    #[test]
    fn token_error_i18n_keys() {
        assert_eq!(TokenError::Expired.i18n_key(), "error-token-expired");
        assert_eq!(TokenError::Tampered.i18n_key(), "error-token-tampered");
        assert_eq!(
            TokenError::WrongPurpose.i18n_key(),
            "error-token-wrong-purpose"
        );
    }

    #[test]
    fn token_error_display() {
        let err = TokenError::Malformed;
        assert!(format!("{}", err).contains("malformed"));
    }
}
