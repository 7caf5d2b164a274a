//! Error types for txscout.
//!
//! The algorithms themselves are total: an empty text or pattern is a defined non-match or a
//! zero-length span, never an error. Only two analysis operations can fail:
//!
//! 1. **Code-length lookup** - encoding a string that contains a symbol the prefix code was
//!    not built from yields [`AnalysisError::SymbolNotInCode`]. Zero-filling the missing
//!    length would understate the encoded size, so the caller has to decide.
//! 2. **Tree construction** - building a code tree from an empty frequency table yields
//!    [`AnalysisError::NoFrequencyData`]. This is fatal to that single build only; the
//!    driver skips the anomaly check for that transmission and keeps going.
//!
//! The remaining variants cover loading inputs and configuration.
//!
//! ```rust,ignore
//! match encoded_length(code, &lengths) {
//!     Ok(bits) => // compare against the expected length,
//!     Err(AnalysisError::SymbolNotInCode { symbol }) => // report as unencodable,
//!     Err(e) => // propagate
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Result type for analysis operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Errors that can occur while loading or analyzing transmissions
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Symbol {} (0x{:02x}) has no code length", display_symbol(*.symbol), .symbol)]
    SymbolNotInCode { symbol: u8 },
    #[error("No frequency data: cannot build a prefix code from an empty text")]
    NoFrequencyData,
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Printable form of a byte for messages: the character itself when it is graphic ASCII,
/// otherwise its escaped form.
pub fn display_symbol(symbol: u8) -> String {
    if symbol.is_ascii_graphic() {
        format!("'{}'", symbol as char)
    } else {
        format!("'{}'", std::ascii::escape_default(symbol))
    }
}

impl AnalysisError {
    pub fn symbol_not_in_code(symbol: u8) -> Self {
        Self::SymbolNotInCode { symbol }
    }

    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound(path.into())
    }

    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        Self::PermissionDenied(path.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}

impl From<::config::ConfigError> for AnalysisError {
    fn from(err: ::config::ConfigError) -> Self {
        Self::ConfigError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_error_creation() {
        let path = Path::new("transmission1.txt");
        let err = AnalysisError::file_not_found(path);
        assert!(matches!(err, AnalysisError::FileNotFound(_)));

        let err = AnalysisError::permission_denied(path);
        assert!(matches!(err, AnalysisError::PermissionDenied(_)));

        let err = AnalysisError::symbol_not_in_code(b'z');
        assert!(matches!(err, AnalysisError::SymbolNotInCode { symbol: b'z' }));

        let err = AnalysisError::config_error("bad threshold");
        assert!(matches!(err, AnalysisError::ConfigError(_)));
    }

    #[test]
    fn test_error_messages() {
        let err = AnalysisError::symbol_not_in_code(b'z');
        assert_eq!(err.to_string(), "Symbol 'z' (0x7a) has no code length");

        let err = AnalysisError::symbol_not_in_code(b'\t');
        assert_eq!(err.to_string(), "Symbol '\\t' (0x09) has no code length");

        let err = AnalysisError::NoFrequencyData;
        assert_eq!(
            err.to_string(),
            "No frequency data: cannot build a prefix code from an empty text"
        );

        let err = AnalysisError::config_error("expected 2 transmissions, found 3");
        assert_eq!(
            err.to_string(),
            "Configuration error: expected 2 transmissions, found 3"
        );

        let err = AnalysisError::file_not_found("mcode1.txt");
        assert_eq!(err.to_string(), "File not found: mcode1.txt");
    }
}
