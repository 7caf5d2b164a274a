use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

use super::prefix_code::PrefixCode;
use crate::errors::{display_symbol, AnalysisError, AnalysisResult};

/// Default multiplier over the expected encoded length before a code is flagged
pub const DEFAULT_SUSPICION_THRESHOLD: f64 = 1.5;

/// Outcome of checking one code against one transmission's prefix code
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "verdict", rename_all = "kebab-case")]
pub enum Verdict {
    Suspicious { encoded_bits: u64 },
    NotSuspicious { encoded_bits: u64 },
    /// The code contains a symbol that never occurs in the transmission
    Unencodable { symbol: u8 },
    /// The transmission is empty, so there is no prefix code to measure against
    NoFrequencyData,
}

impl Verdict {
    pub fn is_suspicious(&self) -> bool {
        matches!(self, Verdict::Suspicious { .. })
    }

    pub fn encoded_bits(&self) -> Option<u64> {
        match self {
            Verdict::Suspicious { encoded_bits } | Verdict::NotSuspicious { encoded_bits } => {
                Some(*encoded_bits)
            }
            _ => None,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Suspicious { encoded_bits } => write!(f, "suspicious {}", encoded_bits),
            Verdict::NotSuspicious { encoded_bits } => {
                write!(f, "not-suspicious {}", encoded_bits)
            }
            Verdict::Unencodable { symbol } => {
                write!(f, "unencodable {}", display_symbol(*symbol))
            }
            Verdict::NoFrequencyData => write!(f, "no-frequency-data"),
        }
    }
}

/// Flags codes whose encoded length exceeds `threshold * expected_average * len(code)`.
///
/// The threshold is a tuning knob, not a statistical bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnomalyDetector {
    threshold: f64,
}

impl Default for AnomalyDetector {
    fn default() -> Self {
        Self::new(DEFAULT_SUSPICION_THRESHOLD)
    }
}

impl AnomalyDetector {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Checks one code against an already built prefix code.
    ///
    /// A symbol the prefix code was not built from is a verdict, not an error.
    pub fn evaluate(&self, prefix_code: &PrefixCode, code: &[u8]) -> AnalysisResult<Verdict> {
        let encoded_bits = match prefix_code.encoded_length(code) {
            Ok(bits) => bits,
            Err(AnalysisError::SymbolNotInCode { symbol }) => {
                warn!(
                    "Code contains symbol {} absent from the transmission",
                    display_symbol(symbol)
                );
                return Ok(Verdict::Unencodable { symbol });
            }
            Err(err) => return Err(err),
        };

        let expected = prefix_code.expected_average() * code.len() as f64;
        let limit = self.threshold * expected;
        debug!(
            "Encoded {} symbols in {} bits (expected {:.3}, limit {:.3})",
            code.len(),
            encoded_bits,
            expected,
            limit
        );

        Ok(if encoded_bits as f64 > limit {
            Verdict::Suspicious { encoded_bits }
        } else {
            Verdict::NotSuspicious { encoded_bits }
        })
    }
}
