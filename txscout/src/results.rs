//! Report types produced by an analysis run.
//!
//! A report is plain data: it owns copies of the names and the computed values, and can be
//! rendered as the line-oriented text format or serialized to JSON.
//!
//! Text format, one item per line:
//!
//! ```text
//! found 3            <- transmission 1 vs code 1..N, then transmission 2 vs code 1..N
//! not-found
//! 2 6                <- longest palindrome of each transmission
//! 10 14
//! 1 4                <- longest common substring, as a span of transmission 1
//! not-suspicious 12  <- transmission 1 vs code 1..N, then transmission 2 vs code 1..N
//! suspicious 40
//! ```
use serde::Serialize;
use std::fmt::Write;

use crate::analysis::anomaly::Verdict;
use crate::analysis::matcher::MatchResult;
use crate::analysis::span::{CommonSpan, PalindromeSpan};
use crate::errors::AnalysisResult;

/// Everything computed for one transmission
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransmissionReport {
    /// Display name, usually the file path
    pub name: String,
    /// Length of the transmission after joining lines
    pub length: usize,
    /// Search result for each code, in code order
    pub matches: Vec<MatchResult>,
    /// Longest palindromic substring
    pub palindrome: PalindromeSpan,
    /// Expected bits per symbol of the transmission's prefix code; None for an empty text
    pub expected_average: Option<f64>,
    /// Anomaly verdict for each code, in code order
    pub verdicts: Vec<Verdict>,
}

/// Complete analysis results
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// Code display names, in the order used by `matches` and `verdicts`
    pub codes: Vec<String>,
    /// Per-transmission results
    pub transmissions: Vec<TransmissionReport>,
    /// Longest substring shared by the first two transmissions, located in the first
    pub common_substring: CommonSpan,
}

impl AnalysisReport {
    /// Number of (transmission, code) pairs where the code occurs
    pub fn total_found(&self) -> usize {
        self.transmissions
            .iter()
            .flat_map(|t| &t.matches)
            .filter(|m| m.is_found())
            .count()
    }

    /// Number of (transmission, code) pairs flagged as suspicious
    pub fn total_suspicious(&self) -> usize {
        self.transmissions
            .iter()
            .flat_map(|t| &t.verdicts)
            .filter(|v| v.is_suspicious())
            .count()
    }

    /// Renders the line-oriented text format
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();

        for transmission in &self.transmissions {
            for result in &transmission.matches {
                lines.push(match result {
                    MatchResult::Found(pos) => format!("found {}", pos),
                    MatchResult::NotFound => "not-found".to_string(),
                });
            }
        }

        for transmission in &self.transmissions {
            lines.push(transmission.palindrome.to_string());
        }

        lines.push(self.common_substring.to_string());

        for transmission in &self.transmissions {
            for verdict in &transmission.verdicts {
                lines.push(verdict.to_string());
            }
        }

        lines
    }

    /// The text format as one string, newline-terminated
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for line in self.lines() {
            let _ = writeln!(out, "{}", line);
        }
        out
    }

    pub fn to_json(&self) -> AnalysisResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::span::Span;

    fn sample_report() -> AnalysisReport {
        AnalysisReport {
            codes: vec!["mcode1.txt".to_string(), "mcode2.txt".to_string()],
            transmissions: vec![
                TransmissionReport {
                    name: "transmission1.txt".to_string(),
                    length: 7,
                    matches: vec![MatchResult::Found(3), MatchResult::NotFound],
                    palindrome: Span::new(2, 4),
                    expected_average: Some(2.5),
                    verdicts: vec![
                        Verdict::NotSuspicious { encoded_bits: 6 },
                        Verdict::Unencodable { symbol: b'z' },
                    ],
                },
                TransmissionReport {
                    name: "transmission2.txt".to_string(),
                    length: 0,
                    matches: vec![MatchResult::NotFound, MatchResult::NotFound],
                    palindrome: Span::new(1, 0),
                    expected_average: None,
                    verdicts: vec![Verdict::NoFrequencyData, Verdict::NoFrequencyData],
                },
            ],
            common_substring: Span::new(1, 0),
        }
    }

    #[test]
    fn test_lines_order() {
        let report = sample_report();
        assert_eq!(
            report.lines(),
            vec![
                "found 3",
                "not-found",
                "not-found",
                "not-found",
                "2 4",
                "1 0",
                "1 0",
                "not-suspicious 6",
                "unencodable 'z'",
                "no-frequency-data",
                "no-frequency-data",
            ]
        );
    }

    #[test]
    fn test_to_text() {
        let report = sample_report();
        let text = report.to_text();
        assert!(text.starts_with("found 3\nnot-found\n"));
        assert!(text.ends_with("no-frequency-data\n"));
        assert_eq!(text.lines().count(), 11);
    }

    #[test]
    fn test_totals() {
        let mut report = sample_report();
        assert_eq!(report.total_found(), 1);
        assert_eq!(report.total_suspicious(), 0);

        report.transmissions[0].verdicts[0] = Verdict::Suspicious { encoded_bits: 20 };
        assert_eq!(report.total_suspicious(), 1);
    }

    #[test]
    fn test_to_json() {
        let json = sample_report().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let first = &value["transmissions"][0];
        assert_eq!(first["matches"][0]["status"], "found");
        assert_eq!(first["matches"][0]["position"], 3);
        assert_eq!(first["matches"][1]["status"], "not-found");
        assert_eq!(first["palindrome"]["start"], 2);
        assert_eq!(first["verdicts"][0]["verdict"], "not-suspicious");
        assert_eq!(first["verdicts"][0]["encoded_bits"], 6);
        assert_eq!(value["transmissions"][1]["expected_average"], serde_json::Value::Null);
        assert_eq!(value["common_substring"]["end"], 0);
    }
}
