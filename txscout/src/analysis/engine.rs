use rayon::prelude::*;
use tracing::{debug, info, warn};

use super::anomaly::{AnomalyDetector, Verdict};
use super::common::longest_common_substring;
use super::matcher::PatternMatcher;
use super::palindrome::longest_palindrome;
use super::prefix_code::PrefixCode;
use crate::config::{AnalysisConfig, TRANSMISSION_COUNT};
use crate::errors::{AnalysisError, AnalysisResult};
use crate::loader::load_text;
use crate::metrics::AnalysisMetrics;
use crate::results::{AnalysisReport, TransmissionReport};

/// A named, fully loaded input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    pub name: String,
    pub text: Vec<u8>,
}

impl Input {
    pub fn new(name: impl Into<String>, text: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// Runs the four analyses over already loaded inputs.
///
/// The components never call each other; the analyzer only fans the inputs out to them and
/// collects the results. Per-transmission work and the common-substring table are run as
/// independent rayon jobs, so they use whatever pool the caller installs.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    detector: AnomalyDetector,
    metrics: AnalysisMetrics,
}

impl Analyzer {
    pub fn new(detector: AnomalyDetector) -> Self {
        Self {
            detector,
            metrics: AnalysisMetrics::new(),
        }
    }

    pub fn metrics(&self) -> &AnalysisMetrics {
        &self.metrics
    }

    pub fn detector(&self) -> &AnomalyDetector {
        &self.detector
    }

    /// Analyzes exactly two transmissions against the codes.
    pub fn run(&self, transmissions: &[Input], codes: &[Input]) -> AnalysisResult<AnalysisReport> {
        let [first, second] = transmissions else {
            return Err(AnalysisError::config_error(format!(
                "expected {} transmissions, found {}",
                TRANSMISSION_COUNT,
                transmissions.len()
            )));
        };

        let matchers: Vec<PatternMatcher> = codes
            .iter()
            .map(|code| PatternMatcher::new(code.text.as_slice()))
            .collect();

        let (reports, common_substring) = rayon::join(
            || {
                transmissions
                    .par_iter()
                    .map(|t| self.analyze_transmission(t, &matchers))
                    .collect::<AnalysisResult<Vec<_>>>()
            },
            || {
                let span = longest_common_substring(&first.text, &second.text);
                self.metrics
                    .record_dp_table(first.text.len(), second.text.len());
                debug!(
                    "Longest common substring of {} and {}: {} ({} symbols)",
                    first.name,
                    second.name,
                    span,
                    span.len()
                );
                span
            },
        );

        Ok(AnalysisReport {
            codes: codes.iter().map(|c| c.name.clone()).collect(),
            transmissions: reports?,
            common_substring,
        })
    }

    fn analyze_transmission(
        &self,
        transmission: &Input,
        matchers: &[PatternMatcher],
    ) -> AnalysisResult<TransmissionReport> {
        let text = transmission.text.as_slice();

        let matches: Vec<_> = matchers
            .iter()
            .map(|matcher| {
                let result = matcher.find(text);
                self.metrics.record_search(text.len(), result.is_found());
                result
            })
            .collect();

        let palindrome = longest_palindrome(text);
        self.metrics.record_palindrome_scan(text.len());
        debug!(
            "Longest palindrome in {}: {} ({} symbols)",
            transmission.name,
            palindrome,
            palindrome.len()
        );

        let (expected_average, verdicts) = match PrefixCode::from_text(text) {
            Ok(prefix_code) => {
                self.metrics.record_prefix_code();
                debug!(
                    "Prefix code for {}: {} symbols, {:.4} expected bits per symbol",
                    transmission.name,
                    prefix_code.lengths().len(),
                    prefix_code.expected_average()
                );
                let verdicts = matchers
                    .iter()
                    .map(|m| self.detector.evaluate(&prefix_code, m.pattern()))
                    .collect::<AnalysisResult<Vec<Verdict>>>()?;
                (Some(prefix_code.expected_average()), verdicts)
            }
            Err(err) => {
                warn!("Skipping anomaly check for {}: {}", transmission.name, err);
                (None, vec![Verdict::NoFrequencyData; matchers.len()])
            }
        };

        for verdict in &verdicts {
            self.metrics.record_verdict(
                verdict.is_suspicious(),
                matches!(verdict, Verdict::Unencodable { .. }),
            );
        }

        Ok(TransmissionReport {
            name: transmission.name.clone(),
            length: text.len(),
            matches,
            palindrome,
            expected_average,
            verdicts,
        })
    }
}

/// Loads the configured inputs and analyzes them on a pool of `thread_count` threads
pub fn analyze(config: &AnalysisConfig) -> AnalysisResult<AnalysisReport> {
    config.validate()?;
    info!(
        "Starting analysis of {} transmissions against {} codes",
        config.transmissions.len(),
        config.codes.len()
    );

    let load = |paths: Vec<std::path::PathBuf>| -> AnalysisResult<Vec<Input>> {
        paths
            .into_iter()
            .map(|path| {
                let text = load_text(&path)?;
                Ok(Input::new(path.display().to_string(), text))
            })
            .collect()
    };
    let transmissions = load(config.transmission_paths())?;
    let codes = load(config.code_paths())?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.thread_count.get())
        .build()
        .map_err(|e| AnalysisError::config_error(format!("thread pool: {}", e)))?;

    let analyzer = Analyzer::new(AnomalyDetector::new(config.suspicion_threshold));
    let report = pool.install(|| analyzer.run(&transmissions, &codes))?;

    analyzer.metrics().log_stats();
    info!(
        "Analysis complete. {} code occurrences, {} suspicious codes",
        report.total_found(),
        report.total_suspicious()
    );

    Ok(report)
}
