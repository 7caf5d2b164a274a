use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Counts work done during an analysis. Cheap to clone; clones share the counters.
#[derive(Debug, Clone)]
pub struct AnalysisMetrics {
    searches: Arc<AtomicU64>,
    codes_found: Arc<AtomicU64>,
    symbols_scanned: Arc<AtomicU64>,
    palindrome_scans: Arc<AtomicU64>,
    dp_cells: Arc<AtomicU64>,
    prefix_codes_built: Arc<AtomicU64>,
    suspicious_codes: Arc<AtomicU64>,
    unencodable_codes: Arc<AtomicU64>,
}

impl AnalysisMetrics {
    /// Creates a new AnalysisMetrics instance
    pub fn new() -> Self {
        Self {
            searches: Arc::new(AtomicU64::new(0)),
            codes_found: Arc::new(AtomicU64::new(0)),
            symbols_scanned: Arc::new(AtomicU64::new(0)),
            palindrome_scans: Arc::new(AtomicU64::new(0)),
            dp_cells: Arc::new(AtomicU64::new(0)),
            prefix_codes_built: Arc::new(AtomicU64::new(0)),
            suspicious_codes: Arc::new(AtomicU64::new(0)),
            unencodable_codes: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Records one exact search over `text_len` symbols
    pub fn record_search(&self, text_len: usize, found: bool) {
        self.searches.fetch_add(1, Ordering::Relaxed);
        self.symbols_scanned
            .fetch_add(text_len as u64, Ordering::Relaxed);
        if found {
            self.codes_found.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Records one palindrome scan over `text_len` symbols
    pub fn record_palindrome_scan(&self, text_len: usize) {
        self.palindrome_scans.fetch_add(1, Ordering::Relaxed);
        self.symbols_scanned
            .fetch_add(text_len as u64, Ordering::Relaxed);
    }

    /// Records a common-substring table of `rows * cols` cells
    pub fn record_dp_table(&self, rows: usize, cols: usize) {
        let cells = (rows as u64).saturating_mul(cols as u64);
        let total = self.dp_cells.fetch_add(cells, Ordering::Relaxed) + cells;
        debug!("Filled {} DP cells, total: {}", cells, total);
    }

    /// Records one prefix code built
    pub fn record_prefix_code(&self) {
        self.prefix_codes_built.fetch_add(1, Ordering::Relaxed);
    }

    /// Records the anomaly outcome of one code
    pub fn record_verdict(&self, suspicious: bool, unencodable: bool) {
        if suspicious {
            self.suspicious_codes.fetch_add(1, Ordering::Relaxed);
        }
        if unencodable {
            self.unencodable_codes.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Gets a snapshot of the counters
    pub fn get_stats(&self) -> AnalysisStats {
        AnalysisStats {
            searches: self.searches.load(Ordering::Relaxed),
            codes_found: self.codes_found.load(Ordering::Relaxed),
            symbols_scanned: self.symbols_scanned.load(Ordering::Relaxed),
            palindrome_scans: self.palindrome_scans.load(Ordering::Relaxed),
            dp_cells: self.dp_cells.load(Ordering::Relaxed),
            prefix_codes_built: self.prefix_codes_built.load(Ordering::Relaxed),
            suspicious_codes: self.suspicious_codes.load(Ordering::Relaxed),
            unencodable_codes: self.unencodable_codes.load(Ordering::Relaxed),
        }
    }

    /// Logs the counters
    pub fn log_stats(&self) {
        let stats = self.get_stats();
        info!(
            "Analysis stats:\n\
             Searches (found): {} ({})\n\
             Symbols scanned: {}\n\
             Palindrome scans: {}\n\
             DP cells: {}\n\
             Prefix codes built: {}\n\
             Codes suspicious/unencodable: {}/{}",
            stats.searches,
            stats.codes_found,
            stats.symbols_scanned,
            stats.palindrome_scans,
            stats.dp_cells,
            stats.prefix_codes_built,
            stats.suspicious_codes,
            stats.unencodable_codes
        );
    }
}

impl Default for AnalysisMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of [`AnalysisMetrics`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisStats {
    pub searches: u64,
    pub codes_found: u64,
    pub symbols_scanned: u64,
    pub palindrome_scans: u64,
    pub dp_cells: u64,
    pub prefix_codes_built: u64,
    pub suspicious_codes: u64,
    pub unencodable_codes: u64,
}
