use serde::Serialize;

/// Outcome of searching a transmission for a code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "position", rename_all = "kebab-case")]
pub enum MatchResult {
    /// 1-based offset of the first character of the first occurrence
    Found(usize),
    NotFound,
}

impl MatchResult {
    pub fn is_found(&self) -> bool {
        matches!(self, MatchResult::Found(_))
    }

    pub fn position(&self) -> Option<usize> {
        match self {
            MatchResult::Found(pos) => Some(*pos),
            MatchResult::NotFound => None,
        }
    }
}

/// Exact matcher driven by the pattern's failure function.
///
/// The failure table is computed once in [`PatternMatcher::new`], so one matcher can be run
/// against any number of texts in O(|text|) each.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    pattern: Vec<u8>,
    failure: Vec<usize>,
}

impl PatternMatcher {
    /// Creates a matcher for the given pattern
    pub fn new(pattern: impl Into<Vec<u8>>) -> Self {
        let pattern = pattern.into();
        let failure = Self::compute_failure(&pattern);
        Self { pattern, failure }
    }

    pub fn pattern(&self) -> &[u8] {
        &self.pattern
    }

    /// `failure()[i]` is the length of the longest proper prefix of `pattern[..=i]` that is
    /// also a suffix of it.
    pub fn failure(&self) -> &[usize] {
        &self.failure
    }

    fn compute_failure(pattern: &[u8]) -> Vec<usize> {
        let mut failure = vec![0; pattern.len()];
        let mut k = 0;

        for i in 1..pattern.len() {
            while k > 0 && pattern[i] != pattern[k] {
                k = failure[k - 1];
            }
            if pattern[i] == pattern[k] {
                k += 1;
            }
            failure[i] = k;
        }

        failure
    }

    /// Feeds one text symbol into the automaton and returns the new running match length.
    #[inline]
    fn step(&self, mut matched: usize, symbol: u8) -> usize {
        while matched > 0 && symbol != self.pattern[matched] {
            matched = self.failure[matched - 1];
        }
        if symbol == self.pattern[matched] {
            matched += 1;
        }
        matched
    }

    /// Finds the first occurrence of the pattern in `text`.
    ///
    /// An empty pattern or an empty text never matches.
    pub fn find(&self, text: &[u8]) -> MatchResult {
        if self.pattern.is_empty() || text.is_empty() {
            return MatchResult::NotFound;
        }

        let mut matched = 0;
        for (i, &symbol) in text.iter().enumerate() {
            matched = self.step(matched, symbol);
            if matched == self.pattern.len() {
                // i is the 0-based index of the last matched symbol
                return MatchResult::Found(i + 2 - matched);
            }
        }
        MatchResult::NotFound
    }

    /// Finds every occurrence, overlapping ones included, as 1-based offsets in ascending
    /// order.
    pub fn find_all(&self, text: &[u8]) -> Vec<usize> {
        let mut positions = Vec::new();
        if self.pattern.is_empty() || text.is_empty() {
            return positions;
        }

        let mut matched = 0;
        for (i, &symbol) in text.iter().enumerate() {
            matched = self.step(matched, symbol);
            if matched == self.pattern.len() {
                positions.push(i + 2 - matched);
                matched = self.failure[matched - 1];
            }
        }
        positions
    }
}

/// Searches `text` for the first occurrence of `pattern`.
pub fn search(text: &[u8], pattern: &[u8]) -> MatchResult {
    PatternMatcher::new(pattern).find(text)
}
