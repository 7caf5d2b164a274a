//! The analysis components and the driver that composes them.
//!
//! Each component is a pure function of its inputs and none of them calls another:
//!
//! 1. **Exact search** ([`matcher`]): first occurrence of a code via a failure-function
//!    automaton, O(|text| + |code|).
//! 2. **Longest palindrome** ([`palindrome`]): centered expansion over a separator-interleaved
//!    text, reusing mirrored radii, O(|text|).
//! 3. **Longest common substring** ([`common`]): suffix-length dynamic program over two
//!    texts, O(|a| * |b|) time with two rolling rows.
//! 4. **Prefix-code statistics** ([`prefix_code`]): Huffman code lengths from symbol
//!    frequencies, expected and actual encoded lengths; [`anomaly`] applies the suspicion
//!    threshold on top.
//!
//! All positions reported to callers are 1-based; spans are inclusive.
//!
//! ```rust,ignore
//! assert_eq!(search(b"ABAB", b"BA"), MatchResult::Found(2));
//! assert_eq!(longest_palindrome(b"babad"), Span::new(1, 3));
//! assert_eq!(longest_common_substring(b"abcdxyz", b"xyzabcd"), Span::new(1, 4));
//! ```
pub mod anomaly;
pub mod common;
pub mod engine;
pub mod matcher;
pub mod palindrome;
pub mod prefix_code;
pub mod span;

pub use anomaly::{AnomalyDetector, Verdict, DEFAULT_SUSPICION_THRESHOLD};
pub use common::longest_common_substring;
pub use engine::{analyze, Analyzer, Input};
pub use matcher::{search, MatchResult, PatternMatcher};
pub use palindrome::longest_palindrome;
pub use prefix_code::{
    encoded_length, expected_average_length, CodeLengthTable, CodeNode, CodeTree,
    FrequencyTable, PrefixCode,
};
pub use span::{CommonSpan, PalindromeSpan, Span};
