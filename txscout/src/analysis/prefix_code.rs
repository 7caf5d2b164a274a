//! Minimum-redundancy (Huffman) prefix codes over byte symbols.
//!
//! Only code *lengths* are derived; no codewords or bitstreams are produced. The pipeline
//! for one text is:
//!
//! ```rust,ignore
//! let freqs = FrequencyTable::from_text(text);
//! let tree = CodeTree::build(&freqs)?;          // NoFrequencyData on empty text
//! let lengths = tree.code_lengths();             // tree dropped after this
//! let avg = expected_average_length(&freqs, &lengths, freqs.total())?;
//! let bits = encoded_length(code, &lengths)?;    // SymbolNotInCode on unseen symbols
//! ```
//!
//! Both tables are `BTreeMap`s, so anything summed over them is summed in ascending symbol
//! order and the floating-point result does not depend on hashing.

use std::cmp::{Ordering, Reverse};
use std::collections::{BTreeMap, BinaryHeap};

use crate::errors::{AnalysisError, AnalysisResult};

/// Occurrence count of each symbol in a text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<u8, u64>,
}

impl FrequencyTable {
    pub fn from_text(text: &[u8]) -> Self {
        let mut counts = BTreeMap::new();
        for &symbol in text {
            *counts.entry(symbol).or_insert(0) += 1;
        }
        Self { counts }
    }

    pub fn get(&self, symbol: u8) -> Option<u64> {
        self.counts.get(&symbol).copied()
    }

    /// Total number of symbols counted
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct symbols
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterates `(symbol, count)` in ascending symbol order
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts.iter().map(|(&s, &c)| (s, c))
    }
}

/// Node of a code tree. Every internal node owns both of its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeNode {
    Leaf {
        symbol: u8,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<CodeNode>,
        right: Box<CodeNode>,
    },
}

impl CodeNode {
    pub fn weight(&self) -> u64 {
        match self {
            CodeNode::Leaf { weight, .. } | CodeNode::Internal { weight, .. } => *weight,
        }
    }
}

/// Heap entry ordered by weight, then by insertion sequence so equal weights pop in a fixed
/// order.
#[derive(Debug)]
struct QueuedNode {
    weight: u64,
    seq: usize,
    node: CodeNode,
}

impl PartialEq for QueuedNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueuedNode {}

impl PartialOrd for QueuedNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueuedNode {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.weight, self.seq).cmp(&(other.weight, other.seq))
    }
}

/// Binary code tree built by repeatedly merging the two lightest nodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTree {
    root: CodeNode,
}

impl CodeTree {
    /// Builds the tree for a frequency table.
    ///
    /// Fails with [`AnalysisError::NoFrequencyData`] when the table is empty.
    pub fn build(frequencies: &FrequencyTable) -> AnalysisResult<Self> {
        let mut heap: BinaryHeap<Reverse<QueuedNode>> = frequencies
            .iter()
            .enumerate()
            .map(|(seq, (symbol, weight))| {
                Reverse(QueuedNode {
                    weight,
                    seq,
                    node: CodeNode::Leaf { symbol, weight },
                })
            })
            .collect();
        let mut seq = heap.len();

        loop {
            let Reverse(first) = heap.pop().ok_or(AnalysisError::NoFrequencyData)?;
            let Some(Reverse(second)) = heap.pop() else {
                return Ok(Self { root: first.node });
            };

            let weight = first.weight + second.weight;
            heap.push(Reverse(QueuedNode {
                weight,
                seq,
                node: CodeNode::Internal {
                    weight,
                    left: Box::new(first.node),
                    right: Box::new(second.node),
                },
            }));
            seq += 1;
        }
    }

    pub fn root(&self) -> &CodeNode {
        &self.root
    }

    /// Total weight of the tree, equal to the number of symbols in the source text
    pub fn weight(&self) -> u64 {
        self.root.weight()
    }

    /// Records the depth of every leaf.
    ///
    /// A tree that is a single leaf gets depth 1 so one-symbol texts still cost one bit per
    /// symbol.
    pub fn code_lengths(&self) -> CodeLengthTable {
        let mut lengths = BTreeMap::new();
        match &self.root {
            CodeNode::Leaf { symbol, .. } => {
                lengths.insert(*symbol, 1);
            }
            root => collect_depths(root, 0, &mut lengths),
        }
        CodeLengthTable { lengths }
    }
}

fn collect_depths(node: &CodeNode, depth: u32, lengths: &mut BTreeMap<u8, u32>) {
    match node {
        CodeNode::Leaf { symbol, .. } => {
            lengths.insert(*symbol, depth);
        }
        CodeNode::Internal { left, right, .. } => {
            collect_depths(left, depth + 1, lengths);
            collect_depths(right, depth + 1, lengths);
        }
    }
}

/// Bit length of each symbol's codeword
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeLengthTable {
    lengths: BTreeMap<u8, u32>,
}

impl CodeLengthTable {
    pub fn get(&self, symbol: u8) -> Option<u32> {
        self.lengths.get(&symbol).copied()
    }

    /// Like [`get`](Self::get) but a missing symbol is an error
    pub fn lookup(&self, symbol: u8) -> AnalysisResult<u32> {
        self.get(symbol)
            .ok_or_else(|| AnalysisError::symbol_not_in_code(symbol))
    }

    pub fn len(&self) -> usize {
        self.lengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.lengths.iter().map(|(&s, &l)| (s, l))
    }

    /// `Σ 2^-length` over all symbols; at most 1 for any prefix code
    pub fn kraft_sum(&self) -> f64 {
        self.lengths
            .values()
            .map(|&len| 2f64.powi(-(len as i32)))
            .sum()
    }
}

/// Probability-weighted average code length: `Σ (freq[s] / total) * length[s]`.
pub fn expected_average_length(
    frequencies: &FrequencyTable,
    lengths: &CodeLengthTable,
    total: u64,
) -> AnalysisResult<f64> {
    if total == 0 {
        return Err(AnalysisError::NoFrequencyData);
    }

    let mut average = 0.0;
    for (symbol, count) in frequencies.iter() {
        let probability = count as f64 / total as f64;
        average += probability * f64::from(lengths.lookup(symbol)?);
    }
    Ok(average)
}

/// Number of bits needed to encode `s` with the given code lengths.
///
/// Fails on the first symbol of `s` that has no code length.
pub fn encoded_length(s: &[u8], lengths: &CodeLengthTable) -> AnalysisResult<u64> {
    s.iter().try_fold(0u64, |total, &symbol| {
        Ok(total + u64::from(lengths.lookup(symbol)?))
    })
}

/// Prefix code statistics for one transmission
#[derive(Debug, Clone)]
pub struct PrefixCode {
    frequencies: FrequencyTable,
    lengths: CodeLengthTable,
    expected_average: f64,
}

impl PrefixCode {
    /// Counts symbols, builds the tree, extracts lengths and drops the tree.
    pub fn from_text(text: &[u8]) -> AnalysisResult<Self> {
        let frequencies = FrequencyTable::from_text(text);
        let lengths = CodeTree::build(&frequencies)?.code_lengths();
        let expected_average =
            expected_average_length(&frequencies, &lengths, frequencies.total())?;
        Ok(Self {
            frequencies,
            lengths,
            expected_average,
        })
    }

    pub fn frequencies(&self) -> &FrequencyTable {
        &self.frequencies
    }

    pub fn lengths(&self) -> &CodeLengthTable {
        &self.lengths
    }

    /// Expected bits per symbol under this code
    pub fn expected_average(&self) -> f64 {
        self.expected_average
    }

    pub fn encoded_length(&self, s: &[u8]) -> AnalysisResult<u64> {
        encoded_length(s, &self.lengths)
    }
}
