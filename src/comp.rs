//! Per-sequence composition statistics
//!
//! [`analyze`](fn.analyze.html) takes any sequence string and returns its
//! symbol inventory: the alphabet in ascending order, the occurrence count
//! of each symbol, and the relative frequency of each symbol in percent.
//! Symbols are canonicalized to ASCII uppercase, so case never influences
//! the result.
//!
//! # Example
//!
//! ```
//! use fasta_comp::comp::analyze;
//!
//! let stats = analyze("ACGGGCATATGCGC");
//!
//! assert_eq!(stats.total(), 14);
//! assert_eq!(stats.alphabet().collect::<Vec<_>>(), vec!['A', 'C', 'G', 'T']);
//! assert_eq!(stats.count_of('G'), 5);
//! assert!((stats.percentage_of('G') - 35.71).abs() < 0.01);
//! ```

use std::collections::BTreeMap;

/// Composition statistics of a single sequence.
///
/// A pure derived value: computed fresh on each call to
/// [`analyze`](fn.analyze.html), with no connection to the sequence it was
/// computed from. The alphabet is the key set of the count map, which a
/// `BTreeMap` keeps in ascending code point order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionStats {
    total: u64,
    counts: BTreeMap<char, u64>,
    percentages: BTreeMap<char, f64>,
}

impl CompositionStats {
    /// Sequence length in symbols (not bytes).
    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Returns `true` for the statistics of an empty sequence.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// The distinct symbols of the sequence in ascending order.
    #[inline]
    pub fn alphabet(&self) -> impl Iterator<Item = char> + '_ {
        self.counts.keys().copied()
    }

    /// Occurrence count per symbol. Keys are the alphabet; values sum to
    /// `total()`.
    #[inline]
    pub fn counts(&self) -> &BTreeMap<char, u64> {
        &self.counts
    }

    /// Relative frequency per symbol in percent. Keys are the alphabet;
    /// values sum to 100 (within floating point rounding) unless the
    /// sequence is empty.
    #[inline]
    pub fn percentages(&self) -> &BTreeMap<char, f64> {
        &self.percentages
    }

    /// Occurrence count of one symbol, or 0 if it does not appear.
    /// The symbol is canonicalized like the sequence itself, so
    /// `count_of('a')` and `count_of('A')` agree.
    #[inline]
    pub fn count_of(&self, symbol: char) -> u64 {
        self.counts
            .get(&symbol.to_ascii_uppercase())
            .copied()
            .unwrap_or(0)
    }

    /// Relative frequency of one symbol in percent, or 0 if it does not
    /// appear. The symbol is canonicalized like the sequence itself.
    #[inline]
    pub fn percentage_of(&self, symbol: char) -> f64 {
        self.percentages
            .get(&symbol.to_ascii_uppercase())
            .copied()
            .unwrap_or(0.0)
    }
}

/// Computes the composition statistics of a sequence.
///
/// The sequence is canonicalized to ASCII uppercase symbol by symbol;
/// analyzing a mixed-case sequence and its uppercased form yields identical
/// results. Symbols are counted per decoded character, so a multi-byte
/// character counts as one symbol. An empty sequence yields empty maps and
/// `total() == 0`; no division is performed in that case.
///
/// # Example
///
/// ```
/// use fasta_comp::comp::analyze;
///
/// let stats = analyze("gattaca");
///
/// assert_eq!(stats.total(), 7);
/// assert_eq!(stats.counts()[&'A'], 3);
/// assert_eq!(stats.count_of('n'), 0);
/// ```
pub fn analyze(seq: &str) -> CompositionStats {
    let mut total = 0u64;
    let mut counts = BTreeMap::new();
    for symbol in seq.chars() {
        *counts.entry(symbol.to_ascii_uppercase()).or_insert(0) += 1;
        total += 1;
    }

    let percentages = if total == 0 {
        BTreeMap::new()
    } else {
        counts
            .iter()
            .map(|(&symbol, &count)| (symbol, count as f64 / total as f64 * 100.0))
            .collect()
    };

    CompositionStats {
        total,
        counts,
        percentages,
    }
}
