//! Accumulation protocol for dictionary lines
//!
//! An accumulator knows how to build one kind of dictionary: it produces an
//! empty value and folds decoded lines into it. The loading and caching
//! machinery never looks at line content itself.

use std::collections::{BTreeMap, BTreeSet};

/// Builds a dictionary value from a sequence of lines
pub trait Accumulator: Send + Sync {
    /// The dictionary type produced by this accumulator
    type Dict: Send + Sync;

    /// Create an empty dictionary
    fn zero(&self) -> Self::Dict;

    /// Fold a single line into the dictionary
    fn fold(&self, dict: &mut Self::Dict, line: &str);
}

/// Accumulator built from a pair of closures
pub struct FnAccumulator<Z, F> {
    zero: Z,
    fold: F,
}

impl<Z, F> FnAccumulator<Z, F> {
    pub fn new(zero: Z, fold: F) -> Self {
        Self { zero, fold }
    }
}

impl<D, Z, F> Accumulator for FnAccumulator<Z, F>
where
    D: Send + Sync,
    Z: Fn() -> D + Send + Sync,
    F: Fn(&mut D, &str) + Send + Sync,
{
    type Dict = D;

    fn zero(&self) -> D {
        (self.zero)()
    }

    fn fold(&self, dict: &mut D, line: &str) {
        (self.fold)(dict, line)
    }
}

/// Set of trimmed, non-empty lines
#[derive(Debug, Clone, Copy, Default)]
pub struct WordSet {
    lowercase: bool,
}

impl WordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold every word to lowercase before inserting it
    pub fn lowercase() -> Self {
        Self { lowercase: true }
    }
}

impl Accumulator for WordSet {
    type Dict = BTreeSet<String>;

    fn zero(&self) -> Self::Dict {
        BTreeSet::new()
    }

    fn fold(&self, dict: &mut Self::Dict, line: &str) {
        let word = line.trim();
        if word.is_empty() {
            return;
        }
        if self.lowercase {
            dict.insert(word.to_lowercase());
        } else {
            dict.insert(word.to_string());
        }
    }
}

/// Trimmed, non-empty lines in file order
#[derive(Debug, Clone, Copy, Default)]
pub struct WordList;

impl Accumulator for WordList {
    type Dict = Vec<String>;

    fn zero(&self) -> Self::Dict {
        Vec::new()
    }

    fn fold(&self, dict: &mut Self::Dict, line: &str) {
        let word = line.trim();
        if !word.is_empty() {
            dict.push(word.to_string());
        }
    }
}

/// Table of tab-separated `key\tvalue` pairs
///
/// Used for character substitution tables and spelling variants. Lines
/// without a tab are skipped; a repeated key keeps its last value.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyValueTable;

impl Accumulator for KeyValueTable {
    type Dict = BTreeMap<String, String>;

    fn zero(&self) -> Self::Dict {
        BTreeMap::new()
    }

    fn fold(&self, dict: &mut Self::Dict, line: &str) {
        if let Some((key, value)) = line.split_once('\t') {
            let key = key.trim();
            if !key.is_empty() {
                dict.insert(key.to_string(), value.trim().to_string());
            }
        }
    }
}
