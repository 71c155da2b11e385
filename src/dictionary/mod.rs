//! Dictionary building blocks
//!
//! A dictionary is whatever an [`Accumulator`] folds the lines of a stream
//! into: a word set, an ordered word list, a character table. This module
//! only decodes lines and threads them through the accumulator.

pub mod accumulator;
pub mod decoder;
pub mod source;

pub use accumulator::{Accumulator, FnAccumulator, KeyValueTable, WordList, WordSet};
pub use decoder::{fold_lines, LineDecoder};
pub use source::{BundledResources, DirResources, MemoryResources, ResourceSource, ResourceStream};
