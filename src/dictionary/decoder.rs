//! Line decoding for dictionary streams
//!
//! Turns any `Read` into a lazy sequence of UTF-8 lines. The decoder owns
//! the stream, so it is released as soon as the decoder is dropped, whether
//! decoding finished or stopped at the first error.

use super::accumulator::Accumulator;
use std::io::{self, BufRead, BufReader, Read};

/// Lazy, single-pass iterator over the lines of a byte stream
///
/// Lines are split on `\n`; a trailing `\r` is stripped as well. Invalid
/// UTF-8 yields an `InvalidData` error.
pub struct LineDecoder<R> {
    lines: io::Lines<BufReader<R>>,
}

impl<R: Read> LineDecoder<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: BufReader::new(reader).lines(),
        }
    }
}

impl<R: Read> Iterator for LineDecoder<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.lines.next()
    }
}

/// Fold every line of `reader` through `accumulator`, in file order
pub fn fold_lines<A, R>(accumulator: &A, reader: R) -> io::Result<A::Dict>
where
    A: Accumulator + ?Sized,
    R: Read,
{
    let mut dict = accumulator.zero();
    for line in LineDecoder::new(reader) {
        accumulator.fold(&mut dict, &line?);
    }
    Ok(dict)
}
