//! Many-to-one longest-match unmapping on the write side.

use adfgvx_core::SlidingCharWindow;

use crate::{Contraction, StreamError, SymbolSink};

/// Replaces mapped sequences with their symbol, preferring the longest match.
///
/// Symbols are collected in a [`SlidingCharWindow`] as long as the longest
/// known sequence. Whenever the window fills up, its longest mapped prefix is
/// written downstream and the rest slides forward; if no prefix is mapped the
/// stream is rejected. At [`finish`](SymbolSink::finish) the remaining symbols
/// must decompose into mapped sequences as well.
///
/// # Examples
///
/// ```
/// use adfgvx_stream::{ManyToOneUnmapper, SequenceTable, SymbolSink};
///
/// let table: SequenceTable = [("AB", 'X'), ("ABC", 'Y')].into_iter().collect();
/// let mut text = String::new();
/// let mut sink = ManyToOneUnmapper::new(&mut text, &table);
/// sink.write_all("ABC".chars())?;
/// sink.finish()?;
/// assert_eq!(text, "Y");
/// # Ok::<(), adfgvx_stream::StreamError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ManyToOneUnmapper<K, M> {
    downstream: K,
    map: M,
    window: SlidingCharWindow,
}

impl<K, M> ManyToOneUnmapper<K, M>
where
    K: SymbolSink,
    M: Contraction,
{
    /// Wraps `downstream`, contracting through `map`.
    pub fn new(downstream: K, map: M) -> Self {
        let window = SlidingCharWindow::new(map.max_len());
        Self {
            downstream,
            map,
            window,
        }
    }

    /// Unwraps the downstream sink.
    ///
    /// Symbols still held in the window are discarded.
    pub fn into_inner(self) -> K {
        self.downstream
    }

    /// Consumes the longest mapped prefix of the window and returns its symbol.
    fn take_longest(&mut self) -> Option<char> {
        let shortest = self.map.min_len().max(1);
        let longest = self.window.len().min(self.map.max_len());
        for len in (shortest..=longest).rev() {
            let symbol = self
                .window
                .prefix(len)
                .and_then(|sequence| self.map.contraction(sequence));
            if let Some(symbol) = symbol {
                self.window.consume(len);
                return Some(symbol);
            }
        }
        None
    }

    fn window_text(&self) -> String {
        self.window.as_slice().iter().collect()
    }
}

impl<K, M> SymbolSink for ManyToOneUnmapper<K, M>
where
    K: SymbolSink,
    M: Contraction,
{
    fn write_symbol(&mut self, c: char) -> Result<(), StreamError> {
        self.window.push(c)?;
        if !self.window.is_full() {
            return Ok(());
        }
        match self.take_longest() {
            Some(symbol) => self.downstream.write_symbol(symbol),
            None => Err(StreamError::UnmappableSequence {
                sequence: self.window_text(),
            }),
        }
    }

    fn finish(&mut self) -> Result<(), StreamError> {
        while !self.window.is_empty() {
            let Some(symbol) = self.take_longest() else {
                return Err(StreamError::IncompleteSequence {
                    sequence: self.window_text(),
                });
            };
            self.downstream.write_symbol(symbol)?;
        }
        self.downstream.finish()
    }
}
