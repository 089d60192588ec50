//! One-to-many mapping on the read side.

use crate::{Expansion, StreamError, SymbolSource};

/// Replaces every mapped symbol with its sequence.
///
/// The sequence of the current symbol is emitted one symbol per pull before
/// the next symbol is read from upstream. Unmapped symbols pass through
/// unchanged.
///
/// # Examples
///
/// ```
/// use adfgvx_stream::{CharSource, OneToManyMapper, SequenceTable, SymbolSource};
///
/// let table: SequenceTable = [("AD", 'x'), ("GF", 'y')].into_iter().collect();
/// let mut source = OneToManyMapper::new(CharSource::new("xy-".chars()), &table);
/// let symbols: String = source.read_to_vec()?.into_iter().collect();
/// assert_eq!(symbols, "ADGF-");
/// # Ok::<(), adfgvx_stream::StreamError>(())
/// ```
#[derive(Debug, Clone)]
pub struct OneToManyMapper<S, M> {
    upstream: S,
    map: M,
    /// Symbol whose sequence is being emitted.
    current: Option<char>,
    /// Position within the sequence of `current`.
    cursor: usize,
}

impl<S, M> OneToManyMapper<S, M>
where
    S: SymbolSource,
    M: Expansion,
{
    /// Wraps `upstream`, expanding through `map`.
    pub fn new(upstream: S, map: M) -> Self {
        Self {
            upstream,
            map,
            current: None,
            cursor: 0,
        }
    }
}

impl<S, M> SymbolSource for OneToManyMapper<S, M>
where
    S: SymbolSource,
    M: Expansion,
{
    fn next_symbol(&mut self) -> Result<Option<char>, StreamError> {
        loop {
            if let Some(current) = self.current {
                let next = self
                    .map
                    .expansion(current)
                    .and_then(|sequence| sequence.get(self.cursor).copied());
                if let Some(symbol) = next {
                    self.cursor += 1;
                    return Ok(Some(symbol));
                }
                self.current = None;
            }

            let Some(c) = self.upstream.next_symbol()? else {
                return Ok(None);
            };
            if self.map.expansion(c).is_none() {
                return Ok(Some(c));
            }
            self.current = Some(c);
            self.cursor = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CharSource, SequenceTable};

    #[test]
    fn test_variable_length_sequences() {
        let table: SequenceTable = [("1", 'a'), ("222", 'b')].into_iter().collect();
        let mut source = OneToManyMapper::new(CharSource::new("ab?a".chars()), &table);
        let symbols: String = source.read_to_vec().unwrap().into_iter().collect();
        assert_eq!(symbols, "1222?1");
        assert_eq!(source.next_symbol(), Ok(None));
    }

    #[test]
    fn test_empty_input() {
        let table: SequenceTable = [("12", 'a')].into_iter().collect();
        let mut source = OneToManyMapper::new(CharSource::new("".chars()), &table);
        assert_eq!(source.next_symbol(), Ok(None));
    }
}
