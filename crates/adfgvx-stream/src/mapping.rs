//! Symbol-to-sequence mappings used by the mapper and unmapper stages.

use std::fmt;

use adfgvx_core::SubstitutionAlphabet;
use zeroize::Zeroize;

/// Maps a symbol to the sequence that replaces it.
pub trait Expansion {
    /// Returns the replacement of `c`, or `None` if `c` is not mapped.
    fn expansion(&self, c: char) -> Option<&[char]>;
}

/// Maps sequences back to the symbol they stand for.
pub trait Contraction {
    /// Returns the length of the shortest mapped sequence.
    fn min_len(&self) -> usize;

    /// Returns the length of the longest mapped sequence.
    fn max_len(&self) -> usize;

    /// Returns the symbol `sequence` stands for, or `None` if it is not mapped.
    fn contraction(&self, sequence: &[char]) -> Option<char>;
}

impl<T> Expansion for &T
where
    T: Expansion + ?Sized,
{
    fn expansion(&self, c: char) -> Option<&[char]> {
        (**self).expansion(c)
    }
}

impl<T> Contraction for &T
where
    T: Contraction + ?Sized,
{
    fn min_len(&self) -> usize {
        (**self).min_len()
    }

    fn max_len(&self) -> usize {
        (**self).max_len()
    }

    fn contraction(&self, sequence: &[char]) -> Option<char> {
        (**self).contraction(sequence)
    }
}

impl Expansion for SubstitutionAlphabet {
    fn expansion(&self, c: char) -> Option<&[char]> {
        self.encode(c).map(|code| code.as_slice())
    }
}

impl Contraction for SubstitutionAlphabet {
    fn min_len(&self) -> usize {
        self.places()
    }

    fn max_len(&self) -> usize {
        self.places()
    }

    fn contraction(&self, sequence: &[char]) -> Option<char> {
        self.decode(sequence)
    }
}

/// A mapping between symbols and sequences of varying length.
///
/// Lookups by sequence use one sorted table per sequence length. Empty
/// sequences are ignored; when a symbol or a sequence is listed twice, the
/// first entry wins.
///
/// # Examples
///
/// ```
/// use adfgvx_stream::{Contraction, Expansion, SequenceTable};
///
/// let table: SequenceTable = [("AB", 'X'), ("ABC", 'Y')].into_iter().collect();
/// assert_eq!(table.min_len(), 2);
/// assert_eq!(table.max_len(), 3);
/// assert_eq!(table.contraction(&['A', 'B', 'C']), Some('Y'));
/// assert_eq!(table.expansion('X'), Some(&['A', 'B'][..]));
/// ```
#[derive(Default, Clone)]
pub struct SequenceTable {
    /// Sorted by symbol.
    forward: Vec<(char, Box<[char]>)>,
    /// Index `n` holds the sequences of length `n`, sorted.
    by_len: Vec<Vec<(Box<[char]>, char)>>,
}

impl SequenceTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a mapping between `symbol` and `sequence`.
    pub fn insert(&mut self, sequence: &[char], symbol: char) {
        if sequence.is_empty() {
            return;
        }
        if let Err(i) = self.forward.binary_search_by_key(&symbol, |(c, _)| *c) {
            self.forward.insert(i, (symbol, sequence.into()));
        }
        if self.by_len.len() <= sequence.len() {
            self.by_len.resize_with(sequence.len() + 1, Vec::new);
        }
        let table = &mut self.by_len[sequence.len()];
        if let Err(i) = table.binary_search_by(|(s, _)| (**s).cmp(sequence)) {
            table.insert(i, (sequence.into(), symbol));
        }
    }

    /// Returns the number of distinct sequences.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_len.iter().map(Vec::len).sum()
    }

    /// Returns `true` if the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S> FromIterator<(S, char)> for SequenceTable
where
    S: AsRef<str>,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (S, char)>,
    {
        let mut table = Self::new();
        for (sequence, symbol) in iter {
            let sequence: Vec<char> = sequence.as_ref().chars().collect();
            table.insert(&sequence, symbol);
        }
        table
    }
}

impl Expansion for SequenceTable {
    fn expansion(&self, c: char) -> Option<&[char]> {
        self.forward
            .binary_search_by_key(&c, |(k, _)| *k)
            .ok()
            .map(|i| &*self.forward[i].1)
    }
}

impl Contraction for SequenceTable {
    fn min_len(&self) -> usize {
        self.by_len
            .iter()
            .position(|table| !table.is_empty())
            .unwrap_or(0)
    }

    fn max_len(&self) -> usize {
        self.by_len.len().saturating_sub(1)
    }

    fn contraction(&self, sequence: &[char]) -> Option<char> {
        let table = self.by_len.get(sequence.len())?;
        table
            .binary_search_by(|(s, _)| (**s).cmp(sequence))
            .ok()
            .map(|i| table[i].1)
    }
}

impl Zeroize for SequenceTable {
    fn zeroize(&mut self) {
        for (c, sequence) in &mut self.forward {
            c.zeroize();
            sequence.zeroize();
        }
        for (sequence, c) in self.by_len.iter_mut().flatten() {
            sequence.zeroize();
            c.zeroize();
        }
        self.forward.clear();
        self.by_len.clear();
    }
}

impl Drop for SequenceTable {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl fmt::Debug for SequenceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SequenceTable")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
