//! The pull/push capabilities every pipeline stage implements.

use crate::StreamError;

/// A read-side stage: yields one symbol at a time.
///
/// Stages compose by wrapping: each one owns its upstream source and applies
/// its own transform to what it pulls.
pub trait SymbolSource {
    /// Pulls the next symbol, or `None` at end of stream.
    ///
    /// # Errors
    ///
    /// Returns an error if the stage or its upstream cannot produce a symbol.
    fn next_symbol(&mut self) -> Result<Option<char>, StreamError>;

    /// Pulls every remaining symbol into `buffer` and returns how many were
    /// appended.
    ///
    /// # Errors
    ///
    /// Propagates the first error raised by [`next_symbol`](Self::next_symbol).
    fn read_into(&mut self, buffer: &mut Vec<char>) -> Result<usize, StreamError> {
        let start = buffer.len();
        while let Some(c) = self.next_symbol()? {
            buffer.push(c);
        }
        Ok(buffer.len() - start)
    }

    /// Pulls every remaining symbol into a new vector.
    ///
    /// # Errors
    ///
    /// Propagates the first error raised by [`next_symbol`](Self::next_symbol).
    fn read_to_vec(&mut self) -> Result<Vec<char>, StreamError> {
        let mut buffer = Vec::new();
        self.read_into(&mut buffer)?;
        Ok(buffer)
    }
}

/// A write-side stage: accepts one symbol at a time.
///
/// Stages compose by wrapping: each one owns its downstream sink and forwards
/// what it produces.
pub trait SymbolSink {
    /// Pushes one symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the stage or its downstream rejects the symbol.
    fn write_symbol(&mut self, c: char) -> Result<(), StreamError>;

    /// Flushes buffered state at end of stream and finishes the downstream.
    ///
    /// # Errors
    ///
    /// Returns an error if buffered state cannot be completed.
    fn finish(&mut self) -> Result<(), StreamError> {
        Ok(())
    }

    /// Pushes every symbol of `symbols`.
    ///
    /// # Errors
    ///
    /// Propagates the first error raised by [`write_symbol`](Self::write_symbol).
    fn write_all<I>(&mut self, symbols: I) -> Result<(), StreamError>
    where
        I: IntoIterator<Item = char>,
        Self: Sized,
    {
        symbols.into_iter().try_for_each(|c| self.write_symbol(c))
    }
}

/// The leaf source: yields the characters of an iterator unchanged.
#[derive(Debug, Clone)]
pub struct CharSource<I> {
    chars: I,
}

impl<I> CharSource<I>
where
    I: Iterator<Item = char>,
{
    /// Wraps a character iterator.
    pub fn new<T>(chars: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Self {
            chars: chars.into_iter(),
        }
    }
}

impl<I> SymbolSource for CharSource<I>
where
    I: Iterator<Item = char>,
{
    fn next_symbol(&mut self) -> Result<Option<char>, StreamError> {
        Ok(self.chars.next())
    }
}

impl<S> SymbolSource for &mut S
where
    S: SymbolSource + ?Sized,
{
    fn next_symbol(&mut self) -> Result<Option<char>, StreamError> {
        (**self).next_symbol()
    }
}

impl<S> SymbolSource for Box<S>
where
    S: SymbolSource + ?Sized,
{
    fn next_symbol(&mut self) -> Result<Option<char>, StreamError> {
        (**self).next_symbol()
    }
}

impl SymbolSink for String {
    fn write_symbol(&mut self, c: char) -> Result<(), StreamError> {
        self.push(c);
        Ok(())
    }
}

impl SymbolSink for Vec<char> {
    fn write_symbol(&mut self, c: char) -> Result<(), StreamError> {
        self.push(c);
        Ok(())
    }
}

impl<K> SymbolSink for &mut K
where
    K: SymbolSink + ?Sized,
{
    fn write_symbol(&mut self, c: char) -> Result<(), StreamError> {
        (**self).write_symbol(c)
    }

    fn finish(&mut self) -> Result<(), StreamError> {
        (**self).finish()
    }
}

impl<K> SymbolSink for Box<K>
where
    K: SymbolSink + ?Sized,
{
    fn write_symbol(&mut self, c: char) -> Result<(), StreamError> {
        (**self).write_symbol(c)
    }

    fn finish(&mut self) -> Result<(), StreamError> {
        (**self).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_source() {
        let mut source = CharSource::new("ab".chars());
        assert_eq!(source.next_symbol(), Ok(Some('a')));
        assert_eq!(source.next_symbol(), Ok(Some('b')));
        assert_eq!(source.next_symbol(), Ok(None));
        assert_eq!(source.next_symbol(), Ok(None));
    }

    #[test]
    fn test_read_into_appends() {
        let mut buffer = vec!['x'];
        let count = CharSource::new("yz".chars()).read_into(&mut buffer).unwrap();
        assert_eq!(count, 2);
        assert_eq!(buffer, vec!['x', 'y', 'z']);
    }

    #[test]
    fn test_sinks() {
        let mut text = String::new();
        text.write_all("hi".chars()).unwrap();
        (&mut text).write_symbol('!').unwrap();
        assert_eq!(text, "hi!");

        let mut boxed: Box<dyn SymbolSink> = Box::new(Vec::<char>::new());
        boxed.write_symbol('a').unwrap();
        boxed.finish().unwrap();
    }
}
