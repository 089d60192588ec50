//! Line-ending normalization (read side) and expansion (write side).
//!
//! Inside a pipeline every line break is a single `'\n'`. The
//! [`LineEndingNormalizer`] turns CR, LF, CR+LF and NEL into `'\n'` while
//! reading; the [`LineEndingWriter`] turns `'\n'` into the chosen
//! [`LineEnding`] while writing.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{StreamError, SymbolSink, SymbolSource};

/// The EBCDIC "next line" control code.
pub const NEL: char = '\u{85}';

/// A line-break convention.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// `"\n"` (Unix).
    #[default]
    Lf,
    /// `"\r\n"` (Windows).
    CrLf,
    /// `"\r"` (classic Mac OS).
    Cr,
    /// U+0085 (EBCDIC systems).
    Nel,
}

impl LineEnding {
    /// Every line ending, in declaration order.
    pub const ALL: [Self; 4] = [Self::Lf, Self::CrLf, Self::Cr, Self::Nel];

    /// Returns the character sequence of this line ending.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
            Self::Cr => "\r",
            Self::Nel => "\u{85}",
        }
    }

    /// Returns the lowercase name used by [`FromStr`] and serde.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Lf => "lf",
            Self::CrLf => "crlf",
            Self::Cr => "cr",
            Self::Nel => "nel",
        }
    }
}

impl Display for LineEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown line-ending name.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown line ending {name:?} (expected lf, crlf, cr or nel)")]
pub struct ParseLineEndingError {
    /// The rejected name.
    pub name: String,
}

impl FromStr for LineEnding {
    type Err = ParseLineEndingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ending| ending.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseLineEndingError { name: s.to_owned() })
    }
}

/// Converts CR, LF, CR+LF and NEL into a single `'\n'`.
///
/// A lone CR is told apart from CR+LF by peeking one symbol ahead; the peeked
/// symbol is held in a one-slot pushback buffer so it is never read twice.
///
/// # Examples
///
/// ```
/// use adfgvx_stream::{CharSource, LineEndingNormalizer, SymbolSource};
///
/// let mut source = LineEndingNormalizer::new(CharSource::new("a\r\nb\rc\nd".chars()));
/// let text: String = source.read_to_vec()?.into_iter().collect();
/// assert_eq!(text, "a\nb\nc\nd");
/// # Ok::<(), adfgvx_stream::StreamError>(())
/// ```
#[derive(Debug, Clone)]
pub struct LineEndingNormalizer<S> {
    upstream: S,
    /// Raw symbol read ahead after a CR.
    pushback: Option<char>,
    /// Normalized symbol returned by [`peek`](Self::peek).
    peeked: Option<char>,
}

impl<S> LineEndingNormalizer<S>
where
    S: SymbolSource,
{
    /// Wraps `upstream`.
    pub fn new(upstream: S) -> Self {
        Self {
            upstream,
            pushback: None,
            peeked: None,
        }
    }

    /// Returns the next normalized symbol without consuming it.
    ///
    /// # Errors
    ///
    /// Propagates upstream errors.
    pub fn peek(&mut self) -> Result<Option<char>, StreamError> {
        if self.peeked.is_none() {
            self.peeked = self.next_symbol()?;
        }
        Ok(self.peeked)
    }

    fn pull_raw(&mut self) -> Result<Option<char>, StreamError> {
        match self.pushback.take() {
            Some(c) => Ok(Some(c)),
            None => self.upstream.next_symbol(),
        }
    }

    fn peek_raw(&mut self) -> Result<Option<char>, StreamError> {
        if self.pushback.is_none() {
            self.pushback = self.upstream.next_symbol()?;
        }
        Ok(self.pushback)
    }
}

impl<S> SymbolSource for LineEndingNormalizer<S>
where
    S: SymbolSource,
{
    fn next_symbol(&mut self) -> Result<Option<char>, StreamError> {
        if let Some(c) = self.peeked.take() {
            return Ok(Some(c));
        }
        match self.pull_raw()? {
            Some('\r') => {
                if self.peek_raw()? == Some('\n') {
                    self.pushback = None;
                }
                Ok(Some('\n'))
            }
            Some(NEL) => Ok(Some('\n')),
            other => Ok(other),
        }
    }
}

/// Replaces every `'\n'` written through it with a [`LineEnding`].
#[derive(Debug, Clone)]
pub struct LineEndingWriter<K> {
    downstream: K,
    ending: LineEnding,
}

impl<K> LineEndingWriter<K>
where
    K: SymbolSink,
{
    /// Wraps `downstream`.
    pub fn new(downstream: K, ending: LineEnding) -> Self {
        Self { downstream, ending }
    }

    /// Unwraps the downstream sink.
    pub fn into_inner(self) -> K {
        self.downstream
    }
}

impl<K> SymbolSink for LineEndingWriter<K>
where
    K: SymbolSink,
{
    fn write_symbol(&mut self, c: char) -> Result<(), StreamError> {
        if c == '\n' {
            self.ending
                .as_str()
                .chars()
                .try_for_each(|c| self.downstream.write_symbol(c))
        } else {
            self.downstream.write_symbol(c)
        }
    }

    fn finish(&mut self) -> Result<(), StreamError> {
        self.downstream.finish()
    }
}
