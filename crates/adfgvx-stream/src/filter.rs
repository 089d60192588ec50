//! Allow-list filtering on the read side.

use crate::{StreamError, SymbolSource};

/// Passes through only symbols from a fixed set and silently drops the rest.
///
/// # Examples
///
/// ```
/// use adfgvx_stream::{AllowListFilter, CharSource, SymbolSource};
///
/// let mut source = AllowListFilter::new(CharSource::new("AD FG\nxX".chars()), "ADFGX".chars());
/// let symbols: String = source.read_to_vec()?.into_iter().collect();
/// assert_eq!(symbols, "ADFGX");
/// # Ok::<(), adfgvx_stream::StreamError>(())
/// ```
#[derive(Debug, Clone)]
pub struct AllowListFilter<S> {
    upstream: S,
    allowed: Vec<char>,
}

impl<S> AllowListFilter<S>
where
    S: SymbolSource,
{
    /// Wraps `upstream`, keeping only symbols contained in `allowed`.
    pub fn new<I>(upstream: S, allowed: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        let mut allowed: Vec<char> = allowed.into_iter().collect();
        allowed.sort_unstable();
        allowed.dedup();
        Self { upstream, allowed }
    }
}

impl<S> SymbolSource for AllowListFilter<S>
where
    S: SymbolSource,
{
    fn next_symbol(&mut self) -> Result<Option<char>, StreamError> {
        while let Some(c) = self.upstream.next_symbol()? {
            if self.allowed.binary_search(&c).is_ok() {
                return Ok(Some(c));
            }
        }
        Ok(None)
    }
}
