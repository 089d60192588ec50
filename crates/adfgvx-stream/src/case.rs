//! Character-class folding on the read side.

use adfgvx_core::CaseRules;

use crate::{StreamError, SymbolSource};

/// Applies [`CaseRules`] (upper-casing, `J` to `I`) to every symbol read.
#[derive(Debug, Clone)]
pub struct CaseTransformer<S> {
    upstream: S,
    rules: CaseRules,
}

impl<S> CaseTransformer<S>
where
    S: SymbolSource,
{
    /// Wraps `upstream`.
    pub fn new(upstream: S, rules: CaseRules) -> Self {
        Self { upstream, rules }
    }
}

impl<S> SymbolSource for CaseTransformer<S>
where
    S: SymbolSource,
{
    fn next_symbol(&mut self) -> Result<Option<char>, StreamError> {
        Ok(self.upstream.next_symbol()?.map(|c| self.rules.apply(c)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CharSource;

    fn fold(text: &str, rules: CaseRules) -> String {
        CaseTransformer::new(CharSource::new(text.chars()), rules)
            .read_to_vec()
            .unwrap()
            .into_iter()
            .collect()
    }

    #[test]
    fn test_fold() {
        assert_eq!(fold("Jump 1", CaseRules::TO_UPPER), "JUMP 1");
        assert_eq!(
            fold("Jump 1", CaseRules::TO_UPPER | CaseRules::J_AS_I),
            "IUMP 1"
        );
        assert_eq!(fold("Jump", CaseRules::empty()), "Jump");
    }
}
