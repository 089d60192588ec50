//! Pipeline builders and the encrypt/decrypt stream passes.
//!
//! Stages are chained as boxed trait objects. The builders only offer the
//! stage orders the cipher uses: the substitution mapper is always the last
//! read-side stage and the unmapper always the first write-side stage.

use adfgvx_core::{AlphabetSpec, CaseRules, SubstitutionAlphabet};

use crate::{
    AllowListFilter, CaseTransformer, CharSource, Contraction, Expansion, GroupWriter, LineEnding,
    LineEndingNormalizer, LineEndingWriter, ManyToOneUnmapper, OneToManyMapper, StreamError,
    SymbolSink, SymbolSource,
};

/// A boxed read-side stage.
pub type BoxedSource<'a> = Box<dyn SymbolSource + 'a>;

/// A boxed write-side stage.
pub type BoxedSink<'a> = Box<dyn SymbolSink + 'a>;

/// Builds a read-side chain from the leaf source outwards.
///
/// Each call wraps the chain built so far, so stages run in call order.
///
/// # Examples
///
/// ```
/// use adfgvx_core::CaseRules;
/// use adfgvx_stream::{SourceChain, SymbolSource};
///
/// let mut source = SourceChain::from_chars("a\r\nj".chars())
///     .normalize_line_endings()
///     .fold_case(CaseRules::all())
///     .build();
/// let text: String = source.read_to_vec()?.into_iter().collect();
/// assert_eq!(text, "A\nI");
/// # Ok::<(), adfgvx_stream::StreamError>(())
/// ```
pub struct SourceChain<'a> {
    source: BoxedSource<'a>,
}

impl<'a> SourceChain<'a> {
    /// Starts a chain reading the characters of `chars`.
    pub fn from_chars<I>(chars: I) -> Self
    where
        I: IntoIterator<Item = char>,
        I::IntoIter: 'a,
    {
        Self::from_source(CharSource::new(chars))
    }

    /// Starts a chain reading from an arbitrary source.
    pub fn from_source<S>(source: S) -> Self
    where
        S: SymbolSource + 'a,
    {
        Self {
            source: Box::new(source),
        }
    }

    /// Converts CR, CR LF and NEL to LF.
    #[must_use]
    pub fn normalize_line_endings(self) -> Self {
        Self::from_source(LineEndingNormalizer::new(self.source))
    }

    /// Applies the given case rules.
    #[must_use]
    pub fn fold_case(self, rules: CaseRules) -> Self {
        Self::from_source(CaseTransformer::new(self.source, rules))
    }

    /// Drops every symbol not in `allowed`.
    #[must_use]
    pub fn allow_only<I>(self, allowed: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        Self::from_source(AllowListFilter::new(self.source, allowed))
    }

    /// Expands symbols through `map`. No stage can follow the mapper.
    pub fn expand<M>(self, map: M) -> ExpandedChain<'a>
    where
        M: Expansion + 'a,
    {
        ExpandedChain {
            source: Box::new(OneToManyMapper::new(self.source, map)),
        }
    }

    /// Finishes the chain.
    #[must_use]
    pub fn build(self) -> BoxedSource<'a> {
        self.source
    }
}

/// A read-side chain ending in a one-to-many mapper.
pub struct ExpandedChain<'a> {
    source: BoxedSource<'a>,
}

impl<'a> ExpandedChain<'a> {
    /// Finishes the chain.
    #[must_use]
    pub fn build(self) -> BoxedSource<'a> {
        self.source
    }
}

/// Builds a write-side chain from the final sink outwards.
///
/// Each call wraps the chain built so far, so symbols pass through the stages
/// in reverse call order: the stage added last receives them first.
///
/// # Examples
///
/// ```
/// use adfgvx_stream::{LineEnding, SinkChain, SymbolSink};
///
/// let mut text = String::new();
/// let mut sink = SinkChain::new(&mut text)
///     .line_endings(LineEnding::CrLf)
///     .grouped(2, 6)
///     .build();
/// sink.write_all("ADFGVX".chars())?;
/// sink.finish()?;
/// drop(sink);
/// assert_eq!(text, "AD FG\r\nVX");
/// # Ok::<(), adfgvx_stream::StreamError>(())
/// ```
pub struct SinkChain<'a> {
    sink: BoxedSink<'a>,
}

impl<'a> SinkChain<'a> {
    /// Starts a chain writing into `sink`.
    pub fn new<K>(sink: K) -> Self
    where
        K: SymbolSink + 'a,
    {
        Self {
            sink: Box::new(sink),
        }
    }

    /// Replaces LF with `ending`.
    #[must_use]
    pub fn line_endings(self, ending: LineEnding) -> Self {
        Self::new(LineEndingWriter::new(self.sink, ending))
    }

    /// Groups and wraps the symbols.
    #[must_use]
    pub fn grouped(self, group_size: usize, max_line_length: usize) -> Self {
        Self::new(GroupWriter::new(self.sink, group_size, max_line_length))
    }

    /// Contracts sequences through `map`. No stage can precede the unmapper.
    pub fn contract<M>(self, map: M) -> ContractedChain<'a>
    where
        M: Contraction + 'a,
    {
        ContractedChain {
            sink: Box::new(ManyToOneUnmapper::new(self.sink, map)),
        }
    }

    /// Finishes the chain.
    #[must_use]
    pub fn build(self) -> BoxedSink<'a> {
        self.sink
    }
}

/// A write-side chain starting with a many-to-one unmapper.
pub struct ContractedChain<'a> {
    sink: BoxedSink<'a>,
}

impl<'a> ContractedChain<'a> {
    /// Finishes the chain.
    #[must_use]
    pub fn build(self) -> BoxedSink<'a> {
        self.sink
    }
}

/// Turns plaintext into code symbols, appending them to `buffer`.
///
/// Line endings are normalized, the case rules of `spec` applied, characters
/// outside the alphabet dropped and the rest substituted. Returns the number
/// of symbols appended.
///
/// # Errors
///
/// Propagates stage errors; none are raised for valid alphabets.
pub fn encrypt_pipeline_into(
    raw: &str,
    spec: &AlphabetSpec,
    alphabet: &SubstitutionAlphabet,
    buffer: &mut Vec<char>,
) -> Result<usize, StreamError> {
    SourceChain::from_chars(raw.chars())
        .normalize_line_endings()
        .fold_case(spec.case_rules())
        .allow_only(spec.characters().iter().copied())
        .expand(alphabet)
        .build()
        .read_into(buffer)
}

/// Turns plaintext into code symbols.
///
/// See [`encrypt_pipeline_into`].
///
/// # Errors
///
/// Propagates stage errors; none are raised for valid alphabets.
///
/// # Examples
///
/// ```
/// use adfgvx_core::{AlphabetSpec, SubstitutionAlphabet};
/// use adfgvx_stream::encrypt_pipeline;
///
/// let spec = AlphabetSpec::lookup(2, 5)?;
/// let alphabet = SubstitutionAlphabet::new(spec, "KEY", &spec.default_code_symbols())?;
/// let symbols: String = encrypt_pipeline("k, j!", spec, &alphabet)?.into_iter().collect();
/// assert_eq!(symbols.len(), 4);
/// assert_eq!(&symbols[..2], "AA");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn encrypt_pipeline(
    raw: &str,
    spec: &AlphabetSpec,
    alphabet: &SubstitutionAlphabet,
) -> Result<Vec<char>, StreamError> {
    let mut buffer = Vec::with_capacity(raw.len() * alphabet.places());
    encrypt_pipeline_into(raw, spec, alphabet, &mut buffer)?;
    Ok(buffer)
}

/// Extracts the code symbols of a ciphertext, discarding grouping, line
/// breaks and any other noise.
///
/// # Errors
///
/// Propagates stage errors; none are raised by the stages used here.
pub fn ciphertext_symbols(text: &str, code_symbols: &[char]) -> Result<Vec<char>, StreamError> {
    let mut buffer = Vec::with_capacity(text.len());
    SourceChain::from_chars(text.chars())
        .normalize_line_endings()
        .allow_only(code_symbols.iter().copied())
        .build()
        .read_into(&mut buffer)?;
    Ok(buffer)
}

/// Renders transposed code symbols as grouped, wrapped ciphertext.
///
/// # Errors
///
/// Propagates stage errors; none are raised by the stages used here.
pub fn write_ciphertext(
    symbols: &[char],
    group_size: usize,
    max_line_length: usize,
    ending: LineEnding,
) -> Result<String, StreamError> {
    let separators = symbols.len() / group_size.max(1) * ending.as_str().len();
    let mut text = String::with_capacity(symbols.len() + separators);
    let mut sink = SinkChain::new(&mut text)
        .line_endings(ending)
        .grouped(group_size, max_line_length)
        .build();
    sink.write_all(symbols.iter().copied())?;
    sink.finish()?;
    drop(sink);
    Ok(text)
}

/// Turns code symbols back into plaintext.
///
/// Sequences are contracted through `alphabet`, optionally grouped and
/// wrapped, and LF is replaced with `ending`.
///
/// # Errors
///
/// Returns [`StreamError::UnmappableSequence`] if a code is not in the
/// alphabet and [`StreamError::IncompleteSequence`] if the symbols end inside
/// a code.
pub fn decrypt_pipeline(
    code: &[char],
    alphabet: &SubstitutionAlphabet,
    ending: LineEnding,
    group_size: usize,
    max_line_length: usize,
) -> Result<String, StreamError> {
    let mut text = String::with_capacity(code.len() / alphabet.places().max(1) + 1);
    let mut sink = SinkChain::new(&mut text)
        .line_endings(ending)
        .grouped(group_size, max_line_length)
        .contract(alphabet)
        .build();
    sink.write_all(code.iter().copied())?;
    sink.finish()?;
    drop(sink);
    Ok(text)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn alphabet(places: u8, symbols: u8, password: &str) -> (&'static AlphabetSpec, SubstitutionAlphabet) {
        let spec = AlphabetSpec::lookup(places, symbols).unwrap();
        let alphabet =
            SubstitutionAlphabet::new(spec, password, &spec.default_code_symbols()).unwrap();
        (spec, alphabet)
    }

    #[test]
    fn test_encrypt_drops_and_folds() {
        let (spec, alphabet) = alphabet(2, 6, "SECRET");
        let symbols = encrypt_pipeline("Hello, World 42!", spec, &alphabet).unwrap();
        assert_eq!(symbols.len(), 12 * 2);
        let text = decrypt_pipeline(&symbols, &alphabet, LineEnding::Lf, 0, 0).unwrap();
        assert_eq!(text, "HELLOWORLD42");
    }

    #[test]
    fn test_j_is_folded_for_adfgx() {
        let (spec, alphabet) = alphabet(2, 5, "KEY");
        let symbols = encrypt_pipeline("jJ", spec, &alphabet).unwrap();
        let text = decrypt_pipeline(&symbols, &alphabet, LineEnding::Lf, 0, 0).unwrap();
        assert_eq!(text, "II");
    }

    #[test]
    fn test_lowercase_alphabet_keeps_j() {
        let spec =
            AlphabetSpec::new(2, 6, "abcdefghijklmnopqrstuvwxyz0123456789".chars()).unwrap();
        let alphabet =
            SubstitutionAlphabet::new(&spec, "key", &spec.default_code_symbols()).unwrap();
        let symbols = encrypt_pipeline("jam, JAM", &spec, &alphabet).unwrap();
        let text = decrypt_pipeline(&symbols, &alphabet, LineEnding::Lf, 0, 0).unwrap();
        assert_eq!(text, "jam");
    }

    #[test]
    fn test_line_endings_survive_when_in_alphabet() {
        let (spec, alphabet) = alphabet(2, 8, "Password");
        let symbols = encrypt_pipeline("a\r\nb\rc\nd", spec, &alphabet).unwrap();
        let lf = decrypt_pipeline(&symbols, &alphabet, LineEnding::Lf, 0, 0).unwrap();
        assert_eq!(lf, "a\nb\nc\nd");
        let crlf = decrypt_pipeline(&symbols, &alphabet, LineEnding::CrLf, 0, 0).unwrap();
        assert_eq!(crlf, "a\r\nb\r\nc\r\nd");
    }

    #[test]
    fn test_encrypt_into_appends() {
        let (spec, alphabet) = alphabet(2, 6, "SECRET");
        let mut buffer = vec!['X'];
        let count = encrypt_pipeline_into("ab", spec, &alphabet, &mut buffer).unwrap();
        assert_eq!(count, 4);
        assert_eq!(buffer.len(), 5);
    }

    #[test]
    fn test_ciphertext_round_trip() {
        let symbols: Vec<char> = "ADFGVXADFGVXAD".chars().collect();
        let text = write_ciphertext(&symbols, 5, 12, LineEnding::CrLf).unwrap();
        assert_eq!(text, "ADFGV XADFG\r\nVXAD");
        let code_symbols: Vec<char> = "ADFGVX".chars().collect();
        assert_eq!(ciphertext_symbols(&text, &code_symbols).unwrap(), symbols);
    }

    #[test]
    fn test_ciphertext_symbols_drops_noise() {
        let code_symbols: Vec<char> = "ADFGX".chars().collect();
        let symbols = ciphertext_symbols("ad AD\r\n-FX\u{85}g", &code_symbols).unwrap();
        assert_eq!(symbols, vec!['A', 'D', 'F', 'X']);
    }

    #[test]
    fn test_decrypt_errors() {
        let (_, alphabet) = alphabet(2, 6, "SECRET");
        let odd: Vec<char> = "ADF".chars().collect();
        assert_eq!(
            decrypt_pipeline(&odd, &alphabet, LineEnding::Lf, 0, 0),
            Err(StreamError::IncompleteSequence {
                sequence: "F".to_owned()
            })
        );
        let foreign: Vec<char> = "QQ".chars().collect();
        assert!(matches!(
            decrypt_pipeline(&foreign, &alphabet, LineEnding::Lf, 0, 0),
            Err(StreamError::UnmappableSequence { .. })
        ));
    }

    #[test]
    fn test_grouped_plaintext() {
        let (spec, alphabet) = alphabet(2, 6, "SECRET");
        let symbols = encrypt_pipeline("attackatdawn", spec, &alphabet).unwrap();
        let text = decrypt_pipeline(&symbols, &alphabet, LineEnding::Lf, 4, 0).unwrap();
        assert_eq!(text, "ATTA CKAT DAWN");
    }

    #[test]
    fn test_source_chain_with_custom_source() {
        let mut source = SourceChain::from_source(CharSource::new("x\u{85}y".chars()))
            .normalize_line_endings()
            .build();
        assert_eq!(source.read_to_vec().unwrap(), vec!['x', '\n', 'y']);
    }

    proptest! {
        #[test]
        fn prop_round_trip_every_catalog_entry(
            entry in 0..adfgvx_core::catalog().len(),
            picks in prop::collection::vec(any::<prop::sample::Index>(), 0..120),
        ) {
            let spec = &adfgvx_core::catalog()[entry];
            let alphabet = SubstitutionAlphabet::new(
                spec,
                &spec.characters()[..2].iter().collect::<String>(),
                &spec.default_code_symbols(),
            )
            .unwrap();
            let text: String = picks.iter().map(|i| *i.get(spec.characters())).collect();

            let symbols = encrypt_pipeline(&text, spec, &alphabet).unwrap();
            prop_assert_eq!(symbols.len(), text.chars().count() * usize::from(spec.places()));
            let back = decrypt_pipeline(&symbols, &alphabet, LineEnding::Lf, 0, 0).unwrap();
            prop_assert_eq!(back, text);
        }

        #[test]
        fn prop_ciphertext_symbols_inverts_writer(
            picks in prop::collection::vec(0usize..6, 0..200),
            group_size in 0usize..8,
            max_line_length in 0usize..40,
        ) {
            let code_symbols: Vec<char> = "ADFGVX".chars().collect();
            let symbols: Vec<char> = picks.iter().map(|&i| code_symbols[i]).collect();
            let text = write_ciphertext(&symbols, group_size, max_line_length, LineEnding::CrLf).unwrap();
            prop_assert_eq!(ciphertext_symbols(&text, &code_symbols).unwrap(), symbols);
        }
    }
}
