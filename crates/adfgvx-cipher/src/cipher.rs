//! The end-to-end cipher: substitution, transposition and text layout.

use std::fmt;

use adfgvx_core::{AlphabetSpec, SubstitutionAlphabet};
use adfgvx_stream::{
    ciphertext_symbols, decrypt_pipeline, encrypt_pipeline_into, write_ciphertext,
};
use adfgvx_transposition::Transposition;
use zeroize::Zeroizing;

use crate::{CipherError, CipherSettings, TextCodec};

/// A configured ADFGVX-style cipher.
///
/// Encryption substitutes every plaintext character with a code of the
/// substitution alphabet, runs the code symbols through every transposition
/// pass, and lays the result out in groups and lines. Decryption strips the
/// layout, undoes the transpositions in reverse order and contracts the codes
/// back into characters.
///
/// The cipher is a classical construction and is easily broken. Intermediate
/// buffers are zeroized, but it must not be relied on to protect secrets.
///
/// # Examples
///
/// ```
/// use adfgvx_cipher::{Cipher, CipherSettings};
///
/// let cipher = Cipher::new(CipherSettings::default(), "privacy", &["quark"])?;
/// let ciphertext = cipher.encrypt_str("Attack at dawn")?;
/// assert_eq!(ciphertext, "XVADV XXXVA FVFXF AVAVV ADGV");
/// assert_eq!(cipher.decrypt_str(&ciphertext)?, "ATTACKATDAWN");
/// # Ok::<(), adfgvx_cipher::CipherError>(())
/// ```
pub struct Cipher {
    settings: CipherSettings,
    spec: &'static AlphabetSpec,
    alphabet: SubstitutionAlphabet,
    transposition: Transposition,
}

impl Cipher {
    /// Builds a cipher from settings and passwords.
    ///
    /// The substitution password is folded with the alphabet's case rules
    /// first. Transposition passwords are used verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::Config`] if the alphabet, code symbols or
    /// substitution password are invalid and [`CipherError::Transposition`] if
    /// the transposition passwords are.
    pub fn new<S>(
        settings: CipherSettings,
        password: &str,
        transposition_passwords: &[S],
    ) -> Result<Self, CipherError>
    where
        S: AsRef<str>,
    {
        let spec = settings.alphabet_spec()?;
        let code_symbols = settings.code_symbols_for(spec);
        let prepared: Zeroizing<String> =
            Zeroizing::new(password.chars().map(|c| spec.prepare(c)).collect());
        let alphabet = SubstitutionAlphabet::new(spec, &prepared, &code_symbols)?;
        let transposition = Transposition::new(transposition_passwords)?;

        log::debug!(
            "cipher ready: alphabet {}, {} transposition passes",
            spec.key(),
            transposition.passes()
        );

        Ok(Self {
            settings,
            spec,
            alphabet,
            transposition,
        })
    }

    /// Returns the settings this cipher was built with.
    #[must_use]
    pub fn settings(&self) -> &CipherSettings {
        &self.settings
    }

    /// Returns the alphabet specification in use.
    #[must_use]
    pub fn spec(&self) -> &'static AlphabetSpec {
        self.spec
    }

    /// Returns the substitution alphabet.
    #[must_use]
    pub fn alphabet(&self) -> &SubstitutionAlphabet {
        &self.alphabet
    }

    /// Returns the transposition passes.
    #[must_use]
    pub fn transposition(&self) -> &Transposition {
        &self.transposition
    }

    /// Rejects inputs larger than the configured limit.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::InputTooLarge`] if `size` exceeds the limit.
    pub fn check_input_size(&self, size: u64) -> Result<(), CipherError> {
        let limit = self.settings.max_input_size;
        if size > limit {
            return Err(CipherError::InputTooLarge { size, limit });
        }
        Ok(())
    }

    /// Encrypts plaintext into grouped, wrapped ciphertext.
    ///
    /// Characters outside the alphabet are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if a pipeline stage fails.
    pub fn encrypt_str(&self, plaintext: &str) -> Result<String, CipherError> {
        let capacity = plaintext.len() * self.alphabet.places();
        self.encrypt_text(plaintext, capacity)
    }

    /// Decrypts ciphertext produced by [`encrypt_str`](Self::encrypt_str).
    ///
    /// Anything but code symbols is ignored, so grouping, line breaks and
    /// surrounding noise need not be removed first.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::Stream`] if the symbols do not decode with this
    /// cipher's alphabet.
    pub fn decrypt_str(&self, ciphertext: &str) -> Result<String, CipherError> {
        let mut symbols = Zeroizing::new(ciphertext_symbols(
            ciphertext,
            self.alphabet.code_symbols(),
        )?);
        let length = symbols.len();
        self.transposition
            .untranspose(symbols.as_mut_slice(), length)?;
        let plaintext = decrypt_pipeline(
            &symbols,
            &self.alphabet,
            self.settings.line_ending,
            0,
            0,
        )?;

        log::info!(
            "decrypted {length} code symbols into {} characters",
            plaintext.chars().count()
        );
        Ok(plaintext)
    }

    /// Decodes `input`, encrypts it and encodes the ciphertext.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::InputTooLarge`] before decoding if `input`
    /// exceeds the limit, [`CipherError::Decode`] if it is not valid text,
    /// and any error of [`encrypt_str`](Self::encrypt_str).
    pub fn encrypt_bytes<C>(&self, codec: &C, input: &[u8]) -> Result<Vec<u8>, CipherError>
    where
        C: TextCodec + ?Sized,
    {
        self.check_input_size(byte_len(input))?;
        let decoded = codec.decode(input, self.settings.input_encoding)?;
        let plaintext = Zeroizing::new(decoded.text);
        let bytes_per_character = codec.bytes_per_character(decoded.encoding).max(1);
        let capacity = input.len() / bytes_per_character * self.alphabet.places();
        let ciphertext = self.encrypt_text(&plaintext, capacity)?;
        Ok(codec.encode(
            &ciphertext,
            self.settings.output_encoding,
            self.settings.output_bom,
        ))
    }

    /// Decodes `input`, decrypts it and encodes the plaintext.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::InputTooLarge`] before decoding if `input`
    /// exceeds the limit, [`CipherError::Decode`] if it is not valid text,
    /// and any error of [`decrypt_str`](Self::decrypt_str).
    pub fn decrypt_bytes<C>(&self, codec: &C, input: &[u8]) -> Result<Vec<u8>, CipherError>
    where
        C: TextCodec + ?Sized,
    {
        self.check_input_size(byte_len(input))?;
        let decoded = codec.decode(input, self.settings.input_encoding)?;
        let plaintext = Zeroizing::new(self.decrypt_str(&decoded.text)?);
        Ok(codec.encode(
            &plaintext,
            self.settings.output_encoding,
            self.settings.output_bom,
        ))
    }

    fn encrypt_text(&self, plaintext: &str, capacity: usize) -> Result<String, CipherError> {
        let mut symbols: Zeroizing<Vec<char>> = Zeroizing::new(Vec::with_capacity(capacity));
        encrypt_pipeline_into(plaintext, self.spec, &self.alphabet, &mut symbols)?;
        let length = symbols.len();
        self.transposition
            .transpose(symbols.as_mut_slice(), length)?;
        let ciphertext = write_ciphertext(
            &symbols,
            self.settings.group_size,
            self.settings.max_line_length,
            self.settings.line_ending,
        )?;

        log::info!(
            "encrypted {} characters into {length} code symbols",
            length / self.alphabet.places().max(1)
        );
        Ok(ciphertext)
    }
}

impl fmt::Debug for Cipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cipher")
            .field("settings", &self.settings)
            .field("alphabet", &self.spec.key())
            .field("passes", &self.transposition.passes())
            .finish_non_exhaustive()
    }
}

fn byte_len(input: &[u8]) -> u64 {
    u64::try_from(input.len()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use adfgvx_core::ConfigError;
    use adfgvx_stream::{LineEnding, StreamError};
    use adfgvx_transposition::TranspositionError;
    use proptest::prelude::*;

    use super::*;
    use crate::{StdTextCodec, TextEncoding};

    fn cipher(settings: CipherSettings, transposition: &[&str]) -> Cipher {
        Cipher::new(settings, "privacy", transposition).unwrap()
    }

    #[test]
    fn test_known_ciphertext() {
        let single = cipher(CipherSettings::default(), &["quark"]);
        assert_eq!(
            single.encrypt_str("Attack at dawn").unwrap(),
            "XVADV XXXVA FVFXF AVAVV ADGV"
        );

        let chained = cipher(CipherSettings::default(), &["quark", "MEDDLE"]);
        let ciphertext = chained.encrypt_str("Attack at dawn").unwrap();
        assert_eq!(ciphertext, "AVFAD AADVX XVXVA VVFVG XXFV");
        assert_eq!(chained.decrypt_str(&ciphertext).unwrap(), "ATTACKATDAWN");
    }

    #[test]
    fn test_decrypt_ignores_layout() {
        let cipher = cipher(CipherSettings::default(), &["quark"]);
        let plaintext = cipher
            .decrypt_str("  XVADV\r\nXXXVA-FVFXF  AVAVV ADGV\n")
            .unwrap();
        assert_eq!(plaintext, "ATTACKATDAWN");
    }

    #[test]
    fn test_password_is_prepared() {
        let settings = CipherSettings {
            places: 2,
            symbols: 5,
            ..CipherSettings::default()
        };
        let lower = Cipher::new(settings.clone(), "jumbo", &["ab"]).unwrap();
        let upper = Cipher::new(settings, "IUMBO", &["ab"]).unwrap();
        assert_eq!(lower.encrypt_str("hello").unwrap(), upper.encrypt_str("hello").unwrap());
    }

    #[test]
    fn test_construction_errors() {
        assert!(matches!(
            Cipher::new(CipherSettings::default(), "", &["ab"]),
            Err(CipherError::Config(ConfigError::EmptyPassword))
        ));
        assert!(matches!(
            Cipher::new(CipherSettings::default(), "pass word", &["ab"]),
            Err(CipherError::Config(ConfigError::PasswordCharacterNotInAlphabet {
                position: 5
            }))
        ));
        assert!(matches!(
            Cipher::new(CipherSettings::default(), "key", &["ab", "c"]),
            Err(CipherError::Transposition(TranspositionError::PasswordTooShort {
                index: 2
            }))
        ));
        assert!(matches!(
            Cipher::new::<&str>(CipherSettings::default(), "key", &[]),
            Err(CipherError::Transposition(TranspositionError::NoPasswords))
        ));
        let settings = CipherSettings {
            code_symbols: Some("ADFGV".to_owned()),
            ..CipherSettings::default()
        };
        assert!(matches!(
            Cipher::new(settings, "key", &["ab"]),
            Err(CipherError::Config(ConfigError::CodeSymbolCount { .. }))
        ));
    }

    #[test]
    fn test_incomplete_ciphertext() {
        let cipher = cipher(CipherSettings::default(), &["quark"]);
        assert!(matches!(
            cipher.decrypt_str("XVADV XX"),
            Err(CipherError::Stream(StreamError::IncompleteSequence { .. }))
        ));
    }

    #[test]
    fn test_input_limit() {
        let settings = CipherSettings {
            max_input_size: 4,
            ..CipherSettings::default()
        };
        let cipher = cipher(settings, &["quark"]);
        assert!(cipher.encrypt_bytes(&StdTextCodec, b"abcd").is_ok());
        assert!(matches!(
            cipher.encrypt_bytes(&StdTextCodec, b"abcde"),
            Err(CipherError::InputTooLarge { size: 5, limit: 4 })
        ));
    }

    #[test]
    fn test_bytes_round_trip_with_encodings() {
        let settings = CipherSettings {
            places: 2,
            symbols: 8,
            output_encoding: TextEncoding::Utf16Le,
            output_bom: true,
            line_ending: LineEnding::CrLf,
            ..CipherSettings::default()
        };
        let cipher = cipher(settings, &["quark", "zebra"]);
        let plaintext = "Dear Bob,\nmeet me at 9\n";

        let encrypted = cipher.encrypt_bytes(&StdTextCodec, plaintext.as_bytes()).unwrap();
        assert!(encrypted.starts_with(&[0xFF, 0xFE]));

        let decrypted = cipher.decrypt_bytes(&StdTextCodec, &encrypted).unwrap();
        let decoded = StdTextCodec.decode(&decrypted, TextEncoding::Utf8).unwrap();
        assert_eq!(decoded.encoding, TextEncoding::Utf16Le);
        assert_eq!(decoded.text, "Dear Bob\r\nmeet me at 9\r\n");
    }

    #[test]
    fn test_debug_hides_secrets() {
        let cipher = cipher(CipherSettings::default(), &["quark"]);
        let debug = format!("{cipher:?}");
        assert!(debug.contains("passes: 1"));
        assert!(!debug.contains("quark"));
    }

    proptest! {
        #[test]
        fn prop_round_trip(
            text in "[A-Z0-9]{0,200}",
            password in "[A-Z]{1,12}",
            passes in prop::collection::vec("[a-z]{2,9}", 1..4),
            group_size in 0usize..8,
            max_line_length in 0usize..50,
        ) {
            let settings = CipherSettings { group_size, max_line_length, ..CipherSettings::default() };
            let cipher = Cipher::new(settings, &password, &passes).unwrap();
            let ciphertext = cipher.encrypt_str(&text).unwrap();
            prop_assert_eq!(cipher.decrypt_str(&ciphertext).unwrap(), text);
        }
    }
}
