//! End-to-end encryption and decryption with the ADFGVX-style cipher.
//!
//! [`Cipher`] ties the pieces together: an alphabet and substitution password
//! from [`adfgvx_core`], the transposition passes of
//! [`adfgvx_transposition`], and the text pipeline of [`adfgvx_stream`].
//! [`CipherSettings`] holds everything except the passwords and can be stored
//! as JSON. [`TextCodec`] converts between bytes and text for file input and
//! output.
//!
//! # Examples
//!
//! ```
//! use adfgvx_cipher::{Cipher, CipherSettings, StdTextCodec};
//!
//! let settings = CipherSettings {
//!     group_size: 4,
//!     ..CipherSettings::default()
//! };
//! let cipher = Cipher::new(settings, "Fractionate", &["polybius", "square"])?;
//!
//! let encrypted = cipher.encrypt_bytes(&StdTextCodec, b"Meet at noon")?;
//! let decrypted = cipher.decrypt_bytes(&StdTextCodec, &encrypted)?;
//! assert_eq!(decrypted, b"MEETATNOON");
//! # Ok::<(), adfgvx_cipher::CipherError>(())
//! ```

mod cipher;
mod codec;
mod error;
mod settings;

pub use self::{
    cipher::Cipher,
    codec::{DecodedText, ParseTextEncodingError, StdTextCodec, TextCodec, TextEncoding},
    error::CipherError,
    settings::{CipherSettings, DEFAULT_MAX_INPUT_SIZE},
};
