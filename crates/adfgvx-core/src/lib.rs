//! Core tables of the ADFGVX-style fractionating cipher.
//!
//! This crate holds the password-derived, immutable pieces of the cipher that
//! every other component builds on:
//!
//! - [`alphabet`]: [`AlphabetSpec`], the character set and code geometry of a
//!   substitution scheme, and the built-in [`catalog`].
//! - [`substitution`]: [`SubstitutionAlphabet`], the Polybius-square mapping
//!   between alphabet characters and fixed-length [`Code`]s.
//! - [`rank_order`]: [`RankOrder`], the stable rank permutation used to turn a
//!   password into a transposition column order.
//! - [`sliding_window`]: [`SlidingCharWindow`], the look-back buffer used for
//!   longest-match decoding.
//!
//! Tables derived from passwords are scrubbed with [`zeroize`] when dropped.
//! This is best effort: copies made by the caller are not tracked.
//!
//! The cipher is a classical, pedagogical construction and offers no
//! cryptographic security.
//!
//! # Examples
//!
//! ```
//! use adfgvx_core::{AlphabetSpec, SubstitutionAlphabet};
//!
//! let spec = AlphabetSpec::lookup(2, 6)?;
//! let symbols = spec.default_code_symbols();
//! let password: String = "privacy".chars().map(|c| spec.prepare(c)).collect();
//! let alphabet = SubstitutionAlphabet::new(spec, &password, &symbols)?;
//!
//! let code = alphabet.encode('P').unwrap();
//! assert_eq!(code.to_string(), "AA");
//! # Ok::<(), adfgvx_core::ConfigError>(())
//! ```

pub mod alphabet;
pub mod code;
pub mod error;
pub mod rank_order;
pub mod sliding_window;
pub mod substitution;

pub use self::{
    alphabet::{AlphabetKey, AlphabetSpec, CaseRules, catalog},
    code::{Code, MAX_CODE_LEN},
    error::{ConfigError, WindowOverflow},
    rank_order::RankOrder,
    sliding_window::SlidingCharWindow,
    substitution::SubstitutionAlphabet,
};
