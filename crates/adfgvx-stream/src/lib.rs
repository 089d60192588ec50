//! The stream transform pipeline of the ADFGVX-style cipher.
//!
//! Text flows through small single-purpose stages. Read-side stages implement
//! [`SymbolSource`] and pull from the stage they wrap; write-side stages
//! implement [`SymbolSink`] and push into the stage they wrap.
//!
//! | stage                      | side  | purpose                                  |
//! |----------------------------|-------|------------------------------------------|
//! | [`LineEndingNormalizer`]   | read  | CR, CR LF and NEL become LF              |
//! | [`CaseTransformer`]        | read  | upper-casing and `J` to `I`              |
//! | [`AllowListFilter`]        | read  | drops symbols outside a fixed set        |
//! | [`OneToManyMapper`]        | read  | substitutes characters with codes        |
//! | [`ManyToOneUnmapper`]      | write | longest-match decoding of codes          |
//! | [`GroupWriter`]            | write | groups of symbols and wrapped lines      |
//! | [`LineEndingWriter`]       | write | LF becomes the requested line ending     |
//!
//! [`SourceChain`] and [`SinkChain`] assemble the stages in the orders the
//! cipher uses, and the `*_pipeline` functions run complete passes.
//!
//! # Examples
//!
//! ```
//! use adfgvx_core::{AlphabetSpec, SubstitutionAlphabet};
//! use adfgvx_stream::{LineEnding, decrypt_pipeline, encrypt_pipeline};
//!
//! let spec = AlphabetSpec::lookup(2, 6)?;
//! let alphabet = SubstitutionAlphabet::new(spec, "SECRET", &spec.default_code_symbols())?;
//!
//! let symbols = encrypt_pipeline("Attack at 10!", spec, &alphabet)?;
//! let text = decrypt_pipeline(&symbols, &alphabet, LineEnding::Lf, 0, 0)?;
//! assert_eq!(text, "ATTACKAT10");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod case;
pub mod contract;
pub mod error;
pub mod expand;
pub mod filter;
pub mod group;
pub mod line_ending;
pub mod mapping;
pub mod pipeline;
pub mod stage;

pub use self::{
    case::CaseTransformer,
    contract::ManyToOneUnmapper,
    error::StreamError,
    expand::OneToManyMapper,
    filter::AllowListFilter,
    group::{GroupWriter, effective_line_length},
    line_ending::{
        LineEnding, LineEndingNormalizer, LineEndingWriter, NEL, ParseLineEndingError,
    },
    mapping::{Contraction, Expansion, SequenceTable},
    pipeline::{
        BoxedSink, BoxedSource, ContractedChain, ExpandedChain, SinkChain, SourceChain,
        ciphertext_symbols, decrypt_pipeline, encrypt_pipeline, encrypt_pipeline_into,
        write_ciphertext,
    },
    stage::{CharSource, SymbolSink, SymbolSource},
};
