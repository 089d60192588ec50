//! Chained columnar transposition for the ADFGVX-style cipher.
//!
//! A [`Transposition`] is built from one or more passwords. Each password
//! defines a column order (the stable rank of its characters); transposing
//! writes the symbols row by row into a table as wide as the password and
//! reads the columns back in rank order. Several passwords are applied one
//! after another, and [`Transposition::untranspose`] applies their inverses in
//! reverse order.
//!
//! The column copies of one pass touch disjoint parts of the output, so they
//! run on the [`rayon`] thread pool; a pass is fully joined before the next one
//! starts.
//!
//! # Examples
//!
//! ```
//! use adfgvx_transposition::Transposition;
//!
//! let transposition = Transposition::new(&["CARGO", "RAYON"])?;
//!
//! let mut symbols: Vec<u8> = b"FDGAXXAVDGFA".to_vec();
//! let len = symbols.len();
//! transposition.transpose(&mut symbols, len)?;
//! transposition.untranspose(&mut symbols, len)?;
//! assert_eq!(symbols, b"FDGAXXAVDGFA");
//! # Ok::<(), adfgvx_transposition::TranspositionError>(())
//! ```

mod engine;
mod error;
mod transposition;

pub use self::{error::TranspositionError, transposition::Transposition};
