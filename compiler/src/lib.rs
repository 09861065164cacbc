//! umsg-compiler
//!
//! This crate implements:
//!  1) Canonicalization of `.umsg` text and its FNV-1a schema hash,
//!  2) A restricted-grammar parser producing a [`Message`] descriptor,
//!  3) Field verification (allowed types, array lengths, duplicates),
//!  4) Code generation for Rust (`umsg_marshal`) and C++ (`marshalling.hpp`),
//!  5) Output placement (`output_path`, `write_if_changed`) and error types.

pub mod error;
pub mod types;
pub mod utils;
pub mod canonical;
pub mod hash;
pub mod parser;
pub mod verifier;
pub mod compiler;
pub mod gen_rust;
pub mod gen_cpp;
pub mod output;

pub use canonical::canonicalize;
pub use compiler::{compile, compile_file, generate, GenOptions, Target};
pub use error::{GrammarError, UmsgError};
pub use hash::fnv1a_32;
pub use output::{output_path, write_if_changed, WriteOutcome};
pub use parser::parse_message;
pub use types::{Field, Message, PrimitiveType};
