//! # shiftred
//!
//! A table-driven deterministic shift-reduce parsing engine.
//!
//! The engine consumes a token stream, drives transitions from precomputed
//! action/goto tables, applies grammar-production reductions that
//! synthesize typed values, and performs bounded error recovery when the
//! input does not match the grammar. It knows nothing about any particular
//! grammar: tables are supplied as static data (see [`ParserTables`]),
//! reduction actions and diagnostics are hooks on the [`Parser`] trait, and
//! tokens arrive through the [`TokenSource`] abstraction.
//!
//! Construction of the tables themselves is out of scope; they are the
//! output of an offline table generator, expressed as three explicit
//! structures (a dense two-dimensional lookup, a per-state fallback, and a
//! small exception list) plus a goto table.
//!
//! ## Modules
//!
//! - [`error`] — positions, spans, diagnostics, terminal parse outcomes
//! - [`tables`] — the static table structures and their lookup rules
//! - [`token`] — the token and token-source contracts
//! - [`parser`] — the engine itself
//!
//! One parse runs on one logical thread of control; the only suspension
//! point is the pull from the token source. A parser instance owns its
//! stacks, so independent sessions just use independent instances.

pub mod error;
pub mod parser;
pub mod tables;
pub mod token;

pub use error::{ParseError, Position, Span, SyntaxDiagnostic};
pub use parser::{Parser, ParserCtx, ParserStats};
pub use tables::{Action, Exception, ParserTables, ProdInfo, StateID};
pub use token::{Token, TokenSource};

#[cfg(test)]
mod test_grammar;
