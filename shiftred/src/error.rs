//! Source-location and error types used by the parsing engine.
//!
//! This module defines the small types the engine and its token sources use
//! for tracking source locations and reporting failures: [`Position`] and
//! [`Span`] for locations, [`SyntaxDiagnostic`] for recoverable syntax
//! errors, and [`ParseError`] for the terminal outcomes of a parse. It also
//! provides a convenient `span!` macro for building `Option<Span>` values
//! inline.
//!
//! # Examples
//!
//! ```rust
//! # use shiftred::{Position, Span, span};
//! let start = Position::new(3, 5);
//! let end = Position::new(3, 10);
//! let sp = Span::new(start, end);
//! assert_eq!(sp.is_empty(), false);
//! assert_eq!(sp.line_range(), (3, 3));
//!
//! // Build an Option<Span> with the macro
//! let sp_opt = span!(1, 1, 1, 5);
//! assert!(sp_opt.is_some());
//! ```

use thiserror::Error;

/// A 1-based line/column position in source text.
///
/// `line` and `column` are typically 1-based (human-facing). If you prefer
/// 0-based internally, convert in your token source at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    /// 1-based line number.
    pub line: usize,
    /// 1-based column number (character position in the line).
    pub column: usize,
}

impl Position {
    /// Creates a new `Position`.
    #[inline]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A half-open source range: `[start, end)`.
///
/// `Span` is used to mark the region of source text that a token or a
/// reduced value covers, or to attach precise locations to diagnostics.
///
/// Invariants are not enforced here, but it is conventional for `start <= end`
/// in lexicographic `(line, column)` ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Starting position (inclusive).
    pub start: Position,
    /// Ending position (exclusive by convention).
    pub end: Position,
}

impl Span {
    /// Creates a new `Span`.
    #[inline]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Merge two spans into one that covers both.
    ///
    /// The result's `start` is the minimum of the two starts, and `end` is
    /// the maximum of the two ends.
    #[inline]
    pub fn merge(&self, other: &Span) -> Span {
        Span {
            start: if self.start <= other.start {
                self.start
            } else {
                other.start
            },
            end: if self.end >= other.end {
                self.end
            } else {
                other.end
            },
        }
    }

    /// Returns `true` if the span is empty (same start and end position).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns the inclusive line range spanned by this `Span`.
    #[inline]
    pub fn line_range(&self) -> (usize, usize) {
        (self.start.line, self.end.line)
    }

    /// Pretty-print for diagnostics (human-readable).
    #[inline]
    pub fn display(&self) -> String {
        format!(
            "span {}:{} to {}:{}",
            self.start.line, self.start.column, self.end.line, self.end.column
        )
    }
}

/// A recoverable syntax error, handed to [`Parser::report`] before the
/// engine attempts recovery.
///
/// Rendering follows the classic parser-generator message shape:
///
/// ```text
/// syntax error: unexpected <token>[, expecting <tok> [or <tok>]...]
/// ```
///
/// When the engine runs with verbose diagnostics disabled, `unexpected` is
/// `None` and the message collapses to the bare `syntax error`.
///
/// [`Parser::report`]: crate::Parser::report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxDiagnostic {
    /// Display name of the offending lookahead, if verbose diagnostics are on.
    pub unexpected: Option<&'static str>,
    /// Display names of tokens with a legal shift from the failing state;
    /// empty when verbose diagnostics are off or more than four would apply.
    pub expected: Vec<&'static str>,
    /// Location of the offending lookahead, when the source provided one.
    pub span: Option<Span>,
}

impl std::fmt::Display for SyntaxDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("syntax error")?;
        if let Some(unexpected) = self.unexpected {
            write!(f, ": unexpected {unexpected}")?;
            for (i, name) in self.expected.iter().enumerate() {
                if i == 0 {
                    write!(f, ", expecting {name}")?;
                } else {
                    write!(f, " or {name}")?;
                }
            }
        }
        Ok(())
    }
}

/// Terminal outcome of a failed parse.
///
/// Syntax errors are *not* represented here; those are handled inside the
/// engine by the phased recovery protocol and surface only through
/// [`Parser::report`]. `ParseError` covers the conditions that end the parse:
/// a failing token source, a reduction action that refused to complete, or
/// recovery running out of options.
///
/// [`Parser::report`]: crate::Parser::report
#[derive(Debug, Error)]
pub enum ParseError<S, R> {
    /// The token source failed to produce a token.
    #[error("token source failed: {0}")]
    Source(S),

    /// A reduction action failed; the parse stops where it stood.
    #[error("{0}")]
    Reduce(R),

    /// Error recovery searched the whole stack without finding a state that
    /// shifts the error terminal, or discarded its way to end-of-input.
    #[error("parse aborted: error recovery exhausted")]
    RecoveryExhausted {
        /// Location of the token the engine was looking at when it gave up.
        span: Option<Span>,
    },

    /// The token source reported exhaustion before yielding an end-of-input
    /// token, breaking the [`TokenSource`] contract.
    ///
    /// [`TokenSource`]: crate::TokenSource
    #[error("token source ended without an end-of-input token")]
    TruncatedInput,

    /// The grammar tables are internally inconsistent (for example, a shift
    /// recorded in a state that never consults a lookahead, or a missing
    /// goto entry). Static tables produced by a table generator never
    /// trigger this.
    #[error("malformed grammar tables: {0}")]
    Tables(&'static str),
}

/// Build an `Option<Span>` inline from 1-based line/column coordinates.
///
/// This macro returns `Some(Span { ... })`, which is convenient for
/// populating fields like `SyntaxDiagnostic { span, .. }`.
///
/// # Examples
///
/// ```rust
/// # use shiftred::span;
/// let s = span!(1, 1, 1, 5);
/// assert!(s.is_some());
/// ```
#[macro_export]
macro_rules! span {
    ($line_start:expr, $col_start:expr, $line_end:expr, $col_end:expr) => {
        Some($crate::Span {
            start: $crate::Position {
                line: $line_start,
                column: $col_start,
            },
            end: $crate::Position {
                line: $line_end,
                column: $col_end,
            },
        })
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_merge_covers_both() {
        let a = Span::new(Position::new(1, 5), Position::new(1, 9));
        let b = Span::new(Position::new(1, 2), Position::new(1, 7));
        let m = a.merge(&b);
        assert_eq!(m.start, Position::new(1, 2));
        assert_eq!(m.end, Position::new(1, 9));
    }

    #[test]
    fn span_merge_across_lines() {
        let a = Span::new(Position::new(2, 1), Position::new(2, 4));
        let b = Span::new(Position::new(4, 1), Position::new(4, 2));
        let m = a.merge(&b);
        assert_eq!(m.line_range(), (2, 4));
    }

    #[test]
    fn diagnostic_with_suggestions() {
        let diag = SyntaxDiagnostic {
            unexpected: Some("'*'"),
            expected: vec!["DIGIT", "LETTER"],
            span: span!(1, 5, 1, 6),
        };
        assert_eq!(
            diag.to_string(),
            "syntax error: unexpected '*', expecting DIGIT or LETTER"
        );
    }

    #[test]
    fn diagnostic_without_suggestions() {
        let diag = SyntaxDiagnostic {
            unexpected: Some("$end"),
            expected: Vec::new(),
            span: None,
        };
        assert_eq!(diag.to_string(), "syntax error: unexpected $end");
    }

    #[test]
    fn terse_diagnostic_is_bare() {
        let diag = SyntaxDiagnostic {
            unexpected: None,
            expected: Vec::new(),
            span: span!(2, 1, 2, 2),
        };
        assert_eq!(diag.to_string(), "syntax error");
    }
}
