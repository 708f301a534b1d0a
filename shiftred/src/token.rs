//! The token contract between the engine and its token source.

use crate::error::Span;
use std::fmt::Debug;

/// A terminal symbol with its semantic payload, as consumed by the engine.
///
/// Tokens double as the engine's semantic values: on shift the token itself
/// is pushed onto the value stack, and reduction actions pop operand tokens
/// and push a synthesized one in their place.
pub trait Token: Clone + Debug {
    /// Terminal identity; converts to the column index in the grammar
    /// tables' dense action rows.
    type Id: Copy + Debug + Eq + Into<usize>;

    /// Returns the token's terminal identity.
    fn token_id(&self) -> Self::Id;

    /// Returns the source region the token covers, when known.
    fn span(&self) -> Option<Span>;

    /// Builds the placeholder value pushed when error recovery simulates a
    /// shift of the designated error terminal. The span is that of the
    /// offending lookahead, when one was held.
    fn error_marker(span: Option<Span>) -> Self;
}

/// A forward-only, non-restartable sequence of tokens.
///
/// The engine pulls lazily: `try_next` is called only when a table lookup
/// needs a lookahead that is not already cached, and a token is never
/// requested twice. Sources must emit an explicit end-of-input token when
/// the input is exhausted, and may keep repeating it; yielding `None`
/// before that is a contract violation the engine reports as
/// [`ParseError::TruncatedInput`].
///
/// On malformed input a source should prefer emitting an "unknown" token
/// category over failing: the grammar tables will reject it as a syntax
/// error, which keeps lexical anomalies on the recoverable path.
///
/// [`ParseError::TruncatedInput`]: crate::ParseError::TruncatedInput
pub trait TokenSource {
    /// The token type this source produces.
    type Token: Token;
    /// Failure type for sources that can fail (I/O, decoding); use
    /// [`std::convert::Infallible`] otherwise.
    type Error;

    /// Returns the next token, or `None` once the sequence is over.
    fn try_next(&mut self) -> Result<Option<Self::Token>, Self::Error>;
}
