//! Token definitions for the calculator frontend.
//!
//! [`CalcToken`] is both the lexer's output and the parser's semantic
//! value: reductions pop operand tokens, compute, and push a token retagged
//! with the nonterminal it now represents. [`TokenValue`] carries the
//! payload: a number, a register name, nothing, or the poison sentinel a
//! failed evaluation leaves behind.

use shiftred::{Span, Token};

/// Token identity. Terminal variants are laid out in grammar-table column
/// order; the trailing nonterminal variants exist only to retag semantic
/// values after reductions and never appear as lookaheads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum TokenID {
    /// End of input.
    End = 0,
    /// The error pseudo-token shifted during recovery.
    Error = 1,
    /// An unrecognized character; rejected by the tables as a syntax error.
    Unknown = 2,
    Digit = 3,
    Letter = 4,
    Or = 5,
    And = 6,
    Plus = 7,
    Minus = 8,
    Star = 9,
    Slash = 10,
    Percent = 11,
    /// Precedence marker for unary negation; resolved offline by the table
    /// generator and never produced by the lexer.
    UnaryMinus = 12,
    Newline = 13,
    Equals = 14,
    LeftParen = 15,
    RightParen = 16,

    // Nonterminals.
    List = 17,
    Stat = 18,
    Expr = 19,
    Number = 20,
}

impl From<TokenID> for usize {
    #[inline]
    fn from(id: TokenID) -> Self {
        id as usize
    }
}

/// The payload carried by a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenValue {
    /// No associated data (operators, separators, markers).
    None,
    /// An integer: a literal, a register's content, or a computed result.
    Number(i64),
    /// A register name, as lexed; resolved to a number on reduction.
    Register(char),
    /// Sentinel left by an evaluation failure (division by zero, overflow,
    /// read of an unassigned register). Poison flows through operators
    /// without further diagnostics and suppresses printing and storing.
    Poison,
}

/// A lexical token or reduced semantic value.
#[derive(Debug, Clone)]
pub struct CalcToken {
    /// The token's kind, terminal or (after a reduction) nonterminal.
    pub token_id: TokenID,
    /// The associated value, if applicable.
    pub value: TokenValue,
    /// The source region the token covers.
    pub span: Option<Span>,
}

impl CalcToken {
    /// Widens this token's span to also cover `other_span`.
    pub fn merge_span(&mut self, other_span: &Option<Span>) {
        match other_span {
            Some(other_span) => match &mut self.span {
                Some(my_span) => {
                    *my_span = my_span.merge(other_span);
                }
                None => {
                    self.span = Some(*other_span);
                }
            },
            None => (),
        }
    }
}

impl Token for CalcToken {
    type Id = TokenID;

    fn token_id(&self) -> TokenID {
        self.token_id
    }

    fn span(&self) -> Option<Span> {
        self.span
    }

    fn error_marker(span: Option<Span>) -> Self {
        CalcToken {
            token_id: TokenID::Error,
            value: TokenValue::None,
            span,
        }
    }
}
