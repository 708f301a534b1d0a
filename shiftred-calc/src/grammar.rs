//! Static parser tables for the calculator grammar.
//!
//! The tables encode the SLR automaton for:
//!
//! ```text
//! list   : /* empty */ | list stat '\n' | list error '\n'
//! stat   : expr | LETTER '=' expr
//! expr   : '(' expr ')' | expr '+' expr | expr '-' expr | expr '*' expr
//!        | expr '/' expr | expr '%' expr | expr '&' expr | expr '|' expr
//!        | '-' expr %prec UMINUS | LETTER | number
//! number : DIGIT
//! ```
//!
//! with the usual precedence ladder (low to high): `'|'`, `'&'`,
//! `'+' '-'`, `'*' '/' '%'`, unary minus; all binary operators are
//! left-associative. Shift/reduce conflicts were resolved against that
//! ladder when the tables were generated, so the automaton itself is
//! deterministic. The layout is the dense/default/exception scheme
//! documented in [`shiftred::tables`].

use crate::token::TokenID;
use shiftred::{Action, Exception, ParserTables, ProdInfo, StateID};

pub const NTOKENS: usize = 17;
pub const NVARS: usize = 4;
pub const NSTATES: usize = 32;

/// Production identifiers, indexing [`ParserTables::prods`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum Prod {
    ListNil = 0,     // list : /* empty */
    ListStat = 1,    // list : list stat '\n'
    ListErr = 2,     // list : list error '\n'
    StatExpr = 3,    // stat : expr
    StatAssign = 4,  // stat : LETTER '=' expr
    ExprParen = 5,   // expr : '(' expr ')'
    ExprAdd = 6,     // expr : expr '+' expr
    ExprSub = 7,     // expr : expr '-' expr
    ExprMul = 8,     // expr : expr '*' expr
    ExprDiv = 9,     // expr : expr '/' expr
    ExprRem = 10,    // expr : expr '%' expr
    ExprAnd = 11,    // expr : expr '&' expr
    ExprOr = 12,     // expr : expr '|' expr
    ExprNeg = 13,    // expr : '-' expr
    ExprReg = 14,    // expr : LETTER
    ExprNum = 15,    // expr : number
    NumDigit = 16,   // number : DIGIT
}

impl From<Prod> for usize {
    #[inline]
    fn from(prod: Prod) -> Self {
        prod as usize
    }
}

/// Terminal display names, in column order.
static TOKEN_NAMES: [&str; NTOKENS] = [
    "$end", "error", "$unk", "DIGIT", "LETTER", "'|'", "'&'", "'+'", "'-'", "'*'", "'/'", "'%'",
    "UMINUS", "'\\n'", "'='", "'('", "')'",
];

const __: Option<Action<Prod>> = None;

const fn sh(state: u16) -> Option<Action<Prod>> {
    Some(Action::Shift(StateID(state)))
}

const NO: Option<StateID> = None;

const fn go(state: u16) -> Option<StateID> {
    Some(StateID(state))
}

/// Dense action table, one row per state, one column per terminal, in the
/// order of [`TOKEN_NAMES`]. `None` falls through to the exception list and
/// then to the state's default action.
#[rustfmt::skip]
static ACTIONS: [Option<Action<Prod>>; NSTATES * NTOKENS] = [
    // state 0: $accept : . list
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __,
    // state 1: $accept : list .; list : list . stat '\n'; list : list . error '\n'
    __, sh(2), __, sh(3), sh(4), __, __, __, sh(5), __, __, __, __, __, __, sh(6), __,
    // state 2: list : list error . '\n'
    __, __, __, __, __, __, __, __, __, __, __, __, __, sh(31), __, __, __,
    // state 3: number : DIGIT .
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __,
    // state 4: expr : LETTER .; stat : LETTER . '=' expr
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, sh(29), __, __,
    // state 5: expr : '-' . expr
    __, __, __, sh(3), sh(17), __, __, __, sh(5), __, __, __, __, __, __, sh(6), __,
    // state 6: expr : '(' . expr ')'
    __, __, __, sh(3), sh(17), __, __, __, sh(5), __, __, __, __, __, __, sh(6), __,
    // state 7: list : list stat . '\n'
    __, __, __, __, __, __, __, __, __, __, __, __, __, sh(25), __, __, __,
    // state 8: stat : expr .
    __, __, __, __, __, sh(10), sh(11), sh(12), sh(13), sh(14), sh(15), sh(16), __, __, __, __, __,
    // state 9: expr : number .
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __,
    // state 10: expr : expr '|' . expr
    __, __, __, sh(3), sh(17), __, __, __, sh(5), __, __, __, __, __, __, sh(6), __,
    // state 11: expr : expr '&' . expr
    __, __, __, sh(3), sh(17), __, __, __, sh(5), __, __, __, __, __, __, sh(6), __,
    // state 12: expr : expr '+' . expr
    __, __, __, sh(3), sh(17), __, __, __, sh(5), __, __, __, __, __, __, sh(6), __,
    // state 13: expr : expr '-' . expr
    __, __, __, sh(3), sh(17), __, __, __, sh(5), __, __, __, __, __, __, sh(6), __,
    // state 14: expr : expr '*' . expr
    __, __, __, sh(3), sh(17), __, __, __, sh(5), __, __, __, __, __, __, sh(6), __,
    // state 15: expr : expr '/' . expr
    __, __, __, sh(3), sh(17), __, __, __, sh(5), __, __, __, __, __, __, sh(6), __,
    // state 16: expr : expr '%' . expr
    __, __, __, sh(3), sh(17), __, __, __, sh(5), __, __, __, __, __, __, sh(6), __,
    // state 17: expr : LETTER .
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __,
    // state 18: expr : expr '%' expr .
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __,
    // state 19: expr : expr '/' expr .
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __,
    // state 20: expr : expr '*' expr .
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __,
    // state 21: expr : expr '-' expr .
    __, __, __, __, __, __, __, __, __, sh(14), sh(15), sh(16), __, __, __, __, __,
    // state 22: expr : expr '+' expr .
    __, __, __, __, __, __, __, __, __, sh(14), sh(15), sh(16), __, __, __, __, __,
    // state 23: expr : expr '&' expr .
    __, __, __, __, __, __, __, sh(12), sh(13), sh(14), sh(15), sh(16), __, __, __, __, __,
    // state 24: expr : expr '|' expr .
    __, __, __, __, __, __, sh(11), sh(12), sh(13), sh(14), sh(15), sh(16), __, __, __, __, __,
    // state 25: list : list stat '\n' .
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __,
    // state 26: expr : '(' expr . ')'
    __, __, __, __, __, sh(10), sh(11), sh(12), sh(13), sh(14), sh(15), sh(16), __, __, __, __, sh(27),
    // state 27: expr : '(' expr ')' .
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __,
    // state 28: expr : '-' expr .
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __,
    // state 29: stat : LETTER '=' . expr
    __, __, __, sh(3), sh(17), __, __, __, sh(5), __, __, __, __, __, __, sh(6), __,
    // state 30: stat : LETTER '=' expr .
    __, __, __, __, __, sh(10), sh(11), sh(12), sh(13), sh(14), sh(15), sh(16), __, __, __, __, __,
    // state 31: list : list error '\n' .
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __,
];

/// Default action per state. States whose dense row is entirely empty apply
/// their default reduction without consulting a lookahead.
#[rustfmt::skip]
static DEFAULTS: [Action<Prod>; NSTATES] = [
    /* state  0 */ Action::Reduce(Prod::ListNil),
    /* state  1 */ Action::Error,
    /* state  2 */ Action::Error,
    /* state  3 */ Action::Reduce(Prod::NumDigit),
    /* state  4 */ Action::Reduce(Prod::ExprReg),
    /* state  5 */ Action::Error,
    /* state  6 */ Action::Error,
    /* state  7 */ Action::Error,
    /* state  8 */ Action::Reduce(Prod::StatExpr),
    /* state  9 */ Action::Reduce(Prod::ExprNum),
    /* state 10 */ Action::Error,
    /* state 11 */ Action::Error,
    /* state 12 */ Action::Error,
    /* state 13 */ Action::Error,
    /* state 14 */ Action::Error,
    /* state 15 */ Action::Error,
    /* state 16 */ Action::Error,
    /* state 17 */ Action::Reduce(Prod::ExprReg),
    /* state 18 */ Action::Reduce(Prod::ExprRem),
    /* state 19 */ Action::Reduce(Prod::ExprDiv),
    /* state 20 */ Action::Reduce(Prod::ExprMul),
    /* state 21 */ Action::Reduce(Prod::ExprSub),
    /* state 22 */ Action::Reduce(Prod::ExprAdd),
    /* state 23 */ Action::Reduce(Prod::ExprAnd),
    /* state 24 */ Action::Reduce(Prod::ExprOr),
    /* state 25 */ Action::Reduce(Prod::ListStat),
    /* state 26 */ Action::Error,
    /* state 27 */ Action::Reduce(Prod::ExprParen),
    /* state 28 */ Action::Reduce(Prod::ExprNeg),
    /* state 29 */ Action::Error,
    /* state 30 */ Action::Reduce(Prod::StatAssign),
    /* state 31 */ Action::Reduce(Prod::ListErr),
];

/// The one case the dense/default scheme cannot express: accepting at
/// end-of-input in the state that has recognized a complete `list`.
static EXCEPTIONS: [Exception<Prod>; 1] = [Exception {
    state: StateID(1),
    token: TokenID::End as usize,
    action: Action::Accept,
}];

/// Goto table, one row per nonterminal, one column per state.
#[rustfmt::skip]
static GOTOS: [Option<StateID>; NVARS * NSTATES] = [
    // list
    go(1), NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO,
    NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO,
    // stat
    NO, go(7), NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO,
    NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO,
    // expr
    NO, go(8), NO, NO, NO, go(28), go(26), NO, NO, NO, go(24), go(23), go(22), go(21), go(20), go(19),
    go(18), NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, go(30), NO, NO,
    // number
    NO, go(9), NO, NO, NO, go(9), go(9), NO, NO, NO, go(9), go(9), go(9), go(9), go(9), go(9),
    go(9), NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, NO, go(9), NO, NO,
];

/// Right-hand-side length and left-hand nonterminal per production,
/// indexed by `Prod as usize`.
static PRODS: [ProdInfo; 17] = [
    ProdInfo { len: 0, lhs: 0 }, // list : /* empty */
    ProdInfo { len: 3, lhs: 0 }, // list : list stat '\n'
    ProdInfo { len: 3, lhs: 0 }, // list : list error '\n'
    ProdInfo { len: 1, lhs: 1 }, // stat : expr
    ProdInfo { len: 3, lhs: 1 }, // stat : LETTER '=' expr
    ProdInfo { len: 3, lhs: 2 }, // expr : '(' expr ')'
    ProdInfo { len: 3, lhs: 2 }, // expr : expr '+' expr
    ProdInfo { len: 3, lhs: 2 }, // expr : expr '-' expr
    ProdInfo { len: 3, lhs: 2 }, // expr : expr '*' expr
    ProdInfo { len: 3, lhs: 2 }, // expr : expr '/' expr
    ProdInfo { len: 3, lhs: 2 }, // expr : expr '%' expr
    ProdInfo { len: 3, lhs: 2 }, // expr : expr '&' expr
    ProdInfo { len: 3, lhs: 2 }, // expr : expr '|' expr
    ProdInfo { len: 2, lhs: 2 }, // expr : '-' expr
    ProdInfo { len: 1, lhs: 2 }, // expr : LETTER
    ProdInfo { len: 1, lhs: 2 }, // expr : number
    ProdInfo { len: 1, lhs: 3 }, // number : DIGIT
];

/// The assembled table set the engine runs on.
pub static TABLES: ParserTables<Prod> = ParserTables {
    nterminals: NTOKENS,
    nvars: NVARS,
    end_token: TokenID::End as usize,
    error_token: TokenID::Error as usize,
    first_suggested: TokenID::Digit as usize,
    actions: &ACTIONS,
    defaults: &DEFAULTS,
    exceptions: &EXCEPTIONS,
    gotos: &GOTOS,
    prods: &PRODS,
    token_names: &TOKEN_NAMES,
};
