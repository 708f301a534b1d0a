//! Hand-written tables for a three-production toy grammar, used by the
//! engine tests:
//!
//! ```text
//! S : 'a' S | 'b' | error
//! ```
//!
//! `TABLES` carries the error production and therefore supports recovery;
//! `TABLES_NO_RECOVERY` drops it, so any syntax error exhausts the stack
//! search and aborts.

use crate::error::Span;
use crate::tables::{Action, Exception, ParserTables, ProdInfo, StateID};
use crate::token::{Token, TokenSource};
use std::convert::Infallible;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum TTok {
    End = 0,
    Error = 1,
    A = 2,
    B = 3,
    // Nonterminal tag for synthesized values; never a lookahead.
    S = 4,
}

impl From<TTok> for usize {
    fn from(id: TTok) -> Self {
        id as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum TProd {
    Nested = 0,    // S : 'a' S
    Leaf = 1,      // S : 'b'
    Recovered = 2, // S : error
}

impl From<TProd> for usize {
    fn from(prod: TProd) -> Self {
        prod as usize
    }
}

#[derive(Debug, Clone)]
pub struct TestToken {
    pub id: TTok,
    pub span: Option<Span>,
}

impl TestToken {
    pub fn new(id: TTok) -> Self {
        Self { id, span: None }
    }
}

impl Token for TestToken {
    type Id = TTok;

    fn token_id(&self) -> TTok {
        self.id
    }

    fn span(&self) -> Option<Span> {
        self.span
    }

    fn error_marker(span: Option<Span>) -> Self {
        TestToken {
            id: TTok::Error,
            span,
        }
    }
}

/// Replays a fixed token list; yields `None` once it runs out, which lets
/// tests cover the truncated-source contract violation.
pub struct TestSource {
    tokens: std::vec::IntoIter<TestToken>,
}

impl TestSource {
    pub fn new(ids: &[TTok]) -> Self {
        Self {
            tokens: ids
                .iter()
                .map(|&id| TestToken::new(id))
                .collect::<Vec<_>>()
                .into_iter(),
        }
    }
}

impl TokenSource for TestSource {
    type Token = TestToken;
    type Error = Infallible;

    fn try_next(&mut self) -> Result<Option<TestToken>, Infallible> {
        Ok(self.tokens.next())
    }
}

const NTOKENS: usize = 4;

const __: Option<Action<TProd>> = None;

const fn sh(state: u16) -> Option<Action<TProd>> {
    Some(Action::Shift(StateID(state)))
}

const NO: Option<StateID> = None;

const fn go(state: u16) -> Option<StateID> {
    Some(StateID(state))
}

static PRODS: [ProdInfo; 3] = [
    ProdInfo { len: 2, lhs: 0 }, // S : 'a' S
    ProdInfo { len: 1, lhs: 0 }, // S : 'b'
    ProdInfo { len: 1, lhs: 0 }, // S : error
];

static TOKEN_NAMES: [&str; NTOKENS] = ["$end", "error", "'a'", "'b'"];

#[rustfmt::skip]
static ACTIONS: [Option<Action<TProd>>; 6 * NTOKENS] = [
    /* state 0: S' : . S          */ __, sh(4), sh(2), sh(3),
    /* state 1: S' : S .          */ __, __, __, __,
    /* state 2: S : 'a' . S       */ __, sh(4), sh(2), sh(3),
    /* state 3: S : 'b' .         */ __, __, __, __,
    /* state 4: S : error .       */ __, __, __, __,
    /* state 5: S : 'a' S .       */ __, __, __, __,
];

#[rustfmt::skip]
static DEFAULTS: [Action<TProd>; 6] = [
    Action::Error,
    Action::Error,
    Action::Error,
    Action::Reduce(TProd::Leaf),
    Action::Reduce(TProd::Recovered),
    Action::Reduce(TProd::Nested),
];

static EXCEPTIONS: [Exception<TProd>; 1] = [Exception {
    state: StateID(1),
    token: TTok::End as usize,
    action: Action::Accept,
}];

#[rustfmt::skip]
static GOTOS: [Option<StateID>; 6] = [
    /* S */ go(1), NO, go(5), NO, NO, NO,
];

pub static TABLES: ParserTables<TProd> = ParserTables {
    nterminals: NTOKENS,
    nvars: 1,
    end_token: TTok::End as usize,
    error_token: TTok::Error as usize,
    first_suggested: TTok::A as usize,
    actions: &ACTIONS,
    defaults: &DEFAULTS,
    exceptions: &EXCEPTIONS,
    gotos: &GOTOS,
    prods: &PRODS,
    token_names: &TOKEN_NAMES,
};

#[rustfmt::skip]
static ACTIONS_NO_RECOVERY: [Option<Action<TProd>>; 5 * NTOKENS] = [
    /* state 0: S' : . S          */ __, __, sh(2), sh(3),
    /* state 1: S' : S .          */ __, __, __, __,
    /* state 2: S : 'a' . S       */ __, __, sh(2), sh(3),
    /* state 3: S : 'b' .         */ __, __, __, __,
    /* state 4: S : 'a' S .       */ __, __, __, __,
];

#[rustfmt::skip]
static DEFAULTS_NO_RECOVERY: [Action<TProd>; 5] = [
    Action::Error,
    Action::Error,
    Action::Error,
    Action::Reduce(TProd::Leaf),
    Action::Reduce(TProd::Nested),
];

#[rustfmt::skip]
static GOTOS_NO_RECOVERY: [Option<StateID>; 5] = [
    /* S */ go(1), NO, go(4), NO, NO,
];

pub static TABLES_NO_RECOVERY: ParserTables<TProd> = ParserTables {
    nterminals: NTOKENS,
    nvars: 1,
    end_token: TTok::End as usize,
    error_token: TTok::Error as usize,
    first_suggested: TTok::A as usize,
    actions: &ACTIONS_NO_RECOVERY,
    defaults: &DEFAULTS_NO_RECOVERY,
    exceptions: &EXCEPTIONS,
    gotos: &GOTOS_NO_RECOVERY,
    prods: &PRODS,
    token_names: &TOKEN_NAMES,
};
