//! Grammar tables: the static data that drives the engine.
//!
//! A grammar is supplied to the engine as four explicit structures rather
//! than baked-in control flow, which keeps the engine reusable for any
//! grammar a table generator can produce:
//!
//! - a **dense action table** (state x terminal -> action),
//! - a **default action per state**, used when the dense row has no entry;
//!   this covers the common case where only one action is legal and lets
//!   whole rows stay empty,
//! - a small **exception list** for (state, terminal) pairs the dense and
//!   default scheme cannot express (typically only the accept condition at
//!   end-of-input),
//! - a **goto table** (nonterminal x state -> state) consulted after each
//!   reduction.
//!
//! Each production additionally records its right-hand-side length (how
//! many stack slots a reduction pops) and its left-hand nonterminal (the
//! goto row).

/// An automaton state: an opaque index into the table rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateID(pub u16);

impl From<StateID> for usize {
    #[inline]
    fn from(state: StateID) -> Self {
        state.0 as usize
    }
}

/// One parse decision.
///
/// `P` is the grammar's production identifier, a closed enum converting to
/// the production's index in [`ParserTables::prods`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action<P> {
    /// Consume the lookahead and move to the given state.
    Shift(StateID),
    /// Apply the given production's reduction action.
    Reduce(P),
    /// The input is a complete sentence; stop successfully.
    Accept,
    /// No legal action; enter error recovery.
    Error,
}

/// Right-hand-side length and left-hand nonterminal of one production.
#[derive(Debug, Clone, Copy)]
pub struct ProdInfo {
    /// Number of stack slots the reduction pops.
    pub len: u8,
    /// Row of the goto table keyed after the reduction.
    pub lhs: u8,
}

/// A sparse override for one (state, terminal) pair.
#[derive(Debug, Clone, Copy)]
pub struct Exception<P> {
    pub state: StateID,
    pub token: usize,
    pub action: Action<P>,
}

/// The complete table set for one grammar.
///
/// All slices are `'static`: tables are data computed offline by a table
/// generator, not at runtime. `actions` is row-major with `nterminals`
/// columns per state; `gotos` is row-major with one row per nonterminal and
/// one column per state.
pub struct ParserTables<P: 'static> {
    /// Number of terminal symbols (dense row width).
    pub nterminals: usize,
    /// Number of nonterminal symbols (goto row count).
    pub nvars: usize,
    /// Terminal index of the end-of-input token.
    pub end_token: usize,
    /// Terminal index of the error pseudo-token recovery shifts.
    pub error_token: usize,
    /// Terminals below this index are internal bookkeeping categories
    /// (end-of-input, the error pseudo-token, unknown-character buckets)
    /// and are never offered as "expecting" suggestions.
    pub first_suggested: usize,
    /// Dense action table; `None` falls through to `exceptions`, then to
    /// the state's entry in `defaults`.
    pub actions: &'static [Option<Action<P>>],
    /// Default action per state. A state whose dense row is entirely empty
    /// applies its default without consulting a lookahead at all.
    pub defaults: &'static [Action<P>],
    /// Sparse (state, terminal) overrides.
    pub exceptions: &'static [Exception<P>],
    /// Goto table; entries that no reduction can reach are `None`.
    pub gotos: &'static [Option<StateID>],
    /// Per-production metadata, indexed by `P: Into<usize>`.
    pub prods: &'static [ProdInfo],
    /// Display names per terminal, for diagnostics.
    pub token_names: &'static [&'static str],
}

impl<P: Copy> ParserTables<P> {
    #[inline]
    fn row(&self, state: StateID) -> &'static [Option<Action<P>>] {
        let base = usize::from(state) * self.nterminals;
        &self.actions[base..base + self.nterminals]
    }

    /// Number of states covered by the tables.
    #[inline]
    pub fn nstates(&self) -> usize {
        self.defaults.len()
    }

    /// Resolves the action for `(state, token)`: dense entry first, then
    /// the exception list, then the state's default.
    pub fn action(&self, state: StateID, token: usize) -> Action<P> {
        if let Some(action) = self.row(state)[token] {
            return action;
        }
        for exception in self.exceptions {
            if exception.state == state && exception.token == token {
                return exception.action;
            }
        }
        self.defaults[usize::from(state)]
    }

    /// Whether resolving this state's action requires a lookahead. States
    /// with an empty dense row and no exceptions take their default
    /// reduction without pulling a token.
    pub fn needs_lookahead(&self, state: StateID) -> bool {
        self.row(state).iter().any(Option::is_some)
            || self.exceptions.iter().any(|e| e.state == state)
    }

    /// Probes the dense row for a shift of the error pseudo-token; used by
    /// recovery to locate a synchronization point.
    pub fn error_shift(&self, state: StateID) -> Option<StateID> {
        match self.row(state)[self.error_token] {
            Some(Action::Shift(next)) => Some(next),
            _ => None,
        }
    }

    /// Looks up the state entered after reducing to nonterminal `lhs` with
    /// `state` exposed at the top of the stack.
    pub fn goto(&self, lhs: u8, state: StateID) -> Option<StateID> {
        self.gotos[lhs as usize * self.nstates() + usize::from(state)]
    }

    /// Display names of every terminal with a legal shift from `state`,
    /// plus any exception-listed terminals, for "expecting" suggestions.
    /// Terminals below `first_suggested` are omitted.
    pub fn expected_tokens(&self, state: StateID) -> Vec<&'static str> {
        let mut expected = Vec::new();
        for (token, entry) in self.row(state).iter().enumerate() {
            if token >= self.first_suggested && matches!(entry, Some(Action::Shift(_))) {
                expected.push(self.token_names[token]);
            }
        }
        for exception in self.exceptions {
            if exception.state == state && exception.token >= self.first_suggested {
                expected.push(self.token_names[exception.token]);
            }
        }
        expected
    }
}
