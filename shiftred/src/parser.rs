//! The table-driven shift-reduce engine.
//!
//! The engine is grammar-agnostic: every decision comes from a
//! [`ParserTables`] value, and every grammar-specific computation happens in
//! the [`Parser::reduce`] hook of the implementing type. The engine owns the
//! parse stack (parallel state and value stacks), pulls tokens lazily from a
//! [`TokenSource`], and runs the phased error-recovery protocol when a
//! lookup yields no legal action.
//!
//! # Error recovery
//!
//! Recovery is tracked by a small counter that also throttles repeated
//! reports:
//!
//! - on a fresh error (`counter == 0`) a [`SyntaxDiagnostic`] is built and
//!   handed to [`Parser::report`], then the stack is searched top to bottom
//!   for a state that shifts the error pseudo-token; everything above that
//!   synchronization point is discarded and an error marker is pushed in
//!   simulated-shift position;
//! - while recovery is still fresh (`counter == 1 | 2`) the same
//!   synchronization runs without another report;
//! - once synchronized (`counter == 3`) lookaheads that still produce no
//!   action are discarded one by one, unless the discarded token would be
//!   end-of-input, in which case the parse aborts;
//! - every ordinary shift decrements the counter, so three consecutive
//!   clean shifts fully exit recovery mode.
//!
//! If no state on the stack shifts the error pseudo-token, recovery fails
//! and the parse aborts with [`ParseError::RecoveryExhausted`].

use crate::error::{ParseError, Span, SyntaxDiagnostic};
use crate::tables::{Action, ParserTables, StateID};
use crate::token::{Token, TokenSource};
use log::trace;
use std::fmt::Debug;

/// Suggestions beyond this count are dropped from a diagnostic entirely.
const MAX_EXPECTED: usize = 4;

/// Error-recovery counter value set when synchronization starts.
const RECOVERING: u8 = 3;

/// Counters for one parse.
#[derive(Debug, Clone, Default)]
pub struct ParserStats {
    /// Tokens pulled from the source.
    pub tokens: usize,
    /// Ordinary shifts (simulated error shifts are not counted).
    pub shifts: usize,
    /// Reductions applied.
    pub reductions: usize,
    /// Syntax errors reported (cascading failures suppressed by the
    /// recovery counter are not counted again).
    pub syntax_errors: usize,
}

/// The engine's working state: token source, tables, and the parse stack.
///
/// The stack is a pair of parallel vectors; `states` always holds exactly
/// one more entry than `values` (the bottom state has no value). Both grow
/// geometrically and are never bounded other than by memory.
pub struct ParserCtx<S, P>
where
    S: TokenSource,
    P: 'static,
{
    source: S,
    tables: &'static ParserTables<P>,
    states: Vec<StateID>,
    values: Vec<S::Token>,
    lookahead: Option<S::Token>,
    err_flag: u8,
    verbose_diagnostics: bool,
    stats: ParserStats,
}

impl<S, P> ParserCtx<S, P>
where
    S: TokenSource,
    P: Copy + 'static,
{
    /// Creates a context positioned at the automaton's initial state.
    pub fn new(source: S, tables: &'static ParserTables<P>) -> Self {
        Self {
            source,
            tables,
            states: vec![StateID(0)],
            values: Vec::new(),
            lookahead: None,
            err_flag: 0,
            verbose_diagnostics: true,
            stats: ParserStats::default(),
        }
    }

    /// The tables this context runs on.
    #[inline]
    pub fn tables(&self) -> &'static ParserTables<P> {
        self.tables
    }

    /// Counters accumulated so far.
    pub fn stats(&self) -> ParserStats {
        self.stats.clone()
    }

    /// Controls whether diagnostics name the offending token and suggest
    /// expected ones, or collapse to the bare `syntax error`.
    pub fn set_verbose_diagnostics(&mut self, verbose: bool) {
        self.verbose_diagnostics = verbose;
    }

    /// Pops the top value from the value stack.
    ///
    /// Reduction actions call this exactly once per right-hand-side symbol;
    /// the grammar tables guarantee the values are present.
    ///
    /// # Panics
    ///
    /// Panics if the value stack is empty, which means a reduction action
    /// popped more values than its production's right-hand side holds.
    pub fn values_pop(&mut self) -> S::Token {
        self.values
            .pop()
            .expect("value stack underflow: reduction popped past its production")
    }

    /// Pushes the value synthesized by a reduction action.
    pub fn values_push(&mut self, value: S::Token) {
        self.values.push(value);
    }

    /// Returns a reference to the value counted from the top of the stack:
    /// 0 = top, 1 = second, etc.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not less than the number of stacked values.
    pub fn values_peek(&self, index: usize) -> &S::Token {
        let n = self.values.len();
        &self.values[n - 1 - index]
    }

    #[inline]
    fn current_state(&self) -> StateID {
        self.states[self.states.len() - 1]
    }

    fn lookahead_span(&self) -> Option<Span> {
        self.lookahead.as_ref().and_then(Token::span)
    }

    /// Builds the diagnostic for a fresh syntax error at the current state.
    fn build_diagnostic(&self) -> SyntaxDiagnostic {
        let span = self.lookahead_span();
        if !self.verbose_diagnostics {
            return SyntaxDiagnostic {
                unexpected: None,
                expected: Vec::new(),
                span,
            };
        }
        let unexpected = self
            .lookahead
            .as_ref()
            .map(|t| self.tables.token_names[t.token_id().into()]);
        let mut expected = self.tables.expected_tokens(self.current_state());
        if expected.len() > MAX_EXPECTED {
            expected.clear();
        }
        SyntaxDiagnostic {
            unexpected,
            expected,
            span,
        }
    }

    /// Searches the stack top to bottom for a state that shifts the error
    /// pseudo-token and simulates that shift there, abandoning everything
    /// above it. Returns `false` when no such state exists.
    fn sync_after_error(&mut self) -> bool {
        for idx in (0..self.states.len()).rev() {
            if let Some(next) = self.tables.error_shift(self.states[idx]) {
                trace!(
                    "error recovery: resuming at stack depth {idx}, shifting error into {next:?}"
                );
                let span = self.lookahead_span();
                self.states.truncate(idx + 1);
                self.values.truncate(idx);
                self.states.push(next);
                self.values.push(S::Token::error_marker(span));
                return true;
            }
            trace!("error recovery: pops state {:?}", self.states[idx]);
        }
        false
    }

    fn dump_stack(&self) {
        if log::log_enabled!(log::Level::Trace) {
            trace!("states {:?}", self.states);
            trace!("values {:?}", self.values);
        }
    }
}

/// A parser: a token source, grammar tables, and the reduction actions that
/// give the grammar its meaning.
///
/// Implementors supply the working context and two hooks ([`reduce`] for
/// semantic actions, [`report`] for syntax diagnostics) and get the whole
/// engine through the provided [`parse`] method.
///
/// [`reduce`]: Parser::reduce
/// [`report`]: Parser::report
/// [`parse`]: Parser::parse
pub trait Parser {
    /// Where tokens come from.
    type Source: TokenSource;
    /// The grammar's production identifier; converts to the production's
    /// index in the tables.
    type Prod: Copy + Debug + Into<usize> + 'static;
    /// Failure type of reduction actions. Failures propagate out of
    /// [`Parser::parse`] as [`ParseError::Reduce`] and end the parse.
    type Error;

    fn ctx(&self) -> &ParserCtx<Self::Source, Self::Prod>;
    fn ctx_mut(&mut self) -> &mut ParserCtx<Self::Source, Self::Prod>;

    /// Applies the reduction action for `prod`: pop one value per
    /// right-hand-side symbol via [`ParserCtx::values_pop`], then push
    /// exactly one synthesized value via [`ParserCtx::values_push`].
    fn reduce(&mut self, prod: Self::Prod) -> Result<(), Self::Error>;

    /// Receives each syntax diagnostic once, before recovery runs.
    /// Diagnostics are separate from whatever output reductions produce.
    fn report(&mut self, diagnostic: &SyntaxDiagnostic);

    /// Runs the automaton until it accepts, aborts, or a collaborator
    /// fails. Pulling a token from the source is the only suspension point.
    fn parse(
        &mut self,
    ) -> Result<ParserStats, ParseError<<Self::Source as TokenSource>::Error, Self::Error>> {
        loop {
            let state = self.ctx().current_state();
            let action = if !self.ctx().tables().needs_lookahead(state) {
                // Default reduction: no lookahead is consulted, so the
                // source is not polled either.
                self.ctx().tables().defaults[usize::from(state)]
            } else {
                let ctx = self.ctx_mut();
                let token_id = match &ctx.lookahead {
                    Some(token) => token.token_id().into(),
                    None => match ctx.source.try_next().map_err(ParseError::Source)? {
                        Some(token) => {
                            ctx.stats.tokens += 1;
                            let id = token.token_id().into();
                            trace!("lookahead {token:?}");
                            ctx.lookahead = Some(token);
                            id
                        }
                        None => return Err(ParseError::TruncatedInput),
                    },
                };
                ctx.tables.action(state, token_id)
            };

            match action {
                Action::Shift(next) => {
                    let ctx = self.ctx_mut();
                    let token = ctx
                        .lookahead
                        .take()
                        .ok_or(ParseError::Tables("shift action without a lookahead"))?;
                    trace!("shift {token:?} into {next:?}");
                    ctx.states.push(next);
                    ctx.values.push(token);
                    if ctx.err_flag > 0 {
                        ctx.err_flag -= 1;
                    }
                    ctx.stats.shifts += 1;
                    ctx.dump_stack();
                }

                Action::Reduce(prod) => {
                    trace!("reduce {prod:?} in {state:?}");
                    self.reduce(prod).map_err(ParseError::Reduce)?;
                    let ctx = self.ctx_mut();
                    let info = ctx.tables.prods[prod.into()];
                    let len = info.len as usize;
                    if ctx.states.len() <= len {
                        return Err(ParseError::Tables("reduction pops past the stack bottom"));
                    }
                    ctx.states.truncate(ctx.states.len() - len);
                    let exposed = ctx.current_state();
                    let next = ctx
                        .tables
                        .goto(info.lhs, exposed)
                        .ok_or(ParseError::Tables("missing goto entry"))?;
                    ctx.states.push(next);
                    ctx.stats.reductions += 1;
                    ctx.dump_stack();
                }

                Action::Accept => {
                    trace!("accept");
                    return Ok(self.ctx().stats());
                }

                Action::Error => {
                    let err_flag = self.ctx().err_flag;
                    match err_flag {
                        0 | 1 | 2 => {
                            if err_flag == 0 {
                                let diagnostic = self.ctx().build_diagnostic();
                                self.report(&diagnostic);
                                self.ctx_mut().stats.syntax_errors += 1;
                            }
                            let ctx = self.ctx_mut();
                            ctx.err_flag = RECOVERING;
                            if !ctx.sync_after_error() {
                                let span = ctx.lookahead_span();
                                return Err(ParseError::RecoveryExhausted { span });
                            }
                        }
                        _ => {
                            // Synchronized but no clean shift yet: drop the
                            // lookahead and retry the same state.
                            let ctx = self.ctx_mut();
                            match ctx.lookahead.take() {
                                Some(token) => {
                                    if token.token_id().into() == ctx.tables.end_token {
                                        return Err(ParseError::RecoveryExhausted {
                                            span: token.span(),
                                        });
                                    }
                                    trace!("error recovery: discards {token:?}");
                                }
                                None => {
                                    return Err(ParseError::Tables(
                                        "error action in a state that takes no lookahead",
                                    ))
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
