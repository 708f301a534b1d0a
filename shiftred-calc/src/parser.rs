//! The calculator session: reduction actions coupled to the engine.
//!
//! [`CalcParser`] wires the [`CalcLexer`] and the static [`TABLES`] into
//! the `shiftred` engine and supplies the semantic actions. One instance is
//! one session: it owns the register store (which persists across the
//! session's statements), the evaluation output sink, and a diagnostics
//! sink kept separate from evaluation output.
//!
//! ## Behavior highlights
//!
//! - Each non-assignment statement writes its decimal value and a newline
//!   to the output sink. Assignments store into a register and print
//!   nothing.
//! - A failing value-domain operation (division or modulo by zero,
//!   overflow, reading an unassigned register) is reported once into the
//!   diagnostics sink and replaces its result with [`TokenValue::Poison`].
//!   Poison flows through the enclosing expression without further
//!   diagnostics; a poisoned statement prints nothing and a poisoned
//!   assignment leaves its register unchanged. The session itself
//!   continues, so one bad statement cannot take down the rest of the
//!   input.
//! - Syntax errors are handled by the engine's recovery protocol and land
//!   in the same diagnostics sink via [`Parser::report`].

use crate::error::CalcError;
use crate::grammar::{Prod, TABLES};
use crate::lexer::CalcLexer;
use crate::registers::Registers;
use crate::token::{CalcToken, TokenID, TokenValue};
use crate::value;
use shiftred::{ParseError, Parser, ParserCtx, ParserStats, Span, SyntaxDiagnostic};
use std::convert::Infallible;
use std::io::Write;
use std::iter::FusedIterator;

/// Error type of a calculator parse: the lexer cannot fail, so this is
/// either a reduction failure (in practice I/O on the output sink) or one
/// of the engine's terminal outcomes.
pub type CalcParseError = ParseError<Infallible, CalcError>;

/// A parsing session over one input stream.
///
/// # Example
///
/// ```rust
/// use shiftred_calc::CalcParser;
///
/// let mut out = Vec::new();
/// let mut parser = CalcParser::new("a = 7\na + 1\n".bytes(), &mut out);
/// parser.run().unwrap();
/// assert!(parser.diagnostics().is_empty());
/// drop(parser);
/// assert_eq!(String::from_utf8(out).unwrap(), "8\n");
/// ```
pub struct CalcParser<I, W>
where
    I: FusedIterator<Item = u8>,
    W: Write,
{
    ctx: ParserCtx<CalcLexer<I>, Prod>,
    regs: Registers,
    out: W,
    diagnostics: Vec<String>,
}

impl<I, W> CalcParser<I, W>
where
    I: FusedIterator<Item = u8>,
    W: Write,
{
    /// Creates a session reading bytes from `input` and writing statement
    /// values to `out`.
    pub fn new(input: I, out: W) -> Self {
        Self {
            ctx: ParserCtx::new(CalcLexer::new(input), &TABLES),
            regs: Registers::new(),
            out,
            diagnostics: Vec::new(),
        }
    }

    /// Controls whether syntax diagnostics name the offending token and
    /// suggest expected ones. On by default.
    pub fn verbose_diagnostics(mut self, verbose: bool) -> Self {
        self.ctx.set_verbose_diagnostics(verbose);
        self
    }

    /// Runs the session to completion.
    pub fn run(&mut self) -> Result<ParserStats, CalcParseError> {
        self.parse()
    }

    /// The session's register store.
    pub fn registers(&self) -> &Registers {
        &self.regs
    }

    /// Diagnostics collected so far, syntax and evaluation alike, in the
    /// order they were raised.
    pub fn diagnostics(&self) -> &[String] {
        &self.diagnostics
    }

    fn report_eval(&mut self, err: impl std::fmt::Display, span: Option<Span>) {
        let message = match span {
            Some(span) => format!("evaluation error: {err} on line {}", span.start.line),
            None => format!("evaluation error: {err}"),
        };
        log::debug!("{message}");
        self.diagnostics.push(message);
    }

    /// Applies a binary operator production to the three stacked values.
    fn binary(&mut self, prod: Prod) {
        let rhs = self.ctx.values_pop();
        let op = self.ctx.values_pop();
        let mut lhs = self.ctx.values_pop();
        lhs.merge_span(&op.span);
        lhs.merge_span(&rhs.span);
        lhs.value = match (lhs.value, rhs.value) {
            (TokenValue::Number(a), TokenValue::Number(b)) => {
                let computed = match prod {
                    Prod::ExprAdd => value::add(a, b),
                    Prod::ExprSub => value::sub(a, b),
                    Prod::ExprMul => value::mul(a, b),
                    Prod::ExprDiv => value::div(a, b),
                    Prod::ExprRem => value::rem(a, b),
                    Prod::ExprAnd => Ok(value::bitand(a, b)),
                    Prod::ExprOr => Ok(value::bitor(a, b)),
                    _ => unreachable!(),
                };
                match computed {
                    Ok(result) => TokenValue::Number(result),
                    Err(err) => {
                        self.report_eval(err, lhs.span);
                        TokenValue::Poison
                    }
                }
            }
            // an already-reported failure flows through silently
            _ => TokenValue::Poison,
        };
        self.ctx.values_push(lhs);
    }
}

impl<I, W> Parser for CalcParser<I, W>
where
    I: FusedIterator<Item = u8>,
    W: Write,
{
    type Source = CalcLexer<I>;
    type Prod = Prod;
    type Error = CalcError;

    fn ctx(&self) -> &ParserCtx<CalcLexer<I>, Prod> {
        &self.ctx
    }

    fn ctx_mut(&mut self) -> &mut ParserCtx<CalcLexer<I>, Prod> {
        &mut self.ctx
    }

    fn reduce(&mut self, prod: Prod) -> Result<(), CalcError> {
        match prod {
            Prod::ListNil => {
                // list :
                self.ctx.values_push(CalcToken {
                    token_id: TokenID::List,
                    value: TokenValue::None,
                    span: None,
                });
            }
            Prod::ListStat | Prod::ListErr => {
                // list : list stat '\n'  |  list error '\n'
                let newline = self.ctx.values_pop();
                let _discarded = self.ctx.values_pop();
                let mut list = self.ctx.values_pop();
                list.token_id = TokenID::List;
                list.merge_span(&newline.span);
                self.ctx.values_push(list);
            }
            Prod::StatExpr => {
                // stat : expr
                let mut stat = self.ctx.values_pop();
                if let TokenValue::Number(result) = stat.value {
                    writeln!(self.out, "{result}")?;
                }
                stat.token_id = TokenID::Stat;
                self.ctx.values_push(stat);
            }
            Prod::StatAssign => {
                // stat : LETTER '=' expr
                let expr = self.ctx.values_pop();
                let _equals = self.ctx.values_pop();
                let ident = self.ctx.values_pop();
                let TokenValue::Register(name) = ident.value else {
                    unreachable!()
                };
                // a poisoned right-hand side leaves the register untouched
                if let TokenValue::Number(result) = expr.value {
                    self.regs.set(name, result);
                }
                let mut stat = expr;
                stat.token_id = TokenID::Stat;
                stat.merge_span(&ident.span);
                self.ctx.values_push(stat);
            }
            Prod::ExprParen => {
                // expr : '(' expr ')'
                let rparen = self.ctx.values_pop();
                let mut expr = self.ctx.values_pop();
                let lparen = self.ctx.values_pop();
                expr.merge_span(&lparen.span);
                expr.merge_span(&rparen.span);
                self.ctx.values_push(expr);
            }
            Prod::ExprAdd
            | Prod::ExprSub
            | Prod::ExprMul
            | Prod::ExprDiv
            | Prod::ExprRem
            | Prod::ExprAnd
            | Prod::ExprOr => self.binary(prod),
            Prod::ExprNeg => {
                // expr : '-' expr
                let mut expr = self.ctx.values_pop();
                let minus = self.ctx.values_pop();
                expr.merge_span(&minus.span);
                expr.value = match expr.value {
                    TokenValue::Number(operand) => match value::neg(operand) {
                        Ok(result) => TokenValue::Number(result),
                        Err(err) => {
                            self.report_eval(err, expr.span);
                            TokenValue::Poison
                        }
                    },
                    TokenValue::Poison => TokenValue::Poison,
                    _ => unreachable!(),
                };
                self.ctx.values_push(expr);
            }
            Prod::ExprReg => {
                // expr : LETTER
                let mut expr = self.ctx.values_pop();
                expr.token_id = TokenID::Expr;
                let TokenValue::Register(name) = expr.value else {
                    unreachable!()
                };
                expr.value = match self.regs.get(name) {
                    Ok(stored) => TokenValue::Number(stored),
                    Err(err) => {
                        self.report_eval(err, expr.span);
                        TokenValue::Poison
                    }
                };
                self.ctx.values_push(expr);
            }
            Prod::ExprNum => {
                // expr : number
                let mut expr = self.ctx.values_pop();
                expr.token_id = TokenID::Expr;
                self.ctx.values_push(expr);
            }
            Prod::NumDigit => {
                // number : DIGIT
                let mut number = self.ctx.values_pop();
                number.token_id = TokenID::Number;
                self.ctx.values_push(number);
            }
        }
        Ok(())
    }

    fn report(&mut self, diagnostic: &SyntaxDiagnostic) {
        self.diagnostics.push(diagnostic.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn run(source: &str) -> (String, Vec<String>, ParserStats) {
        init_logger();
        let mut out = Vec::new();
        let mut parser = CalcParser::new(source.bytes(), &mut out);
        let stats = parser.run().expect("session should accept");
        let diagnostics = parser.diagnostics().to_vec();
        drop(parser);
        (String::from_utf8(out).unwrap(), diagnostics, stats)
    }

    #[test]
    fn multiplicative_binds_tighter_than_additive() {
        let (out, diags, _) = run("2 + 3 * 4\n");
        assert_eq!(out, "14\n");
        assert!(diags.is_empty());
    }

    #[test]
    fn bitwise_operators_are_left_associative() {
        let (out, _, _) = run("2 & 3 | 4\n");
        assert_eq!(out, "6\n"); // (2 & 3) | 4
    }

    #[test]
    fn and_binds_tighter_than_or() {
        let (out, _, _) = run("2 | 1 & 0\n");
        assert_eq!(out, "2\n"); // 2 | (1 & 0)
    }

    #[test]
    fn assignment_stores_and_prints_nothing() {
        let (out, diags, _) = run("a = 7\na\n");
        assert_eq!(out, "7\n");
        assert!(diags.is_empty());
    }

    #[test]
    fn last_write_wins() {
        let (out, _, _) = run("a = 7\na\na = 2\na\n");
        assert_eq!(out, "7\n2\n");
    }

    #[test]
    fn registers_persist_across_statements() {
        let (out, _, _) = run("a = 3\na * a + a\n");
        assert_eq!(out, "12\n");
    }

    #[test]
    fn parentheses_override_precedence() {
        let (out, _, _) = run("( 1 + 2 ) * 3\n");
        assert_eq!(out, "9\n");
    }

    #[test]
    fn unary_minus() {
        let (out, _, _) = run("- 9\n");
        assert_eq!(out, "-9\n");
    }

    #[test]
    fn unary_minus_binds_tighter_than_multiplication() {
        let (out, _, _) = run("- 2 * 3\n");
        assert_eq!(out, "-6\n");
    }

    #[test]
    fn binary_and_unary_minus_combine() {
        let (out, _, _) = run("0 - 9\n1 - - 2\n");
        assert_eq!(out, "-9\n3\n");
    }

    #[test]
    fn subtraction_is_left_associative() {
        let (out, _, _) = run("9 - 2 - 3\n");
        assert_eq!(out, "4\n");
    }

    #[test]
    fn modulo_of_equal_operands() {
        let (out, _, _) = run("5 % 5\n");
        assert_eq!(out, "0\n");
    }

    #[test]
    fn missing_final_newline_is_tolerated() {
        let (out, _, _) = run("2 + 3");
        assert_eq!(out, "5\n");
    }

    #[test]
    fn empty_and_blank_input_accepts() {
        let (out, diags, stats) = run("");
        assert_eq!(out, "");
        assert!(diags.is_empty());
        assert_eq!(stats.syntax_errors, 0);

        let (out, diags, _) = run("\n\n\n");
        assert_eq!(out, "");
        assert!(diags.is_empty());
    }

    #[test]
    fn interior_blank_lines_are_skipped() {
        let (out, _, _) = run("2 + 3\n\n4 * 4\n");
        assert_eq!(out, "5\n16\n");
    }

    #[test]
    fn recovery_resumes_on_the_next_line() {
        let (out, diags, stats) = run("2 + + 3\n1 + 1\n");
        assert_eq!(stats.syntax_errors, 1);
        assert_eq!(diags.len(), 1);
        assert!(diags[0].starts_with("syntax error"), "{}", diags[0]);
        // the malformed line prints nothing; the next one evaluates
        assert_eq!(out, "2\n");
    }

    #[test]
    fn diagnostic_names_the_token_and_suggests_up_to_four() {
        let (_, diags, _) = run("2 + * 3\n");
        assert_eq!(
            diags,
            vec!["syntax error: unexpected '*', expecting DIGIT or LETTER or '-' or '('"]
        );
    }

    #[test]
    fn terse_diagnostics_collapse_to_the_bare_message() {
        init_logger();
        let mut out = Vec::new();
        let mut parser =
            CalcParser::new("* 1\n".bytes(), &mut out).verbose_diagnostics(false);
        parser.run().unwrap();
        assert_eq!(parser.diagnostics(), ["syntax error"]);
    }

    #[test]
    fn unknown_characters_surface_as_syntax_errors() {
        // `7` has already been reduced (and printed) as a statement by the
        // time the stray byte is seen; the error is reported at the point
        // where only a newline could follow
        let (out, diags, stats) = run("7 $ 3\n2\n");
        assert_eq!(stats.syntax_errors, 1);
        assert_eq!(
            diags,
            vec!["syntax error: unexpected $unk, expecting '\\n'"]
        );
        assert_eq!(out, "7\n2\n");
    }

    #[test]
    fn division_by_zero_is_distinct_and_does_not_end_the_session() {
        let (out, diags, stats) = run("4 / 0\n8 / 2\n");
        // reported as an evaluation failure, not a syntax error, and the
        // poisoned statement prints nothing
        assert_eq!(stats.syntax_errors, 0);
        assert_eq!(
            diags,
            vec!["evaluation error: division by zero on line 1"]
        );
        assert_eq!(out, "4\n");
    }

    #[test]
    fn modulo_by_zero_is_reported() {
        let (out, diags, _) = run("4 % 0\n");
        assert_eq!(out, "");
        assert_eq!(diags, vec!["evaluation error: modulo by zero on line 1"]);
    }

    #[test]
    fn poison_does_not_cascade_into_extra_reports() {
        let (out, diags, _) = run("1 + 4 / 0 + 2\n");
        assert_eq!(out, "");
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn read_before_write_is_reported_and_prints_nothing() {
        let (out, diags, stats) = run("x\n1\n");
        assert_eq!(stats.syntax_errors, 0);
        assert_eq!(
            diags,
            vec!["evaluation error: register 'x' read before assignment on line 1"]
        );
        assert_eq!(out, "1\n");
    }

    #[test]
    fn poisoned_assignment_leaves_the_register_unchanged() {
        init_logger();
        let mut out = Vec::new();
        let mut parser = CalcParser::new("a = 5\na = 1 / 0\na\n".bytes(), &mut out);
        parser.run().unwrap();
        assert_eq!(parser.registers().get('a').unwrap(), 5);
        assert_eq!(parser.diagnostics().len(), 1);
        drop(parser);
        assert_eq!(String::from_utf8(out).unwrap(), "5\n");
    }

    #[test]
    fn engine_counters_for_a_simple_statement() {
        let (_, _, stats) = run("1 + 2\n");
        // DIGIT '+' DIGIT '\n' $end
        assert_eq!(stats.tokens, 5);
        assert_eq!(stats.shifts, 4);
        // ListNil, 2x NumDigit, 2x ExprNum, ExprAdd, StatExpr, ListStat
        assert_eq!(stats.reductions, 8);
    }

    #[test]
    fn errors_on_consecutive_lines_report_once() {
        // the second bad line hits while the recovery counter is still
        // draining, so its report is suppressed as a cascading failure
        let (out, diags, stats) = run("2 +\n) 1\n3\n");
        assert_eq!(stats.syntax_errors, 1);
        assert_eq!(diags.len(), 1);
        assert_eq!(out, "3\n");
    }

    #[test]
    fn separated_errors_are_each_reported() {
        // a clean statement between the bad lines fully exits recovery
        // mode, so both errors are reported
        let (out, diags, stats) = run("2 +\n1\n) 2\n3\n");
        assert_eq!(stats.syntax_errors, 2);
        assert_eq!(diags.len(), 2);
        assert_eq!(out, "1\n3\n");
    }
}
