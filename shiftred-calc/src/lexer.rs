//! The calculator's token source.
//!
//! A byte-driven lexer over any fused byte iterator. The token classes are
//! all single characters: one decimal digit is a literal, one lowercase
//! letter is a register name, and the operator set is fixed. Anything else
//! becomes [`TokenID::Unknown`], which the grammar tables reject as a
//! syntax error, so lexical anomalies stay on the recoverable path instead
//! of failing the lexer.
//!
//! Two line-oriented conveniences:
//!
//! - newline tokens are emitted only for lines that carried at least one
//!   token, so blank lines and runs of separators do not reach the parser;
//! - an input whose last statement is not newline-terminated gets one
//!   synthetic final newline.
//!
//! At exhaustion the lexer keeps yielding [`TokenID::End`] tokens, which is
//! the idempotent end-of-input marker the engine's [`TokenSource`] contract
//! asks for.

use crate::token::{CalcToken, TokenID, TokenValue};
use shiftred::{Position, Span, TokenSource};
use std::convert::Infallible;
use std::iter::FusedIterator;

/// Lexer state: the input iterator plus line/column bookkeeping.
pub struct CalcLexer<I> {
    input: I,
    line: usize,
    column: usize,
    /// Whether the current line has produced a token yet; gates newline
    /// emission and the final synthetic newline.
    emitted_on_line: bool,
}

impl<I> CalcLexer<I>
where
    I: FusedIterator<Item = u8>,
{
    pub fn new(input: I) -> Self {
        Self {
            input,
            line: 1,
            column: 0,
            emitted_on_line: false,
        }
    }

    fn token(&self, token_id: TokenID, value: TokenValue) -> CalcToken {
        let start = Position::new(self.line, self.column);
        let end = Position::new(self.line, self.column + 1);
        CalcToken {
            token_id,
            value,
            span: Some(Span::new(start, end)),
        }
    }
}

impl<I> TokenSource for CalcLexer<I>
where
    I: FusedIterator<Item = u8>,
{
    type Token = CalcToken;
    type Error = Infallible;

    fn try_next(&mut self) -> Result<Option<CalcToken>, Infallible> {
        loop {
            let Some(byte) = self.input.next() else {
                if self.emitted_on_line {
                    self.emitted_on_line = false;
                    self.column += 1;
                    return Ok(Some(self.token(TokenID::Newline, TokenValue::None)));
                }
                self.column += 1;
                return Ok(Some(self.token(TokenID::End, TokenValue::None)));
            };
            self.column += 1;

            let token_id = match byte {
                b' ' | b'\t' => continue,
                b'\n' => {
                    let emit = self.emitted_on_line;
                    let token = self.token(TokenID::Newline, TokenValue::None);
                    self.emitted_on_line = false;
                    self.line += 1;
                    self.column = 0;
                    if emit {
                        return Ok(Some(token));
                    }
                    continue;
                }
                b'0'..=b'9' => {
                    self.emitted_on_line = true;
                    let value = i64::from(byte - b'0');
                    return Ok(Some(self.token(TokenID::Digit, TokenValue::Number(value))));
                }
                b'a'..=b'z' => {
                    self.emitted_on_line = true;
                    let name = char::from(byte);
                    return Ok(Some(
                        self.token(TokenID::Letter, TokenValue::Register(name)),
                    ));
                }
                b'|' => TokenID::Or,
                b'&' => TokenID::And,
                b'+' => TokenID::Plus,
                b'-' => TokenID::Minus,
                b'*' => TokenID::Star,
                b'/' => TokenID::Slash,
                b'%' => TokenID::Percent,
                b'=' => TokenID::Equals,
                b'(' => TokenID::LeftParen,
                b')' => TokenID::RightParen,
                _ => TokenID::Unknown,
            };
            self.emitted_on_line = true;
            return Ok(Some(self.token(token_id, TokenValue::None)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(source: &str) -> Vec<TokenID> {
        let mut lexer = CalcLexer::new(source.bytes());
        let mut out = Vec::new();
        loop {
            let token = lexer.try_next().unwrap().unwrap();
            let id = token.token_id;
            out.push(id);
            if id == TokenID::End {
                return out;
            }
        }
    }

    #[test]
    fn lexes_an_assignment() {
        assert_eq!(
            ids("a = 7\n"),
            vec![
                TokenID::Letter,
                TokenID::Equals,
                TokenID::Digit,
                TokenID::Newline,
                TokenID::End
            ]
        );
    }

    #[test]
    fn digit_and_letter_payloads() {
        let mut lexer = CalcLexer::new("x 5".bytes());
        let x = lexer.try_next().unwrap().unwrap();
        assert!(matches!(x.value, TokenValue::Register('x')));
        let five = lexer.try_next().unwrap().unwrap();
        assert!(matches!(five.value, TokenValue::Number(5)));
    }

    #[test]
    fn blank_lines_produce_no_newline_tokens() {
        assert_eq!(
            ids("\n\n2\n\n\n3\n"),
            vec![
                TokenID::Digit,
                TokenID::Newline,
                TokenID::Digit,
                TokenID::Newline,
                TokenID::End
            ]
        );
    }

    #[test]
    fn unterminated_last_line_gets_a_newline() {
        assert_eq!(
            ids("2 + 3"),
            vec![
                TokenID::Digit,
                TokenID::Plus,
                TokenID::Digit,
                TokenID::Newline,
                TokenID::End
            ]
        );
    }

    #[test]
    fn unknown_bytes_become_unknown_tokens() {
        assert_eq!(
            ids("2 $ Z\n"),
            vec![
                TokenID::Digit,
                TokenID::Unknown,
                TokenID::Unknown,
                TokenID::Newline,
                TokenID::End
            ]
        );
    }

    #[test]
    fn end_token_repeats_after_exhaustion() {
        let mut lexer = CalcLexer::new("".bytes());
        for _ in 0..3 {
            let token = lexer.try_next().unwrap().unwrap();
            assert_eq!(token.token_id, TokenID::End);
        }
    }

    #[test]
    fn spans_track_line_and_column() {
        let mut lexer = CalcLexer::new("1\n 2\n".bytes());
        let one = lexer.try_next().unwrap().unwrap();
        assert_eq!(one.span.unwrap().start, Position::new(1, 1));
        let _newline = lexer.try_next().unwrap().unwrap();
        let two = lexer.try_next().unwrap().unwrap();
        assert_eq!(two.span.unwrap().start, Position::new(2, 2));
    }
}
