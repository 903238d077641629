//! etch lexer: converts source text into tokens.
//!
//! The lexer is a pull-based scanner: the parser asks for one token at a
//! time via [`Lexer::next_token`]. It never fails; characters it does not
//! recognize come back as `Illegal` tokens for the parser to surface.

use etch_syntax::token::{lookup_keyword, Token, TokenKind};

/// Streaming character scanner that produces line-stamped tokens.
pub struct Lexer {
    src: Vec<char>,
    pos: usize,
    line: usize,
}

impl Lexer {
    /// Create a new lexer over the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            src: input.chars().collect(),
            pos: 0,
            line: 1,
        }
    }

    fn peek(&self) -> Option<char> {
        self.src.get(self.pos).copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.src.get(self.pos + 1).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.src.get(self.pos).copied();
        if let Some(c) = ch {
            self.pos += 1;
            if c == '\n' {
                self.line += 1;
            }
        }
        ch
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            match c {
                ' ' | '\t' | '\n' | '\r' => {
                    self.advance();
                }
                _ => break,
            }
        }
    }

    fn read_integer(&mut self) -> TokenKind {
        let mut s = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                s.push(c);
                self.advance();
            } else {
                break;
            }
        }
        TokenKind::Integer(s)
    }

    fn read_ident_or_keyword(&mut self) -> TokenKind {
        let mut s = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                s.push(c);
                self.advance();
            } else {
                break;
            }
        }
        lookup_keyword(&s)
    }

    /// Produce the next token. Past the end of input this keeps returning
    /// `Eof` tokens.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();
        let line = self.line;
        let kind = match self.peek() {
            None => TokenKind::Eof,
            Some(',') => {
                self.advance();
                TokenKind::Comma
            }
            Some(';') => {
                self.advance();
                TokenKind::Semicolon
            }
            Some('(') => {
                self.advance();
                TokenKind::LParen
            }
            Some(')') => {
                self.advance();
                TokenKind::RParen
            }
            Some('{') => {
                self.advance();
                TokenKind::LBrace
            }
            Some('}') => {
                self.advance();
                TokenKind::RBrace
            }
            Some('[') => {
                self.advance();
                TokenKind::LBracket
            }
            Some(']') => {
                self.advance();
                TokenKind::RBracket
            }
            Some('|') => {
                self.advance();
                TokenKind::Bar
            }
            Some('+') => {
                self.advance();
                TokenKind::Plus
            }
            Some('*') => {
                self.advance();
                TokenKind::Aster
            }
            Some('/') => {
                self.advance();
                TokenKind::Slash
            }
            Some('%') => {
                self.advance();
                TokenKind::Percent
            }
            Some('<') => {
                self.advance();
                TokenKind::Lt
            }
            Some('>') => {
                self.advance();
                TokenKind::Gt
            }
            Some('-') => {
                if self.peek_next() == Some('>') {
                    self.advance();
                    self.advance();
                    TokenKind::Arrow
                } else {
                    self.advance();
                    TokenKind::Minus
                }
            }
            Some('=') => {
                if self.peek_next() == Some('=') {
                    self.advance();
                    self.advance();
                    TokenKind::Eq
                } else {
                    self.advance();
                    TokenKind::Assign
                }
            }
            Some('!') => {
                if self.peek_next() == Some('=') {
                    self.advance();
                    self.advance();
                    TokenKind::NotEq
                } else {
                    self.advance();
                    TokenKind::Bang
                }
            }
            Some(c) if c.is_ascii_digit() => self.read_integer(),
            Some(c) if c.is_ascii_alphabetic() || c == '_' => self.read_ident_or_keyword(),
            Some(other) => {
                self.advance();
                TokenKind::Illegal(other)
            }
        };
        Token { kind, line }
    }

    /// Tokenize the entire input into a vector of tokens ending with `Eof`.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let tk = self.next_token();
            let done = tk.kind == TokenKind::Eof;
            tokens.push(tk);
            if done {
                break;
            }
        }
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use etch_syntax::token::TokenKind::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Lexer::new(input).tokenize().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_punctuation_and_operators() {
        assert_eq!(
            kinds("+ - * / % ! < > ( ) { } [ ] , ; | ="),
            vec![
                Plus, Minus, Aster, Slash, Percent, Bang, Lt, Gt, LParen, RParen, LBrace, RBrace,
                LBracket, RBracket, Comma, Semicolon, Bar, Assign, Eof
            ]
        );
    }

    #[test]
    fn test_two_char_operators() {
        assert_eq!(kinds("== != ->"), vec![Eq, NotEq, Arrow, Eof]);
        // one char of lookahead only: '=' then '!' stay separate
        assert_eq!(kinds("=!"), vec![Assign, Bang, Eof]);
        assert_eq!(kinds("- >"), vec![Minus, Gt, Eof]);
    }

    #[test]
    fn test_integers_keep_their_lexeme() {
        assert_eq!(
            kinds("0 42 007"),
            vec![
                Integer("0".to_string()),
                Integer("42".to_string()),
                Integer("007".to_string()),
                Eof
            ]
        );
    }

    #[test]
    fn test_identifiers_and_keywords() {
        assert_eq!(
            kinds("var x _tmp x2 return true false if else"),
            vec![
                Var,
                Ident("x".to_string()),
                Ident("_tmp".to_string()),
                Ident("x2".to_string()),
                Return,
                True,
                False,
                If,
                Else,
                Eof
            ]
        );
    }

    #[test]
    fn test_lines_are_counted() {
        let mut lexer = Lexer::new("var a = 1;\nvar b = 2;");
        let tokens = lexer.tokenize();
        let first_var = &tokens[0];
        let second_var = &tokens[5];
        assert_eq!(first_var.kind, Var);
        assert_eq!(first_var.line, 1);
        assert_eq!(second_var.kind, Var);
        assert_eq!(second_var.line, 2);
    }

    #[test]
    fn test_illegal_character() {
        assert_eq!(kinds("1 @ 2"), vec![
            Integer("1".to_string()),
            Illegal('@'),
            Integer("2".to_string()),
            Eof
        ]);
    }

    #[test]
    fn test_eof_is_repeatable() {
        let mut lexer = Lexer::new("");
        assert_eq!(lexer.next_token().kind, Eof);
        assert_eq!(lexer.next_token().kind, Eof);
        assert_eq!(lexer.next_token().kind, Eof);
    }
}
