//! Recursive-descent parser with Pratt-style operator precedence climbing.

use etch_lexer::Lexer;
use etch_syntax::ast::{Block, Expr, Ident, InfixOp, PrefixOp, Program, Stmt};
use etch_syntax::error::{lex_error_at, parse_error_at, Error, Result};
use etch_syntax::token::{Token, TokenKind};

/// Binding strengths for expression parsing, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Lowest,
    Equal,
    Comparison,
    Arrow,
    Addition,
    Multiplication,
    Prefix,
    Call,
    Index,
}

fn precedence_of(kind: &TokenKind) -> Precedence {
    match kind {
        TokenKind::Eq | TokenKind::NotEq => Precedence::Equal,
        TokenKind::Lt | TokenKind::Gt => Precedence::Comparison,
        TokenKind::Arrow => Precedence::Arrow,
        TokenKind::Plus | TokenKind::Minus => Precedence::Addition,
        TokenKind::Aster | TokenKind::Slash | TokenKind::Percent => Precedence::Multiplication,
        TokenKind::LParen => Precedence::Call,
        TokenKind::LBracket => Precedence::Index,
        _ => Precedence::Lowest,
    }
}

/// Consumes tokens from a [`Lexer`] on demand, keeping exactly two tokens of
/// lookahead (`current` and `peek`).
pub struct Parser {
    lexer: Lexer,
    current: Token,
    peek: Token,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Self {
        let current = lexer.next_token();
        let peek = lexer.next_token();
        Self {
            lexer,
            current,
            peek,
        }
    }

    fn consume(&mut self) {
        self.current = std::mem::replace(&mut self.peek, self.lexer.next_token());
    }

    /// Advance iff `peek` is the expected kind; error otherwise.
    fn expect_peek(&mut self, expected: TokenKind) -> Result<()> {
        if self.peek.kind != expected {
            if let TokenKind::Illegal(c) = self.peek.kind {
                return lex_error_at(self.peek.line, format!("illegal character '{}'", c));
            }
            return parse_error_at(
                self.peek.line,
                format!(
                    "unexpected token: want {}, got {}",
                    expected.describe(),
                    self.peek.kind.describe()
                ),
            );
        }
        self.consume();
        Ok(())
    }

    pub fn parse_program(&mut self) -> Result<Program> {
        let mut statements = Vec::new();
        while self.current.kind != TokenKind::Eof {
            statements.push(self.parse_statement()?);
            self.consume();
        }
        Ok(Program { statements })
    }

    /// Parse a single expression at lowest precedence.
    pub fn parse_expr(&mut self) -> Result<Expr> {
        self.parse_expression(Precedence::Lowest)
    }

    fn parse_statement(&mut self) -> Result<Stmt> {
        match self.current.kind {
            TokenKind::Var => self.parse_var_statement(),
            TokenKind::Return => self.parse_return_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_var_statement(&mut self) -> Result<Stmt> {
        let line = self.current.line;
        self.consume();
        let name = self.parse_identifier()?;
        self.expect_peek(TokenKind::Assign)?;
        self.consume();
        let value = self.parse_expression(Precedence::Lowest)?;
        if self.peek.kind == TokenKind::Semicolon {
            self.consume();
        }
        Ok(Stmt::Var { name, value, line })
    }

    fn parse_return_statement(&mut self) -> Result<Stmt> {
        let line = self.current.line;
        self.consume();
        let value = self.parse_expression(Precedence::Lowest)?;
        if self.peek.kind == TokenKind::Semicolon {
            self.consume();
        }
        Ok(Stmt::Return { value, line })
    }

    fn parse_expression_statement(&mut self) -> Result<Stmt> {
        let line = self.current.line;
        let value = self.parse_expression(Precedence::Lowest)?;
        if self.peek.kind == TokenKind::Semicolon {
            self.consume();
        }
        Ok(Stmt::Expr { value, line })
    }

    /// Parse a `{ .. }` block; `current` must be on the opening brace.
    fn parse_block(&mut self) -> Result<Block> {
        let line = self.current.line;
        self.consume();
        let mut statements = Vec::new();
        while self.current.kind != TokenKind::RBrace {
            if self.current.kind == TokenKind::Eof {
                return parse_error_at(self.current.line, "unexpected end of input, expected '}'");
            }
            statements.push(self.parse_statement()?);
            self.consume();
        }
        Ok(Block { statements, line })
    }

    fn parse_expression(&mut self, precedence: Precedence) -> Result<Expr> {
        let mut left = match &self.current.kind {
            TokenKind::Integer(_) => self.parse_integer_literal()?,
            TokenKind::True | TokenKind::False => self.parse_boolean_literal()?,
            TokenKind::Ident(_) => Expr::Ident(self.parse_identifier()?),
            TokenKind::Minus | TokenKind::Bang => self.parse_prefix_expression()?,
            TokenKind::LParen => self.parse_grouped_expression()?,
            TokenKind::Bar => self.parse_function_literal()?,
            TokenKind::If => self.parse_if_expression()?,
            TokenKind::LBracket => self.parse_array_literal()?,
            TokenKind::Illegal(c) => {
                return lex_error_at(self.current.line, format!("illegal character '{}'", c));
            }
            other => {
                return parse_error_at(
                    self.current.line,
                    format!("unexpected token in expression: {}", other.describe()),
                );
            }
        };

        while precedence < precedence_of(&self.peek.kind) {
            self.consume();
            left = match self.current.kind {
                TokenKind::LParen => self.parse_function_call(left)?,
                TokenKind::LBracket => self.parse_index_expression(left)?,
                TokenKind::Arrow => self.parse_arrow_expression(left)?,
                _ => self.parse_infix_expression(left)?,
            };
        }

        Ok(left)
    }

    fn parse_integer_literal(&mut self) -> Result<Expr> {
        let line = self.current.line;
        match &self.current.kind {
            TokenKind::Integer(lit) => {
                let value = lit.parse::<i64>().map_err(|_| Error::Parse {
                    line,
                    msg: format!("invalid integer literal '{}'", lit),
                })?;
                Ok(Expr::Integer { value, line })
            }
            other => parse_error_at(
                line,
                format!("expected an integer, got {}", other.describe()),
            ),
        }
    }

    fn parse_boolean_literal(&mut self) -> Result<Expr> {
        let line = self.current.line;
        match self.current.kind {
            TokenKind::True => Ok(Expr::Boolean { value: true, line }),
            TokenKind::False => Ok(Expr::Boolean { value: false, line }),
            ref other => parse_error_at(
                line,
                format!("expected a boolean, got {}", other.describe()),
            ),
        }
    }

    fn parse_identifier(&mut self) -> Result<Ident> {
        let line = self.current.line;
        match &self.current.kind {
            TokenKind::Ident(name) => Ok(Ident {
                name: name.clone(),
                line,
            }),
            other => parse_error_at(
                line,
                format!("expected an identifier, got {}", other.describe()),
            ),
        }
    }

    fn parse_prefix_expression(&mut self) -> Result<Expr> {
        let line = self.current.line;
        let op = match self.current.kind {
            TokenKind::Minus => PrefixOp::Neg,
            TokenKind::Bang => PrefixOp::Not,
            ref other => {
                return parse_error_at(
                    line,
                    format!("{} is not a prefix operator", other.describe()),
                );
            }
        };
        self.consume();
        let right = self.parse_expression(Precedence::Prefix)?;
        Ok(Expr::Prefix {
            op,
            right: Box::new(right),
            line,
        })
    }

    fn parse_grouped_expression(&mut self) -> Result<Expr> {
        self.consume();
        let expression = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RParen)?;
        Ok(expression)
    }

    fn parse_if_expression(&mut self) -> Result<Expr> {
        let line = self.current.line;
        self.expect_peek(TokenKind::LParen)?;
        self.consume();
        let condition = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RParen)?;
        self.expect_peek(TokenKind::LBrace)?;
        let consequence = self.parse_block()?;

        if self.peek.kind != TokenKind::Else {
            return Ok(Expr::If {
                condition: Box::new(condition),
                consequence,
                alternative: None,
                line,
            });
        }
        self.consume();
        self.expect_peek(TokenKind::LBrace)?;
        let alternative = self.parse_block()?;
        Ok(Expr::If {
            condition: Box::new(condition),
            consequence,
            alternative: Some(alternative),
            line,
        })
    }

    /// Parse `|p, q| { .. }`; `current` must be on the opening bar.
    fn parse_function_literal(&mut self) -> Result<Expr> {
        let line = self.current.line;
        let expressions = self.parse_comma_separated(TokenKind::Bar)?;
        let mut params = Vec::with_capacity(expressions.len());
        for expression in expressions {
            match expression {
                Expr::Ident(ident) => params.push(ident),
                other => {
                    return parse_error_at(
                        other.line(),
                        "function parameters must be identifiers",
                    );
                }
            }
        }
        self.expect_peek(TokenKind::LBrace)?;
        let body = self.parse_block()?;
        Ok(Expr::Function { params, body, line })
    }

    fn parse_array_literal(&mut self) -> Result<Expr> {
        let line = self.current.line;
        let elements = self.parse_comma_separated(TokenKind::RBracket)?;
        Ok(Expr::Array { elements, line })
    }

    fn parse_infix_expression(&mut self, left: Expr) -> Result<Expr> {
        let line = self.current.line;
        let precedence = precedence_of(&self.current.kind);
        let op = match self.current.kind {
            TokenKind::Plus => InfixOp::Add,
            TokenKind::Minus => InfixOp::Sub,
            TokenKind::Aster => InfixOp::Mul,
            TokenKind::Slash => InfixOp::Div,
            TokenKind::Percent => InfixOp::Rem,
            TokenKind::Lt => InfixOp::Lt,
            TokenKind::Gt => InfixOp::Gt,
            TokenKind::Eq => InfixOp::Eq,
            TokenKind::NotEq => InfixOp::NotEq,
            ref other => {
                return parse_error_at(
                    line,
                    format!("{} is not an infix operator", other.describe()),
                );
            }
        };
        self.consume();
        let right = self.parse_expression(precedence)?;
        Ok(Expr::Infix {
            op,
            left: Box::new(left),
            right: Box::new(right),
            line,
        })
    }

    /// Parse a call's argument list; `current` must be on the opening paren
    /// and `left` is the callee.
    fn parse_function_call(&mut self, left: Expr) -> Result<Expr> {
        let line = self.current.line;
        let args = self.parse_comma_separated(TokenKind::RParen)?;
        Ok(Expr::Call {
            callee: Box::new(left),
            args,
            line,
        })
    }

    fn parse_index_expression(&mut self, left: Expr) -> Result<Expr> {
        let line = self.current.line;
        self.consume();
        let index = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RBracket)?;
        Ok(Expr::Index {
            array: Box::new(left),
            index: Box::new(index),
            line,
        })
    }

    /// Desugar `left -> f(args..)` into `f(left, args..)`. The right-hand
    /// side must parse to a function call.
    fn parse_arrow_expression(&mut self, left: Expr) -> Result<Expr> {
        let line = self.current.line;
        self.consume();
        let right = self.parse_expression(Precedence::Arrow)?;
        match right {
            Expr::Call {
                callee,
                mut args,
                line: call_line,
            } => {
                args.insert(0, left);
                Ok(Expr::Call {
                    callee,
                    args,
                    line: call_line,
                })
            }
            _ => parse_error_at(line, "right side of '->' must be a function call"),
        }
    }

    /// Parse expressions separated by commas until the given terminator,
    /// consuming the terminator. An empty list is permitted.
    fn parse_comma_separated(&mut self, end: TokenKind) -> Result<Vec<Expr>> {
        self.consume();
        if self.current.kind == end {
            return Ok(Vec::new());
        }

        let first = self.parse_expression(Precedence::Lowest)?;
        let mut expressions = vec![first];

        while self.peek.kind != end {
            self.expect_peek(TokenKind::Comma)?;
            self.consume();
            expressions.push(self.parse_expression(Precedence::Lowest)?);
        }
        self.expect_peek(end)?;

        Ok(expressions)
    }
}
