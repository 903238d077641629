pub mod parser;

pub use parser::Parser;

use etch_lexer::Lexer;
use etch_syntax::ast::Program;
use etch_syntax::error::Result;

/// Parse a full source string into a [`Program`].
pub fn parse(source: &str) -> Result<Program> {
    Parser::new(Lexer::new(source)).parse_program()
}

#[cfg(test)]
mod tests {
    use super::*;
    use etch_syntax::ast::*;
    use etch_syntax::error::Error;

    fn parse_expr_str(input: &str) -> Expr {
        let mut parser = Parser::new(Lexer::new(input));
        parser.parse_expr().expect("Parsing should succeed")
    }

    fn parse_program_str(input: &str) -> Program {
        parse(input).expect("Parsing should succeed")
    }

    fn parse_err(input: &str) -> Error {
        parse(input).expect_err("Parsing should fail")
    }

    #[test]
    fn test_literal_expressions() {
        assert!(matches!(parse_expr_str("42"), Expr::Integer { value: 42, .. }));
        assert!(matches!(parse_expr_str("true"), Expr::Boolean { value: true, .. }));
        assert!(matches!(parse_expr_str("false"), Expr::Boolean { value: false, .. }));
    }

    #[test]
    fn test_identifier_expressions() {
        assert!(matches!(parse_expr_str("variable"), Expr::Ident(i) if i.name == "variable"));
        assert!(matches!(parse_expr_str("my_var"), Expr::Ident(i) if i.name == "my_var"));
    }

    #[test]
    fn test_prefix_expressions() {
        assert!(matches!(
            parse_expr_str("-42"),
            Expr::Prefix { op: PrefixOp::Neg, .. }
        ));
        assert!(matches!(
            parse_expr_str("!true"),
            Expr::Prefix { op: PrefixOp::Not, .. }
        ));
        // nested prefix
        if let Expr::Prefix { op: PrefixOp::Neg, right, .. } = parse_expr_str("-(-42)") {
            assert!(matches!(*right, Expr::Prefix { op: PrefixOp::Neg, .. }));
        } else {
            panic!("Expected nested prefix");
        }
    }

    #[test]
    fn test_infix_operators() {
        for (input, op) in [
            ("1 + 2", InfixOp::Add),
            ("5 - 3", InfixOp::Sub),
            ("4 * 6", InfixOp::Mul),
            ("8 / 2", InfixOp::Div),
            ("8 % 3", InfixOp::Rem),
            ("1 < 2", InfixOp::Lt),
            ("1 > 2", InfixOp::Gt),
            ("1 == 2", InfixOp::Eq),
            ("1 != 2", InfixOp::NotEq),
        ] {
            assert!(
                matches!(parse_expr_str(input), Expr::Infix { op: o, .. } if o == op),
                "input: {}",
                input
            );
        }
    }

    #[test]
    fn test_operator_precedence() {
        // 1 + 2 * 3 parses as 1 + (2 * 3)
        if let Expr::Infix { op: InfixOp::Add, right, .. } = parse_expr_str("1 + 2 * 3") {
            assert!(matches!(*right, Expr::Infix { op: InfixOp::Mul, .. }));
        } else {
            panic!("Expected Add at the top");
        }
        // (1 + 2) * 3 groups explicitly
        if let Expr::Infix { op: InfixOp::Mul, left, .. } = parse_expr_str("(1 + 2) * 3") {
            assert!(matches!(*left, Expr::Infix { op: InfixOp::Add, .. }));
        } else {
            panic!("Expected Mul at the top");
        }
        // comparisons bind weaker than arithmetic
        assert!(matches!(
            parse_expr_str("1 + 2 < 3 * 4"),
            Expr::Infix { op: InfixOp::Lt, .. }
        ));
        // equality binds weakest
        assert!(matches!(
            parse_expr_str("1 < 2 == true"),
            Expr::Infix { op: InfixOp::Eq, .. }
        ));
    }

    #[test]
    fn test_left_associativity() {
        // 10 - 2 - 3 parses as (10 - 2) - 3
        if let Expr::Infix { op: InfixOp::Sub, left, right, .. } = parse_expr_str("10 - 2 - 3") {
            assert!(matches!(*left, Expr::Infix { op: InfixOp::Sub, .. }));
            assert!(matches!(*right, Expr::Integer { value: 3, .. }));
        } else {
            panic!("Expected Sub at the top");
        }
    }

    #[test]
    fn test_array_expressions() {
        if let Expr::Array { elements, .. } = parse_expr_str("[1, 2, 3]") {
            assert_eq!(elements.len(), 3);
        } else {
            panic!("Expected Array");
        }

        if let Expr::Array { elements, .. } = parse_expr_str("[]") {
            assert_eq!(elements.len(), 0);
        } else {
            panic!("Expected empty Array");
        }
    }

    #[test]
    fn test_index_expressions() {
        assert!(matches!(parse_expr_str("arr[0]"), Expr::Index { .. }));
        // index binds tighter than call chains read left to right
        if let Expr::Index { array, .. } = parse_expr_str("[1, 2][0]") {
            assert!(matches!(*array, Expr::Array { .. }));
        } else {
            panic!("Expected Index");
        }
    }

    #[test]
    fn test_function_calls() {
        if let Expr::Call { callee, args, .. } = parse_expr_str("foo()") {
            assert!(matches!(*callee, Expr::Ident(i) if i.name == "foo"));
            assert_eq!(args.len(), 0);
        } else {
            panic!("Expected Call");
        }

        if let Expr::Call { args, .. } = parse_expr_str("add(1, 2 * 3)") {
            assert_eq!(args.len(), 2);
            assert!(matches!(args[1], Expr::Infix { op: InfixOp::Mul, .. }));
        } else {
            panic!("Expected Call");
        }
    }

    #[test]
    fn test_function_literals() {
        if let Expr::Function { params, body, .. } = parse_expr_str("|x, y| { x + y; }") {
            assert_eq!(params.len(), 2);
            assert_eq!(params[0].name, "x");
            assert_eq!(params[1].name, "y");
            assert_eq!(body.statements.len(), 1);
        } else {
            panic!("Expected Function");
        }

        if let Expr::Function { params, .. } = parse_expr_str("|| { 42; }") {
            assert_eq!(params.len(), 0);
        } else {
            panic!("Expected Function");
        }
    }

    #[test]
    fn test_if_expressions() {
        if let Expr::If { alternative, .. } = parse_expr_str("if (1 < 2) { 10; }") {
            assert!(alternative.is_none());
        } else {
            panic!("Expected If");
        }

        if let Expr::If { alternative, .. } = parse_expr_str("if (1 < 2) { 10; } else { 20; }") {
            assert!(alternative.is_some());
        } else {
            panic!("Expected If");
        }
    }

    #[test]
    fn test_arrow_desugars_to_call() {
        // x -> f(y) becomes f(x, y)
        if let Expr::Call { callee, args, .. } = parse_expr_str("x -> f(y)") {
            assert!(matches!(*callee, Expr::Ident(ref i) if i.name == "f"));
            assert_eq!(args.len(), 2);
            assert!(matches!(args[0], Expr::Ident(ref i) if i.name == "x"));
            assert!(matches!(args[1], Expr::Ident(ref i) if i.name == "y"));
        } else {
            panic!("Expected Call");
        }

        // chains stay left-associative: a -> f() -> g() becomes g(f(a))
        if let Expr::Call { callee, args, .. } = parse_expr_str("a -> f() -> g()") {
            assert!(matches!(*callee, Expr::Ident(ref i) if i.name == "g"));
            assert_eq!(args.len(), 1);
            assert!(matches!(args[0], Expr::Call { .. }));
        } else {
            panic!("Expected Call");
        }
    }

    #[test]
    fn test_statements() {
        let program = parse_program_str("var a = 1; return a; a + 1;");
        assert_eq!(program.statements.len(), 3);
        assert!(matches!(program.statements[0], Stmt::Var { .. }));
        assert!(matches!(program.statements[1], Stmt::Return { .. }));
        assert!(matches!(program.statements[2], Stmt::Expr { .. }));
    }

    #[test]
    fn test_semicolons_are_optional() {
        let program = parse_program_str("var a = 1\na + 1");
        assert_eq!(program.statements.len(), 2);
    }

    #[test]
    fn test_nodes_carry_lines() {
        let program = parse_program_str("var a = 1;\nvar b = 2;\nb;");
        assert_eq!(program.statements[0].line(), 1);
        assert_eq!(program.statements[1].line(), 2);
        assert_eq!(program.statements[2].line(), 3);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse_err("var ;"), Error::Parse { line: 1, .. }));
        assert!(matches!(parse_err("var a 1;"), Error::Parse { .. }));
        assert!(matches!(parse_err("(1 + 2"), Error::Parse { .. }));
        assert!(matches!(parse_err("[1, 2"), Error::Parse { .. }));
        assert!(matches!(parse_err("|x, 1| { x; }"), Error::Parse { .. }));
        assert!(matches!(parse_err("x -> y"), Error::Parse { .. }));
        assert!(matches!(parse_err("if (true) { 1;"), Error::Parse { .. }));
        // out of i64 range
        assert!(matches!(
            parse_err("9223372036854775808;"),
            Error::Parse { .. }
        ));
    }

    #[test]
    fn test_illegal_token_surfaces_as_lex_error() {
        assert!(matches!(parse_err("1 + @;"), Error::Lex { line: 1, .. }));
        let err = parse_err("\n\n#");
        assert!(matches!(err, Error::Lex { line: 3, .. }));
    }
}
