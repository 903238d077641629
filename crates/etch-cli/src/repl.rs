use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use etch_interpreter::{Env, Interpreter, Value};
use etch_lexer::Lexer;
use etch_parser::Parser;
use etch_syntax::error::Error;
use etch_syntax::token::TokenKind;
use owo_colors::OwoColorize;

pub fn start_repl() {
    println!(
        "{}",
        "etch REPL. Type :help for help, :quit to exit.".bold().green()
    );

    let mut interpreter = Interpreter::new();
    let mut env = Env::new_root();

    let mut buffer = String::new();
    loop {
        let prompt = if buffer.is_empty() {
            "etch> ".cyan().to_string()
        } else {
            "... > ".cyan().to_string()
        };
        print!("{}", prompt);
        let _ = io::stdout().flush();

        let mut line = String::new();
        let n = match io::stdin().read_line(&mut line) {
            Ok(n) => n,
            Err(_) => {
                println!("<input error>");
                break;
            }
        };
        if n == 0 {
            // EOF
            println!("\nGoodbye.");
            break;
        }
        let trimmed = line.trim_end();

        if buffer.is_empty() && trimmed.starts_with(':') {
            match trimmed {
                ":quit" | ":q" | ":exit" => {
                    println!("Goodbye.");
                    break;
                }
                ":help" | ":h" => {
                    println!(
                        "{}\n  {}  {}\n  {}  {}\n  {}  {}\n  {}  {}",
                        "Commands:".bold(),
                        ":help".yellow(),
                        "Show this help",
                        ":quit".yellow(),
                        "Exit the REPL",
                        ":vars".yellow(),
                        "List top-level variables",
                        ":reset".yellow(),
                        "Clear the environment"
                    );
                    println!(
                        "Type code to evaluate. Builtins: puts, len, map, filter, reduce. Multi-line input is supported."
                    );
                    continue;
                }
                ":vars" => {
                    print_vars(&env);
                    continue;
                }
                ":reset" => {
                    env = Env::new_root();
                    println!("{}", "State reset.".yellow());
                    continue;
                }
                _ => {
                    println!("{}", "Unknown command. Type :help.".red());
                    continue;
                }
            }
        }

        buffer.push_str(&line);

        if !is_complete(&buffer) {
            continue;
        }

        match Parser::new(Lexer::new(&buffer)).parse_program() {
            Ok(program) => match interpreter.run_with_env(&program, &env) {
                Ok(value) => {
                    if value != Value::Null {
                        println!("{}", format!("{}", value).bright_blue());
                    }
                }
                Err(e) => render_error(&buffer, &e),
            },
            Err(e) => render_error(&buffer, &e),
        }

        buffer.clear();
    }
}

fn print_vars(env: &Rc<RefCell<Env>>) {
    let mut vars = env.borrow().vars_snapshot();
    vars.sort_by(|a, b| a.0.cmp(&b.0));
    if vars.is_empty() {
        println!("{}", "<no vars>".dimmed());
        return;
    }
    for (k, v) in vars {
        println!("{} = {}", k.yellow(), format!("{}", v).bright_blue());
    }
}

fn render_error(source: &str, err: &Error) {
    let kind = match err {
        Error::Lex { .. } => "Lex error",
        Error::Parse { .. } => "Parse error",
        Error::Eval { .. } => "Runtime error",
    };
    eprintln!("{}: {}", kind.red().bold(), err.message().red());
    if let Some(src_line) = source.lines().nth(err.line() - 1) {
        eprintln!("  {} | {}", err.line(), src_line.bright_black());
    } else {
        eprintln!("  at line {}", err.line());
    }
}

/// A buffered input is handed to the parser once every delimiter pair is
/// balanced, so blocks and arrays can span lines.
fn is_complete(input: &str) -> bool {
    let tokens = Lexer::new(input).tokenize();
    let mut paren = 0i32;
    let mut brace = 0i32;
    let mut bracket = 0i32;
    for tk in tokens.iter() {
        match tk.kind {
            TokenKind::LParen => paren += 1,
            TokenKind::RParen => paren -= 1,
            TokenKind::LBrace => brace += 1,
            TokenKind::RBrace => brace -= 1,
            TokenKind::LBracket => bracket += 1,
            TokenKind::RBracket => bracket -= 1,
            _ => {}
        }
    }
    paren <= 0 && brace <= 0 && bracket <= 0
}
