mod repl;

use std::fs;
use std::path::Path;

use etch_interpreter::Interpreter;
use etch_syntax::error::Error;
use owo_colors::OwoColorize;

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

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let path = match args.get(1) {
        Some(p) => p,
        None => {
            repl::start_repl();
            return;
        }
    };

    if !Path::new(path).exists() {
        eprintln!(
            "{}: {}",
            "error".red().bold(),
            format!("File not found: {}", path).red()
        );
        std::process::exit(1);
    }
    let src = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!(
                "{}: {}",
                "error".red().bold(),
                format!("Failed to read {}: {}", path, e).red()
            );
            std::process::exit(1);
        }
    };

    let program = match etch_parser::parse(&src) {
        Ok(p) => p,
        Err(e) => {
            render_error(&src, &e);
            std::process::exit(1);
        }
    };

    let mut interp = Interpreter::new();
    if let Err(e) = interp.run(&program) {
        render_error(&src, &e);
        std::process::exit(1);
    }
}
