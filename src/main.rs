use std::{
    io::{self, BufRead},
    path::PathBuf,
    process,
};

use clap::Parser;
use pixl::{graphics::WindowFactory, ir::IrGenerator, lexer::Lexer, semantics::SemanticAnalyzer};

/// pixl runs programs written in a small statically-typed language for
/// interactive 2D graphics.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Source file to run. Without it, source is read from stdin until a
    /// line containing only `END`.
    source: Option<PathBuf>,

    /// Dump the token stream instead of running.
    #[arg(long)]
    emit_tokens: bool,

    /// Dump the generated IR instead of running.
    #[arg(long)]
    emit_ir: bool,
}

fn main() {
    let cli = Cli::parse();

    let source = match read_source(cli.source.as_deref()) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("Error: {err}");
            process::exit(1);
        }
    };

    if cli.emit_tokens {
        for token in Lexer::new(&source).tokenize() {
            println!(
                "{:>4}:{:<3} {:?} {:?}",
                token.line, token.column, token.kind, token.text
            );
        }
        return;
    }

    if cli.emit_ir {
        if let Err(err) = emit_ir(&source) {
            eprintln!("Error: {err}");
            process::exit(1);
        }
        return;
    }

    if let Err(err) = pixl::run_source(&source, Box::new(WindowFactory), io::stdout()) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn read_source(path: Option<&std::path::Path>) -> io::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut source = String::new();
            for line in io::stdin().lock().lines() {
                let line = line?;
                if line == "END" {
                    break;
                }
                source.push_str(&line);
                source.push('\n');
            }
            Ok(source)
        }
    }
}

fn emit_ir(source: &str) -> Result<(), pixl::ParseError> {
    let tokens = Lexer::new(source).tokenize();
    let program = pixl::parser::parse(&tokens)?;

    let mut analyzer = SemanticAnalyzer::new(&program);
    analyzer.analyze();

    let ir = IrGenerator::new(&program).generate();
    for func in &ir.functions {
        println!("{} {}():", func.return_type, func.name);
        for (index, instr) in func.instructions.iter().enumerate() {
            println!("{index:>4}: {instr}");
        }
    }
    Ok(())
}
