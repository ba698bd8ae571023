mod repl;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use rill_interpreter::Evaluator;

/// rill is a small, expression-oriented scripting language.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Script to run; starts an interactive session when omitted.
    script: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    match args.script {
        Some(path) => run_file(&path),
        None => {
            repl::repl();
            ExitCode::SUCCESS
        }
    }
}

fn run_file(path: &Path) -> ExitCode {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("failed to read {}: {}", path.display(), error);
            return ExitCode::FAILURE;
        }
    };

    let (program, errors) = rill_parser::parse(&source);
    if !errors.is_empty() {
        eprintln!("parser errors:");
        for error in &errors {
            eprintln!("\t{}", error);
        }
        return ExitCode::FAILURE;
    }

    let result = Evaluator::new().eval(&program);
    if result.is_error() {
        eprintln!("{}", result);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
