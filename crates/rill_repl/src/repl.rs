use std::cell::RefCell;
use std::rc::Rc;

use rustyline::error::ReadlineError;
use rustyline::Editor;

use rill_interpreter::{Environment, Evaluator};
use rill_parser::{Lexer, Parser};

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn repl() {
    println!("rill v{}", VERSION);

    // One environment for the whole session, so bindings persist per line.
    let env = Rc::new(RefCell::new(Environment::new()));

    // `()` can be used when no completer is required
    let mut rl = Editor::<()>::new();
    loop {
        let readline = rl.readline(">> ");
        match readline {
            Ok(line) => {
                if line.trim() == "exit" || line.trim() == "quit" {
                    break;
                }
                // Skip empty lines
                else if line.trim().is_empty() {
                    continue;
                }

                rl.add_history_entry(line.as_str());

                let lexer = Lexer::new(&line);
                let mut parser = Parser::new(lexer);
                let program = parser.parse_program();

                if !parser.errors().is_empty() {
                    println!("parser errors:");
                    for error in parser.errors() {
                        println!("\t{}", error);
                    }
                    continue;
                }

                let mut evaluator = Evaluator::new_with_env(Rc::clone(&env));
                println!("{}", evaluator.eval(&program));
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(error) => {
                println!("Error: {:?}", error);
                break;
            }
        }
    }
}
