use crate::Interpreter;
use std::io::{stdout, Write};

/// Read-print-evaluation loop.
/// It prompts the user to enter lox code and then interprets it on the fly.
///
/// The interpreter lives for the whole session: globals defined on one line
/// are visible to the next, and a closure declared earlier can be called
/// later. Errors are reported and swallowed - only an empty line (or closed
/// stdin) ends the session.
pub fn repl() -> Result<(), std::io::Error> {
    let mut interpreter = Interpreter::new(stdout());
    loop {
        print!("plox > ");
        stdout().flush()?;
        let mut input = String::new();
        if std::io::stdin().read_line(&mut input).is_err() || input.trim().is_empty() {
            break Ok(());
        }
        if let Err(e) = interpreter.execute_raw(input.trim()) {
            eprintln!("{}", e);
        }
    }
}
