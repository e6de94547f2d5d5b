use anyhow::Context;
use plox::{repl, ExecuteError, Interpreter};
use std::io::stdout;
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    // The first element in the arguments list is the name of the binary.
    // Then the actual binary arguments, flags and options.
    if args.len() == 1 {
        repl()?;
    } else if args.len() == 2 {
        let filepath = PathBuf::from(&args[1]);
        let source = std::fs::read_to_string(&filepath)
            .with_context(|| format!("Failed to read {}", filepath.display()))?;
        if let Err(e) = Interpreter::new(stdout()).execute_raw(&source) {
            eprintln!("{}", e);
            let code = match e {
                ExecuteError::Static(_) => 65,
                ExecuteError::Runtime(_) => 70,
            };
            std::process::exit(code);
        }
    } else {
        println!("Usage: plox [script]");
        // Why 64, you ask?
        //
        // If you run (on a Linux machine):
        // ```
        // grep 64 /usr/include/sysexits.h
        // ```
        //
        // You'll find:
        // ```
        // #define EX__BASE        64      /* base value for error messages */
        // #define EX_USAGE        64      /* command line usage error */
        // ```
        std::process::exit(64);
    }
    Ok(())
}
