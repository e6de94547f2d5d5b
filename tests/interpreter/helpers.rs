use plox::{ExecuteError, Interpreter};

/// Execute the provided lox source code.
/// It returns the program's output stream.
pub fn execute(source: &str) -> String {
    let mut buffer = Vec::new();
    let _ = Interpreter::new(&mut buffer).execute_raw(source);
    String::from_utf8(buffer).unwrap()
}

/// Execute the provided lox source code.
/// It returns whatever the program printed together with the error the
/// driver would report, if there was one.
pub fn execute_with_result(source: &str) -> (String, Result<(), ExecuteError>) {
    let mut buffer = Vec::new();
    let result = Interpreter::new(&mut buffer).execute_raw(source);
    (String::from_utf8(buffer).unwrap(), result)
}

/// Execute the provided lox source code and return the reported error.
/// Panics if the program ran cleanly.
pub fn execute_err(source: &str) -> String {
    let (_, result) = execute_with_result(source);
    result.unwrap_err().to_string()
}
