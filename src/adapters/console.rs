use crate::domain::ports::Console;
use crate::utils::error::{Result, ShopError};
use std::io::{self, BufRead, Write};

/// [`Console`] over any reader/writer pair. Tests feed it a byte cursor.
pub struct TerminalConsole<R: BufRead, W: Write, E: Write> {
    input: R,
    output: W,
    errors: E,
}

impl TerminalConsole<io::StdinLock<'static>, io::Stdout, io::Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout(), io::stderr())
    }
}

impl<R: BufRead, W: Write, E: Write> TerminalConsole<R, W, E> {
    pub fn new(input: R, output: W, errors: E) -> Self {
        Self {
            input,
            output,
            errors,
        }
    }

    pub fn into_parts(self) -> (R, W, E) {
        (self.input, self.output, self.errors)
    }
}

impl<R: BufRead, W: Write, E: Write> Console for TerminalConsole<R, W, E> {
    fn prompt(&mut self, message: &str) -> Result<String> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ShopError::InputClosed);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(line)
    }

    fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }

    fn error(&mut self, message: &str) -> Result<()> {
        writeln!(self.errors, "{}", message)?;
        Ok(())
    }
}
