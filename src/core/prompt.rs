//! Re-prompting input loops.
//!
//! Each helper asks until the validator accepts the line. A rejection prints
//! the validator's reason and asks again; any other error (closed input,
//! store failure inside the validator) ends the loop.

use crate::domain::ports::Console;
use crate::utils::error::{Result, ShopError};
use crate::utils::validation;

pub fn ask<C, T, F>(console: &mut C, message: &str, validate: F) -> Result<T>
where
    C: Console + ?Sized,
    F: Fn(&str) -> Result<T>,
{
    loop {
        let line = console.prompt(message)?;
        match validate(&line) {
            Ok(value) => return Ok(value),
            Err(ShopError::InvalidInput { reason, .. }) => {
                tracing::debug!("Rejected input {:?}: {}", line, reason);
                console.say(&reason)?;
            }
            Err(other) => return Err(other),
        }
    }
}

pub fn ask_yes_no<C: Console + ?Sized>(console: &mut C, message: &str) -> Result<bool> {
    ask(console, message, |s| validation::validate_binary_choice("answer", s))
}

/// Index in `[1, max]`.
pub fn ask_choice<C: Console + ?Sized>(console: &mut C, message: &str, max: usize) -> Result<usize> {
    ask(console, message, |s| validation::validate_menu_selection("selection", s, max))
}

/// Free text, no validation.
pub fn ask_text<C: Console + ?Sized>(console: &mut C, message: &str) -> Result<String> {
    console.prompt(message)
}

/// Integer id that `exists` confirms. Syntax errors and unknown ids get
/// different messages.
pub fn ask_existing_id<C, F>(
    console: &mut C,
    message: &str,
    field: &str,
    missing: &str,
    exists: F,
) -> Result<i64>
where
    C: Console + ?Sized,
    F: Fn(i64) -> Result<bool>,
{
    ask(console, message, |s| {
        let id = validation::validate_integer(field, s)?;
        if exists(id)? {
            Ok(id)
        } else {
            Err(ShopError::invalid_input(field, s, missing))
        }
    })
}
