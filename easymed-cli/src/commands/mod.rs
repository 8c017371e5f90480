pub mod login;
pub mod symptoms;
pub mod talk;
pub mod text;

use anyhow::{bail, Result};

/// Prompts need a person at a terminal
pub(crate) fn require_terminal(command: &str) -> Result<()> {
    if !console::user_attended() {
        bail!("`{}` is interactive and needs a terminal", command);
    }
    Ok(())
}

/// dialoguer errors are plain I/O failures from our point of view
pub(crate) fn prompt_error(err: dialoguer::Error) -> anyhow::Error {
    anyhow::anyhow!("prompt failed: {}", err)
}
