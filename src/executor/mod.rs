// src/executor/mod.rs - picks the path a parsed command runs down
pub mod builtin;
pub mod launch;

use std::io::Write;

use anyhow::Result;

use crate::parser::ast::Command;
use crate::shell::Shell;

/// What the read loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Run one parsed command. Built-ins and `jobs` borrow the arguments and
/// drop them on return; external commands take them over.
pub fn execute<W: Write>(shell: &mut Shell<W>, cmd: Command) -> Result<Flow> {
    if cmd.name().is_none() {
        return Ok(Flow::Continue);
    }

    if let Some(result) = builtin::run_builtin(shell, &cmd.args) {
        return result;
    }

    launch::launch(&mut shell.jobs, &mut shell.out, cmd)?;
    Ok(Flow::Continue)
}
