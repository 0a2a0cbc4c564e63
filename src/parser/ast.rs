// src/parser/ast.rs
use std::ffi::{OsStr, OsString};

/// A parsed input line. Owned by whichever path ends up running it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Command {
    /// `args[0]` is the command name; empty for a blank line.
    pub args: Vec<OsString>,
    /// The last argument was exactly `&`.
    pub background: bool,
}

impl Command {
    pub fn name(&self) -> Option<&OsStr> {
        self.args.first().map(OsString::as_os_str)
    }
}
