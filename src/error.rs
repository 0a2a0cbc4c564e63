// src/error.rs
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures of a single operation. None of them stop the read loop.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("out of memory while {0}")]
    OutOfMemory(&'static str),

    #[error("cd: {}: {source}", path.display())]
    ChangeDir { path: PathBuf, source: io::Error },

    #[error("cd: HOME not set")]
    NoHome,

    #[error("cd: no previous directory")]
    NoPreviousDir,

    #[error("fork: {0}")]
    Fork(nix::Error),

    #[error("wait: {0}")]
    Wait(nix::Error),

    #[error("{0}: argument contains a NUL byte")]
    NulArgument(String),

    #[error("job table full ({0} jobs); background job not started")]
    JobTableFull(usize),

    #[error(transparent)]
    Io(#[from] io::Error),
}
