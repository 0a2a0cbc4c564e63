// src/executor/builtin/mod.rs
mod core;
mod jobs;

pub use self::core::DirMemory;

use std::ffi::OsString;
use std::io::Write;

use anyhow::Result;

use super::Flow;
use crate::shell::Shell;

pub fn run_builtin<W: Write>(shell: &mut Shell<W>, args: &[OsString]) -> Option<Result<Flow>> {
    // Names that are not UTF-8 can never be a built-in.
    let result = match args[0].to_str()? {
        "cd"   => core::builtin_cd(shell, args),
        "exit" => core::builtin_exit(shell),
        "jobs" => jobs::builtin_jobs(shell, &jobs::WaitProbe),
        _      => return None,
    };
    Some(result)
}
