// src/executor/launch.rs
//
// External commands: fork, exec in the child, and in the parent either wait
// for the child or hand it to the job table.

use std::ffi::{CString, OsString};
use std::io::{self, Write};
use std::os::unix::ffi::OsStrExt;

use nix::errno::Errno;
use nix::sys::wait::{waitpid, WaitPidFlag};
use nix::unistd::{execvp, fork, ForkResult, Pid};

use crate::error::ShellError;
use crate::jobs::{Job, JobTable};
use crate::parser::ast::Command;

/// Start `cmd` as a child process and print its pid.
///
/// Foreground commands block until the child exits or stops. Background
/// commands move their arguments into a new `Job`; if the table has no room
/// the command is rejected before anything is started.
pub fn launch<W: Write>(jobs: &mut JobTable, out: &mut W, cmd: Command) -> Result<(), ShellError> {
    let Command { args, background } = cmd;

    if background {
        jobs.ensure_room()?;
    }

    // Everything the child needs is built before the fork.
    let argv = to_argv(&args)?;
    let failure_prefix: Vec<u8> = [&b"tinysh: "[..], args[0].as_bytes(), b": "].concat();
    let name = args[0].to_string_lossy().into_owned();

    out.flush()?;
    io::stdout().flush()?;

    // SAFETY: the child only calls execvp, write and _exit before it is replaced.
    match unsafe { fork() } {
        Err(e) => Err(ShellError::Fork(e)),
        Ok(ForkResult::Child) => exec_child(&argv, &failure_prefix),
        Ok(ForkResult::Parent { child }) => {
            let announced = writeln!(out, "{}", child).and_then(|_| out.flush());

            if background {
                log::debug!("started background job {} ({})", child, name);
                jobs.insert(Job::new(child, args))?;
            } else {
                log::debug!("started {} ({}), waiting", child, name);
                drop(args);
                wait_foreground(child)?;
            }

            announced.map_err(ShellError::from)
        }
    }
}

fn to_argv(args: &[OsString]) -> Result<Vec<CString>, ShellError> {
    args.iter()
        .map(|a| {
            CString::new(a.as_bytes())
                .map_err(|_| ShellError::NulArgument(args[0].to_string_lossy().into_owned()))
        })
        .collect()
}

fn exec_child(argv: &[CString], failure_prefix: &[u8]) -> ! {
    let err = match execvp(&argv[0], argv) {
        Ok(never) => match never {},
        Err(e) => e,
    };

    write_stderr(failure_prefix);
    write_stderr(err.desc().as_bytes());
    write_stderr(b"\n");
    unsafe { libc::_exit(libc::EXIT_FAILURE) }
}

/// Unbuffered write straight to fd 2; safe to call between fork and exec.
fn write_stderr(bytes: &[u8]) {
    unsafe {
        libc::write(libc::STDERR_FILENO, bytes.as_ptr().cast(), bytes.len());
    }
}

/// Wait for exit or stop (WUNTRACED), retrying on EINTR.
fn wait_foreground(pid: Pid) -> Result<(), ShellError> {
    loop {
        match waitpid(pid, Some(WaitPidFlag::WUNTRACED)) {
            Ok(status) => {
                log::debug!("foreground {} changed state: {:?}", pid, status);
                return Ok(());
            }
            Err(Errno::EINTR) => continue,
            Err(e) => return Err(ShellError::Wait(e)),
        }
    }
}
