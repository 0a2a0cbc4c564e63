// src/executor/builtin/jobs.rs
use std::io::Write;

use anyhow::Result;
use nix::errno::Errno;
use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};
use nix::unistd::Pid;

use crate::executor::Flow;
use crate::shell::Shell;

/// Non-blocking check on a background process.
pub trait StatusProbe {
    fn has_finished(&self, pid: Pid) -> bool;
}

/// Polls with `waitpid(pid, WNOHANG)`, collecting the exit status if there is one.
pub struct WaitProbe;

impl StatusProbe for WaitProbe {
    fn has_finished(&self, pid: Pid) -> bool {
        match waitpid(pid, Some(WaitPidFlag::WNOHANG)) {
            Ok(WaitStatus::Exited(..)) | Ok(WaitStatus::Signaled(..)) => true,
            Ok(_) => false,
            Err(Errno::EINTR) => false,
            // ECHILD: already collected or never ours.
            Err(_) => true,
        }
    }
}

/// Print every running job and forget the ones that have finished.
///
/// Finished jobs are only noticed here; nothing reaps them in between.
/// Their slots become holes that the table squeezes out when it fills.
pub fn builtin_jobs<W: Write, P: StatusProbe>(shell: &mut Shell<W>, probe: &P) -> Result<Flow> {
    for slot in shell.jobs.slots_mut() {
        let finished = match slot {
            Some(job) => probe.has_finished(job.pid()),
            None => continue,
        };
        if finished {
            if let Some(job) = slot.take() {
                log::debug!("job {} finished, releasing", job.pid());
            }
        } else if let Some(job) = slot {
            job.write_line(&mut shell.out)?;
        }
    }
    shell.out.flush()?;
    Ok(Flow::Continue)
}
