// src/jobs.rs
use std::ffi::OsString;
use std::io::{self, Write};
use std::os::unix::ffi::OsStrExt;

use nix::unistd::Pid;

use crate::error::ShellError;

/// A background process and the arguments it was started with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pid: Pid,
    args: Vec<OsString>,
}

impl Job {
    pub fn new(pid: Pid, args: Vec<OsString>) -> Self {
        Job { pid, args }
    }

    pub fn pid(&self) -> Pid {
        self.pid
    }

    /// `<pid> <arg0> <arg1> ...` and a newline, the format `jobs` prints.
    /// Arguments go out as the bytes they were typed as.
    pub fn write_line<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{}", self.pid)?;
        for arg in &self.args {
            out.write_all(b" ")?;
            out.write_all(arg.as_bytes())?;
        }
        out.write_all(b"\n")
    }
}

/// Bounded table of background jobs.
///
/// Jobs are appended at the end of `slots`. Reaping clears a slot to `None`
/// and leaves the hole in place; holes are only squeezed out by `compact`,
/// which runs when the table fills up. `slots.len()` is therefore the index
/// of the next insertion and never exceeds `capacity`.
#[derive(Debug)]
pub struct JobTable {
    slots: Vec<Option<Job>>,
    capacity: usize,
}

impl JobTable {
    pub fn new(capacity: usize) -> Self {
        JobTable { slots: Vec::new(), capacity: capacity.max(1) }
    }

    #[cfg(test)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Index one past the last slot ever filled since the last compaction.
    #[cfg(test)]
    pub fn last(&self) -> usize {
        self.slots.len()
    }

    /// Number of slots that still hold a job.
    #[cfg(test)]
    pub fn live(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Make sure one more job fits, compacting if the end has been reached.
    pub fn ensure_room(&mut self) -> Result<(), ShellError> {
        if self.slots.len() == self.capacity {
            self.compact();
        }
        if self.slots.len() == self.capacity {
            return Err(ShellError::JobTableFull(self.capacity));
        }
        Ok(())
    }

    /// Append a job at `last()`. Returns the slot index it landed in.
    pub fn insert(&mut self, job: Job) -> Result<usize, ShellError> {
        self.ensure_room()?;
        let index = self.slots.len();
        log::debug!("tracking job {} in slot {}", job.pid, index);
        self.slots.push(Some(job));
        if self.slots.len() == self.capacity {
            self.compact();
        }
        Ok(index)
    }

    /// Drop the holes so live jobs occupy a dense prefix, keeping their order.
    pub fn compact(&mut self) {
        let before = self.slots.len();
        self.slots.retain(Option::is_some);
        log::debug!("compacted job table: {} slot(s) -> {}", before, self.slots.len());
    }

    /// The occupied prefix, holes included.
    pub fn slots_mut(&mut self) -> std::slice::IterMut<'_, Option<Job>> {
        self.slots.iter_mut()
    }

    #[cfg(test)]
    pub fn jobs(&self) -> impl Iterator<Item = &Job> {
        self.slots.iter().flatten()
    }

    /// Release every job in table order. Returns how many there were.
    pub fn release_all(&mut self) -> usize {
        let mut released = 0;
        for job in self.slots.drain(..).flatten() {
            log::debug!("releasing job {}", job.pid);
            released += 1;
        }
        released
    }
}
