// src/shell.rs
use std::io::Write;

use anyhow::Result;

use crate::config::Config;
use crate::executor::builtin::DirMemory;
use crate::executor::{self, Flow};
use crate::jobs::JobTable;
use crate::readline::Line;

/// Everything that lives between one prompt and the next.
pub struct Shell<W: Write> {
    pub config: Config,
    pub jobs: JobTable,
    pub dirs: DirMemory,
    pub out: W,
}

impl<W: Write> Shell<W> {
    pub fn new(config: Config, out: W) -> Self {
        let jobs = JobTable::new(config.job_capacity);
        Shell {
            config,
            jobs,
            dirs: DirMemory::default(),
            out,
        }
    }

    pub fn prompt(&mut self) -> std::io::Result<()> {
        write!(self.out, "{}", self.config.prompt)?;
        self.out.flush()
    }

    /// Parse and run one line.
    pub fn eval(&mut self, line: &Line) -> Result<Flow> {
        let cmd = crate::parser::parse(line)?;
        executor::execute(self, cmd)
    }

    /// Drop every tracked job; used when input runs out.
    pub fn release_jobs(&mut self) -> usize {
        self.jobs.release_all()
    }
}
