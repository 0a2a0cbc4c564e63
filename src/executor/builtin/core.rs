// src/executor/builtin/core.rs
use std::env;
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use nix::unistd::getpid;

use crate::error::ShellError;
use crate::executor::Flow;
use crate::shell::Shell;

/// The directory `cd -` goes back to.
#[derive(Debug, Default)]
pub struct DirMemory {
    previous: Option<PathBuf>,
}

impl DirMemory {
    pub fn remember_current(&mut self) {
        match env::current_dir() {
            Ok(cwd) => self.previous = Some(cwd),
            Err(e) => log::debug!("cd: cannot read current directory: {e}"),
        }
    }

    pub fn previous(&self) -> Option<&Path> {
        self.previous.as_deref()
    }
}

/// Built-ins report the shell's own pid before they run.
fn announce_self<W: Write>(out: &mut W) -> std::io::Result<()> {
    writeln!(out, "{}", getpid())?;
    out.flush()
}

pub fn builtin_cd<W: Write>(shell: &mut Shell<W>, args: &[OsString]) -> Result<Flow> {
    announce_self(&mut shell.out)?;

    // A bare `cd` and `cd ~` both go home.
    match args.get(1).filter(|arg| *arg != "~") {
        None => {
            shell.dirs.remember_current();
            let home = home_dir().ok_or(ShellError::NoHome)?;
            change_dir(&home)?;
        }
        // Going back does not update the memory, so `cd -` twice stays put.
        Some(arg) if arg == "-" => {
            let previous = shell.dirs.previous().ok_or(ShellError::NoPreviousDir)?;
            change_dir(previous)?;
        }
        Some(arg) => {
            shell.dirs.remember_current();
            change_dir(Path::new(arg))?;
        }
    }
    Ok(Flow::Continue)
}

pub fn builtin_exit<W: Write>(shell: &mut Shell<W>) -> Result<Flow> {
    announce_self(&mut shell.out)?;
    let released = shell.jobs.release_all();
    log::debug!("exit: released {released} job(s)");
    Ok(Flow::Exit)
}

fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
}

fn change_dir(path: &Path) -> Result<(), ShellError> {
    env::set_current_dir(path).map_err(|source| ShellError::ChangeDir {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::jobs::Job;
    use nix::unistd::Pid;
    use pretty_assertions::assert_eq;

    fn shell() -> Shell<Vec<u8>> {
        Shell::new(Config::default(), Vec::new())
    }

    #[test]
    fn exit_prints_own_pid_and_releases_jobs() {
        let mut sh = shell();
        sh.jobs.insert(Job::new(Pid::from_raw(1001), vec!["a".into()])).unwrap();
        sh.jobs.insert(Job::new(Pid::from_raw(1002), vec!["b".into()])).unwrap();

        let flow = builtin_exit(&mut sh).unwrap();
        assert_eq!(flow, Flow::Exit);
        assert_eq!(sh.jobs.live(), 0);
        assert_eq!(String::from_utf8(sh.out).unwrap(), format!("{}\n", getpid()));
    }

    #[test]
    fn cd_dash_without_memory_is_an_error() {
        let mut sh = shell();
        let err = builtin_cd(&mut sh, &[OsString::from("cd"), OsString::from("-")]).unwrap_err();
        assert!(matches!(err.downcast_ref::<ShellError>(), Some(ShellError::NoPreviousDir)));
        // The pid line is printed even when cd fails.
        assert_eq!(String::from_utf8(sh.out).unwrap(), format!("{}\n", getpid()));
    }

    #[test]
    fn cd_to_missing_dir_still_remembers_where_it_was() {
        let mut sh = shell();
        let here = env::current_dir().unwrap();
        let err = builtin_cd(&mut sh, &[OsString::from("cd"), OsString::from("/definitely/not/here")]).unwrap_err();
        assert!(err.to_string().starts_with("cd: /definitely/not/here: "));
        assert_eq!(sh.dirs.previous(), Some(here.as_path()));
        assert_eq!(env::current_dir().unwrap(), here);
    }
}
