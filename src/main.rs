// src/main.rs
mod config;
mod error;
mod executor;
mod jobs;
mod parser;
mod readline;
mod shell;

use std::io;

use config::Config;
use error::ShellError;
use executor::Flow;
use readline::LineReader;
use shell::Shell;

fn main() {
    env_logger::init();

    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("tinysh: warning: failed to load config: {e:#}");
        Config::default()
    });
    log::debug!("job table capacity {}", config.job_capacity);

    let mut reader = LineReader::new(io::stdin().lock(), config.read_unit);
    let mut shell = Shell::new(config, io::stdout());

    loop {
        if let Err(e) = shell.prompt() {
            eprintln!("tinysh: {e}");
            break;
        }

        match reader.read_line() {
            Ok(Some(line)) => {
                log::debug!("read {:?}", String::from_utf8_lossy(line.as_bytes()));
                match shell.eval(&line) {
                    Ok(Flow::Continue) => {}
                    Ok(Flow::Exit) => break,
                    Err(e) => eprintln!("tinysh: {e}"),
                }
            }

            // ── End of input ──────────────────────────────────
            // Same teardown as `exit`, without the pid line
            Ok(None) => {
                shell.release_jobs();
                break;
            }

            // ── Line too large for memory ─────────────────────
            // The rest of the line is discarded; prompt again
            Err(e @ ShellError::OutOfMemory(_)) => eprintln!("tinysh: {e}"),

            Err(e) => {
                eprintln!("tinysh: read error: {e}");
                break;
            }
        }
    }

    std::process::exit(0);
}
