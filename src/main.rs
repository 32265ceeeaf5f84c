//! hexpad: edit the raw bytes of a file in the terminal.

use anyhow::{bail, Context};
use clap::Parser;
use hexpad::config::{path_from_input, Cli};
use hexpad::{App, EditSession};
use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

fn init_tracing(log_file: &Path) -> anyhow::Result<()> {
    let file = File::create(log_file)
        .with_context(|| format!("failed to create log file {}", log_file.display()))?;
    let env_filter = EnvFilter::try_from_env("HEXPAD_LOG")
        .or_else(|_| EnvFilter::try_new("hexpad=info"))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Ask on stdin until a usable path is given.
fn prompt_for_path() -> anyhow::Result<PathBuf> {
    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        println!("Please specify a file to open");
        io::stdout().flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            bail!("no file given");
        }
        if let Some(path) = path_from_input(&line) {
            return Ok(path);
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if let Some(log_file) = &cli.log_file {
        init_tracing(log_file)?;
    }
    let config = cli.to_config();

    let session = match &cli.path {
        Some(path) => EditSession::open_or_create(path, &config)
            .with_context(|| format!("failed to open {}", path.display()))?,
        None => loop {
            let path = prompt_for_path()?;
            match EditSession::open_or_create(&path, &config) {
                Ok(session) => break session,
                Err(err) => eprintln!("{err}"),
            }
        },
    };

    tracing::info!(path = %session.path().display(), "editing");
    let session = App::new(session, config).run()?;
    if session.is_modified() {
        tracing::info!("quit with unsaved changes");
    }
    Ok(())
}
