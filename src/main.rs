//! vfsh entry point.
//!
//! Usage:
//!   vfsh [--vfs-path <zip>] [--startup-script <file>]

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use vfsh::models::OutputLine;
use vfsh::{Session, ShellConfig};

/// Shell emulator over a zip-backed virtual filesystem.
#[derive(Debug, Parser)]
#[command(name = "vfsh", version, about)]
struct Cli {
    /// Zip archive used to seed the virtual filesystem
    #[arg(long, env = "VFSH_VFS_PATH")]
    vfs_path: Option<PathBuf>,

    /// Script whose lines are executed before the interactive prompt
    #[arg(long, env = "VFSH_STARTUP_SCRIPT")]
    startup_script: Option<PathBuf>,
}

fn main() -> ExitCode {
    // Logs go to stderr so they never interleave with command output.
    // Respects RUST_LOG; quiet by default.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:?}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut session = Session::new(ShellConfig::new(cli.vfs_path, cli.startup_script));
    let stdout = io::stdout();
    let mut out = stdout.lock();

    print_lines(&mut out, &session.welcome())?;
    print_lines(&mut out, &session.load_configured_archive())?;

    let startup = session.run_configured_script();
    print_lines(&mut out, &startup.output)?;
    if startup.exit {
        return Ok(());
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut line = String::new();
    loop {
        write!(out, "{}", session.prompt())?;
        out.flush().context("failed to flush prompt")?;

        line.clear();
        if input.read_line(&mut line).context("failed to read input")? == 0 {
            writeln!(out)?;
            break;
        }

        let result = session.submit(&line);
        // The terminal already shows what was typed; skip the echo line.
        let shown = result
            .output
            .iter()
            .filter(|l| !matches!(l, OutputLine::Command { .. }));
        for l in shown {
            writeln!(out, "{}", l)?;
        }
        if result.exit {
            break;
        }
    }
    Ok(())
}

fn print_lines(out: &mut impl Write, lines: &[OutputLine]) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}
