use clap::Parser;
use colored::Colorize;
use ctxmenu::Result;
use tracing_subscriber::EnvFilter;

/// Interactive helper; all choices are made from the menu
#[derive(Parser)]
#[command(name = "ctxmenu")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Toggle the Windows 11 \"Show more options\" context menu", long_about = None)]
struct Cli {}

fn main() {
    let _cli = Cli::parse();
    init_tracing();

    if let Err(e) = run() {
        eprintln!("{}", format!("Error: {:#}", e).red());
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr and stay silent unless `RUST_LOG` asks for them
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(windows)]
fn run() -> Result<()> {
    use ctxmenu::registry::CurrentUserRegistry;
    use ctxmenu::shell::ExplorerShell;
    use ctxmenu::{Context, Session};
    use std::io;

    // Older consoles need VT processing switched on for colors
    let _ = colored::control::set_virtual_terminal(true);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(
        CurrentUserRegistry::new(),
        ExplorerShell::new(),
        stdin.lock(),
        stdout.lock(),
    );
    session.run().context("Console session failed")?;
    Ok(())
}

#[cfg(not(windows))]
fn run() -> Result<()> {
    anyhow::bail!("ctxmenu edits the Windows shell registry and only runs on Windows")
}
