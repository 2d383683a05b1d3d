use std::io;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use mineguess::session::Session;

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new();
    session.run(stdin.lock(), stdout.lock())?;
    Ok(())
}
