use anyhow::{Context, Result};
use std::io;
use todo_cli::logging;
use todo_cli::planner::{render, Session, Store, TASKS_FILE};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let session = tokio::task::spawn_blocking(|| -> io::Result<()> {
        let mut store = Store::load(TASKS_FILE);
        let stdin = io::stdin();
        let mut session = Session::new(&mut store, stdin.lock(), io::stdout(), io::stderr());
        session.run()
    });

    tokio::select! {
        joined = session => {
            joined
                .context("session thread panicked")?
                .context("terminal I/O failed")?;
        }
        _ = tokio::signal::ctrl_c() => {
            // stdin is still blocked on the session thread
            let _ = render::goodbye(&mut io::stdout());
            std::process::exit(0);
        }
    }

    Ok(())
}
