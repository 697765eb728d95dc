use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{Local, Utc};
use arbor::infrastructure::ChangeWatcher;

use super::{GlobalOptions, Session};
use crate::cli::ProjectArgs;

const POLL_INTERVAL_MS: u64 = 250;

pub fn cmd_watch(project: &ProjectArgs, options: &GlobalOptions) -> Result<()> {
    let mut session = Session::open(project, options)?;
    let directories = session.config.watched_directories(&session.base);
    let mut watcher = ChangeWatcher::new(&directories).context("starting the file watcher")?;

    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();
    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .context("setting the Ctrl+C handler")?;

    if !options.json {
        eprintln!("Watching {} director(ies), Ctrl+C to stop", directories.len());
        for dir in &directories {
            eprintln!("  {}", dir.display());
        }
    }

    while running.load(Ordering::SeqCst) {
        let changes = watcher.poll(Duration::from_millis(POLL_INTERVAL_MS));
        if changes.is_empty() {
            continue;
        }
        session.browser.notify_external_change();
        if !session.frame() {
            continue;
        }

        if options.json {
            let line = serde_json::json!({
                "event": "changes",
                "at": Utc::now().to_rfc3339(),
                "paths": changes.iter().map(|p| p.display().to_string()).collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string(&line)?);
        } else {
            let entries = session
                .browser
                .tree()
                .root(session.root_index())
                .map(|root| root.snapshot().len())
                .unwrap_or(0);
            println!(
                "[{}] {} change(s), {} now has {} entries",
                Local::now().format("%H:%M:%S"),
                changes.len(),
                session.root_name(),
                entries
            );
        }
    }

    session.save_settings();
    Ok(())
}
