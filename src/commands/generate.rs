//! Generate static files

use anyhow::Result;
use std::sync::mpsc::channel;
use std::time::Duration;

use notify::Watcher;

use crate::generator::Generator;
use crate::{Site, CONFIG_FILE};

/// Generate the static site
pub fn run(site: &Site) -> Result<()> {
    Generator::new(site)?.generate()
}

/// Watch for file changes and regenerate
pub async fn watch(site: &Site) -> Result<()> {
    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    watcher.watch(site.posts_dir.as_ref(), notify::RecursiveMode::Recursive)?;

    if site.static_dir.exists() {
        watcher.watch(site.static_dir.as_ref(), notify::RecursiveMode::Recursive)?;
    }

    let config_path = site.base_dir.join(CONFIG_FILE);
    if config_path.exists() {
        watcher.watch(&config_path, notify::RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    // Debounce events
    let mut last_rebuild = std::time::Instant::now();

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(_event) => {
                if last_rebuild.elapsed() > Duration::from_millis(500) {
                    tracing::info!("File changed, regenerating...");
                    // The config may be the thing that changed
                    match Site::new(&site.base_dir) {
                        Ok(fresh) => {
                            if let Err(e) = run(&fresh) {
                                tracing::error!("Generation failed: {}", e);
                            }
                        }
                        Err(e) => tracing::error!("Failed to reload site: {}", e),
                    }
                    last_rebuild = std::time::Instant::now();
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {
                // Keep waiting
            }
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => {
                break;
            }
        }
    }

    Ok(())
}
