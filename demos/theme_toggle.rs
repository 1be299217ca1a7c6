//! Session store driven by a background frame loop
//!
//! Run with `RUST_LOG=debug` to see the transition phases.

use lantern::frame::{FrameLoop, FrameQueue};
use lantern::session::StoreConfig;
use lantern::storage::FileStorage;
use lantern::AppStore;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("=== Theme Toggle Example ===\n");

    let path = std::env::temp_dir().join("lantern-demo").join("preferences.json");
    let storage = Arc::new(FileStorage::open(&path)?);
    let frames = Arc::new(FrameQueue::new());
    let _frame_loop = FrameLoop::spawn(frames.clone())?;

    let store = AppStore::builder(storage, frames)
        .config(StoreConfig::from_env())
        .build();

    println!("Preferences file: {}", path.display());
    println!("Locale: {}", store.locale());
    println!("Licensed icons: {}\n", store.fa_pro());

    let _watch = store.watch(
        |s| (s.theme, s.no_transitions),
        |(theme, suppressed)| {
            println!("  theme={theme} transitions={}", if *suppressed { "off" } else { "on" });
        },
    );

    let next = store.theme().toggled();
    println!("\nSwitching to {next}...");
    let transition = store.set_theme(next);

    while !transition.is_finished() {
        thread::sleep(Duration::from_millis(5));
    }

    println!("\nDone after {:?}. Run again to toggle back.", transition.phase());
    Ok(())
}
