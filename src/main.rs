use anyhow::Context;
use holdkv::{view, Hold, HoldConfig};
use tracing::info;

// Lists the entries of a storage file without modifying it.
// Usage: holdkv [path]   (defaults to holdkv.xml)

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match std::env::args_os().nth(1) {
        Some(path) => HoldConfig::new(path),
        None => HoldConfig::default(),
    };
    // Read-only: never write back
    let config = config.with_auto_sync(false).with_auto_reload(true);
    let path = config.path.clone();

    let hold = Hold::open(config).with_context(|| format!("failed to open {:?}", path))?;
    let entries = hold.snapshot()?;
    info!("{} entries in {:?}", entries.len(), path);

    print!("{}", view::render(&entries));
    Ok(())
}
