//! tictac player - composition root binary.

#[cfg(not(target_arch = "wasm32"))]
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    load_dotenv();

    // stdout belongs to the board; logs go to stderr.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tictac_player=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = tictac_player::ClientConfig::from_env()?;
    tracing::info!(
        game = %config.game,
        player = %config.player,
        url = %config.socket_url,
        "Starting tictac player"
    );

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(tictac_player::runner::run(config))
}

/// `.env.local` wins over `.env`; neither has to exist.
#[cfg(not(target_arch = "wasm32"))]
fn load_dotenv() {
    for file in [".env.local", ".env"] {
        if let Err(e) = dotenvy::from_filename(file) {
            if !e.not_found() {
                eprintln!("Failed to load {}: {}", file, e);
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    if let Err(e) = tictac_player::runner::start() {
        tracing::error!(error = %format!("{:#}", e), "Failed to start tictac player");
    }
}
