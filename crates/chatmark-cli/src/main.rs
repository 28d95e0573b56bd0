use std::{env, process};

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use chatmark_config::Config;

mod client;
mod debug_doc;
mod session;
mod surface;

use session::ChatSession;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Config file first, CLI argument overrides the model.
    let args: Vec<String> = env::args().collect();
    let mut config = match Config::load() {
        Ok(Some(config)) => config,
        Ok(None) => Config::default(),
        Err(e) => {
            eprintln!("Error: failed to load config file: {e}");
            eprintln!("Fix or remove {}", Config::config_path().display());
            process::exit(1);
        }
    };

    match args.len() {
        1 => {}
        2 => config.model = args[1].clone(),
        _ => {
            eprintln!("Usage: {} [model]", args[0]);
            process::exit(1);
        }
    }

    tracing::info!(host = %config.host, model = %config.model, "starting chat");

    if let Err(err) = ChatSession::new(config).run() {
        tracing::error!(?err, "session ended with error");
        eprintln!("{err:?}");
        process::exit(1);
    }

    Ok(())
}
