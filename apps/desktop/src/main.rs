mod commands;
mod config;
mod render;

use std::{path::PathBuf, sync::Arc};

use anyhow::Result;
use clap::Parser;
use client_core::{
    HttpRemoteService, Intent, MissingRemoteService, RemoteService, Session, SessionEvent,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::commands::{Command, HELP};

#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value = config::DEFAULT_SETTINGS_FILE)]
    config: PathBuf,
    #[arg(long)]
    base_url: Option<String>,
    #[arg(long)]
    token: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = config::load_settings(&args.config);
    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(token) = args.token {
        settings.auth_token = Some(token);
    }

    let remote: Arc<dyn RemoteService> = match config::remote_settings(&settings)? {
        Some(remote) => {
            info!(base_url = %remote.base_url, "desktop: using photo service");
            Arc::new(HttpRemoteService::new(remote))
        }
        None => {
            warn!("desktop: no auth token configured; running without a photo service");
            Arc::new(MissingRemoteService)
        }
    };
    let session = Arc::new(Session::new(remote));

    let mut events = session.subscribe_events();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            if let SessionEvent::Failed(err) = event {
                eprintln!("! {err}");
            }
        }
    });

    if session.start().await.is_ok() {
        print!("{}", render::render(&session.snapshot().await));
    }
    println!("type 'help' for commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match commands::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                eprintln!("{err}");
                continue;
            }
        };
        match command {
            Command::Intent(intent) => spawn_dispatch(Arc::clone(&session), intent),
            Command::Show => print!("{}", render::render(&session.snapshot().await)),
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
        }
    }

    Ok(())
}

/// Runs `intent` off the input loop so a pending request never blocks the next command.
/// Failures reach the user through the event subscriber.
fn spawn_dispatch(session: Arc<Session>, intent: Intent) {
    tokio::spawn(async move {
        if session.dispatch(intent).await.is_ok() {
            print!("{}", render::render(&session.snapshot().await));
        }
    });
}
