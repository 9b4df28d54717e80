//! Interactive chat on stdin. Lines starting with `/image` request an image.
//!
//! Reads provider keys from the environment (or a `.env` file).

use genchat::presentation::{dispatch, PlaceholderState};
use genchat::store::LocalStore;
use genchat::{ChatSession, GenerationClient, Outcome, PlaceholderBoard, RequestTracker};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let client = Arc::new(GenerationClient::from_env()?);
    let (tracker, mut events) = RequestTracker::new(client.clone());

    let mut session = ChatSession::new(client, tracker);
    if let Some(path) = LocalStore::default_path() {
        session = session.with_store(LocalStore::open(path)?)?;
    }
    println!("{} messages restored. Type /quit to exit.", session.history().len());

    let mut board = PlaceholderBoard::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim() == "/quit" {
                    break;
                }
                match session.send(&line).await {
                    Ok(Outcome::Replied(text)) | Ok(Outcome::Failed(text)) => println!("AI: {text}"),
                    Ok(Outcome::ImageRequested(id)) => println!("[{id}] queued"),
                    Ok(Outcome::Ignored) => {}
                    Err(e) => println!("{e}"),
                }
                println!("{} | {}", session.counters().token_label(), session.counters().cost_label());
            }
            Some(event) = events.recv() => {
                let id = event.id();
                dispatch(&mut board, &event);
                if let Some(slot) = board.get(id) {
                    match &slot.state {
                        PlaceholderState::Generating => println!("[{id}] {}", slot.status_text()),
                        PlaceholderState::Ready { url } => println!("[{id}] {url}"),
                        PlaceholderState::Errored { message } => println!("[{id}] {message}"),
                    }
                }
            }
        }
    }

    Ok(())
}
