//! Terminal chat against a running portfolio chat server
//!
//! Type a question and press enter. `/1`..`/3` ask a suggestion, `/reset`
//! starts over, `/quit` exits.

use portfolio_chat::chat::{ChatUpdate, Event, Role};
use portfolio_chat::config::ClientConfig;
use portfolio_chat::content::{INTRO_MARKDOWN, SUGGESTIONS};
use portfolio_chat::reveal::{self, RevealConfig};
use portfolio_chat::runtime::{ChatHandle, ChatRuntime, HttpAskClient};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so they never mix with the transcript
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "portfolio_chat=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ClientConfig::from_env()?;
    let client = HttpAskClient::new(&config.server_url)?;
    let handle = ChatRuntime::spawn(client, config.reveal);

    print_intro(&handle, config.reveal).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let mut updates = handle.subscribe();

        match line {
            "" => continue,
            "/quit" => break,
            "/reset" => {
                handle.send(Event::Reset).await?;
                wait_for_reset(&mut updates).await;
                print_intro(&handle, config.reveal).await?;
                continue;
            }
            _ => {}
        }

        match line.strip_prefix('/').and_then(|n| n.parse::<usize>().ok()) {
            Some(n) => {
                handle
                    .send(Event::SuggestionPicked {
                        index: n.saturating_sub(1),
                    })
                    .await?;
            }
            None => {
                handle
                    .send(Event::DraftChanged {
                        text: line.to_string(),
                    })
                    .await?;
            }
        }
        handle.send(Event::Submit).await?;
        print_answer(&mut updates).await?;
    }

    Ok(())
}

/// Greeting, the intro revealed like an answer, then the suggestions
async fn print_intro(handle: &ChatHandle, reveal_config: RevealConfig) -> std::io::Result<()> {
    let state = handle.snapshot();
    let mut stdout = std::io::stdout();
    for turn in &state.transcript {
        writeln!(stdout, "{}\n", turn.text)?;
    }
    reveal::write_revealed(INTRO_MARKDOWN, reveal_config, &mut stdout).await?;
    writeln!(stdout)?;

    if state.show_suggestions() {
        writeln!(stdout)?;
        for (i, suggestion) in SUGGESTIONS.iter().enumerate() {
            writeln!(stdout, "  /{}  {suggestion}", i + 1)?;
        }
    }
    writeln!(stdout)
}

async fn wait_for_reset(updates: &mut broadcast::Receiver<ChatUpdate>) {
    loop {
        match updates.recv().await {
            Ok(ChatUpdate::Reset) | Err(broadcast::error::RecvError::Closed) => return,
            _ => {}
        }
    }
}

/// Stream the revealed answer until it is finished or the ask is rejected
async fn print_answer(
    updates: &mut broadcast::Receiver<ChatUpdate>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut stdout = std::io::stdout();
    let mut printed = 0;

    loop {
        let update = match updates.recv().await {
            Ok(update) => update,
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::debug!(skipped, "Terminal fell behind the reveal");
                continue;
            }
            Err(broadcast::error::RecvError::Closed) => return Ok(()),
        };

        match update {
            ChatUpdate::TurnText { text, .. } => {
                if let Some(delta) = text.get(printed..) {
                    write!(stdout, "{delta}")?;
                    stdout.flush()?;
                    printed = text.len();
                }
            }
            ChatUpdate::TurnFinished(turn) if turn.role == Role::Assistant => {
                let rest = turn.text.get(printed..).unwrap_or_default();
                writeln!(stdout, "{rest}\n")?;
                return Ok(());
            }
            ChatUpdate::Rejected { message } => {
                eprintln!("{message}");
                return Ok(());
            }
            _ => {}
        }
    }
}
