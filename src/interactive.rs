//! Prompt loop: every entered line is one activation.
//!
//! Lines are read on a blocking thread and activations run as independent
//! tasks, so a new line can be submitted while an earlier request is still
//! in flight. The client's [`ConcurrencyPolicy`](crate::client::tracker::ConcurrencyPolicy)
//! decides which response stays on screen.

use crate::client::RecommendationClient;
use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

const PROMPT: &str = "city> ";

/// Words that end the loop instead of being sent as a city.
const EXIT_WORDS: &[&str] = &["exit", "quit"];

pub async fn run(client: RecommendationClient, history: Option<PathBuf>) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let reader = tokio::task::spawn_blocking(move || read_lines(tx, history));

    let mut in_flight = JoinSet::new();
    while let Some(line) = rx.recv().await {
        let client = client.clone();
        in_flight.spawn(async move { client.activate(line.as_str()).await });

        while let Some(done) = in_flight.try_join_next() {
            log_join(done);
        }
    }

    // Let outstanding requests settle so their output is not lost.
    while let Some(done) = in_flight.join_next().await {
        log_join(done);
    }

    reader.await?
}

fn log_join(done: std::result::Result<crate::client::Phase, tokio::task::JoinError>) {
    match done {
        Ok(phase) => tracing::debug!(?phase, "activation finished"),
        Err(e) => tracing::warn!("Activation task failed: {e}"),
    }
}

fn read_lines(tx: mpsc::UnboundedSender<String>, history: Option<PathBuf>) -> Result<()> {
    let mut editor = DefaultEditor::new()?;
    if let Some(path) = &history {
        if let Err(e) = editor.load_history(path) {
            tracing::debug!("No prompt history loaded from {}: {e}", path.display());
        }
    }

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                let trimmed = line.trim();
                if is_exit(trimmed) {
                    break;
                }
                if !trimmed.is_empty() {
                    let _ = editor.add_history_entry(trimmed);
                }
                if tx.send(line).is_err() {
                    break;
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    if let Some(path) = &history {
        if let Err(e) = editor.save_history(path) {
            tracing::warn!("Failed to save prompt history to {}: {e}", path.display());
        }
    }
    Ok(())
}

fn is_exit(line: &str) -> bool {
    EXIT_WORDS.iter().any(|w| line.eq_ignore_ascii_case(w))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_words_are_case_insensitive() {
        assert!(is_exit("quit"));
        assert!(is_exit("EXIT"));
        assert!(!is_exit("Exeter"));
        assert!(!is_exit(""));
    }
}
