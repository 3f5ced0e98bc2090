//! The conversation state machine.
//!
//! Each turn: send the full transcript, append the assistant's reply
//! verbatim, classify it, act. At most one pending value is held across
//! turns — "the next assistant message is the body of this file" — and it is
//! always consumed when that next message arrives, one way or another.

use super::transcript::Transcript;
use crate::prompt::SYSTEM_PROMPT;
use crate::protocol::{self, Command};
use crate::providers::Provider;
use crate::workspace::Workspace;
use tracing::{debug, info, warn};

/// The held expectation that the next assistant message is a file body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingWrite {
    pub path: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    Continue,
    Finished,
}

pub struct SessionLoop<'a> {
    provider: &'a dyn Provider,
    workspace: &'a Workspace,
    model: &'a str,
    temperature: f64,
}

impl<'a> SessionLoop<'a> {
    pub fn new(
        provider: &'a dyn Provider,
        workspace: &'a Workspace,
        model: &'a str,
        temperature: f64,
    ) -> Self {
        Self {
            provider,
            workspace,
            model,
            temperature,
        }
    }

    /// Drive the conversation until the model signals `task_finished`.
    ///
    /// Returns the full transcript. A provider failure (including a reply
    /// with no content) aborts the session; no retry is attempted.
    pub async fn run(&self, seed_prompt: &str) -> anyhow::Result<Transcript> {
        let mut transcript = Transcript::seeded(SYSTEM_PROMPT, seed_prompt);
        let mut pending: Option<PendingWrite> = None;

        loop {
            let reply = self
                .provider
                .complete(transcript.messages(), self.model, self.temperature)
                .await?;

            info!(
                provider = self.provider.name(),
                chars = reply.text.len(),
                tokens = ?reply.total_tokens(),
                "assistant reply"
            );
            println!("{}", reply.text);

            // The model must see its own prior output on the next call, so
            // the reply is recorded before any dispatch happens.
            transcript.record_assistant(reply.text.as_str());

            match apply_turn(self.workspace, &reply.text, &mut transcript, &mut pending).await? {
                TurnOutcome::Finished => break,
                TurnOutcome::Continue => {}
            }
        }

        info!("task finished");
        Ok(transcript)
    }
}

/// Classify one assistant message and execute the matching action.
///
/// Isolated from the provider round-trip so the dispatch semantics can be
/// exercised directly and swapped out for a structured-tool-call parser
/// later.
pub async fn apply_turn(
    workspace: &Workspace,
    content: &str,
    transcript: &mut Transcript,
    pending: &mut Option<PendingWrite>,
) -> anyhow::Result<TurnOutcome> {
    // Whatever this message turns out to be, the held expectation is
    // consumed by it: used if the message is a bare body, dropped otherwise.
    let held = pending.take();

    let command = match protocol::classify(content) {
        Ok(command) => command,
        Err(err) => {
            warn!(error = %err, "malformed command, ignoring message");
            warn_dropped(held.as_ref());
            return Ok(TurnOutcome::Continue);
        }
    };

    match command {
        Command::WriteFile { path, body } => {
            warn_dropped(held.as_ref());
            if body.trim().is_empty() {
                info!(path = %path, "write_file with no inline body, awaiting content");
                *pending = Some(PendingWrite { path });
            } else {
                workspace.write_file(&path, &body).await?;
            }
        }
        Command::CreateDir { path } => {
            warn_dropped(held.as_ref());
            workspace.create_dir(&path).await?;
        }
        Command::ReadFile { path } => {
            warn_dropped(held.as_ref());
            // Read-and-inject: the model only learns the outcome through the
            // transcript, so both success and failure go back as a user
            // message.
            match workspace.read_file(&path).await {
                Ok(file_content) => {
                    transcript.record_user(format!("Contents of {path}:\n{file_content}"));
                }
                Err(err) => {
                    warn!(path = %path, error = %err, "read_file failed");
                    transcript.record_user(format!("Could not read {path}: {err:#}"));
                }
            }
        }
        Command::TaskFinished => {
            warn_dropped(held.as_ref());
            return Ok(TurnOutcome::Finished);
        }
        Command::Unrecognized => {
            if let Some(write) = held {
                info!(path = %write.path, "writing held file body");
                workspace.write_file(&write.path, content).await?;
            } else {
                debug!("no command recognized, message ignored");
            }
        }
    }

    Ok(TurnOutcome::Continue)
}

fn warn_dropped(held: Option<&PendingWrite>) {
    if let Some(write) = held {
        warn!(
            path = %write.path,
            "pending write superseded by a new command, dropping it"
        );
    }
}
