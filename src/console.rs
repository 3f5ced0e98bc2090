//! Operator input seam.
//!
//! Both interactive questions (the seed prompt and the clear-workspace
//! confirmation) go through [`LineSource`], so the session can run against a
//! real terminal or a scripted transcript in tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Lines, Stdin};

#[async_trait]
pub trait LineSource: Send {
    /// Print a prompt and read the next line, trimmed.
    async fn read_line(&mut self, prompt: &str) -> anyhow::Result<String>;
}

/// Reads successive lines from an async byte stream through one shared
/// buffer, so input that arrives ahead of the question is not lost.
pub struct ReaderSource<R> {
    lines: Lines<BufReader<R>>,
}

impl<R: AsyncRead + Unpin + Send> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: BufReader::new(reader).lines(),
        }
    }
}

#[async_trait]
impl<R: AsyncRead + Unpin + Send> LineSource for ReaderSource<R> {
    async fn read_line(&mut self, prompt: &str) -> anyhow::Result<String> {
        println!("{prompt}");
        match self.lines.next_line().await? {
            Some(line) => Ok(line.trim().to_string()),
            None => anyhow::bail!("input closed while waiting for a line"),
        }
    }
}

/// Reads from stdin, one line per question. The buffered reader lives for
/// the whole session.
pub struct StdinSource {
    inner: ReaderSource<Stdin>,
}

impl StdinSource {
    pub fn new() -> Self {
        Self {
            inner: ReaderSource::new(tokio::io::stdin()),
        }
    }
}

#[async_trait]
impl LineSource for StdinSource {
    async fn read_line(&mut self, prompt: &str) -> anyhow::Result<String> {
        self.inner.read_line(prompt).await
    }
}

/// Pre-scripted answers, consumed in order.
pub struct ScriptedSource {
    answers: VecDeque<String>,
}

impl ScriptedSource {
    pub fn new(answers: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl LineSource for ScriptedSource {
    async fn read_line(&mut self, _prompt: &str) -> anyhow::Result<String> {
        self.answers
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("scripted input exhausted"))
    }
}
