//! The working root: the directory tree the model's commands materialize
//! into. Everything here takes paths relative to the root; the protocol
//! layer has already normalized them.

use crate::console::LineSource;
use crate::protocol::strip_code_fences;
use crate::WorkspaceError;
use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Answer that actually clears a non-empty root. Exact and case-sensitive.
const CLEAR_CONFIRMATION: &str = "yes";

pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// One-time startup step: make sure the root exists, and if it already
    /// holds files, offer to clear it. Only the literal answer `yes` deletes
    /// anything; every other answer keeps the contents, and the session
    /// proceeds either way. `assume_yes` answers the question without asking.
    pub async fn bootstrap(
        &self,
        input: &mut dyn LineSource,
        assume_yes: bool,
    ) -> anyhow::Result<()> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .with_context(|| format!("failed to create working root {}", self.root.display()))?;

        if self.is_empty().await? {
            return Ok(());
        }

        warn!(root = %self.root.display(), "working root is not empty");
        let clear = if assume_yes {
            true
        } else {
            println!(
                "WARNING: There are files in the {} directory.",
                self.root.display()
            );
            let answer = input.read_line("Do you want to delete them?").await?;
            answer == CLEAR_CONFIRMATION
        };

        if clear {
            self.clear().await?;
            info!(root = %self.root.display(), "cleared working root");
        }
        Ok(())
    }

    async fn is_empty(&self) -> anyhow::Result<bool> {
        let mut entries = tokio::fs::read_dir(&self.root).await?;
        Ok(entries.next_entry().await?.is_none())
    }

    async fn clear(&self) -> anyhow::Result<()> {
        let mut entries = tokio::fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if entry.file_type().await?.is_dir() {
                tokio::fs::remove_dir_all(&path).await?;
            } else {
                tokio::fs::remove_file(&path).await?;
            }
        }
        Ok(())
    }

    fn resolve(&self, rel: &str) -> Result<PathBuf, WorkspaceError> {
        if rel.is_empty() {
            return Err(WorkspaceError::InvalidPath("empty path".into()));
        }
        Ok(self.root.join(rel))
    }

    /// Write (or overwrite) a file, creating missing parent directories.
    /// Fenced code blocks are stripped before the content is persisted.
    pub async fn write_file(&self, rel: &str, content: &str) -> anyhow::Result<()> {
        let full_path = self.resolve(rel)?;

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("failed to create parent of {rel}"))?;
        }

        let stripped = strip_code_fences(content);
        info!(path = rel, bytes = stripped.len(), "writing file");
        tokio::fs::write(&full_path, stripped)
            .await
            .with_context(|| format!("failed to write {rel}"))?;
        Ok(())
    }

    /// Create a directory (and any missing parents).
    pub async fn create_dir(&self, rel: &str) -> anyhow::Result<()> {
        let full_path = self.resolve(rel)?;
        info!(path = rel, "creating directory");
        tokio::fs::create_dir_all(&full_path)
            .await
            .with_context(|| format!("failed to create directory {rel}"))?;
        Ok(())
    }

    /// Read a file's content back.
    pub async fn read_file(&self, rel: &str) -> anyhow::Result<String> {
        let full_path = self.resolve(rel)?;
        info!(path = rel, "reading file");
        tokio::fs::read_to_string(&full_path)
            .await
            .with_context(|| format!("failed to read {rel}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::ScriptedSource;
    use tempfile::TempDir;

    #[tokio::test]
    async fn write_then_read_round_trips() {
        let dir = TempDir::new().unwrap();
        let ws = Workspace::new(dir.path());
        ws.write_file("hello.txt", "hello").await.unwrap();
        assert_eq!(ws.read_file("hello.txt").await.unwrap(), "hello");
    }

    #[tokio::test]
    async fn write_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let ws = Workspace::new(dir.path());
        ws.write_file("a/b/c.txt", "nested").await.unwrap();
        assert!(dir.path().join("a/b").is_dir());
        assert_eq!(ws.read_file("a/b/c.txt").await.unwrap(), "nested");
    }

    #[tokio::test]
    async fn write_strips_code_fences() {
        let dir = TempDir::new().unwrap();
        let ws = Workspace::new(dir.path());
        ws.write_file("hello.py", "```python\nprint(\"hello\")\n```")
            .await
            .unwrap();
        assert_eq!(
            ws.read_file("hello.py").await.unwrap(),
            "print(\"hello\")"
        );
    }

    #[tokio::test]
    async fn write_overwrites_existing_content() {
        let dir = TempDir::new().unwrap();
        let ws = Workspace::new(dir.path());
        ws.write_file("f.txt", "old").await.unwrap();
        ws.write_file("f.txt", "new").await.unwrap();
        assert_eq!(ws.read_file("f.txt").await.unwrap(), "new");
    }

    #[tokio::test]
    async fn empty_path_is_rejected() {
        let dir = TempDir::new().unwrap();
        let ws = Workspace::new(dir.path());
        assert!(ws.write_file("", "x").await.is_err());
    }

    #[tokio::test]
    async fn bootstrap_creates_missing_root() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("code");
        let ws = Workspace::new(&root);
        let mut input = ScriptedSource::new(Vec::<String>::new());
        ws.bootstrap(&mut input, false).await.unwrap();
        assert!(root.is_dir());
    }

    #[tokio::test]
    async fn bootstrap_clears_on_exact_yes() {
        let dir = TempDir::new().unwrap();
        let ws = Workspace::new(dir.path());
        ws.write_file("stale/file.txt", "old run").await.unwrap();

        let mut input = ScriptedSource::new(["yes"]);
        ws.bootstrap(&mut input, false).await.unwrap();
        assert!(!dir.path().join("stale").exists());
    }

    #[tokio::test]
    async fn bootstrap_keeps_contents_on_any_other_answer() {
        let dir = TempDir::new().unwrap();
        let ws = Workspace::new(dir.path());
        ws.write_file("keep.txt", "precious").await.unwrap();

        for answer in ["no", "Yes", "YES", "y", ""] {
            let mut input = ScriptedSource::new([answer]);
            ws.bootstrap(&mut input, false).await.unwrap();
            assert!(
                dir.path().join("keep.txt").exists(),
                "answer {answer:?} should not clear"
            );
        }
    }

    #[tokio::test]
    async fn bootstrap_assume_yes_clears_without_asking() {
        let dir = TempDir::new().unwrap();
        let ws = Workspace::new(dir.path());
        ws.write_file("stale.txt", "old").await.unwrap();

        let mut input = ScriptedSource::new(Vec::<String>::new());
        ws.bootstrap(&mut input, true).await.unwrap();
        assert!(!dir.path().join("stale.txt").exists());
    }
}
