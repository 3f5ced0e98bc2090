//! The text command protocol spoken by the model.
//!
//! Each assistant message is classified by checking whether it *starts with*
//! one of the fixed action keywords. Only the first match governs; the
//! keyword must open the first line. Everything after the first line of a
//! `write_file` message is the inline file body (possibly empty, in which
//! case the body is expected in the next message).

use crate::ProtocolError;

/// Classification of one assistant message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    WriteFile { path: String, body: String },
    CreateDir { path: String },
    ReadFile { path: String },
    TaskFinished,
    Unrecognized,
}

/// Classify an assistant message into a [`Command`], first-match-wins.
pub fn classify(message: &str) -> Result<Command, ProtocolError> {
    if message.starts_with("write_file") {
        let path = parse_path(message, "write_file")?;
        let body = message
            .split_once('\n')
            .map_or(String::new(), |(_, rest)| rest.to_string());
        Ok(Command::WriteFile { path, body })
    } else if message.starts_with("create_dir") {
        Ok(Command::CreateDir {
            path: parse_path(message, "create_dir")?,
        })
    } else if message.starts_with("read_file") {
        Ok(Command::ReadFile {
            path: parse_path(message, "read_file")?,
        })
    } else if message.starts_with("task_finished") {
        Ok(Command::TaskFinished)
    } else {
        Ok(Command::Unrecognized)
    }
}

/// Extract and normalize the path argument: the second whitespace-delimited
/// token of the message's first line.
fn parse_path(message: &str, command: &'static str) -> Result<String, ProtocolError> {
    let first_line = message.lines().next().unwrap_or("");
    let raw = first_line
        .split_whitespace()
        .nth(1)
        .ok_or(ProtocolError::MissingPath { command })?;
    normalize_path(raw)
}

/// Strip the decorations models like to wrap paths in: at most one each of a
/// leading `<`, leading `/`, leading `"` and a trailing `"`, trailing `>`,
/// in whatever nesting order they appear. A token that strips to nothing is
/// an error.
pub fn normalize_path(raw: &str) -> Result<String, ProtocolError> {
    let mut path = raw;
    let (mut lead_angle, mut lead_slash, mut lead_quote) = (false, false, false);
    loop {
        match path.chars().next() {
            Some('<') if !lead_angle => {
                lead_angle = true;
                path = &path[1..];
            }
            Some('/') if !lead_slash => {
                lead_slash = true;
                path = &path[1..];
            }
            Some('"') if !lead_quote => {
                lead_quote = true;
                path = &path[1..];
            }
            _ => break,
        }
    }

    let (mut trail_quote, mut trail_angle) = (false, false);
    loop {
        match path.chars().next_back() {
            Some('"') if !trail_quote => {
                trail_quote = true;
                path = &path[..path.len() - 1];
            }
            Some('>') if !trail_angle => {
                trail_angle = true;
                path = &path[..path.len() - 1];
            }
            _ => break,
        }
    }

    if path.is_empty() {
        return Err(ProtocolError::EmptyPath {
            raw: raw.to_string(),
        });
    }
    Ok(path.to_string())
}

/// If the content opens with a fenced code block marker, drop the first and
/// last lines and return the remainder; otherwise return the content
/// unchanged.
///
/// Known-narrow heuristic, kept for compatibility with the protocol as the
/// model was instructed: a single layer only, no language-tag awareness, and
/// the last line is dropped unconditionally once a leading fence is seen.
pub fn strip_code_fences(content: &str) -> String {
    if !content.starts_with("```") {
        return content.to_string();
    }

    let lines: Vec<&str> = content.split('\n').collect();
    if lines.len() <= 2 {
        return String::new();
    }
    lines[1..lines.len() - 1].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── normalize_path ───────────────────────────────────────

    #[test]
    fn normalize_strips_every_supported_decoration() {
        for raw in ["f", "<f>", "/f", "\"f\"", "<\"/f\">", "</f>", "<\"f\"", "/f>"] {
            assert_eq!(normalize_path(raw).unwrap(), "f", "input {raw:?}");
        }
    }

    #[test]
    fn normalize_strips_one_layer_only() {
        assert_eq!(normalize_path("<<f>>").unwrap(), "<f>");
        assert_eq!(normalize_path("//f").unwrap(), "/f");
    }

    #[test]
    fn normalize_keeps_interior_punctuation() {
        assert_eq!(normalize_path("a/b/c.txt").unwrap(), "a/b/c.txt");
        assert_eq!(normalize_path("\"src/main.rs\"").unwrap(), "src/main.rs");
    }

    #[test]
    fn normalize_rejects_tokens_that_strip_to_nothing() {
        for raw in ["", "<>", "\"\"", "/", "<\"\">"] {
            assert!(normalize_path(raw).is_err(), "input {raw:?}");
        }
    }

    // ── strip_code_fences ────────────────────────────────────

    #[test]
    fn fences_are_removed_from_fenced_content() {
        let fenced = "```python\nprint(\"hi\")\n```";
        assert_eq!(strip_code_fences(fenced), "print(\"hi\")");
    }

    #[test]
    fn unfenced_content_passes_through() {
        let plain = "fn main() {}\n";
        assert_eq!(strip_code_fences(plain), plain);
    }

    #[test]
    fn stripping_is_idempotent_once_stripped() {
        let fenced = "```\nline one\nline two\n```";
        let once = strip_code_fences(fenced);
        assert_eq!(strip_code_fences(&once), once);
    }

    #[test]
    fn interior_fences_are_untouched() {
        let content = "see below\n```\ncode\n```";
        assert_eq!(strip_code_fences(content), content);
    }

    #[test]
    fn degenerate_fence_only_content_becomes_empty() {
        assert_eq!(strip_code_fences("```"), "");
        assert_eq!(strip_code_fences("```\n```"), "");
    }

    // ── classify ─────────────────────────────────────────────

    #[test]
    fn classify_write_file_with_inline_body() {
        let cmd = classify("write_file hello.py\nprint(\"hello\")").unwrap();
        assert_eq!(
            cmd,
            Command::WriteFile {
                path: "hello.py".into(),
                body: "print(\"hello\")".into(),
            }
        );
    }

    #[test]
    fn classify_write_file_without_body() {
        let cmd = classify("write_file a/b/c.txt").unwrap();
        assert_eq!(
            cmd,
            Command::WriteFile {
                path: "a/b/c.txt".into(),
                body: String::new(),
            }
        );
    }

    #[test]
    fn classify_write_file_normalizes_path() {
        let cmd = classify("write_file <\"/src/main.rs\">").unwrap();
        match cmd {
            Command::WriteFile { path, .. } => assert_eq!(path, "src/main.rs"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn classify_create_dir_and_read_file() {
        assert_eq!(
            classify("create_dir src").unwrap(),
            Command::CreateDir { path: "src".into() }
        );
        assert_eq!(
            classify("read_file <notes.md>").unwrap(),
            Command::ReadFile {
                path: "notes.md".into()
            }
        );
    }

    #[test]
    fn classify_task_finished_ignores_trailing_text() {
        assert_eq!(
            classify("task_finished - the codebase is complete").unwrap(),
            Command::TaskFinished
        );
    }

    #[test]
    fn classify_unrecognized_for_plain_prose() {
        assert_eq!(
            classify("Sure! I'll start by writing a file.").unwrap(),
            Command::Unrecognized
        );
    }

    #[test]
    fn classify_requires_keyword_at_message_start() {
        assert_eq!(
            classify("I will now run write_file hello.py").unwrap(),
            Command::Unrecognized
        );
    }

    #[test]
    fn classify_write_file_without_path_is_an_error() {
        assert!(classify("write_file").is_err());
        assert!(classify("create_dir\nsrc").is_err());
    }
}
