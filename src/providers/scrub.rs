use std::borrow::Cow;

const MAX_API_ERROR_CHARS: usize = 200;

fn is_secret_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':' | '+' | '/' | '=')
}

fn token_end(input: &str, from: usize) -> usize {
    let mut end = from;
    for (i, c) in input[from..].char_indices() {
        if is_secret_char(c) {
            end = from + i + c.len_utf8();
        } else {
            break;
        }
    }
    end
}

fn scrub_after_marker(scrubbed: &mut String, marker: &str) {
    let mut search_from = 0;
    loop {
        let Some(rel) = scrubbed[search_from..].find(marker) else {
            break;
        };

        let start = search_from + rel;
        let content_start = start + marker.len();
        let end = token_end(scrubbed, content_start);

        // Skip bare markers without a token value.
        if end == content_start {
            search_from = content_start;
            continue;
        }

        scrubbed.replace_range(start..end, "[REDACTED]");
        search_from = start + "[REDACTED]".len();
    }
}

const PREFIX_PATTERNS: [&str; 3] = ["sk-", "sk-or-", "gsk_"];

const MARKER_PATTERNS: [&str; 4] = [
    "Authorization: Bearer ",
    "authorization: bearer ",
    "api_key=",
    "\"api_key\":\"",
];

/// Scrub known secret-like token patterns from provider error strings.
pub fn scrub_secret_patterns(input: &str) -> Cow<'_, str> {
    let needs_scrubbing = PREFIX_PATTERNS
        .iter()
        .chain(MARKER_PATTERNS.iter())
        .any(|pattern| input.contains(pattern));
    if !needs_scrubbing {
        return Cow::Borrowed(input);
    }

    let mut scrubbed = input.to_string();
    for pattern in PREFIX_PATTERNS {
        scrub_after_marker(&mut scrubbed, pattern);
    }
    for marker in MARKER_PATTERNS {
        scrub_after_marker(&mut scrubbed, marker);
    }

    Cow::Owned(scrubbed)
}

/// Sanitize API error text by scrubbing secrets and truncating length.
pub fn sanitize_api_error(input: &str) -> String {
    let scrubbed = scrub_secret_patterns(input);

    if scrubbed.chars().count() <= MAX_API_ERROR_CHARS {
        return scrubbed.into_owned();
    }

    let scrubbed = scrubbed.as_ref();
    let mut end = MAX_API_ERROR_CHARS;
    while end > 0 && !scrubbed.is_char_boundary(end) {
        end -= 1;
    }

    format!("{}...", &scrubbed[..end])
}

/// Build a sanitized provider error from a failed HTTP response.
pub async fn api_error(provider: &str, response: reqwest::Response) -> anyhow::Error {
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<failed to read provider error body>".to_string());
    let sanitized = sanitize_api_error(&body);
    anyhow::anyhow!("{provider} API error ({status}): {sanitized}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_keys_are_redacted() {
        let input = "request rejected for key sk-abc123def456";
        let scrubbed = scrub_secret_patterns(input);
        assert!(!scrubbed.contains("abc123def456"));
        assert!(scrubbed.contains("[REDACTED]"));
    }

    #[test]
    fn bearer_headers_are_redacted() {
        let input = "got Authorization: Bearer sk-live-token, rejecting";
        let scrubbed = scrub_secret_patterns(input);
        assert!(!scrubbed.contains("sk-live-token"));
    }

    #[test]
    fn clean_input_is_borrowed_unchanged() {
        let input = "model not found";
        assert!(matches!(scrub_secret_patterns(input), Cow::Borrowed(_)));
    }

    #[test]
    fn long_errors_are_truncated() {
        let input = "x".repeat(500);
        let sanitized = sanitize_api_error(&input);
        assert!(sanitized.len() < 500);
        assert!(sanitized.ends_with("..."));
    }
}
