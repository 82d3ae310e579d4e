//! Log redaction for credentials and contact details.
//!
//! Log lines may carry the login email, request URLs with tokens, or error
//! bodies echoed back by the prediction service. Every formatted line is
//! passed through [`sanitize`] by [`SanitizingMakeWriter`] before reaching
//! the log sink.
//!
//! Input is capped (see `PULMOCHECK_SANITIZE_MAX_BYTES`) so a huge error body
//! cannot stall the logger.

use regex::{Regex, RegexSet};
use std::sync::OnceLock;
use tracing_subscriber::fmt::MakeWriter;

const DEFAULT_SANITIZE_MAX_BYTES: usize = 16 * 1024;

static PATTERNS: OnceLock<Redactions> = OnceLock::new();

const RULES: [(&str, &str); 5] = [
    (
        r"(?i)\b[a-z0-9](?:[a-z0-9._%+-]{0,62}[a-z0-9])?@(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,}\b",
        "[REDACTED-EMAIL]",
    ),
    (
        r"\beyJ[a-zA-Z0-9_-]{10,}\.[a-zA-Z0-9_-]{10,}\.[a-zA-Z0-9_-]{10,}\b",
        "[REDACTED-JWT]",
    ),
    (r"(?i)\bbearer\s+[A-Za-z0-9._~+/-]{8,}=*", "Bearer [REDACTED-TOKEN]"),
    (
        r#"(?i)\b(password|passwd|pwd|secret|api[_-]?key|token)\b(["']?\s*[:=]\s*["']?)[^\s"',&]+"#,
        "$1$2[REDACTED-SECRET]",
    ),
    (r"\b\d{3}-\d{2}-\d{4}\b", "[REDACTED-SSN]"),
];

struct Redactions {
    set: Option<RegexSet>,
    rules: Vec<(Regex, &'static str)>,
}

fn redactions() -> &'static Redactions {
    PATTERNS.get_or_init(|| Redactions {
        set: RegexSet::new(RULES.iter().map(|(p, _)| *p)).ok(),
        rules: RULES
            .iter()
            .filter_map(|(p, r)| Regex::new(p).ok().map(|re| (re, *r)))
            .collect(),
    })
}

fn max_sanitize_bytes() -> usize {
    std::env::var("PULMOCHECK_SANITIZE_MAX_BYTES")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(DEFAULT_SANITIZE_MAX_BYTES)
}

fn truncate_to_char_boundary(input: &str, max_bytes: usize) -> (&str, bool) {
    if input.len() <= max_bytes {
        return (input, false);
    }
    let mut end = max_bytes;
    while end > 0 && !input.is_char_boundary(end) {
        end -= 1;
    }
    (&input[..end], true)
}

/// Replace credentials and contact details in `input`.
#[must_use]
pub fn sanitize(input: &str) -> String {
    sanitize_with_limit(input, max_sanitize_bytes())
}

fn sanitize_with_limit(input: &str, max_bytes: usize) -> String {
    let patterns = redactions();
    let (prefix, truncated) = truncate_to_char_boundary(input, max_bytes);

    let mut out = match &patterns.set {
        Some(set) if !set.is_match(prefix) => prefix.to_string(),
        _ => patterns
            .rules
            .iter()
            .fold(prefix.to_string(), |acc, (re, replacement)| {
                re.replace_all(&acc, *replacement).into_owned()
            }),
    };

    if truncated {
        out.push_str(" [TRUNCATED]");
        // Keep the record terminator so the next line starts on its own.
        if input.ends_with('\n') {
            out.push('\n');
        }
    }
    out
}

/// A `tracing_subscriber` writer factory that sanitizes each formatted line
/// before handing it to the wrapped writer.
#[derive(Debug, Clone)]
pub struct SanitizingMakeWriter<M> {
    inner: M,
}

impl<M> SanitizingMakeWriter<M> {
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

/// Line-buffering writer produced by [`SanitizingMakeWriter`].
pub struct SanitizingWriter<W: std::io::Write> {
    inner: W,
    buffer: Vec<u8>,
}

impl<W: std::io::Write> SanitizingWriter<W> {
    fn write_line(&mut self, line: &[u8]) -> std::io::Result<()> {
        let sanitized = sanitize(&String::from_utf8_lossy(line));
        self.inner.write_all(sanitized.as_bytes())
    }

    fn flush_lines(&mut self) -> std::io::Result<()> {
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            self.write_line(&line)?;
        }
        Ok(())
    }
}

impl<W: std::io::Write> std::io::Write for SanitizingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);

        // A formatter that never writes a newline must not grow the buffer forever.
        if self.buffer.len() > max_sanitize_bytes().saturating_mul(2) {
            let pending = std::mem::take(&mut self.buffer);
            self.write_line(&pending)?;
            self.inner.write_all(b"\n")?;
            return Ok(buf.len());
        }

        self.flush_lines()?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_lines()?;
        if !self.buffer.is_empty() {
            let pending = std::mem::take(&mut self.buffer);
            self.write_line(&pending)?;
        }
        self.inner.flush()
    }
}

impl<W: std::io::Write> Drop for SanitizingWriter<W> {
    fn drop(&mut self) {
        let _ = std::io::Write::flush(self);
    }
}

impl<'a, M> MakeWriter<'a> for SanitizingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = SanitizingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        SanitizingWriter {
            inner: self.inner.make_writer(),
            buffer: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_redacts_email() {
        let out = sanitize("Session opened for clinician@hospital.org");
        assert!(out.contains("[REDACTED-EMAIL]"));
        assert!(!out.contains("hospital.org"));
    }

    #[test]
    fn test_redacts_password_assignment() {
        let out = sanitize("login failed: password=hunter22 user=x");
        assert_eq!(out, "login failed: password=[REDACTED-SECRET] user=x");
    }

    #[test]
    fn test_redacts_bearer_token() {
        let out = sanitize("Authorization: Bearer abcdefgh12345678");
        assert!(out.contains("Bearer [REDACTED-TOKEN]"));
        assert!(!out.contains("abcdefgh"));
    }

    #[test]
    fn test_leaves_plain_text_alone() {
        let line = "Prediction complete: risk=0.82 model=random_forest";
        assert_eq!(sanitize(line), line);
    }

    #[test]
    fn test_truncates_large_inputs() {
        let out = sanitize_with_limit("0123456789abcdef", 8);
        assert_eq!(out, "01234567 [TRUNCATED]");
    }

    #[test]
    fn test_truncated_line_keeps_newline() {
        let out = sanitize_with_limit("0123456789abcdef\n", 8);
        assert_eq!(out, "01234567 [TRUNCATED]\n");

        let joined = format!("{}{}", out, sanitize_with_limit("next\n", 8));
        assert_eq!(joined.lines().collect::<Vec<_>>(), vec!["01234567 [TRUNCATED]", "next"]);
    }

    #[test]
    fn test_writer_sanitizes_lines() {
        let mut sink = Vec::new();
        {
            let mut writer = SanitizingWriter {
                inner: &mut sink,
                buffer: Vec::new(),
            };
            writer.write_all(b"user a@b.io logged in\npartial").expect("write");
            writer.flush().expect("flush");
        }
        let text = String::from_utf8(sink).expect("utf8");
        assert_eq!(text, "user [REDACTED-EMAIL] logged in\npartial");
    }
}
