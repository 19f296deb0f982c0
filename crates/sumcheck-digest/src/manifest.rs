//! Checksum manifests in the `sha256sum` line format.
//!
//! Each line is `<hex>  <path>` (text mode) or `<hex> *<path>` (binary mode).
//! Blank lines and lines starting with `#` are skipped.

use std::{
    fmt::Write as _,
    fs::File,
    path::{Path, PathBuf},
};

use crate::{Digest, DigestError, Digester, Result, Verification};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub digest: Digest,
    pub path:   PathBuf,
    pub binary: bool,
}

impl Entry {
    pub fn new(digest: Digest, path: impl Into<PathBuf>) -> Self {
        Self {
            digest,
            path: path.into(),
            binary: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckOutcome {
    pub path:         PathBuf,
    pub verification: Verification,
}

pub fn parse(text: &str, digester: &Digester) -> Result<Vec<Entry>> {
    let mut entries = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim_start();
        if line.trim_end().is_empty() || line.starts_with('#') {
            continue;
        }

        let malformed = |reason: String| DigestError::Manifest {
            line: idx + 1,
            reason,
        };

        let (escaped, line) = match line.strip_prefix('\\') {
            Some(rest) => (true, rest),
            None => (false, line),
        };

        let (hex, rest) = line
            .split_once(' ')
            .ok_or_else(|| malformed("missing path after digest".to_string()))?;

        let (binary, path) = match rest.as_bytes().first() {
            Some(b' ') => (false, &rest[1..]),
            Some(b'*') => (true, &rest[1..]),
            _ => return Err(malformed("expected two spaces or ' *' before path".to_string())),
        };
        if path.is_empty() {
            return Err(malformed("missing path after digest".to_string()));
        }

        let digest = digester
            .parse_hex(hex)
            .map_err(|e| malformed(e.to_string()))?;

        let path = if escaped { unescape(path).map_err(malformed)? } else { path.to_string() };

        entries.push(Entry {
            digest,
            path: PathBuf::from(path),
            binary,
        });
    }

    Ok(entries)
}

/// Paths containing a backslash or a line break are written with a leading
/// `\` on the line and `\\`, `\n`, `\r` escapes in the path.
pub fn render(entries: &[Entry]) -> String {
    let mut out = String::new();
    for entry in entries {
        let path = entry.path.to_string_lossy();
        let escaped = path.contains(['\\', '\n', '\r']);
        let prefix = if escaped { "\\" } else { "" };
        let sep = if entry.binary { " *" } else { "  " };
        let path = if escaped { escape(&path) } else { path.into_owned() };
        let _ = writeln!(out, "{prefix}{}{sep}{path}", entry.digest);
    }
    out
}

fn escape(path: &str) -> String {
    let mut out = String::with_capacity(path.len() + 2);
    for c in path.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}

fn unescape(path: &str) -> std::result::Result<String, String> {
    let mut out = String::with_capacity(path.len());
    let mut chars = path.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some(other) => return Err(format!("invalid escape '\\{other}' in path")),
            None => return Err("dangling '\\' at end of path".to_string()),
        }
    }
    Ok(out)
}

/// Verify every entry against the file it names, relative to `base`.
/// All entries are checked; failures do not stop the run.
pub fn check(entries: &[Entry], base: &Path) -> Vec<CheckOutcome> {
    entries
        .iter()
        .map(|entry| {
            let path = base.join(&entry.path);
            let verification = match File::open(&path) {
                Ok(file) => entry.digest.check_reader(file),
                Err(e) => Verification::Unreadable(e.to_string()),
            };
            tracing::debug!(path = %path.display(), %verification, "checked manifest entry");

            CheckOutcome {
                path: entry.path.clone(),
                verification,
            }
        })
        .collect()
}
