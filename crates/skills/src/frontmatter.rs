//! Loose SKILL.md header parsing.
//!
//! The header is read with a small line scanner instead of a YAML parser:
//! `key: value` lines start an entry and indented lines continue it. No
//! quoting, type coercion, or nesting is interpreted, so free-text values
//! written by hand survive unchanged.

use crate::{
    error::{Error, Result},
    types::Frontmatter,
};

const DELIMITER: &str = "---";

/// Split manifest content into `(header, body)`.
///
/// The content must open with a `---` line; the header ends at the first
/// following line that is exactly `---`. One newline after the closing
/// delimiter belongs to the delimiter and is not part of the body.
pub fn split_frontmatter(content: &str) -> Result<(&str, &str)> {
    let rest = content
        .strip_prefix("---\n")
        .or_else(|| content.strip_prefix("---\r\n"))
        .ok_or(Error::MalformedHeader)?;

    for (pos, _) in rest.match_indices("\n---") {
        let tail = &rest[pos + 1 + DELIMITER.len()..];
        let body = if tail.is_empty() {
            tail
        } else if let Some(body) = tail.strip_prefix('\n') {
            body
        } else if let Some(body) = tail.strip_prefix("\r\n") {
            body
        } else {
            // `----` or `---text` does not close the block.
            continue;
        };
        let header = rest[..pos].strip_suffix('\r').unwrap_or(&rest[..pos]);
        return Ok((header, body));
    }

    Err(Error::MalformedHeader)
}

/// Entry currently being accumulated by the scanner.
struct PendingEntry {
    key: String,
    fragments: Vec<String>,
}

impl PendingEntry {
    fn flush_into(self, frontmatter: &mut Frontmatter) {
        frontmatter.insert(self.key, self.fragments.join("\n"));
    }
}

/// Parse header text into ordered key/value pairs.
///
/// Each fragment is trimmed on its own; the newline-joined value is not
/// trimmed again, so an empty first fragment leaves a leading newline.
pub fn parse_frontmatter(header: &str) -> Frontmatter {
    let mut frontmatter = Frontmatter::new();
    let mut pending: Option<PendingEntry> = None;

    for line in header.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let indented = line.starts_with([' ', '\t']);
        match line.split_once(':') {
            Some((key, value)) if !indented => {
                if let Some(entry) = pending.take() {
                    entry.flush_into(&mut frontmatter);
                }
                pending = Some(PendingEntry {
                    key: key.trim().to_string(),
                    fragments: vec![value.trim().to_string()],
                });
            },
            _ => {
                if let Some(entry) = pending.as_mut() {
                    entry.fragments.push(trimmed.to_string());
                }
            },
        }
    }

    if let Some(entry) = pending {
        entry.flush_into(&mut frontmatter);
    }
    frontmatter
}
