//! Canonical AUTHORS roster: contributor records and the line-oriented parser.
//!
//! Each non-comment line describes one contributor:
//!
//! ```text
//! # comment
//! Jane Q. Doe (jdoe) <jane@example.com> <jdoe@users.noreply.github.com>
//! ```
//!
//! A `(text)` field is the nickname, `<text>` fields are emails, and every
//! other field is part of the name.

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// A single contributor identity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    /// Canonical display name
    pub name: String,
    /// Optional short alias
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    /// Known email addresses, in discovery order
    #[serde(default)]
    pub emails: Vec<String>,
    /// Commits attributed to this identity
    #[serde(default)]
    pub commits: usize,
    /// floor(log2(commits)), 0 when there are no commits
    #[serde(default)]
    pub geekrank: u32,
}

impl Contributor {
    /// Create a contributor with a name and a single email
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            emails: vec![email.into()],
            ..Default::default()
        }
    }

    /// True if there is a nickname and it is meaningfully different from
    /// the name (ignoring spaces and case).
    pub fn has_nickname(&self) -> bool {
        match &self.nickname {
            None => false,
            Some(nick) if nick.is_empty() => false,
            Some(nick) => {
                let squashed: String = self.name.chars().filter(|c| *c != ' ').collect();
                squashed.to_lowercase() != nick.to_lowercase()
            }
        }
    }

    /// Name followed by ` (nickname)` when the nickname is worth showing
    pub fn display_name(&self) -> String {
        match &self.nickname {
            Some(nick) if self.has_nickname() => format!("{} ({})", self.name, nick),
            _ => self.name.clone(),
        }
    }
}

fn nickname_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\(([^\s]*)\)").expect("nickname pattern is valid"))
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<([^\s]*)>").expect("email pattern is valid"))
}

/// Parse roster text into contributors, preserving line order
pub fn parse_roster(text: &str) -> Vec<Contributor> {
    text.lines()
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(parse_line)
        .collect()
}

fn parse_line(line: &str) -> Contributor {
    let mut contributor = Contributor::default();
    let mut name_parts = Vec::new();

    for field in line.split_whitespace() {
        if let Some(caps) = nickname_re().captures(field) {
            contributor.nickname = Some(caps[1].to_string());
        } else if let Some(caps) = email_re().captures(field) {
            contributor.emails.push(caps[1].to_string());
        } else {
            name_parts.push(field);
        }
    }

    contributor.name = name_parts.join(" ");
    contributor
}

/// Read and parse a roster file
pub fn load_roster(path: &Path) -> Result<Vec<Contributor>> {
    let text = fs::read_to_string(path).map_err(|e| Error::file_read(path, e))?;
    Ok(parse_roster(&text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IoError;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_line() {
        let roster = parse_roster("Jakob Borg (calmh) <jakob@kastelo.net> <jakob@nym.se>\n");

        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].name, "Jakob Borg");
        assert_eq!(roster[0].nickname.as_deref(), Some("calmh"));
        assert_eq!(roster[0].emails, vec!["jakob@kastelo.net", "jakob@nym.se"]);
        assert_eq!(roster[0].commits, 0);
    }

    #[test]
    fn test_comments_and_blank_lines_skipped() {
        let text = "# This is the official list of authors\n\nAlice <a@x.com>\n# trailing\n";
        let roster = parse_roster(text);

        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].name, "Alice");
    }

    #[test]
    fn test_fields_classified_by_shape_not_position() {
        let roster = parse_roster("<first@x.com> Mary (mj) Jane <second@x.com> Watson");

        assert_eq!(roster[0].name, "Mary Jane Watson");
        assert_eq!(roster[0].nickname.as_deref(), Some("mj"));
        assert_eq!(roster[0].emails, vec!["first@x.com", "second@x.com"]);
    }

    #[test]
    fn test_last_nickname_wins() {
        let roster = parse_roster("Bob (one) (two) <bob@x.com>");
        assert_eq!(roster[0].nickname.as_deref(), Some("two"));
    }

    #[test]
    fn test_line_without_name_yields_empty_name() {
        let roster = parse_roster("<ghost@x.com>");

        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].name, "");
        assert_eq!(roster[0].emails, vec!["ghost@x.com"]);
    }

    #[test]
    fn test_has_nickname_ignores_spaces_and_case() {
        let mut c = Contributor::new("Audrius Butkevicius", "a@x.com");
        c.nickname = Some("audriusbutkevicius".to_string());
        assert!(!c.has_nickname());
        assert_eq!(c.display_name(), "Audrius Butkevicius");

        c.nickname = Some("AudriusButkevicius".to_string());
        assert!(!c.has_nickname());

        c.nickname = Some("AudriusB".to_string());
        assert!(c.has_nickname());
        assert_eq!(c.display_name(), "Audrius Butkevicius (AudriusB)");

        c.nickname = Some(String::new());
        assert!(!c.has_nickname());
    }

    #[test]
    fn test_load_roster_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = load_roster(&temp_dir.path().join("AUTHORS"));

        let err = result.unwrap_err();
        assert!(matches!(err, Error::Io(IoError::FileReadFailed { .. })));
        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn test_load_roster_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("AUTHORS");
        fs::write(&path, "# authors\nAlice <a@x.com>\nBob (Bobby) <bob@x.com>\n").unwrap();

        let roster = load_roster(&path).unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[1].display_name(), "Bob (Bobby)");
    }
}
