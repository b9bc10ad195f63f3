//! Filtering, sorting and rendering of the final contributor list.

use crate::roster::Contributor;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Which contributors survive into the output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    /// Minimum commit count to be listed
    pub min_commits: usize,
    /// Drop contributors whose name contains this substring. An empty
    /// pattern is contained in every name.
    pub exclude_pattern: Option<String>,
}

impl Default for Filter {
    fn default() -> Self {
        Self {
            min_commits: 1,
            exclude_pattern: Some("[bot]".to_string()),
        }
    }
}

impl Filter {
    pub fn keeps(&self, contributor: &Contributor) -> bool {
        if contributor.commits < self.min_commits {
            return false;
        }
        match &self.exclude_pattern {
            Some(pattern) => !contributor.name.contains(pattern.as_str()),
            None => true,
        }
    }
}

/// Output ordering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Case-insensitive by name
    #[default]
    Name,
    /// Highest geekrank first, then by name
    Geekrank,
}

pub fn filter_contributors(contributors: Vec<Contributor>, filter: &Filter) -> Vec<Contributor> {
    contributors
        .into_iter()
        .filter(|c| filter.keeps(c))
        .collect()
}

fn by_name(a: &Contributor, b: &Contributor) -> Ordering {
    a.name.to_lowercase().cmp(&b.name.to_lowercase())
}

pub fn sort_contributors(contributors: &mut [Contributor], mode: SortMode) {
    match mode {
        SortMode::Name => contributors.sort_by(by_name),
        SortMode::Geekrank => {
            contributors.sort_by(|a, b| b.geekrank.cmp(&a.geekrank).then_with(|| by_name(a, b)))
        }
    }
}

/// All display names on one comma-separated line
pub fn render_names(contributors: &[Contributor]) -> String {
    let names: Vec<String> = contributors.iter().map(Contributor::display_name).collect();
    format!("{}\n", names.join(", "))
}

/// Commits, rank and display name, one contributor per line
pub fn render_stats(contributors: &[Contributor]) -> String {
    contributors
        .iter()
        .map(|c| format!("{:5} {:2} {}\n", c.commits, c.geekrank, c.display_name()))
        .collect()
}

/// Roster format: display name followed by every email in angle brackets.
///
/// Nicknames that `has_nickname` rejects are not written back.
pub fn render_authors(contributors: &[Contributor]) -> String {
    contributors
        .iter()
        .map(|c| {
            let emails: String = c.emails.iter().map(|e| format!(" <{}>", e)).collect();
            format!("{}{}\n", c.display_name(), emails)
        })
        .collect()
}

pub fn render_json(contributors: &[Contributor]) -> serde_json::Result<String> {
    let mut out = serde_json::to_string_pretty(contributors)?;
    out.push('\n');
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::parse_roster;

    fn contributor(name: &str, commits: usize) -> Contributor {
        Contributor {
            name: name.to_string(),
            commits,
            geekrank: crate::stats::geekrank(commits),
            ..Default::default()
        }
    }

    #[test]
    fn test_filter_min_and_pattern() {
        let contributors = vec![
            contributor("Alice", 5),
            contributor("dependabot[bot]", 40),
            contributor("Drive-by", 1),
            contributor("Never Committed", 0),
        ];
        let filter = Filter {
            min_commits: 2,
            ..Default::default()
        };

        let kept = filter_contributors(contributors, &filter);

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "Alice");
        for c in &kept {
            assert!(c.commits >= filter.min_commits);
            assert!(!c.name.contains("[bot]"));
        }
    }

    #[test]
    fn test_filter_pattern_is_case_sensitive() {
        let kept = filter_contributors(vec![contributor("Robot[BOT]", 3)], &Filter::default());
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn test_empty_pattern_matches_every_name() {
        let filter = Filter {
            min_commits: 0,
            exclude_pattern: Some(String::new()),
        };
        let kept = filter_contributors(vec![contributor("Alice", 3), contributor("", 1)], &filter);
        assert!(kept.is_empty());
    }

    #[test]
    fn test_no_pattern_keeps_every_name() {
        let filter = Filter {
            min_commits: 0,
            exclude_pattern: None,
        };
        let kept = filter_contributors(vec![contributor("a[bot]", 0)], &filter);
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn test_sort_by_name_case_insensitive() {
        let mut contributors = vec![
            contributor("bob", 1),
            contributor("Carol", 1),
            contributor("alice", 1),
            contributor("Bill", 1),
        ];

        sort_contributors(&mut contributors, SortMode::Name);

        let names: Vec<_> = contributors.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["alice", "Bill", "bob", "Carol"]);
        for pair in contributors.windows(2) {
            assert!(pair[0].name.to_lowercase() <= pair[1].name.to_lowercase());
        }
    }

    #[test]
    fn test_sort_by_geekrank_with_name_tiebreak() {
        let mut contributors = vec![
            contributor("Zoe", 3),
            contributor("Mallory", 100),
            contributor("adam", 2),
            contributor("Eve", 1),
        ];

        sort_contributors(&mut contributors, SortMode::Geekrank);

        let names: Vec<_> = contributors.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Mallory", "adam", "Zoe", "Eve"]);
        for pair in contributors.windows(2) {
            assert!(pair[0].geekrank >= pair[1].geekrank);
        }
    }

    #[test]
    fn test_render_names() {
        let roster = parse_roster("Alice <a@x.com>\nBob (Bobby) <b@x.com>");
        assert_eq!(render_names(&roster), "Alice, Bob (Bobby)\n");
        assert_eq!(render_names(&[]), "\n");
    }

    #[test]
    fn test_render_stats_alignment() {
        let mut bob = contributor("Bob", 1234);
        bob.nickname = Some("Bobby".to_string());
        let rendered = render_stats(&[bob, contributor("Al", 1)]);

        assert_eq!(rendered, " 1234 10 Bob (Bobby)\n    1  0 Al\n");
    }

    #[test]
    fn test_render_authors_roster_format() {
        let roster = parse_roster("Bob (Bobby) <bob@x.com> <other@x.com>\n<anon@x.com>");
        assert_eq!(
            render_authors(&roster),
            "Bob (Bobby) <bob@x.com> <other@x.com>\n <anon@x.com>\n"
        );
    }

    #[test]
    fn test_render_authors_round_trip() {
        let original = parse_roster(
            "# header\nJakob Borg (calmh) <jakob@kastelo.net> <jakob@nym.se>\nAlice <a@x.com>\n",
        );

        let reparsed = parse_roster(&render_authors(&original));

        assert_eq!(reparsed, original);
        assert_eq!(render_authors(&reparsed), render_authors(&original));
    }

    #[test]
    fn test_render_authors_drops_redundant_nickname() {
        let original = parse_roster("Jakob Borg (jakobborg) <jakob@nym.se>");
        assert_eq!(original[0].nickname.as_deref(), Some("jakobborg"));

        let rendered = render_authors(&original);
        assert_eq!(rendered, "Jakob Borg <jakob@nym.se>\n");

        let reparsed = parse_roster(&rendered);
        assert_eq!(reparsed[0].nickname, None);
        assert_eq!(reparsed[0].display_name(), original[0].display_name());
        assert_eq!(reparsed[0].emails, original[0].emails);
    }

    #[test]
    fn test_render_json() {
        let mut alice = contributor("Alice", 2);
        alice.emails = vec!["a@x.com".to_string()];

        let json = render_json(&[alice]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value[0]["name"], "Alice");
        assert_eq!(value[0]["commits"], 2);
        assert_eq!(value[0]["geekrank"], 1);
        assert_eq!(value[0]["emails"][0], "a@x.com");
        assert!(value[0].get("nickname").is_none());
    }
}
