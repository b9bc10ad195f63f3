//! Commit counting and geekrank.

use crate::roster::Contributor;
use std::collections::HashMap;
use tracing::debug;

/// floor(log2(commits)). Zero commits rank 0 rather than negative infinity.
pub fn geekrank(commits: usize) -> u32 {
    commits.checked_ilog2().unwrap_or(0)
}

/// Count one commit per email occurrence and set each contributor's rank.
///
/// Emails belonging to no contributor are ignored. If an email is listed
/// under two contributors the later one gets the commits.
pub fn count_contributions<'a, I>(contributors: &mut [Contributor], emails: I)
where
    I: IntoIterator<Item = &'a str>,
{
    let mut email_idx: HashMap<&str, usize> = HashMap::new();
    for (idx, contributor) in contributors.iter().enumerate() {
        for email in &contributor.emails {
            email_idx.insert(email.as_str(), idx);
        }
    }

    let mut counts = vec![0usize; contributors.len()];
    let mut unmatched = 0usize;
    for email in emails {
        match email_idx.get(email) {
            Some(&idx) => counts[idx] += 1,
            None => unmatched += 1,
        }
    }

    if unmatched > 0 {
        debug!("{} commits matched no contributor", unmatched);
    }

    for (contributor, count) in contributors.iter_mut().zip(counts) {
        contributor.commits = count;
        contributor.geekrank = geekrank(count);
    }
}
