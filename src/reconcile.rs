//! Identity reconciliation: merge identities found in history into the roster.
//!
//! Email is the primary key. An unknown email whose author name exactly
//! matches a roster name joins that contributor; anything else becomes a
//! new contributor at the end of the roster. Matching is exact and
//! case-sensitive for both names and emails.

use crate::git::Identity;
use crate::roster::Contributor;
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

/// Outcome of merging history into a roster
#[derive(Debug, Clone, Default)]
pub struct Reconciliation {
    /// Roster entries in their original order, followed by new contributors
    pub contributors: Vec<Contributor>,
    /// Emails attached to an existing contributor by name match
    pub merged: usize,
    /// Contributors created for identities the roster didn't know
    pub added: usize,
}

/// Merge discovered identities into the roster.
///
/// Identities are processed in order. An identity whose email is already
/// known is skipped, so reconciling the same history twice is a no-op.
pub fn reconcile(roster: Vec<Contributor>, identities: &[Identity]) -> Reconciliation {
    let mut contributors = roster;
    let mut listed: HashSet<String> = HashSet::new();
    let mut names: HashMap<String, usize> = HashMap::new();

    for (idx, contributor) in contributors.iter().enumerate() {
        names.insert(contributor.name.clone(), idx);
        listed.extend(contributor.emails.iter().cloned());
    }

    let mut merged = 0;
    let mut added = 0;

    for identity in identities {
        if listed.contains(&identity.email) {
            continue;
        }

        let name_match = if identity.name.is_empty() {
            None
        } else {
            names.get(&identity.name).copied()
        };

        match name_match {
            Some(idx) => {
                trace!(
                    "Merging {} into existing contributor {:?}",
                    identity.email,
                    identity.name
                );
                contributors[idx].emails.push(identity.email.clone());
                merged += 1;
            }
            None => {
                trace!("New contributor {:?} <{}>", identity.name, identity.email);
                contributors.push(Contributor::new(&identity.name, &identity.email));
                names.insert(identity.name.clone(), contributors.len() - 1);
                added += 1;
            }
        }

        listed.insert(identity.email.clone());
    }

    debug!(
        "Reconciled {} identities: {} merged by name, {} new",
        identities.len(),
        merged,
        added
    );

    Reconciliation {
        contributors,
        merged,
        added,
    }
}
