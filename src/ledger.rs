use crate::model::{AuthorContribution, Contribution};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Per-author line additions and deletions of one scan unit.
///
/// A single guard wraps the whole map; writers from any thread serialize on
/// it, so concurrent updates of the same author are never lost.
#[derive(Debug, Default)]
pub struct ContributionLedger {
    authors: Mutex<HashMap<String, Contribution>>,
}

impl ContributionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, Contribution>> {
        self.authors.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add_contribution(&self, author: &str, additions: u64, deletions: u64) -> Contribution {
        let mut entries = self.entries();
        let entry = entries.entry(author.to_string()).or_default();
        entry.additions += additions;
        entry.deletions += deletions;
        *entry
    }

    /// Adds every `(additions, deletions)` pair under one lock acquisition.
    pub fn add_contributions<I>(&self, author: &str, changes: I)
    where
        I: IntoIterator<Item = (u64, u64)>,
    {
        let mut changes = changes.into_iter().peekable();
        if changes.peek().is_none() {
            return;
        }
        let mut entries = self.entries();
        let entry = entries.entry(author.to_string()).or_default();
        for (additions, deletions) in changes {
            entry.additions += additions;
            entry.deletions += deletions;
        }
    }

    pub fn get(&self, author: &str) -> Option<Contribution> {
        self.entries().get(author).copied()
    }

    pub fn for_each<F: FnMut(&str, &Contribution)>(&self, mut visitor: F) {
        for (author, contribution) in self.entries().iter() {
            visitor(author, contribution);
        }
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    pub fn totals(&self) -> Contribution {
        let mut total = Contribution::default();
        self.for_each(|_, c| {
            total.additions += c.additions;
            total.deletions += c.deletions;
        });
        total
    }

    /// Authors sorted by lines changed, most first, then by name.
    pub fn ranked(&self) -> Vec<AuthorContribution> {
        let mut authors = Vec::with_capacity(self.len());
        self.for_each(|name, c| {
            authors.push(AuthorContribution {
                name: name.to_string(),
                additions: c.additions,
                deletions: c.deletions,
            })
        });
        authors.sort_by(|a, b| {
            (b.additions + b.deletions)
                .cmp(&(a.additions + a.deletions))
                .then_with(|| a.name.cmp(&b.name))
        });
        authors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn changes() -> Vec<(&'static str, u64, u64)> {
        let authors = ["alice", "bob", "Alice", "carol"];
        (0..400u64)
            .map(|i| (authors[(i % 4) as usize], i % 13, (i * 7) % 5))
            .collect()
    }

    fn expected(changes: &[(&str, u64, u64)]) -> HashMap<String, Contribution> {
        let mut sums: HashMap<String, Contribution> = HashMap::new();
        for (author, a, d) in changes {
            let e = sums.entry(author.to_string()).or_default();
            e.additions += a;
            e.deletions += d;
        }
        sums
    }

    fn snapshot(ledger: &ContributionLedger) -> HashMap<String, Contribution> {
        let mut out = HashMap::new();
        ledger.for_each(|name, c| {
            out.insert(name.to_string(), *c);
        });
        out
    }

    #[test]
    fn starts_absent_authors_at_zero() {
        let ledger = ContributionLedger::new();
        assert!(ledger.is_empty());
        let c = ledger.add_contribution("dev", 10, 2);
        assert_eq!(c, Contribution { additions: 10, deletions: 2 });
        ledger.add_contribution("dev", 1, 1);
        assert_eq!(ledger.get("dev"), Some(Contribution { additions: 11, deletions: 3 }));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn author_keys_are_exact() {
        let ledger = ContributionLedger::new();
        ledger.add_contribution("Dev", 1, 0);
        ledger.add_contribution("dev", 1, 0);
        ledger.add_contribution("dev ", 1, 0);
        assert_eq!(ledger.len(), 3);
    }

    #[test]
    fn replay_order_does_not_matter() {
        let changes = changes();
        let forward = ContributionLedger::new();
        for (author, a, d) in &changes {
            forward.add_contribution(author, *a, *d);
        }
        let backward = ContributionLedger::new();
        for (author, a, d) in changes.iter().rev() {
            backward.add_contribution(author, *a, *d);
        }

        assert_eq!(snapshot(&forward), expected(&changes));
        assert_eq!(snapshot(&backward), expected(&changes));
    }

    #[test]
    fn concurrent_writers_lose_no_update() {
        let changes = changes();
        let ledger = ContributionLedger::new();

        thread::scope(|s| {
            for worker in 0..8 {
                let ledger = &ledger;
                let changes = &changes;
                s.spawn(move || {
                    for (author, a, d) in changes.iter().skip(worker).step_by(8) {
                        ledger.add_contribution(author, *a, *d);
                    }
                });
            }
        });

        assert_eq!(snapshot(&ledger), expected(&changes));
    }

    #[test]
    fn batched_and_single_updates_agree() {
        let single = ContributionLedger::new();
        let batched = ContributionLedger::new();
        let lines = [(3, 1), (0, 0), (12, 40)];

        for (a, d) in lines {
            single.add_contribution("dev", a, d);
        }
        batched.add_contributions("dev", lines);
        batched.add_contributions("nobody", std::iter::empty());

        assert_eq!(snapshot(&single), snapshot(&batched));
    }

    #[test]
    fn ranked_orders_by_lines_changed() {
        let ledger = ContributionLedger::new();
        ledger.add_contribution("small", 1, 1);
        ledger.add_contribution("big", 100, 5);
        ledger.add_contribution("also-small", 2, 0);

        let names: Vec<_> = ledger.ranked().into_iter().map(|a| a.name).collect();
        assert_eq!(names, ["big", "also-small", "small"]);
        assert_eq!(ledger.totals(), Contribution { additions: 103, deletions: 6 });
    }
}
