use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "vote", content = "target", rename_all = "snake_case")]
pub enum VoteTarget {
    Player(String),
    Skip,
}

/// One round's ballots. At most one live ballot per voter; re-voting
/// replaces the earlier ballot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteLedger {
    pub round: u32,
    pub ballots: HashMap<String, VoteTarget>,
    pub finalized: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TallyOutcome {
    Eliminated(String),
    NoElimination,
}

impl VoteLedger {
    pub fn open(round: u32) -> Self {
        VoteLedger {
            round,
            ballots: HashMap::new(),
            finalized: false,
        }
    }

    pub fn cast(&mut self, voter: &str, target: VoteTarget) {
        self.ballots.insert(voter.to_string(), target);
    }

    pub fn has_ballot(&self, voter: &str) -> bool {
        self.ballots.contains_key(voter)
    }

    /// Non-skip votes per target, plus the skip count.
    pub fn counts(&self) -> (HashMap<String, usize>, usize) {
        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut skipped = 0;
        for target in self.ballots.values() {
            match target {
                VoteTarget::Player(id) => *counts.entry(id.clone()).or_insert(0) += 1,
                VoteTarget::Skip => skipped += 1,
            }
        }
        (counts, skipped)
    }

    /// Strict plurality: a target is eliminated only when its count exceeds
    /// every other target's count and the skip count. Any tie, or a skip
    /// plurality, eliminates no one.
    pub fn tally(&self) -> TallyOutcome {
        let (counts, skipped) = self.counts();
        let mut best: Option<(&str, usize)> = None;
        let mut tied = false;
        for (target, n) in &counts {
            match best {
                None => best = Some((target, *n)),
                Some((_, m)) if *n > m => {
                    best = Some((target, *n));
                    tied = false;
                }
                Some((_, m)) if *n == m => tied = true,
                _ => {}
            }
        }
        match best {
            Some((target, n)) if !tied && n > skipped => {
                TallyOutcome::Eliminated(target.to_string())
            }
            _ => TallyOutcome::NoElimination,
        }
    }
}

impl Default for VoteLedger {
    fn default() -> Self {
        VoteLedger::open(0)
    }
}
