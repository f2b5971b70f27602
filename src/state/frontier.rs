//! Crawl frontier
//!
//! FIFO queue plus `seen` and `visited` sets for a single network crawl.

use crate::api::Identity;
use std::collections::{HashSet, VecDeque};

/// Working state of one network crawl
///
/// Holds the FIFO queue of identities waiting to be resolved, the identities
/// already resolved (successfully or not), and every identity ever enqueued.
/// A frontier belongs to a single crawl invocation and is dropped with it.
///
/// Invariants: `seen ⊇ visited`, and an identity is queued at most once.
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<Identity>,
    visited: HashSet<Identity>,
    seen: HashSet<Identity>,
}

impl Frontier {
    /// Creates a frontier with the given seeds queued in order
    pub fn new<I>(seeds: I) -> Self
    where
        I: IntoIterator<Item = Identity>,
    {
        let mut frontier = Self::default();
        for seed in seeds {
            frontier.enqueue(seed);
        }
        frontier
    }

    /// Queues an identity unless it has been seen before
    ///
    /// Returns `true` when the identity was new.
    pub fn enqueue(&mut self, id: Identity) -> bool {
        if self.seen.contains(&id) {
            return false;
        }
        self.seen.insert(id.clone());
        self.queue.push_back(id);
        true
    }

    /// Queues every unseen identity, returning how many were new
    pub fn enqueue_all<'a, I>(&mut self, ids: I) -> usize
    where
        I: IntoIterator<Item = &'a Identity>,
    {
        ids.into_iter()
            .filter(|id| self.enqueue((*id).clone()))
            .count()
    }

    /// Takes the next identity in enqueue order
    pub fn pop(&mut self) -> Option<Identity> {
        self.queue.pop_front()
    }

    /// Records an identity as resolved; it also becomes seen
    pub fn mark_visited(&mut self, id: Identity) {
        self.seen.insert(id.clone());
        self.visited.insert(id);
    }

    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}
