//! Replays recorded exchanges from a cassette.

use std::collections::{HashMap, VecDeque};

use super::format::{Cassette, Exchange};

/// Serves recorded exchanges, one FIFO queue per request label.
///
/// Platform calls are dispatched concurrently, so the order in which they
/// reach the replayer is not the order they were recorded in. Keying by
/// label keeps each caller on its own stream.
#[derive(Debug, Default)]
pub struct CassetteReplayer {
    queues: HashMap<String, VecDeque<Exchange>>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<String, VecDeque<Exchange>> = HashMap::new();
        for exchange in &cassette.exchanges {
            queues.entry(exchange.label.clone()).or_default().push_back(exchange.clone());
        }
        Self { queues }
    }

    /// Take the next exchange recorded under `label`, if any remain.
    pub fn next_exchange(&mut self, label: &str) -> Option<Exchange> {
        self.queues.get_mut(label).and_then(VecDeque::pop_front)
    }

    /// Labels that still have unconsumed exchanges, sorted.
    #[must_use]
    pub fn remaining_labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = self
            .queues
            .iter()
            .filter(|(_, queue)| !queue.is_empty())
            .map(|(label, _)| label.clone())
            .collect();
        labels.sort();
        labels
    }
}
