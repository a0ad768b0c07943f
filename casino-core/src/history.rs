use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::SeqNum;

/// One settled round, as the front end's history panel shows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub seq: SeqNum,
    pub at: DateTime<Utc>,
    pub message: String,
}

impl std::fmt::Display for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.at.format("%H:%M:%S"), self.message)
    }
}

/// Sequence-numbered round history for one session. Entries are append-only;
/// a renderer polls `entries_since` with the last seq it has seen.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    entries: Vec<Entry>,
    last_seq: SeqNum,
}

impl History {
    pub(crate) fn push(&mut self, message: String) {
        let seq = self.last_seq + 1;
        self.entries.push(Entry {
            seq,
            at: Utc::now(),
            message,
        });
        self.last_seq = seq;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    pub fn entries_since(&self, oldest_seq: SeqNum) -> impl Iterator<Item = &Entry> {
        self.entries
            .iter()
            .skip_while(move |e| e.seq <= oldest_seq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seq_numbers_increase() {
        let mut h = History::default();
        h.push("one".to_string());
        h.push("two".to_string());
        h.push("three".to_string());
        let seqs: Vec<_> = h.iter().map(|e| e.seq).collect();
        assert_eq!(seqs, vec![1, 2, 3]);
    }

    #[test]
    fn entries_since_skips_seen() {
        let mut h = History::default();
        for msg in ["a", "b", "c", "d"] {
            h.push(msg.to_string());
        }
        let unseen: Vec<_> = h.entries_since(2).map(|e| e.message.clone()).collect();
        assert_eq!(unseen, vec!["c", "d"]);
    }

    #[test]
    fn serializes() {
        let mut h = History::default();
        h.push("won big".to_string());
        let s = serde_json::to_string(&h).unwrap();
        let h2: History = serde_json::from_str(&s).unwrap();
        assert_eq!(h, h2);
    }
}
