//! `PackStats` tracks how link slots were used while packing.  It never
//! influences the packed words.

use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PackStats {
    pub crossings: u64,
    /// Candidate words written to either link.
    pub real_words: u64,
    pub padding_words: u64,
    /// Candidate words that overflowed onto link 2.
    pub link2_words: u64,
    /// Candidates beyond both links' per-crossing capacity.
    pub dropped: u64,
}

impl PackStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge(&mut self, other: &PackStats) {
        self.crossings += other.crossings;
        self.real_words += other.real_words;
        self.padding_words += other.padding_words;
        self.link2_words += other.link2_words;
        self.dropped += other.dropped;
    }

    pub fn report(&self) {
        info!(
            crossings = self.crossings,
            real_words = self.real_words,
            padding_words = self.padding_words,
            link2_words = self.link2_words,
            dropped = self.dropped,
            "packed tau links"
        );
    }
}
