//! Tau link-word packer.
//!
//! Each bunch crossing contributes exactly `n_output_frame_per_bx` words to
//! both links, so crossings can be separated downstream by stride alone.
//! Within a crossing the first `n_tau_per_link` candidates go to link 1 and
//! the rest overflow to link 2, in collection order.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;
use tracing::{debug, warn};

use crate::{pack_tau_word, Block, BxVector, DemuxConfig, HwCandidate, PackStats, TauPackError};

/// Output link of the demux board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Link {
    B1,
    B2,
}

/// Frame words of both links for one event.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LinkBuffers {
    /// Bunch crossing of the first stride.
    pub first_bx: i32,
    /// Words per link per crossing.
    pub frames_per_bx: usize,
    pub link1: Vec<u32>,
    pub link2: Vec<u32>,
}

impl LinkBuffers {
    pub fn link(&self, link: Link) -> &[u32] {
        match link {
            Link::B1 => &self.link1,
            Link::B2 => &self.link2,
        }
    }

    /// Number of whole crossings carried by link 1.
    pub fn n_bx(&self) -> usize {
        if self.frames_per_bx == 0 {
            0
        } else {
            self.link1.len() / self.frames_per_bx
        }
    }

    /// Words of one crossing on one link, `index` counted from `first_bx`.
    pub fn crossing(&self, link: Link, index: usize) -> Option<&[u32]> {
        let start = index.checked_mul(self.frames_per_bx)?;
        self.link(link).get(start..start + self.frames_per_bx)
    }

    /// Hex SHA-256 over both links as little-endian words.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        for w in self.link1.iter().chain(self.link2.iter()) {
            hasher.update(w.to_le_bytes());
        }
        hex::encode(hasher.finalize())
    }

    /// Rebuild link buffers from a packer's `[b1, b2]` blocks.
    pub fn from_blocks(
        first_bx: i32,
        frames_per_bx: usize,
        blocks: &[Block],
    ) -> Result<Self, TauPackError> {
        match blocks {
            [b1, b2] => Ok(Self {
                first_bx,
                frames_per_bx,
                link1: b1.payload.clone(),
                link2: b2.payload.clone(),
            }),
            _ => Err(TauPackError::Decode(format!(
                "expected 2 link blocks, got {}",
                blocks.len()
            ))),
        }
    }
}

/// Serialize a sequence of per-event link buffers to disk with bincode.
pub fn save_dump<P: AsRef<Path>>(path: P, events: &[LinkBuffers]) -> Result<(), TauPackError> {
    let data = bincode::serialize(events)?;
    std::fs::write(path, data)?;
    Ok(())
}

pub fn load_dump<P: AsRef<Path>>(path: P) -> Result<Vec<LinkBuffers>, TauPackError> {
    let data = std::fs::read(path)?;
    Ok(bincode::deserialize(&data)?)
}

/// Pack every crossing of `taus` into the two link buffers.
pub fn pack_links<T: HwCandidate>(taus: &BxVector<T>, cfg: &DemuxConfig) -> LinkBuffers {
    pack_links_with_stats(taus, cfg).0
}

/// Like [`pack_links`], also returning slot usage.
pub fn pack_links_with_stats<T: HwCandidate>(
    taus: &BxVector<T>,
    cfg: &DemuxConfig,
) -> (LinkBuffers, PackStats) {
    let stride = cfg.n_output_frame_per_bx();
    let mut link1 = Vec::with_capacity(taus.n_bx() * stride);
    let mut link2 = Vec::with_capacity(taus.n_bx() * stride);
    let mut stats = PackStats::new();

    for (bx, cands) in taus.iter() {
        let start1 = link1.len();
        let start2 = link2.len();
        let mut dropped = 0u64;

        for (pos, cand) in cands.iter().enumerate() {
            let word = pack_tau_word(cand);
            if pos < cfg.n_tau_per_link() {
                link1.push(word);
            } else if link2.len() - start2 < stride {
                link2.push(word);
                stats.link2_words += 1;
            } else {
                dropped += 1;
                continue;
            }
            stats.real_words += 1;
        }

        if dropped > 0 {
            warn!(bx, dropped, "crossing exceeds link capacity, candidates dropped");
        }

        let real = (link1.len() - start1 + link2.len() - start2) as u64;
        link1.resize(start1 + stride, 0);
        link2.resize(start2 + stride, 0);
        stats.padding_words += 2 * stride as u64 - real;
        stats.dropped += dropped;
        stats.crossings += 1;
        debug!(bx, candidates = cands.len(), "packed crossing");
    }

    let buffers = LinkBuffers {
        first_bx: taus.first_bx(),
        frames_per_bx: stride,
        link1,
        link2,
    };
    (buffers, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tau;

    #[test]
    fn crossing_slices_follow_stride() {
        let cfg = DemuxConfig::new(1, 2).unwrap();
        let mut taus = BxVector::new(4, 5);
        taus.push(5, Tau::new(1, 0, 0, 0, 0)).unwrap();
        taus.push(5, Tau::new(2, 0, 0, 0, 0)).unwrap();
        let out = pack_links(&taus, &cfg);
        assert_eq!(out.first_bx, 4);
        assert_eq!(out.n_bx(), 2);
        assert_eq!(out.crossing(Link::B1, 0), Some(&[0u32, 0][..]));
        assert_eq!(out.crossing(Link::B1, 1), Some(&[1u32, 0][..]));
        assert_eq!(out.crossing(Link::B2, 1), Some(&[2u32, 0][..]));
        assert_eq!(out.crossing(Link::B2, 2), None);
    }

    #[test]
    fn overflow_beyond_both_links_is_dropped() {
        let cfg = DemuxConfig::new(1, 2).unwrap();
        let mut taus = BxVector::new(0, 0);
        for pt in 1..=5 {
            taus.push(0, Tau::new(pt, 0, 0, 0, 0)).unwrap();
        }
        let (out, stats) = pack_links_with_stats(&taus, &cfg);
        assert_eq!(out.link1, vec![1, 0]);
        assert_eq!(out.link2, vec![2, 3]);
        assert_eq!(stats.dropped, 2);
        assert_eq!(stats.real_words, 3);
        assert_eq!(stats.padding_words, 1);
    }
}
