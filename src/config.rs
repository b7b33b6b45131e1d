use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{N_OUTPUT_FRAME_PER_BX, N_TAU_PER_LINK};
use crate::TauPackError;

/// Per-crossing framing of the two tau output links.
///
/// Always satisfies `n_output_frame_per_bx >= n_tau_per_link` and
/// `n_output_frame_per_bx > 0`; deserialization goes through the same check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDemuxConfig")]
pub struct DemuxConfig {
    n_tau_per_link: usize,
    n_output_frame_per_bx: usize,
}

/// Unchecked JSON form; missing fields keep the demux defaults.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
struct RawDemuxConfig {
    n_tau_per_link: usize,
    n_output_frame_per_bx: usize,
}

impl Default for RawDemuxConfig {
    fn default() -> Self {
        Self {
            n_tau_per_link: N_TAU_PER_LINK,
            n_output_frame_per_bx: N_OUTPUT_FRAME_PER_BX,
        }
    }
}

impl TryFrom<RawDemuxConfig> for DemuxConfig {
    type Error = TauPackError;

    fn try_from(raw: RawDemuxConfig) -> Result<Self, Self::Error> {
        Self::new(raw.n_tau_per_link, raw.n_output_frame_per_bx)
    }
}

impl Default for DemuxConfig {
    fn default() -> Self {
        Self {
            n_tau_per_link: N_TAU_PER_LINK,
            n_output_frame_per_bx: N_OUTPUT_FRAME_PER_BX,
        }
    }
}

impl DemuxConfig {
    /// Build a validated configuration.
    pub fn new(n_tau_per_link: usize, n_output_frame_per_bx: usize) -> Result<Self, TauPackError> {
        if n_output_frame_per_bx == 0 {
            return Err(TauPackError::Config(
                "n_output_frame_per_bx must be non-zero".into(),
            ));
        }
        if n_output_frame_per_bx < n_tau_per_link {
            return Err(TauPackError::Config(format!(
                "n_output_frame_per_bx ({}) is smaller than n_tau_per_link ({})",
                n_output_frame_per_bx, n_tau_per_link
            )));
        }
        Ok(Self {
            n_tau_per_link,
            n_output_frame_per_bx,
        })
    }

    /// Real candidates routed to link 1 in a crossing before overflowing to link 2.
    pub fn n_tau_per_link(&self) -> usize {
        self.n_tau_per_link
    }

    /// Fixed number of words each link contributes per crossing.
    pub fn n_output_frame_per_bx(&self) -> usize {
        self.n_output_frame_per_bx
    }

    /// Replace either field, re-checking the result.
    pub fn with_overrides(
        &self,
        n_tau_per_link: Option<usize>,
        n_output_frame_per_bx: Option<usize>,
    ) -> Result<Self, TauPackError> {
        Self::new(
            n_tau_per_link.unwrap_or(self.n_tau_per_link),
            n_output_frame_per_bx.unwrap_or(self.n_output_frame_per_bx),
        )
    }

    /// Most candidates a single crossing can carry across both links.
    pub fn crossing_capacity(&self) -> usize {
        self.n_tau_per_link + self.n_output_frame_per_bx
    }

    /// Load a JSON config file; missing fields keep their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TauPackError> {
        let data = std::fs::read(path)?;
        Ok(serde_json::from_slice(&data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_demux_constants() {
        let cfg = DemuxConfig::default();
        assert_eq!(cfg.n_tau_per_link(), 6);
        assert_eq!(cfg.n_output_frame_per_bx(), 6);
        assert_eq!(DemuxConfig::new(6, 6).unwrap(), cfg);
    }

    #[test]
    fn rejects_stride_below_link_capacity() {
        assert!(matches!(
            DemuxConfig::new(4, 3),
            Err(TauPackError::Config(_))
        ));
        assert!(DemuxConfig::new(0, 0).is_err());
        assert!(DemuxConfig::new(0, 1).is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: DemuxConfig = serde_json::from_str(r#"{"n_tau_per_link": 2}"#).unwrap();
        assert_eq!(cfg.n_tau_per_link(), 2);
        assert_eq!(cfg.n_output_frame_per_bx(), 6);
    }

    #[test]
    fn json_cannot_bypass_validation() {
        let bad = serde_json::from_str::<DemuxConfig>(
            r#"{"n_tau_per_link": 3, "n_output_frame_per_bx": 1}"#,
        );
        assert!(bad.is_err());
        assert!(serde_json::from_str::<DemuxConfig>(r#"{"n_output_frame_per_bx": 0}"#).is_err());
    }

    #[test]
    fn overrides_are_revalidated() {
        let cfg = DemuxConfig::default();
        assert_eq!(
            cfg.with_overrides(Some(2), Some(3)).unwrap(),
            DemuxConfig::new(2, 3).unwrap()
        );
        assert!(cfg.with_overrides(Some(8), None).is_err());
        assert_eq!(cfg.with_overrides(None, None).unwrap(), cfg);
    }

    #[test]
    fn serialized_form_reads_back() {
        let cfg = DemuxConfig::new(2, 5).unwrap();
        let json = serde_json::to_string(&cfg).unwrap();
        assert_eq!(serde_json::from_str::<DemuxConfig>(&json).unwrap(), cfg);
    }
}
