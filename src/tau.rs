use serde::{Deserialize, Serialize};

/// Hardware-quantised fields of a level-1 trigger object.
pub trait HwCandidate {
    fn hw_pt(&self) -> i32;
    fn hw_eta(&self) -> i32;
    fn hw_phi(&self) -> i32;
    fn hw_iso(&self) -> i32;
    fn hw_qual(&self) -> i32;
}

/// Reconstructed tau candidate as delivered by the trigger emulator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tau {
    pub hw_pt: i32,
    pub hw_eta: i32,
    pub hw_phi: i32,
    #[serde(default)]
    pub hw_iso: i32,
    #[serde(default)]
    pub hw_qual: i32,
}

impl Tau {
    pub fn new(hw_pt: i32, hw_eta: i32, hw_phi: i32, hw_iso: i32, hw_qual: i32) -> Self {
        Self {
            hw_pt,
            hw_eta,
            hw_phi,
            hw_iso,
            hw_qual,
        }
    }
}

impl HwCandidate for Tau {
    fn hw_pt(&self) -> i32 {
        self.hw_pt
    }

    fn hw_eta(&self) -> i32 {
        self.hw_eta
    }

    fn hw_phi(&self) -> i32 {
        self.hw_phi
    }

    fn hw_iso(&self) -> i32 {
        self.hw_iso
    }

    fn hw_qual(&self) -> i32 {
        self.hw_qual
    }
}
