use crate::constants::*;
use crate::{HwCandidate, Tau};

/// Encode a tau candidate into a 32-bit link frame word.
///
/// Field layout (LSB = bit 0):
/// - bits 0..=8   : pT, saturated at `0x1FF`
/// - bits 9..=16  : eta, 7-bit magnitude plus sign flag (see [`pack_eta`])
/// - bits 17..=24 : phi, wraps modulo 256
/// - bits 25..=26 : isolation
/// - bits 27..=29 : quality
/// - bits 30..=31 : always zero
///
/// Out-of-range values are clamped or masked, never rejected.
pub fn pack_tau_word<C: HwCandidate>(cand: &C) -> u32 {
    pack_pt(cand.hw_pt()) << PT_SHIFT
        | pack_eta(cand.hw_eta()) << ETA_SHIFT
        | (cand.hw_phi() as u32 & PHI_MASK) << PHI_SHIFT
        | (cand.hw_iso() as u32 & ISO_MASK) << ISO_SHIFT
        | (cand.hw_qual() as u32 & QUAL_MASK) << QUAL_SHIFT
}

/// Saturating 9-bit pT. Negative values pack as zero.
pub fn pack_pt(hw_pt: i32) -> u32 {
    (hw_pt.max(0) as u32).min(PT_MAX)
}

/// Sign-magnitude eta field: `|eta| & 0x7F`, or `(128 - m) | 0x80` when negative.
pub fn pack_eta(hw_eta: i32) -> u32 {
    let mag = hw_eta.unsigned_abs() & ETA_MAG_MASK;
    if hw_eta < 0 {
        (128 - mag) | ETA_SIGN
    } else {
        mag
    }
}

/// Decode a frame word back into hardware fields.
///
/// Eta is read as the 8-bit two's complement value of its field, which
/// recovers any `hw_eta` in `-128..=127`.
pub fn unpack_tau_word(word: u32) -> Tau {
    let eta_field = (word >> ETA_SHIFT) & ETA_MASK;
    Tau {
        hw_pt: ((word >> PT_SHIFT) & PT_MAX) as i32,
        hw_eta: eta_field as u8 as i8 as i32,
        hw_phi: ((word >> PHI_SHIFT) & PHI_MASK) as i32,
        hw_iso: ((word >> ISO_SHIFT) & ISO_MASK) as i32,
        hw_qual: ((word >> QUAL_SHIFT) & QUAL_MASK) as i32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eta_sign_magnitude() {
        assert_eq!(pack_eta(3), 3);
        assert_eq!(pack_eta(-4), 124 | 0x80);
        assert_eq!(pack_eta(-1), 0xFF);
        assert_eq!(pack_eta(-128), 0x80);
        assert_eq!(pack_eta(0x85), 0x05);
    }

    #[test]
    fn pt_saturates() {
        assert_eq!(pack_pt(0x1FE), 0x1FE);
        assert_eq!(pack_pt(0x1FF), 0x1FF);
        assert_eq!(pack_pt(500), 0x1F4);
        assert_eq!(pack_pt(100_000), 0x1FF);
        assert_eq!(pack_pt(-7), 0);
    }

    #[test]
    fn known_word() {
        let w = pack_tau_word(&Tau::new(5, 3, 10, 1, 2));
        assert_eq!(w, 5 | 3 << 9 | 10 << 17 | 1 << 25 | 2 << 27);
        assert_eq!(w >> 30, 0);
    }

    #[test]
    fn unpack_recovers_negative_eta() {
        let t = Tau::new(500, -4, 20, 0, 3);
        let back = unpack_tau_word(pack_tau_word(&t));
        assert_eq!(back, Tau::new(0x1F4, -4, 20, 0, 3));
    }
}
