//! Stage-2 layer-2 demux board constants and the tau frame word layout.

/// Real tau words routed to link 1 per bunch crossing before overflowing to link 2.
pub const N_TAU_PER_LINK: usize = 6;
/// Words each output link carries per bunch crossing, padding included.
pub const N_OUTPUT_FRAME_PER_BX: usize = 6;

/// Block ids `(b1, b2)` of the tau links sent to the global trigger.
pub const GT_TAU_LINK_BLOCKS: (u8, u8) = (16, 18);
/// Block ids `(b1, b2)` of the tau links in the calo layer-2 output.
pub const CALO_TAU_LINK_BLOCKS: (u8, u8) = (17, 19);

pub const GT_TAU_PACKER: &str = "stage2::GTTauPacker";
pub const CALO_TAU_PACKER: &str = "stage2::CaloTauPacker";

// Frame word layout, LSB = bit 0.
pub const PT_SHIFT: u32 = 0;
pub const PT_MAX: u32 = 0x1FF;
pub const ETA_SHIFT: u32 = 9;
pub const ETA_MASK: u32 = 0xFF;
pub const ETA_MAG_MASK: u32 = 0x7F;
pub const ETA_SIGN: u32 = 1 << 7;
pub const PHI_SHIFT: u32 = 17;
pub const PHI_MASK: u32 = 0xFF;
pub const ISO_SHIFT: u32 = 25;
pub const ISO_MASK: u32 = 0x3;
pub const QUAL_SHIFT: u32 = 27;
pub const QUAL_MASK: u32 = 0x7;
