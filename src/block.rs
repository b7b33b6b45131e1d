use serde::{Deserialize, Serialize};

use crate::TauPackError;

/// Largest payload the 8-bit size field can describe.
pub const MAX_PAYLOAD_WORDS: usize = 0xFF;

/// MP7 block header packed into one 32-bit word.
///
/// Field layout (LSB = bit 0):
/// - bits 24..=31 : block id
/// - bits 16..=23 : payload size in words
/// - bits 8..=15  : capture id
/// - bits 0..=7   : flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    pub id: u8,
    pub size: u8,
    pub cap_id: u8,
    pub flags: u8,
}

const ID_SHIFT: u32 = 24;
const SIZE_SHIFT: u32 = 16;
const CAP_ID_SHIFT: u32 = 8;
const FLAGS_SHIFT: u32 = 0;

impl BlockHeader {
    pub fn raw(&self) -> u32 {
        (self.id as u32) << ID_SHIFT
            | (self.size as u32) << SIZE_SHIFT
            | (self.cap_id as u32) << CAP_ID_SHIFT
            | (self.flags as u32) << FLAGS_SHIFT
    }

    pub fn from_raw(raw: u32) -> Self {
        Self {
            id: (raw >> ID_SHIFT) as u8,
            size: (raw >> SIZE_SHIFT) as u8,
            cap_id: (raw >> CAP_ID_SHIFT) as u8,
            flags: (raw >> FLAGS_SHIFT) as u8,
        }
    }
}

/// One link's payload tagged with its block id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub header: BlockHeader,
    pub payload: Vec<u32>,
}

pub type Blocks = Vec<Block>;

impl Block {
    /// Block with `size` taken from the payload length. Payloads longer than
    /// [`MAX_PAYLOAD_WORDS`] do not fit the header and are rejected.
    pub fn new(id: u8, payload: Vec<u32>) -> Result<Self, TauPackError> {
        let size = u8::try_from(payload.len()).map_err(|_| TauPackError::BlockOverflow {
            id,
            words: payload.len(),
        })?;
        Ok(Self {
            header: BlockHeader {
                id,
                size,
                cap_id: 0,
                flags: 0,
            },
            payload,
        })
    }

    pub fn id(&self) -> u8 {
        self.header.id
    }

    /// Header word followed by the payload.
    pub fn to_words(&self) -> Vec<u32> {
        let mut out = Vec::with_capacity(1 + self.payload.len());
        out.push(self.header.raw());
        out.extend_from_slice(&self.payload);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_layout() {
        let b = Block::new(17, vec![0xAA, 0, 0]).unwrap();
        assert_eq!(b.header.raw(), 0x1103_0000);
        assert_eq!(b.to_words(), vec![0x1103_0000, 0xAA, 0, 0]);
        assert_eq!(BlockHeader::from_raw(0x1203_0501).flags, 1);
        assert_eq!(BlockHeader::from_raw(b.header.raw()), b.header);
    }

    #[test]
    fn oversized_payload_is_rejected() {
        assert_eq!(
            Block::new(16, vec![0; MAX_PAYLOAD_WORDS]).unwrap().header.size,
            0xFF
        );
        assert!(matches!(
            Block::new(16, vec![0; MAX_PAYLOAD_WORDS + 3]),
            Err(TauPackError::BlockOverflow { id: 16, words: 258 })
        ));
    }
}
