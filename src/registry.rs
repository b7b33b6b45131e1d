//! Process-local table of named packers, filled once at startup.

use std::collections::BTreeMap;

use crate::constants::{CALO_TAU_LINK_BLOCKS, CALO_TAU_PACKER, GT_TAU_LINK_BLOCKS, GT_TAU_PACKER};
use crate::{
    pack_links_with_stats, Block, Blocks, DemuxConfig, PackStats, TauBxCollection, TauPackError,
};

/// Turns one event's tau collection into raw-data blocks.
pub trait Packer: Send + Sync {
    fn name(&self) -> &str;
    fn pack_with_stats(
        &self,
        taus: &TauBxCollection,
    ) -> Result<(Blocks, PackStats), TauPackError>;

    fn pack(&self, taus: &TauBxCollection) -> Result<Blocks, TauPackError> {
        Ok(self.pack_with_stats(taus)?.0)
    }
}

/// Tau packer emitting link 1 under block `b1` and link 2 under `b2`.
#[derive(Debug, Clone)]
pub struct TauPacker {
    name: String,
    b1: u8,
    b2: u8,
    config: DemuxConfig,
}

impl TauPacker {
    pub fn new(name: impl Into<String>, b1: u8, b2: u8, config: DemuxConfig) -> Self {
        Self {
            name: name.into(),
            b1,
            b2,
            config,
        }
    }

    /// Taus forwarded to the global trigger.
    pub fn gt(config: DemuxConfig) -> Self {
        Self::new(GT_TAU_PACKER, GT_TAU_LINK_BLOCKS.0, GT_TAU_LINK_BLOCKS.1, config)
    }

    /// Taus in the calo layer-2 output.
    pub fn calo(config: DemuxConfig) -> Self {
        Self::new(
            CALO_TAU_PACKER,
            CALO_TAU_LINK_BLOCKS.0,
            CALO_TAU_LINK_BLOCKS.1,
            config,
        )
    }

    pub fn block_ids(&self) -> (u8, u8) {
        (self.b1, self.b2)
    }
}

impl Packer for TauPacker {
    fn name(&self) -> &str {
        &self.name
    }

    fn pack_with_stats(
        &self,
        taus: &TauBxCollection,
    ) -> Result<(Blocks, PackStats), TauPackError> {
        let (links, stats) = pack_links_with_stats(taus, &self.config);
        let blocks = vec![
            Block::new(self.b1, links.link1)?,
            Block::new(self.b2, links.link2)?,
        ];
        Ok((blocks, stats))
    }
}

#[derive(Default)]
pub struct PackerRegistry {
    packers: BTreeMap<String, Box<dyn Packer>>,
}

impl PackerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the GT and calo tau packers.
    pub fn with_defaults(config: DemuxConfig) -> Self {
        let mut reg = Self::new();
        for packer in [TauPacker::gt(config), TauPacker::calo(config)] {
            reg.packers.insert(packer.name().to_string(), Box::new(packer));
        }
        reg
    }

    pub fn register(&mut self, packer: Box<dyn Packer>) -> Result<(), TauPackError> {
        let name = packer.name().to_string();
        if self.packers.contains_key(&name) {
            return Err(TauPackError::DuplicatePacker(name));
        }
        self.packers.insert(name, packer);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&dyn Packer> {
        self.packers.get(name).map(|p| p.as_ref())
    }

    /// Look up a packer, failing with [`TauPackError::UnknownPacker`].
    pub fn require(&self, name: &str) -> Result<&dyn Packer, TauPackError> {
        self.get(name)
            .ok_or_else(|| TauPackError::UnknownPacker(name.to_string()))
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.packers.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.packers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packers.is_empty()
    }
}
