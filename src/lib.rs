//! Level-1 trigger tau object packing for the stage-2 layer-2 demux links.
//!
//! Tau candidates of each bunch crossing are encoded into 32-bit frame words
//! and spread over two output links with a fixed per-crossing stride, then
//! wrapped into raw-data blocks by a named [`Packer`].

pub mod block;
pub mod bx_vector;
pub mod config;
pub mod constants;
pub mod error;
pub mod event_file;
pub mod io_utils;
pub mod logging;
pub mod packer;
pub mod registry;
pub mod stats;
pub mod tau;
pub mod unpack;
pub mod word;

pub use block::{Block, BlockHeader, Blocks};
pub use bx_vector::{BxVector, TauBxCollection};
pub use config::DemuxConfig;
pub use error::TauPackError;
pub use event_file::{Crossing, EventFile, EventRecord};
pub use packer::{load_dump, pack_links, pack_links_with_stats, save_dump, Link, LinkBuffers};
pub use registry::{Packer, PackerRegistry, TauPacker};
pub use stats::PackStats;
pub use tau::{HwCandidate, Tau};
pub use unpack::{unpack_links, unpack_words};
pub use word::{pack_eta, pack_pt, pack_tau_word, unpack_tau_word};
