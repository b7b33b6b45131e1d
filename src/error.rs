use thiserror::Error;

#[derive(Error, Debug)]
pub enum TauPackError {
    /// Demux framing constants that violate the link layout.
    #[error("config error: {0}")]
    Config(String),

    /// Malformed bunch-crossing collection (bx outside range, bad event record).
    #[error("collection error: {0}")]
    Collection(String),

    /// Link buffers that cannot be de-interleaved with the configured stride.
    #[error("decode error: {0}")]
    Decode(String),

    /// Link payload longer than a block header can describe.
    #[error("block {id} payload of {words} words exceeds 255")]
    BlockOverflow { id: u8, words: usize },

    /// No packer registered under the requested name.
    #[error("unknown packer: {0}")]
    UnknownPacker(String),

    /// A packer with the same name is already registered.
    #[error("duplicate packer: {0}")]
    DuplicatePacker(String),

    /// Propagated I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("bincode error: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}
