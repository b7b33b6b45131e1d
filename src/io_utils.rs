//! Error messages for the `taupack` and `frame_dump` command line tools.

use std::fmt;
use std::io;
use std::path::Path;

use crate::TauPackError;

/// Files the command line tools read or write directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Little-endian block stream from `pack --format raw`.
    RawFrames,
    /// Any file written by `pack`.
    PackOutput,
}

impl FileKind {
    fn describe(self) -> &'static str {
        match self {
            FileKind::RawFrames => "raw frame file",
            FileKind::PackOutput => "pack output",
        }
    }

    fn hint(self, err: &io::Error) -> &'static str {
        use io::ErrorKind::*;
        match (self, err.kind()) {
            (FileKind::RawFrames, NotFound) => "Create one with `taupack pack --format raw`.",
            (FileKind::RawFrames, UnexpectedEof) => "The frame stream is truncated.",
            (FileKind::PackOutput, NotFound) => "Create the output directory first.",
            (_, PermissionDenied) => "Check the file permissions.",
            (FileKind::PackOutput, WriteZero) => "The disk may be full.",
            _ => "Check the path and try again.",
        }
    }
}

/// Error shown to the user as a single line on stderr.
#[derive(Debug)]
pub struct CliError {
    pub msg: String,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.msg)
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// I/O failure on one of the tool's own files, with a hint for that file kind.
pub fn file_error(kind: FileKind, path: &Path, err: io::Error) -> CliError {
    CliError {
        msg: format!(
            "{} '{}': {}. {}",
            kind.describe(),
            path.display(),
            err,
            kind.hint(&err)
        ),
        source: Some(Box::new(err)),
    }
}

/// Message-only error for malformed arguments or input.
pub fn cli_error(msg: impl Into<String>) -> CliError {
    CliError {
        msg: msg.into(),
        source: None,
    }
}

/// Wrap a library error with what the tool was doing and a hint.
pub fn taupack_cli_error(context: &str, err: TauPackError) -> CliError {
    CliError {
        msg: format!("{}: {}", context, cli_hint(&err)),
        source: Some(Box::new(err)),
    }
}

/// Return an actionable hint for an error variant.
pub fn cli_hint(err: &TauPackError) -> String {
    use TauPackError::*;
    match err {
        Config(msg) => format!("{msg}. n_output_frame_per_bx must be >= n_tau_per_link."),
        Collection(msg) => format!("{msg}. Check the bx range of the event."),
        Decode(msg) => format!("{msg}. Link dump does not match its frame stride."),
        BlockOverflow { .. } => {
            format!("{err}. Narrow the event's bx range or lower --frames-per-bx.")
        }
        UnknownPacker(name) => format!("no packer named '{name}'. Run `taupack list`."),
        DuplicatePacker(name) => format!("packer '{name}' registered twice. This is a bug."),
        Io(io) if io.kind() == io::ErrorKind::NotFound => {
            format!("{io}. Check the path given on the command line.")
        }
        Io(io) => format!("{io}"),
        Json(e) => format!("{e}. Verify the JSON input is intact."),
        Bincode(e) => format!("{e}. Expected a dump from `taupack pack --format bincode`."),
        Csv(e) => format!("{e}"),
    }
}
