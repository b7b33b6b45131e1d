use clap::{Parser, Subcommand, ValueEnum};
use indicatif::ProgressBar;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use taupack::constants::GT_TAU_PACKER;
use taupack::io_utils::{cli_error, file_error, taupack_cli_error, FileKind};
use taupack::logging::init_tracing;
use taupack::{
    load_dump, save_dump, unpack_links, Block, DemuxConfig, EventFile, LinkBuffers, PackStats,
    Packer, PackerRegistry,
};
use tracing::info;

/// Pack level-1 tau candidates into demux link frames.
#[derive(Parser)]
#[command(name = "taupack")]
struct Cli {
    /// Debug level logging
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Pack every event of a JSON event file
    Pack {
        /// Input event file (.json)
        input: PathBuf,
        /// Output path
        output: PathBuf,
        /// Registered packer name
        #[arg(long, default_value = GT_TAU_PACKER)]
        packer: String,
        /// JSON file with demux framing constants
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        n_tau_per_link: Option<usize>,
        #[arg(long)]
        frames_per_bx: Option<usize>,
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
        /// Show a progress bar over events
        #[arg(long)]
        progress: bool,
    },
    /// Decode a bincode link dump written by `pack --format bincode`
    Dump {
        input: PathBuf,
    },
    /// List registered packers
    List,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Blocks per event with digests
    Json,
    /// Link buffers, readable by `dump`
    Bincode,
    /// One row per frame slot
    Csv,
    /// Little-endian block words (header + payload)
    Raw,
}

#[derive(Serialize)]
struct PackedEvent {
    digest: String,
    blocks: Vec<Block>,
}

#[derive(Serialize)]
struct PackedFile {
    packer: String,
    config: DemuxConfig,
    events: Vec<PackedEvent>,
    stats: PackStats,
}

#[derive(Serialize)]
struct FrameRow {
    event: usize,
    bx: i32,
    slot: usize,
    link1: String,
    link2: String,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose).map_err(|e| cli_error(format!("logging setup failed: {e}")))?;

    match cli.command {
        Command::Pack {
            input,
            output,
            packer,
            config,
            n_tau_per_link,
            frames_per_bx,
            format,
            progress,
        } => {
            let cfg = load_config(config.as_deref(), n_tau_per_link, frames_per_bx)?;
            pack(&input, &output, &packer, cfg, format, progress)
        }
        Command::Dump { input } => dump(&input),
        Command::List => {
            for name in PackerRegistry::with_defaults(DemuxConfig::default()).names() {
                println!("{name}");
            }
            Ok(())
        }
    }
}

fn load_config(
    path: Option<&Path>,
    n_tau_per_link: Option<usize>,
    frames_per_bx: Option<usize>,
) -> Result<DemuxConfig, Box<dyn std::error::Error>> {
    let base = match path {
        Some(p) => DemuxConfig::load(p).map_err(|e| taupack_cli_error("loading config", e))?,
        None => DemuxConfig::default(),
    };
    Ok(base
        .with_overrides(n_tau_per_link, frames_per_bx)
        .map_err(|e| taupack_cli_error("invalid demux config", e))?)
}

fn pack(
    input: &Path,
    output: &Path,
    packer_name: &str,
    cfg: DemuxConfig,
    format: Format,
    progress: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let registry = PackerRegistry::with_defaults(cfg);
    let packer = registry
        .require(packer_name)
        .map_err(|e| taupack_cli_error("selecting packer", e))?;
    let file = EventFile::load(input).map_err(|e| taupack_cli_error("reading event file", e))?;

    let bar = if progress {
        ProgressBar::new(file.events.len() as u64)
    } else {
        ProgressBar::hidden()
    };

    let mut stats = PackStats::new();
    let mut links = Vec::with_capacity(file.events.len());
    let mut packed = Vec::with_capacity(file.events.len());
    for (i, event) in file.events.iter().enumerate() {
        let taus = event
            .to_collection()
            .map_err(|e| taupack_cli_error(&format!("event {i}"), e))?;
        let (blocks, event_stats) = packer
            .pack_with_stats(&taus)
            .map_err(|e| taupack_cli_error(&format!("event {i}"), e))?;
        stats.merge(&event_stats);
        let buffers =
            LinkBuffers::from_blocks(taus.first_bx(), cfg.n_output_frame_per_bx(), &blocks)
                .map_err(|e| taupack_cli_error(&format!("event {i}"), e))?;
        packed.push(PackedEvent {
            digest: buffers.digest(),
            blocks,
        });
        links.push(buffers);
        bar.inc(1);
    }
    bar.finish_and_clear();
    stats.report();

    match format {
        Format::Json => {
            let out = PackedFile {
                packer: packer.name().to_string(),
                config: cfg,
                events: packed,
                stats,
            };
            let data = serde_json::to_vec_pretty(&out)?;
            fs::write(output, data).map_err(|e| file_error(FileKind::PackOutput, output, e))?;
        }
        Format::Bincode => {
            save_dump(output, &links).map_err(|e| taupack_cli_error("writing link dump", e))?;
        }
        Format::Csv => {
            let mut wtr = csv::Writer::from_path(output)
                .map_err(|e| taupack_cli_error("writing csv", e.into()))?;
            for (event, buffers) in links.iter().enumerate() {
                for (i, (w1, w2)) in buffers.link1.iter().zip(&buffers.link2).enumerate() {
                    wtr.serialize(FrameRow {
                        event,
                        bx: buffers.first_bx + (i / buffers.frames_per_bx) as i32,
                        slot: i % buffers.frames_per_bx,
                        link1: format!("{w1:08x}"),
                        link2: format!("{w2:08x}"),
                    })?;
                }
            }
            wtr.flush()?;
        }
        Format::Raw => {
            let words: Vec<u32> = packed
                .iter()
                .flat_map(|ev| ev.blocks.iter().flat_map(Block::to_words))
                .map(u32::to_le)
                .collect();
            fs::write(output, bytemuck::cast_slice::<u32, u8>(&words))
                .map_err(|e| file_error(FileKind::PackOutput, output, e))?;
        }
    }

    info!(events = links.len(), output = %output.display(), "wrote packed events");
    Ok(())
}

fn dump(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let events = load_dump(input).map_err(|e| taupack_cli_error("reading link dump", e))?;
    for (i, buffers) in events.iter().enumerate() {
        println!("event {i}: digest {}", buffers.digest());
        let taus = unpack_links(buffers).map_err(|e| taupack_cli_error("decoding links", e))?;
        for (bx, cands) in taus.iter() {
            for (slot, t) in cands.iter().enumerate() {
                println!(
                    "  bx {bx:+} #{slot}: pt={} eta={} phi={} iso={} qual={}",
                    t.hw_pt, t.hw_eta, t.hw_phi, t.hw_iso, t.hw_qual
                );
            }
        }
    }
    Ok(())
}
