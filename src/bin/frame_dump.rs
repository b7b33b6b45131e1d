use clap::Parser;
use std::fs;
use std::path::PathBuf;
use taupack::io_utils::{cli_error, file_error, FileKind};
use taupack::{unpack_tau_word, BlockHeader};

/// Print the blocks of a raw frame file written by `taupack pack --format raw`.
#[derive(Parser)]
struct Args {
    /// Raw little-endian frame file
    input: PathBuf,
    /// Also print padding words
    #[arg(long)]
    all: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let bytes =
        fs::read(&args.input).map_err(|e| file_error(FileKind::RawFrames, &args.input, e))?;
    if bytes.len() % 4 != 0 {
        return Err(cli_error(format!(
            "{} bytes is not a whole number of 32-bit frames",
            bytes.len()
        ))
        .into());
    }
    let mut words = vec![0u32; bytes.len() / 4];
    bytemuck::cast_slice_mut::<u32, u8>(&mut words).copy_from_slice(&bytes);
    for w in words.iter_mut() {
        *w = u32::from_le(*w);
    }

    let mut pos = 0usize;
    let mut n_blocks = 0usize;
    while pos < words.len() {
        let header = BlockHeader::from_raw(words[pos]);
        let end = pos + 1 + header.size as usize;
        if end > words.len() {
            return Err(cli_error(format!(
                "block {} at word {} claims {} words, only {} left",
                header.id,
                pos,
                header.size,
                words.len() - pos - 1
            ))
            .into());
        }
        println!("block id={} size={}", header.id, header.size);
        for (slot, &w) in words[pos + 1..end].iter().enumerate() {
            if w == 0 && !args.all {
                continue;
            }
            let t = unpack_tau_word(w);
            println!(
                "  [{slot:3}] {w:08x} pt={} eta={} phi={} iso={} qual={}",
                t.hw_pt, t.hw_eta, t.hw_phi, t.hw_iso, t.hw_qual
            );
        }
        pos = end;
        n_blocks += 1;
    }
    println!("Total blocks: {n_blocks}");
    Ok(())
}
