use anyhow::Result;
use clap::Parser;
use initphase::generate;
use std::path::PathBuf;

/// Write an init phase file from confidence-ranked variable predictions
#[derive(Debug, Parser)]
struct Args {
    /// JSON lines with `index` and `assignment`, most confident first
    #[clap(short, long)]
    input: PathBuf,
    /// Init phase file to write
    #[clap(short, long)]
    output: PathBuf,
    /// Only use the most confident fraction of the variables
    #[clap(long)]
    topk: Option<f64>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let generated = generate::generate_file(&args.input, &args.output, args.topk)?;
    if generated.skipped > 0 {
        eprintln!("skipped {} invalid predictions", generated.skipped);
    }
    println!(
        "wrote '{}' ({} entries)",
        args.output.display(),
        generated.len()
    );
    Ok(())
}
