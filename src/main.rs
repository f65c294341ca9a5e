mod convert;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

/// Converts Anvil region files into gzip-compressed mesh artifacts for
/// the web renderer.
#[derive(Parser)]
#[command(name = "comte", version)]
struct Args {
    /// Batch convert the region directory
    #[arg(long)]
    convert: bool,
    /// Prune cave cells that cannot be seen from outside the region
    #[arg(long)]
    nocave: bool,
    /// Worker thread count (defaults to the detected parallelism)
    #[arg(long)]
    threads: Option<usize>,
    /// Directory holding r.<x>.<z>.mca files
    regiondir: PathBuf,
    /// Output directory for .cmt artifacts; the block manifest
    /// blockmeta.json is read from its parent
    outdir: PathBuf,
    /// Substring filters; a region is processed when its file name
    /// contains any of them
    filters: Vec<String>,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    if !args.convert {
        log::error!("nothing to do: pass --convert (serving and atlas generation live elsewhere)");
        return ExitCode::from(2);
    }

    let threads = args
        .threads
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(8)
        })
        .max(1);

    let cfg = convert::ConvertConfig {
        region_dir: args.regiondir,
        out_dir: args.outdir,
        filters: args.filters,
        threads,
        prune_caves: args.nocave,
    };
    match convert::run(&cfg) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
