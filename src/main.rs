//! CLI entry point for the block rasterizer

use blockraster::io::cli::{Cli, FileProcessor, init_logging};
use blockraster::io::error::invalid_parameter;
use clap::Parser;

fn main() -> blockraster::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.quiet);

    rayon::ThreadPoolBuilder::new()
        .num_threads(cli.threads)
        .thread_name(|index| format!("blockraster-{index}"))
        .build_global()
        .map_err(|e| invalid_parameter("threads", &cli.threads, &e))?;

    let mut processor = FileProcessor::new(cli);
    processor.process()
}
