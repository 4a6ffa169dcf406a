use clap::Parser;
use image_fetcher::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    let cli = Cli::parse();

    logging::init(cli.verbose);

    match cli.run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("image-fetcher error: {:#}", err);
            std::process::exit(1);
        }
    }
}
