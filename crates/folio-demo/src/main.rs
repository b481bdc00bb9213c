#![forbid(unsafe_code)]

//! Folio binary entry point.

use folio_demo::{app, cli};

fn main() {
    let opts = cli::Opts::parse();
    if let Err(e) = app::run(&opts) {
        eprintln!("folio: {e}");
        std::process::exit(1);
    }
}
