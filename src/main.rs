//! `nave` binary: open the gallery window.
//!
//! Usage: `nave [OPTIONS.toml]`. Without an argument the built-in options
//! are used.

use std::path::Path;

use nave::{options::Options, NaveError, Viewer};

fn load_options(arg: Option<&str>) -> Result<Options, NaveError> {
    match arg {
        Some(path) => {
            log::info!("loading options from {path}");
            Options::load(Path::new(path))
        }
        None => Ok(Options::default()),
    }
}

fn main() {
    env_logger::init();

    let options = match load_options(std::env::args().nth(1).as_deref()) {
        Ok(options) => options,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = Viewer::builder().with_options(options).build().run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
