#[macro_use]
extern crate clap;

pub mod graphics;
pub mod interface;
pub mod scene;

use log::{error, info};

use interface::cli::parse_args;
use interface::gui::gui_main;

fn main() {
    env_logger::init();

    let config = parse_args();
    info!(
        "Hello OpenGL: {}x{} {:?}",
        config.width, config.height, config.title
    );

    if let Err(e) = gui_main(config) {
        error!("{}", e);
        std::process::exit(-1);
    }
}
