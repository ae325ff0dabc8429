mod cli;
mod commands;
mod cull;
mod error;
mod logging;

fn main() {
    logging::init();

    if let Err(err) = cli::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
