use clap::Parser;
use hubtrack::cli::commands::Cli;
use hubtrack::cli::handlers;

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = handlers::dispatch(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
