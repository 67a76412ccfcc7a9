use colored::Colorize;
use nodegen::cli;

fn main() {
    // RUST_LOG controls verbosity; warnings (unrecognised validators) by default
    use tracing_subscriber::{EnvFilter, fmt};
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .compact()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let command_line_interface = cli::CommandLineInterface::load();
    if let Err(error) = command_line_interface.run() {
        eprintln!("{} {error:#}", "❌ failed:".red().bold());
        std::process::exit(1);
    }
}
