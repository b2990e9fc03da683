//! Command-line interface for mdlint

#[cfg(feature = "cli")]
mod cli;

#[cfg(feature = "cli")]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=debug mdlint ... surfaces config discovery and fix-coordinator detail
    env_logger::Builder::from_default_env().init();
    cli::run()
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Rebuild with --features cli");
    std::process::exit(1);
}
