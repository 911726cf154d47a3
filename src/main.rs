//! s72_hierarchy - hierarchy stress-test scene generator
//!
//! Writes an s72 scene with a chain of `NODE_COUNT` cube nodes.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use s72_hierarchy::config::GeneratorConfig;
use s72_hierarchy::generate_with_config;

/// Generate an s72 scene containing a linear hierarchy of cube nodes.
#[derive(Parser)]
#[command(version, after_help = "Example: s72_hierarchy 1000 hierarchy-1000.s72")]
struct Cli {
    /// Number of nodes in the hierarchy
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    node_count: u32,

    /// Scene file to write
    output_file: PathBuf,

    /// Directory holding default.toml and user.toml
    ///
    /// Output is byte-identical across runs only for the same config files
    /// and `S72_*` environment variables.
    #[arg(long, default_value = "config")]
    config_dir: PathBuf,
}

fn main() -> ExitCode {
    let args = Cli::parse();

    let config_result = GeneratorConfig::load_from(&args.config_dir);
    let config = config_result.as_ref().cloned().unwrap_or_default();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.debug.log_level))
        .init();

    if let Err(e) = config_result {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }

    match generate_with_config(&config, args.node_count, &args.output_file) {
        Ok(()) => {
            println!(
                "Generated {} with {} nodes in hierarchy",
                args.output_file.display(),
                args.node_count
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
