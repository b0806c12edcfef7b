use std::path::PathBuf;

use blueprint_builder::{
    cli::{run_cli, CliOptions},
    init,
};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "blueprint_cli",
    version,
    about = "Draft healthcare scenarios and review their service blueprints"
)]
struct Args {
    /// Signed-in user name; omit to run as the guest user.
    #[arg(long, env = "BLUEPRINT_USER")]
    user: Option<String>,
    /// Read commands from stdin without interactive prompts.
    #[arg(long, env = "BLUEPRINT_CLI_SCRIPT", value_parser = clap::builder::FalseyValueParser::new())]
    script: bool,
    /// Configuration file to use instead of the default location.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Simulated generation latency in milliseconds.
    #[arg(long, value_name = "MS")]
    delay_ms: Option<u64>,
}

impl From<Args> for CliOptions {
    fn from(args: Args) -> Self {
        Self {
            user: args.user,
            script: args.script,
            config_path: args.config,
            delay_ms: args.delay_ms,
        }
    }
}

fn main() {
    let args = Args::parse();
    init();

    if let Err(err) = run_cli(args.into()) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
