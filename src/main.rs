//! statsd-ha-proxy daemon entry point.
//!
//! ```text
//! CLI args → config file (optional) → RelayConfig
//!          → Logger (stdout or file)
//!          → proxy core, until SIGINT/SIGTERM
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use statsd_ha_proxy::config::{print_default_config, ConfigFormat};
use statsd_ha_proxy::lifecycle::{bootstrap, signals, Runtime};

#[derive(Parser)]
#[command(name = "statsd-ha-proxy")]
#[command(about = "High-availability relay for the statsd protocol", long_about = None)]
struct Cli {
    /// Config file (YAML, or TOML with a .toml extension)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the default config and exit
    #[arg(long)]
    print_default_config: bool,

    /// Format for --print-default-config
    #[arg(long, value_enum, default_value_t = TemplateFormat::Yaml)]
    format: TemplateFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum TemplateFormat {
    Yaml,
    Toml,
}

impl From<TemplateFormat> for ConfigFormat {
    fn from(format: TemplateFormat) -> Self {
        match format {
            TemplateFormat::Yaml => ConfigFormat::Yaml,
            TemplateFormat::Toml => ConfigFormat::Toml,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.print_default_config {
        return match print_default_config(cli.format.into()) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => fail(&e),
        };
    }

    let runtime = match bootstrap(cli.config.as_deref()) {
        Ok(runtime) => runtime,
        Err(e) => return fail(&e),
    };

    match run(runtime) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fail(&e),
    }
}

#[tokio::main]
async fn run(runtime: Runtime) -> std::io::Result<()> {
    let logger = runtime.logger;
    logger.notice(&format!(
        "statsd-ha-proxy v{} started, listen {}",
        env!("CARGO_PKG_VERSION"),
        runtime.config.listen
    ));

    signals::shutdown_signal().await?;

    logger.notice("Shutdown signal received, stopping");
    Ok(())
}

fn fail(err: &dyn std::error::Error) -> ExitCode {
    eprintln!("error: {err}");
    ExitCode::FAILURE
}
