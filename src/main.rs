use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use munin_jmx::{App, FileSource, JolokiaSource, MetricSource, Mode, PluginDocument, Settings};

#[derive(Parser, Debug)]
#[command(name = "munin-jmx")]
#[command(about = "Munin plugin reporting JMX attributes read through Jolokia")]
struct Args {
    /// Munin invocation mode; `config` prints graph configuration before values
    mode: Option<String>,

    /// Path to the YAML plugin configuration [env: MUNIN_JMX_CONFIG]
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Default request timeout in seconds [env: MUNIN_JMX_TIMEOUT]
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Serve attribute values from a JSON file instead of querying Jolokia
    #[arg(long)]
    values_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let settings = Settings::load()?.with_overrides(args.config, args.timeout);
    init_logging(&settings.log);

    let document = PluginDocument::load(&settings.config)?;

    let source: Box<dyn MetricSource> = match args.values_file {
        Some(path) => Box::new(FileSource::open(path)?),
        None => Box::new(JolokiaSource::new(settings.timeout())),
    };

    let app = App::new(document, Mode::from_arg(args.mode.as_deref()), source);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start runtime")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    runtime.block_on(app.run(&mut out))
}

/// Log to stderr; stdout belongs to Munin.
fn init_logging(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
