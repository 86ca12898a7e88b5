//! # dtt-highlight
//!
//! Highlights dependenttt source files through the registered mode and
//! prints the result as a token listing, JSON, or colored source.

mod render;
mod theme;

use clap::Parser;
use dependenttt_mode::config::runtime::LogLevel;
use dependenttt_mode::config::{EscapePolicy, RuntimeConfig};
use dependenttt_mode::folding::fold_ranges;
use dependenttt_mode::registry::register_mode_with;
use dependenttt_mode::{highlight_file, logging, Mode, ModeRegistry, MODE_NAME};
use render::OutputFormat;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "dtt-highlight", version, about = "Highlight dependenttt source files")]
struct Cli {
    /// Source files to highlight
    #[arg(required = true, value_name = "FILES")]
    files: Vec<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Backslash handling inside strings: skip, literal or fault
    #[arg(long, value_name = "POLICY")]
    escape_policy: Option<EscapePolicy>,

    /// Also print brace fold ranges
    #[arg(long)]
    folds: bool,

    /// Merge adjacent tokens with the same style
    #[arg(long)]
    merge: bool,

    /// Reject files without the .dtt extension
    #[arg(long)]
    require_extension: bool,
}

impl Cli {
    /// Environment preferences with command-line overrides applied
    fn runtime_config(&self) -> RuntimeConfig {
        let mut config = RuntimeConfig::from_env();

        if let Some(policy) = self.escape_policy {
            config.mode.escape_policy = policy;
        }
        if self.merge {
            config.highlight.merge_adjacent = true;
        }
        if self.require_extension {
            config.file_processor.require_extension = true;
        }

        // Library events go through `log`; RUST_LOG does the filtering
        config.logging.forward_to_log_crate = true;
        config.logging.enable_console_logging = false;
        config.logging.min_log_level = LogLevel::Debug;

        config
    }
}

fn init_logging(config: &RuntimeConfig) -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    logging::config::install_preferences(config.logging.clone())?;
    logging::init_global_logging()
}

fn highlight_one(
    out: &mut dyn Write,
    cli: &Cli,
    mode: &dyn Mode,
    config: &RuntimeConfig,
    path: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = highlight_file(path, mode, config)?;

    let folds = cli
        .folds
        .then(|| fold_ranges(mode.fold(), &result.document));

    render::render(out, cli.format, path, &result.document, folds.as_deref())?;

    log::debug!(
        "highlighted {} ({} lines) in {:.2} ms",
        path,
        result.metadata.line_count,
        result.duration.as_secs_f64() * 1000.0
    );
    Ok(())
}

fn run(cli: &Cli) -> Result<bool, Box<dyn std::error::Error>> {
    let config = cli.runtime_config();
    init_logging(&config)?;

    let mut registry = ModeRegistry::new();
    register_mode_with(&mut registry, config.mode.clone())?;
    let mode = registry.get_mode(MODE_NAME)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut all_ok = true;

    for path in &cli.files {
        let path = path.display().to_string();

        if cli.files.len() > 1 && cli.format != OutputFormat::Json {
            writeln!(out, "==> {} <==", path)?;
        }

        if let Err(e) = highlight_one(&mut out, cli, mode.as_ref(), &config, &path) {
            log::error!("{}: {}", path, e);
            eprintln!("error: {}: {}", path, e);
            all_ok = false;
        }
    }

    out.flush()?;
    Ok(all_ok)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(1)
        }
    }
}
