//! Command-line interface for makedoc.

use clap::{CommandFactory, Parser};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Once;

use crate::config::Config;
use crate::emit::{self, Emitter};
use crate::generate::Generator;
use crate::report::{self, SummaryFormat};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 2;

/// Argument selecting tags-only mode.
pub const TAGS_FLAG: &str = "-tags";

/// Program name used when argv[0] is unavailable.
const DEFAULT_PROGRAM: &str = "makedoc";

/// Make doc.c, key.c and funs.h from Info command sources.
///
/// Every DECLARE_INFO_COMMAND in the given files becomes a row in the
/// documentation and key arrays and an extern in the declarations header.
/// With `-tags` anywhere in the arguments, nothing is written to disk and an
/// Emacs tag table goes to stdout instead. Options go before the first file.
#[derive(Parser)]
#[command(name = "makedoc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Source files to scan (arguments starting with '-' are listed but not scanned)
    #[arg(allow_hyphen_values = true, value_name = "FILE")]
    pub args: Vec<String>,

    /// Path to config YAML file (default: auto-discover)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory for the generated files
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Do not emit numeric command keys
    #[arg(long)]
    pub no_keys: bool,

    /// Do not emit user-visible names in the documentation array
    #[arg(long)]
    pub no_names: bool,

    /// Print a summary of the run to stderr
    #[arg(long, value_enum)]
    pub summary: Option<SummaryFormat>,
}

impl Cli {
    /// Whether `-tags` appears among the arguments.
    pub fn tags_only(&self) -> bool {
        self.args.iter().any(|a| a == TAGS_FLAG)
    }

    /// Known long options that followed a file and were taken as arguments.
    pub fn misplaced_options(&self) -> Vec<&str> {
        let command = Self::command();
        let longs: Vec<&str> = command.get_arguments().filter_map(|a| a.get_long()).collect();

        self.args
            .iter()
            .map(String::as_str)
            .filter(|arg| match arg.strip_prefix("--") {
                Some(opt) => {
                    let name = opt.split('=').next().unwrap_or(opt);
                    longs.contains(&name)
                }
                None => false,
            })
            .collect()
    }
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Only active when `RUST_LOG` is set, e.g. `RUST_LOG=makedoc=debug`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}

/// Name credited in the generated headers, from argv[0].
pub fn program_name(argv0: Option<&str>) -> String {
    match argv0 {
        Some(name) if !name.is_empty() => name
            .strip_suffix(".exe")
            .or_else(|| name.strip_suffix(".EXE"))
            .unwrap_or(name)
            .to_string(),
        _ => DEFAULT_PROGRAM.to_string(),
    }
}

/// Resolve the configuration for this invocation.
pub fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(dir) = &cli.output_dir {
        config.output_dir = dir.clone();
    }
    if cli.no_keys {
        config.layout.numeric_keys = false;
    }
    if cli.no_names {
        config.layout.named_functions = false;
    }
    Ok(config)
}

/// Run the generator.
pub fn run(cli: &Cli, program: &str) -> anyhow::Result<i32> {
    for opt in cli.misplaced_options() {
        tracing::warn!(option = opt, "option given after a file");
        eprintln!(
            "Warning: {} follows a file and is ignored; options go before the first file",
            opt
        );
    }

    let config = resolve_config(cli)?;
    let tags_only = cli.tags_only();

    let artifacts = if tags_only {
        emit::discard()
    } else {
        emit::create_files(&config.funs_path(), &config.doc_path(), &config.key_path())?
    };
    let emitter = Emitter::new(artifacts, config.layout);

    let generator = Generator::new(config);
    let (result, _artifacts) = generator.run(program, &cli.args, emitter)?;

    for d in &result.diagnostics {
        eprintln!("Warning: {}: {}", d.file, d.message);
    }

    if tags_only {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        result.tags.write_to(&mut out)?;
        out.flush()?;
    }

    if let Some(format) = cli.summary {
        let stderr = std::io::stderr();
        report::write_summary(&mut stderr.lock(), format, &result)?;
    }

    Ok(EXIT_SUCCESS)
}
