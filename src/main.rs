use clap::Parser;
use rp_resize::config::{self, Invocation};
use rp_resize::output;
use rp_resize::process::{self, ProcessError};
use rp_resize::scan::ScanError;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rp-resize")]
#[command(version)]
#[command(about = "Batch-resize a folder of images into a timestamped directory")]
#[command(long_about = "\
Batch-resize a folder of images into a timestamped directory

Reads every .jpg/.jpeg/.png/.webp/.gif in the source folder, optionally
resizes to a target width (height follows the aspect ratio), and writes
the results at 72 DPI into resized_images_YYYYMMDD_HHMMSS/.

Positional arguments are dispatched by count:

  rp-resize                    Quality 95, original size, JPG
  rp-resize 90 1200            Quality 90, 1200px wide, JPG
  rp-resize 90 1200 webp       Same, as WebP (jpg, jpeg, png, webp)

Defaults can also be set in <source>/config.toml; run
'rp-resize --gen-config' for a documented template.

Set RUST_LOG=debug for per-file diagnostics on stderr.")]
struct Cli {
    /// [QUALITY WIDTH [FORMAT]]
    #[arg(value_name = "ARGS", allow_negative_numbers = true)]
    args: Vec<String>,

    /// Folder to read images from
    #[arg(long, default_value = "images")]
    source: PathBuf,

    /// Folder the timestamped output folder is created in
    #[arg(long, default_value = ".")]
    dest: PathBuf,

    /// Also print the batch result as JSON
    #[arg(long)]
    json: bool,

    /// Print a stock config.toml with all options documented
    #[arg(long)]
    gen_config: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    if cli.gen_config {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    // Everything below up to process_all is validation: nothing on disk
    // is touched until it has passed.
    let overrides = match config::parse_positional(&cli.args) {
        Ok(Invocation::Run(overrides)) => overrides,
        Ok(Invocation::Usage) => {
            output::print_usage();
            return Ok(());
        }
        Err(e) => {
            println!("{}", output::format_config_error(&e));
            return Ok(());
        }
    };

    let file_config = match config::load_config(&cli.source) {
        Ok(c) => c,
        Err(e) => {
            println!("{}", output::format_config_error(&e));
            return Ok(());
        }
    };
    let settings = file_config.settings(&overrides);
    debug!(?settings, source = %cli.source.display(), "resolved settings");

    let started = chrono::Local::now().naive_local();
    let result = match process::process_all(&cli.source, &cli.dest, &settings, started, |event| {
        for line in output::format_process_event(&event) {
            println!("{}", line);
        }
    }) {
        Ok(Some(result)) => result,
        Ok(None) => {
            println!("{}", output::format_no_images(&cli.source));
            return Ok(());
        }
        Err(ProcessError::Scan(ScanError::SourceNotFound(_))) => {
            println!("{}", output::format_missing_source(&cli.source));
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    output::print_summary(&result);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    Ok(())
}

/// Diagnostics go to stderr so stdout stays the user-facing report.
///
/// `RUST_LOG` overrides the default `warn` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
