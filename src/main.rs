use clap::{Parser, Subcommand};
use socialsize::batch::{self, BatchReport, BatchRequest, BatchResult, RequestKind};
use socialsize::imaging::{OutputFormat, Quality, ResizeSpec, RustBackend, parse_dimension};
use socialsize::scan::{self, ScannedInput};
use socialsize::{config, naming, output};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "socialsize")]
#[command(version, about = "Resize, convert, and cut social-media variants from images")]
#[command(long_about = "\
Resize, convert, and cut social-media variants from images

Inputs may be image files or directories (walked recursively). Files that
are not JPEG, PNG or WebP images are skipped.

Commands:

  resize     stretch every input to one size; give --width, --height or both
  convert    re-encode every input as jpeg, png or webp
  preset     cut a platform asset (favicon, youtube-thumbnail, ...) per input
  presets    list the preset catalog

Square presets (icons, profile pictures) center-crop the source. All other
presets letterbox the whole source onto the background color.

Run 'socialsize gen-config' to generate a documented socialsize.toml.")]
struct Cli {
    /// Config file (default: ./socialsize.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output directory
    #[arg(long, short, default_value = "out", global = true)]
    output: PathBuf,

    /// Write a JSON report of the batch to this file
    #[arg(long, global = true)]
    report: Option<PathBuf>,

    /// Debug-level diagnostics on stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resize images to explicit dimensions
    Resize {
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        /// Output width in pixels
        #[arg(long, required_unless_present = "height")]
        width: Option<String>,
        /// Output height in pixels
        #[arg(long)]
        height: Option<String>,
        /// Do not derive a missing axis from the aspect ratio
        #[arg(long)]
        no_keep_aspect: bool,
    },
    /// Re-encode images to another format
    Convert {
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        /// jpeg, png or webp (default from config)
        #[arg(long)]
        format: Option<String>,
        /// Quality 0-100 (default from config)
        #[arg(long, value_parser = clap::value_parser!(u32).range(0..=100))]
        quality: Option<u32>,
    },
    /// Generate a preset's variants from each image
    Preset {
        /// Preset id, see `socialsize presets`
        preset: String,
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        /// Side length for the `custom` preset
        #[arg(long)]
        size: Option<String>,
    },
    /// List available presets
    Presets,
    /// Print a stock socialsize.toml with all options documented
    GenConfig,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let (inputs, kind) = match cli.command {
        Command::Presets => {
            output::print_preset_list();
            return Ok(ExitCode::SUCCESS);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
            return Ok(ExitCode::SUCCESS);
        }
        Command::Resize {
            inputs,
            width,
            height,
            no_keep_aspect,
        } => {
            let config = load_config(cli.config.as_deref())?;
            let spec = ResizeSpec {
                width: width.as_deref().map(parse_dimension).transpose()?,
                height: height.as_deref().map(parse_dimension).transpose()?,
                keep_aspect: config.resize.keep_aspect && !no_keep_aspect,
            };
            (inputs, RequestKind::Resize(spec))
        }
        Command::Convert {
            inputs,
            format,
            quality,
        } => {
            let config = load_config(cli.config.as_deref())?;
            let format = match format {
                Some(name) => name.parse().unwrap_or_else(|_| {
                    warn!(format = %name, "unknown format, using jpeg");
                    OutputFormat::from_name_lossy(&name)
                }),
                None => config.output.format,
            };
            let quality = quality
                .map(Quality::from_percent)
                .unwrap_or_else(|| config.output.quality());
            (inputs, RequestKind::Convert { format, quality })
        }
        Command::Preset {
            preset,
            inputs,
            size,
        } => {
            let custom_size = size.as_deref().map(parse_dimension).transpose()?;
            (
                inputs,
                RequestKind::IconPreset {
                    preset,
                    custom_size,
                },
            )
        }
    };

    let config = load_config(cli.config.as_deref())?;
    init_thread_pool(&config.processing);

    let scanned = scan::scan(&inputs)?;
    let images = scanned.iter().map(|s| s.image.clone()).collect();
    let nested = matches!(kind, RequestKind::IconPreset { .. }) && scanned.len() > 1;
    let operation = kind.name();

    let backend = RustBackend::new();
    let request = BatchRequest::new(images, kind).with_background(config.background.color);
    let prepared = batch::prepare(&backend, request)?;
    if let Some(preset) = prepared.preset() {
        for line in output::format_preset_fallback(preset) {
            println!("{}", line);
        }
    }

    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            for line in output::format_batch_event(&event) {
                println!("{}", line);
            }
        }
    });
    let mut results = prepared.run(&backend, Some(tx))?;
    printer.join().map_err(|_| "progress printer panicked")?;

    let written = write_results(&cli.output, &scanned, &mut results, nested)?;
    debug!(written, dir = %cli.output.display(), "outputs written");

    if let Some(path) = &cli.report {
        let report = BatchReport::new(operation, &results);
        std::fs::write(path, serde_json::to_string_pretty(&report)?)?;
    }

    if results.iter().all(BatchResult::is_ok) {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Stderr diagnostics. `RUST_LOG` wins unless `--verbose` asks for debug.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(explicit: Option<&Path>) -> Result<config::AppConfig, config::ConfigError> {
    let cwd = std::env::current_dir()?;
    config::load_config(explicit, &cwd)
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; the user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}

/// Write every successful output and return how many files were written.
///
/// With `nested`, each input gets its own sub-directory so fixed preset
/// names do not collide. Inputs that share a name (from different
/// directories, or `photo.png` and `photo.jpg` converted to one format)
/// get numbered names instead of overwriting each other; in flat mode the
/// result's file name is updated to match what was written.
fn write_results(
    dir: &Path,
    scanned: &[ScannedInput],
    results: &mut [BatchResult],
    nested: bool,
) -> std::io::Result<usize> {
    let mut dir_names = naming::UniqueNames::new();
    let mut file_names = naming::UniqueNames::new();
    let mut written = 0;

    for result in results.iter_mut() {
        let input = &scanned[result.index];
        let Ok(files) = &mut result.outcome else {
            continue;
        };
        let target_dir = if nested {
            let wanted = naming::directory_name(input.image.stem());
            let name = dir_names.claim(&wanted);
            if name != wanted {
                warn!(
                    source = %input.path.display(),
                    dir = %name,
                    "output directory name taken, renamed"
                );
            }
            dir.join(name)
        } else {
            dir.to_path_buf()
        };
        std::fs::create_dir_all(&target_dir)?;

        for file in files.iter_mut() {
            if !nested {
                let name = file_names.claim(&file.filename);
                if name != file.filename {
                    warn!(
                        source = %input.path.display(),
                        file = %name,
                        "output name taken, renamed"
                    );
                    file.filename = name;
                }
            }
            std::fs::write(target_dir.join(&file.filename), &file.bytes)?;
            written += 1;
        }
    }
    Ok(written)
}
