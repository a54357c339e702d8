use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use logo_background_removal::predicate::{DEFAULT_BRIGHTNESS_TOLERANCE, DEFAULT_DISTANCE_TOLERANCE};
use logo_background_removal::{
    default_output_path, BackgroundPredicate, MaskEngine, MaskMode, MaskOptions, ProcessResult,
};

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// Clear only near-white pixels connected to an image corner
    Border,
    /// Clear every near-white pixel
    Global,
}

#[derive(Clone, Copy, ValueEnum)]
enum Predicate {
    /// Every channel >= 255 - tolerance
    Brightness,
    /// Euclidean distance to white < tolerance
    Distance,
}

#[derive(Parser)]
#[command(
    name = "logo-bg",
    about = "Make white logo backgrounds transparent",
    version,
    after_help = "Simple usage: logo-bg <image>  (writes <name>_transparent.png)\n\n\
                  Border mode keeps enclosed white areas such as eyes or letter counters."
)]
struct Cli {
    /// Input image file or directory
    input: String,

    /// Output PNG file or directory (default: {name}_transparent.png)
    #[arg(short, long)]
    output: Option<String>,

    /// Which near-white pixels to clear
    #[arg(short, long, value_enum, default_value = "border")]
    mode: Mode,

    /// How near-white is measured
    #[arg(short, long, value_enum, default_value = "brightness")]
    predicate: Predicate,

    /// Background tolerance (brightness: 0-255, default 10; distance: default 40)
    #[arg(short, long)]
    tolerance: Option<f32>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long)]
    quiet: bool,
}

fn init_tracing(verbose: bool, quiet: bool) {
    let level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_predicate(kind: Predicate, tolerance: Option<f32>) -> Result<BackgroundPredicate, String> {
    match kind {
        Predicate::Brightness => {
            let tol = tolerance.unwrap_or(f32::from(DEFAULT_BRIGHTNESS_TOLERANCE));
            if !(0.0..=255.0).contains(&tol) || tol.fract() != 0.0 {
                return Err("Brightness tolerance must be a whole number in 0-255".to_string());
            }
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let tol = tol as u8;
            Ok(BackgroundPredicate::brightness(tol))
        }
        Predicate::Distance => {
            let tol = tolerance.unwrap_or(DEFAULT_DISTANCE_TOLERANCE);
            if !tol.is_finite() || tol < 0.0 {
                return Err("Distance tolerance must be a non-negative number".to_string());
            }
            Ok(BackgroundPredicate::distance(tol))
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let predicate = match build_predicate(cli.predicate, cli.tolerance) {
        Ok(p) => p,
        Err(msg) => {
            eprintln!("Error: {msg}");
            process::exit(1);
        }
    };

    let mode = match cli.mode {
        Mode::Border => MaskMode::BorderConnected,
        Mode::Global => MaskMode::Global,
    };
    let engine = MaskEngine::new(MaskOptions { mode, predicate });

    let input_path = Path::new(&cli.input);
    if !input_path.exists() {
        eprintln!("Error: Input path does not exist: {}", cli.input);
        process::exit(1);
    }

    tracing::info!(
        input = %input_path.display(),
        mode = ?engine.options().mode,
        tolerance = predicate.tolerance(),
        "removing logo backgrounds"
    );

    let results = if input_path.is_dir() {
        let output_dir = if let Some(o) = &cli.output {
            PathBuf::from(o)
        } else {
            eprintln!("Error: Output directory is required for batch processing");
            eprintln!("Usage: logo-bg <input_dir> -o <output_dir>");
            process::exit(1);
        };
        engine.process_directory(input_path, &output_dir)
    } else {
        let output_path = match &cli.output {
            Some(o) => PathBuf::from(o),
            None => default_output_path(input_path),
        };
        vec![engine.process_file(input_path, &output_path)]
    };

    let mut success_count = 0u32;
    let mut fail_count = 0u32;

    for r in &results {
        print_result(r, cli.quiet, cli.verbose);
        if r.success {
            success_count += 1;
        } else {
            fail_count += 1;
        }
    }

    if results.len() > 1 && !cli.quiet {
        eprintln!();
        eprint!("[Summary] Processed: {success_count}");
        if fail_count > 0 {
            eprint!(", Failed: {fail_count}");
        }
        eprintln!(" (Total: {})", results.len());
    }

    tracing::info!(
        processed = success_count,
        failed = fail_count,
        total = results.len(),
        "done"
    );

    if fail_count > 0 {
        process::exit(1);
    }
}

fn print_result(result: &ProcessResult, quiet: bool, verbose: bool) {
    if quiet && result.success {
        return;
    }

    let filename = result.path.file_name().map_or_else(
        || result.path.display().to_string(),
        |f| f.to_string_lossy().to_string(),
    );

    if result.success {
        eprintln!(
            "[OK] {filename} ({}/{} transparent)",
            result.transparent, result.total
        );
        if verbose {
            eprintln!("  -> {}", result.message);
        }
    } else {
        eprintln!("[FAIL] {filename}: {}", result.message);
    }
}
