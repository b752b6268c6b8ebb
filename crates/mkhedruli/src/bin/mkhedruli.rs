//! Command-line front end for Mkhedruli phrase recognition.
//!
//! ```bash
//! # Write a config with the default paths and parameters
//! mkhedruli init-config --output ocr.json
//!
//! # Render reference glyphs from a font that covers Georgian
//! mkhedruli render-alphabet --font sylfaen.ttf --output-dir alphabet
//!
//! # Recognize a phrase, overriding the config where needed
//! mkhedruli recognize --config ocr.json --phrase pictures_src/phrase1.bmp
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use mkhedruli::recog::{alphabet_symbols, OcrConfig, GEORGIAN_ALPHABET};
use mkhedruli::render::{load_font, render_alphabet, DEFAULT_CANVAS_SIZE};
use mkhedruli::{ocr, Score};

#[cfg(not(feature = "tracing"))]
use log::LevelFilter;
#[cfg(not(feature = "tracing"))]
use mkhedruli::core::init_with_level;

#[cfg(feature = "tracing")]
use mkhedruli::core::{init_tracing, LOG_ENV};
#[cfg(feature = "tracing")]
use tracing_log::LogTracer;

/// Template-matching OCR for printed Georgian phrases
#[derive(Parser, Debug)]
#[command(name = "mkhedruli")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Log per-stage debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON (only with the `tracing` feature)
    #[arg(long, global = true)]
    json_log: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Recognize a phrase image against a directory of reference glyphs
    Recognize(RecognizeArgs),
    /// Render reference glyphs for an alphabet from a font file
    RenderAlphabet(RenderArgs),
    /// Write a config file with default values
    InitConfig {
        /// Destination of the JSON config
        #[arg(short, long, default_value = "mkhedruli.json")]
        output: PathBuf,
    },
}

#[derive(Args, Debug)]
struct RecognizeArgs {
    /// JSON config; flags below override its fields
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory with one `<symbol>.bmp` per alphabet symbol
    #[arg(long)]
    reference_dir: Option<PathBuf>,

    /// Phrase image to recognize
    #[arg(long)]
    phrase: Option<PathBuf>,

    /// Ground-truth text used for scoring
    #[arg(long, conflicts_with = "no_truth")]
    truth: Option<String>,

    /// Skip scoring even if the config has a ground truth
    #[arg(long)]
    no_truth: bool,

    /// Directory receiving the result files
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Alphabet symbols in template order
    #[arg(long)]
    alphabet: Option<String>,

    /// Binarization threshold (intensities below it are ink)
    #[arg(long)]
    threshold: Option<u8>,

    /// Minimum horizontal gap in pixels that starts a new word
    #[arg(long)]
    space_threshold: Option<usize>,

    /// Profile values at or below this count as empty
    #[arg(long)]
    empty_thresh: Option<u32>,

    /// Side of the normalized glyph bitmap
    #[arg(long)]
    canonical_size: Option<usize>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// TrueType/OpenType font covering the alphabet
    #[arg(short, long)]
    font: PathBuf,

    /// Directory receiving `<symbol>.bmp` files
    #[arg(short, long, default_value = "alphabet")]
    output_dir: PathBuf,

    /// Side of the square drawing canvas in pixels
    #[arg(long, default_value_t = DEFAULT_CANVAS_SIZE)]
    canvas: u32,

    /// Symbols to render
    #[arg(long, default_value = GEORGIAN_ALPHABET)]
    alphabet: String,
}

impl RecognizeArgs {
    fn into_config(self) -> Result<OcrConfig, Box<dyn std::error::Error>> {
        let mut cfg = match &self.config {
            Some(path) => OcrConfig::load_json(path)?,
            None => OcrConfig::default(),
        };
        if let Some(dir) = self.reference_dir {
            cfg.reference_dir = dir;
        }
        if let Some(phrase) = self.phrase {
            cfg.phrase_path = phrase;
        }
        if let Some(truth) = self.truth {
            cfg.ground_truth = Some(truth);
        }
        if self.no_truth {
            cfg.ground_truth = None;
        }
        if let Some(dir) = self.output_dir {
            cfg.output_dir = dir;
        }
        if let Some(alphabet) = self.alphabet {
            cfg.alphabet = alphabet;
        }
        if let Some(t) = self.threshold {
            cfg.params.threshold = t;
        }
        if let Some(t) = self.space_threshold {
            cfg.params.space_threshold = t;
        }
        if let Some(t) = self.empty_thresh {
            cfg.params.segment.empty_thresh = t;
        }
        if let Some(size) = self.canonical_size {
            cfg.params.canonical_size = size;
        }
        Ok(cfg)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    init_logging(&cli)?;

    match cli.command {
        Command::Recognize(args) => recognize(args.into_config()?),
        Command::RenderAlphabet(args) => render(args),
        Command::InitConfig { output } => {
            OcrConfig::default().write_json(&output)?;
            println!("wrote default config to {}", output.display());
            Ok(())
        }
    }
}

#[cfg(not(feature = "tracing"))]
fn init_logging(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    if cli.json_log {
        eprintln!("--json-log requires the `tracing` feature, using plain logs");
    }
    init_with_level(level)?;
    Ok(())
}

#[cfg(feature = "tracing")]
fn init_logging(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.verbose && std::env::var_os(LOG_ENV).is_none() {
        std::env::set_var(LOG_ENV, "debug");
    }
    let _ = LogTracer::init();
    init_tracing(cli.json_log);
    Ok(())
}

fn recognize(cfg: OcrConfig) -> Result<(), Box<dyn std::error::Error>> {
    let report = ocr::run(&cfg)?;

    println!("prediction: {}", report.prediction);
    if let (Some(truth), Some(score)) = (&report.ground_truth, &report.score) {
        println!("truth:      {truth}");
        print_score(score);
    }
    println!("results in {}", cfg.output_dir.display());
    Ok(())
}

fn print_score(score: &Score) {
    println!(
        "errors:     {}/{} | accuracy: {:.2}% | edit distance: {}",
        score.errors,
        score.predicted_len.max(score.truth_len),
        score.accuracy,
        score.edit_distance
    );
}

fn render(args: RenderArgs) -> Result<(), Box<dyn std::error::Error>> {
    let font = load_font(&args.font)?;
    let symbols = alphabet_symbols(&args.alphabet);
    let written = render_alphabet(&font, &symbols, &args.output_dir, args.canvas)?;
    println!(
        "rendered {} glyphs into {}",
        written.len(),
        args.output_dir.display()
    );
    Ok(())
}
