//! Terrains CLI - fractal heightfield generator.
//!
//! Generates a gradient-noise heightfield composited with fBm or a hybrid
//! multifractal and writes it out for texture upload or inspection.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use terrains::export::{export_field_png, export_field_raw, PngExportOptions, RawFormat};
use terrains::noise::{FractalConfig, FractalVariant};
use terrains::terrain::generate_heightmap;

/// Fractal heightfield generator.
#[derive(Parser)]
#[command(name = "terrains")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a heightfield.
    Generate(GenerateArgs),

    /// Display memory and file sizes for a field size.
    Info {
        /// Field width in cells.
        #[arg(long, default_value = "2048")]
        width: u32,

        /// Field height in cells.
        #[arg(long, default_value = "2048")]
        height: u32,
    },
}

#[derive(clap::Args)]
struct GenerateArgs {
    /// Parameter preset used as the starting point.
    #[arg(short, long, default_value = "summer")]
    preset: Preset,

    /// JSON file with a serialized configuration (overrides --preset).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Octave weighting scheme.
    #[arg(short, long, default_value = "fbm")]
    variant: Variant,

    /// Random seed for reproducible generation.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Output directory for generated files.
    #[arg(short, long, default_value = "./output")]
    output: PathBuf,

    /// Base name for output files.
    #[arg(short, long, default_value = "heightfield")]
    name: String,

    /// Export format.
    #[arg(short, long, default_value = "png")]
    format: ExportFormat,

    /// Field width in cells.
    #[arg(long)]
    width: Option<u32>,

    /// Field height in cells.
    #[arg(long)]
    height: Option<u32>,

    /// Wavelength of the base gradient noise in cells.
    #[arg(long)]
    period: Option<u32>,

    /// Fractal increment (higher = smoother).
    #[arg(long)]
    h: Option<f32>,

    /// Frequency multiplier per octave.
    #[arg(long)]
    lacunarity: Option<f32>,

    /// Bias added to every octave.
    #[arg(long, allow_hyphen_values = true)]
    offset: Option<f32>,

    /// Number of octaves.
    #[arg(long)]
    octaves: Option<u32>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Preset {
    Summer,
    Lunar,
    Rugged,
}

#[derive(Clone, Copy, ValueEnum)]
enum Variant {
    /// Plain fractional Brownian motion.
    Fbm,
    /// Hybrid multifractal.
    Hybrid,
}

impl From<Variant> for FractalVariant {
    fn from(v: Variant) -> Self {
        match v {
            Variant::Fbm => FractalVariant::Fbm,
            Variant::Hybrid => FractalVariant::HybridMultifractal,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    /// 16-bit PNG (normalized preview).
    Png,
    /// 16-bit RAW little-endian (Unity).
    Raw,
    /// 32-bit float RAW (verbatim field values).
    RawFloat,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => run_generate(args),
        Commands::Info { width, height } => run_info(width, height),
    }
}

fn load_config(args: &GenerateArgs) -> Result<FractalConfig, String> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| format!("reading {}: {}", path.display(), e))?;
            serde_json::from_str(&text).map_err(|e| format!("parsing {}: {}", path.display(), e))?
        }
        None => match args.preset {
            Preset::Summer => FractalConfig::summer(),
            Preset::Lunar => FractalConfig::lunar(),
            Preset::Rugged => FractalConfig::rugged(),
        },
    };

    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(period) = args.period {
        config.base_period = period;
    }
    if let Some(h) = args.h {
        config.h = h;
    }
    if let Some(lacunarity) = args.lacunarity {
        config.lacunarity = lacunarity;
    }
    if let Some(offset) = args.offset {
        config.offset = offset;
    }
    if let Some(octaves) = args.octaves {
        config.octaves = octaves;
    }

    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

fn fail(context: &str, err: impl std::fmt::Display) -> ! {
    tracing::error!("{}: {}", context, err);
    std::process::exit(1);
}

fn run_generate(args: GenerateArgs) {
    let config = load_config(&args).unwrap_or_else(|e| fail("Invalid configuration", e));
    let variant = FractalVariant::from(args.variant);

    let seed = args.seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });

    tracing::info!(
        width = config.width,
        height = config.height,
        period = config.base_period,
        h = config.h,
        lacunarity = config.lacunarity,
        offset = config.offset,
        octaves = config.octaves,
        variant = variant.name(),
        seed,
        "generating heightfield"
    );

    let start = Instant::now();
    let field = generate_heightmap(&config, variant, seed)
        .unwrap_or_else(|e| fail("Error during generation", e));
    let (min_h, max_h) = field.value_range();

    if let Err(e) = std::fs::create_dir_all(&args.output) {
        fail("Error creating output directory", e);
    }

    let path = export(&field, &args.output, &args.name, args.format, min_h, max_h);
    tracing::info!(path = %path.display(), elapsed = ?start.elapsed(), "done");
}

fn export(
    field: &terrains::ScalarField,
    output: &Path,
    name: &str,
    format: ExportFormat,
    min_h: f32,
    max_h: f32,
) -> PathBuf {
    // A perfectly flat field still needs a non-empty range for normalization.
    let max_h = if max_h > min_h { max_h } else { min_h + 1e-6 };

    match format {
        ExportFormat::Png => {
            let path = output.join(format!("{}.png", name));
            let options = PngExportOptions {
                min_height: min_h,
                max_height: max_h,
                ..Default::default()
            };
            export_field_png(field, &path, &options).unwrap_or_else(|e| fail("Error exporting PNG", e));
            path
        }
        ExportFormat::Raw => {
            let path = output.join(format!("{}.raw", name));
            export_field_raw(field, &path, RawFormat::R16LittleEndian, min_h, max_h)
                .unwrap_or_else(|e| fail("Error exporting RAW", e));
            path
        }
        ExportFormat::RawFloat => {
            let path = output.join(format!("{}.r32", name));
            export_field_raw(field, &path, RawFormat::R32Float, min_h, max_h)
                .unwrap_or_else(|e| fail("Error exporting RAW", e));
            path
        }
    }
}

fn run_info(width: u32, height: u32) {
    let cells = (width as u64) * (height as u64);
    let stored = (height as u64) * (height as u64);

    let bytes_gradients = stored * 8; // Vec2
    let bytes_field = stored * 4; // f32
    let peak = bytes_gradients + bytes_field * 2;
    let mb = |b: u64| b as f64 / 1024.0 / 1024.0;

    println!("Terrains - Field Configuration Info");
    println!("===================================");
    println!();
    println!("Size: {}x{} ({} cells)", width, height, cells);
    if width > height {
        println!("  Warning: width exceeds height; rows are strided by height and this size is rejected");
    }
    println!();
    println!("Memory usage (in-memory):");
    println!("  Gradient lattice: {:>12} bytes ({:.2} MB)", bytes_gradients, mb(bytes_gradients));
    println!("  Raw noise field:  {:>12} bytes ({:.2} MB)", bytes_field, mb(bytes_field));
    println!("  Output field:     {:>12} bytes ({:.2} MB)", bytes_field, mb(bytes_field));
    println!("  Peak:             {:>12} bytes ({:.2} MB)", peak, mb(peak));
    println!();
    println!("Export file sizes:");
    println!("  PNG (16-bit):  <= {:>10} bytes", cells * 2);
    println!("  RAW (R16):        {:>10} bytes", cells * 2);
    println!("  RAW (R32):        {:>10} bytes", cells * 4);
}
