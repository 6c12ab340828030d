use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

use gridchain::{
    Chain, ChainConfig, ChainMode, ChainOpts, ChainSeed, ExactCoordinate, ExtentPolicy,
    LayoutOpts, Precision, RasterImage, RasterOpts, Rgb8,
};

mod palette;
mod report;

const DEFAULT_NOTE_RESOLUTIONS: [[u32; 1]; 2] = [[4], [7]];
const DEFAULT_PIXEL_RESOLUTIONS: [[u32; 2]; 2] = [[8, 8], [5, 5]];

#[derive(Parser, Debug)]
#[command(name = "gridchain", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a chain of note rows and print its report.
    Notes(NotesArgs),
    /// Build a chain of pixel grids and print its report.
    Pixels(PixelsArgs),
    /// Build the chain described by a JSON config file.
    Run(RunArgs),
    /// Print the per-cell derivation of one level.
    Probe(ProbeArgs),
}

#[derive(clap::Args, Debug)]
struct BuildArgs {
    /// Significant digits kept by every decimal operation.
    #[arg(long, default_value_t = Precision::DEFAULT_DIGITS as u64)]
    precision: u64,

    /// Override how each level's extent is derived.
    #[arg(long, value_enum)]
    extent: Option<ExtentArg>,
}

#[derive(clap::Args, Debug)]
struct OutputArgs {
    /// Write the JSON report here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Also rasterize the laid-out chain to this PNG.
    #[arg(long)]
    png: Option<PathBuf>,

    /// Uniform layout scale factor.
    #[arg(long)]
    scale: Option<f64>,

    /// Output pixels per layout unit.
    #[arg(long)]
    pixels_per_unit: Option<f64>,
}

#[derive(Parser, Debug)]
struct NotesArgs {
    /// Comma separated note counts, e.g. "4, 7". Defaults to "4, 7".
    #[arg(long, default_value = "")]
    resolutions: String,

    /// Seed colors (#rrggbb or #rrggbbaa). Defaults to the built-in palette.
    #[arg(long, value_delimiter = ',')]
    colors: Vec<String>,

    #[command(flatten)]
    build: BuildArgs,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Parser, Debug)]
struct PixelsArgs {
    /// Comma separated WIDTHxHEIGHT entries, e.g. "8x8, 5x5". Defaults to "8x8, 5x5".
    #[arg(long, default_value = "")]
    resolutions: String,

    /// Seed image, resized to the first resolution and blended over white.
    #[arg(long)]
    image: Option<PathBuf>,

    #[command(flatten)]
    build: BuildArgs,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Chain config JSON.
    #[arg(long)]
    config: PathBuf,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Parser, Debug)]
struct ProbeArgs {
    #[arg(long, value_enum, default_value_t = ModeArg::Notes)]
    mode: ModeArg,

    /// Resolution list in the same format as the `notes` / `pixels` commands.
    #[arg(long, default_value = "")]
    resolutions: String,

    /// Zero-based level to probe.
    #[arg(long)]
    level: usize,

    #[command(flatten)]
    build: BuildArgs,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ExtentArg {
    Carried,
    Fixed,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ModeArg {
    Notes,
    Pixels,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Notes(args) => cmd_notes(args),
        Command::Pixels(args) => cmd_pixels(args),
        Command::Run(args) => cmd_run(args),
        Command::Probe(args) => cmd_probe(args),
    }
}

fn cmd_notes(args: NotesArgs) -> anyhow::Result<()> {
    let resolutions = note_resolutions(&args.resolutions)?;
    let colors = args
        .colors
        .iter()
        .map(|c| Rgb8::parse_hex(c))
        .collect::<Result<Vec<_>, _>>()
        .context("parse --colors")?;
    let seed = if colors.is_empty() {
        default_note_seed(&resolutions)?
    } else {
        ChainSeed::notes(colors, ExactCoordinate::from(1u32))?
    };
    let opts = chain_opts(ChainOpts::notes(), &args.build)?;
    let chain = gridchain::build_chain(&seed, &resolutions, opts)?;
    emit_notes(&chain, &args.output, LayoutOpts::default(), RasterOpts::default())
}

fn cmd_pixels(args: PixelsArgs) -> anyhow::Result<()> {
    let resolutions = pixel_resolutions(&args.resolutions)?;
    let seed = match &args.image {
        Some(path) => image_pixel_seed(path, &resolutions)?,
        None => default_pixel_seed(&resolutions)?,
    };
    let opts = chain_opts(ChainOpts::pixels(), &args.build)?;
    let chain = gridchain::build_chain(&seed, &resolutions, opts)?;
    emit_pixels(&chain, &args.output, LayoutOpts::default(), RasterOpts::default())
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let cfg = ChainConfig::from_path(&args.config)
        .with_context(|| format!("load chain config '{}'", args.config.display()))?;
    let opts = cfg.chain_opts();
    match cfg.mode {
        ChainMode::Notes => {
            let resolutions = or_default(cfg.note_resolutions()?, &DEFAULT_NOTE_RESOLUTIONS);
            let seed = match cfg.note_seed()? {
                Some(seed) => seed,
                None => default_note_seed(&resolutions)?,
            };
            let chain = gridchain::build_chain(&seed, &resolutions, opts)?;
            emit_notes(&chain, &args.output, cfg.layout_opts(), cfg.raster)
        }
        ChainMode::Pixels => {
            let resolutions = or_default(cfg.pixel_resolutions()?, &DEFAULT_PIXEL_RESOLUTIONS);
            let seed = match cfg.pixel_seed()? {
                Some(seed) => seed,
                None => default_pixel_seed(&resolutions)?,
            };
            let chain = gridchain::build_chain(&seed, &resolutions, opts)?;
            emit_pixels(&chain, &args.output, cfg.layout_opts(), cfg.raster)
        }
    }
}

fn cmd_probe(args: ProbeArgs) -> anyhow::Result<()> {
    let report = match args.mode {
        ModeArg::Notes => {
            let resolutions = note_resolutions(&args.resolutions)?;
            let seed = default_note_seed(&resolutions)?;
            let opts = chain_opts(ChainOpts::notes(), &args.build)?;
            probe_report(&seed, &resolutions, opts, args.level)?
        }
        ModeArg::Pixels => {
            let resolutions = pixel_resolutions(&args.resolutions)?;
            let seed = default_pixel_seed(&resolutions)?;
            let opts = chain_opts(ChainOpts::pixels(), &args.build)?;
            probe_report(&seed, &resolutions, opts, args.level)?
        }
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn probe_report<const N: usize>(
    seed: &ChainSeed<N>,
    resolutions: &[[u32; N]],
    opts: ChainOpts,
    level: usize,
) -> anyhow::Result<report::ProbeReport> {
    let cells = gridchain::probe_chain_level(seed, resolutions, opts, level)
        .with_context(|| format!("probe level {level}"))?;
    Ok(report::ProbeReport {
        level,
        resolution: resolutions[level].to_vec(),
        cells,
    })
}

fn note_resolutions(text: &str) -> anyhow::Result<Vec<[u32; 1]>> {
    let parsed = gridchain::parse_resolution_list::<1>(text).context("parse --resolutions")?;
    Ok(or_default(parsed, &DEFAULT_NOTE_RESOLUTIONS))
}

fn pixel_resolutions(text: &str) -> anyhow::Result<Vec<[u32; 2]>> {
    let parsed = gridchain::parse_resolution_list::<2>(text).context("parse --resolutions")?;
    Ok(or_default(parsed, &DEFAULT_PIXEL_RESOLUTIONS))
}

fn or_default<const N: usize>(parsed: Vec<[u32; N]>, default: &[[u32; N]]) -> Vec<[u32; N]> {
    if parsed.is_empty() {
        tracing::info!(?default, "no resolutions given, using defaults");
        default.to_vec()
    } else {
        parsed
    }
}

/// Palette seed sized to the first resolution, so level 0 reproduces it.
fn default_note_seed(resolutions: &[[u32; 1]]) -> anyhow::Result<ChainSeed<1>> {
    let [count] = resolutions.first().copied().unwrap_or(DEFAULT_NOTE_RESOLUTIONS[0]);
    let colors = palette::note_palette(count as usize);
    Ok(ChainSeed::notes(colors, ExactCoordinate::from(1u32))?)
}

fn default_pixel_seed(resolutions: &[[u32; 2]]) -> anyhow::Result<ChainSeed<2>> {
    let [w, h] = resolutions.first().copied().unwrap_or(DEFAULT_PIXEL_RESOLUTIONS[0]);
    let one = ExactCoordinate::from(1u32);
    Ok(ChainSeed::pixels(palette::pixel_palette(w, h), one.clone(), one)?)
}

/// Decodes `path`, resizes it to the first resolution and flattens alpha onto white.
fn image_pixel_seed(path: &Path, resolutions: &[[u32; 2]]) -> anyhow::Result<ChainSeed<2>> {
    let [w, h] = resolutions.first().copied().unwrap_or(DEFAULT_PIXEL_RESOLUTIONS[0]);
    let bytes =
        std::fs::read(path).with_context(|| format!("read seed image '{}'", path.display()))?;
    let mut rgba = image::load_from_memory(&bytes)
        .with_context(|| format!("decode seed image '{}'", path.display()))?
        .to_rgba8();
    if rgba.dimensions() != (w, h) {
        tracing::debug!(from = ?rgba.dimensions(), to = ?(w, h), "resizing seed image");
        rgba = image::imageops::resize(&rgba, w, h, image::imageops::FilterType::Nearest);
    }
    let rows = rgba
        .rows()
        .map(|row| {
            row.map(|px| {
                let [r, g, b, a] = px.0;
                Rgb8::new(r, g, b).blend_over_white(a)
            })
            .collect()
        })
        .collect();
    let one = ExactCoordinate::from(1u32);
    Ok(ChainSeed::pixels(rows, one.clone(), one)?)
}

fn chain_opts(preset: ChainOpts, args: &BuildArgs) -> anyhow::Result<ChainOpts> {
    let mut opts = preset.with_precision(Precision::new(args.precision)?);
    if let Some(extent) = args.extent {
        opts = opts.with_extent(match extent {
            ExtentArg::Carried => ExtentPolicy::Carried,
            ExtentArg::Fixed => ExtentPolicy::Fixed,
        });
    }
    Ok(opts)
}

fn emit_notes(
    chain: &Chain<1>,
    output: &OutputArgs,
    layout: LayoutOpts,
    raster: RasterOpts,
) -> anyhow::Result<()> {
    write_report(&report::ChainReport::new("notes", chain), output.out.as_deref())?;
    if let Some(png) = &output.png {
        let placed = gridchain::layout_notes(chain, &output.layout_opts(layout))?;
        let image = gridchain::rasterize(&placed, &output.raster_opts(raster))?;
        write_png(png, &image)?;
    }
    Ok(())
}

fn emit_pixels(
    chain: &Chain<2>,
    output: &OutputArgs,
    layout: LayoutOpts,
    raster: RasterOpts,
) -> anyhow::Result<()> {
    write_report(&report::ChainReport::new("pixels", chain), output.out.as_deref())?;
    if let Some(png) = &output.png {
        let placed = gridchain::layout_pixels(chain, &output.layout_opts(layout))?;
        let image = gridchain::rasterize(&placed, &output.raster_opts(raster))?;
        write_png(png, &image)?;
    }
    Ok(())
}

impl OutputArgs {
    fn layout_opts(&self, mut base: LayoutOpts) -> LayoutOpts {
        if let Some(scale) = self.scale {
            base.scale = scale;
        }
        base
    }

    fn raster_opts(&self, mut base: RasterOpts) -> RasterOpts {
        if let Some(ppu) = self.pixels_per_unit {
            base.pixels_per_unit = ppu;
        }
        base
    }
}

fn write_report(report: &report::ChainReport, out: Option<&Path>) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    match out {
        Some(path) => {
            create_parent(path)?;
            std::fs::write(path, json + "\n")
                .with_context(|| format!("write report '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn write_png(path: &Path, image: &RasterImage) -> anyhow::Result<()> {
    create_parent(path)?;
    image::save_buffer_with_format(
        path,
        &image.data,
        image.width,
        image.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn create_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}
