use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use burst_core::hash::hash_sequence;
use burst_core::{BurstConfig, DistortionLevel, FRAME_DELAY_MS};
use burst_encode::AnimationFormat;
use burst_render::{DecorSet, SequenceBuilder, BUILTIN_DECOR_FRAMES, DISTORTION_FRAMES};

#[derive(Parser)]
#[command(
    name = "burst",
    version,
    about = "Burst — turn a still image into an exploding animation",
    long_about = "Burst warps a still image toward its center over a fixed schedule of levels,\nfollows it with an explosion, and saves the result as a looping GIF or APNG.\n\nThe output extension picks the format: .gif, .png or .apng."
)]
struct Cli {
    /// Config file (default: ./burst.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an explode (or implode) animation from an image
    Explode {
        /// Source image (PNG, JPEG, GIF, WebP, ...)
        #[arg()]
        input: PathBuf,

        /// Output path; .gif writes GIF, .png/.apng writes APNG (default: <input>_out.png)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Play the animation back to front (implode)
        #[arg(short, long)]
        reverse: bool,

        /// Generate frames on the calling thread only
        #[arg(long)]
        sequential: bool,

        /// Directory of PNG frames replacing the built-in explosion
        #[arg(long)]
        decor_dir: Option<PathBuf>,
    },

    /// Show frame count and size of an exported animation
    Inspect {
        /// GIF or APNG file to inspect
        #[arg()]
        file: PathBuf,

        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Display version and pipeline constants
    Info,
}

/// Export settings after merging CLI flags over the config file.
#[derive(Debug, PartialEq)]
struct ExplodeOptions {
    output: PathBuf,
    reverse: bool,
    parallel: bool,
    decor_dir: Option<PathBuf>,
}

impl ExplodeOptions {
    fn resolve(
        config: &BurstConfig,
        input: &Path,
        output: Option<PathBuf>,
        reverse: bool,
        sequential: bool,
        decor_dir: Option<PathBuf>,
    ) -> Self {
        Self {
            output: output.unwrap_or_else(|| config.default_output_for(input)),
            reverse: reverse || config.export.reverse,
            parallel: config.render.parallel && !sequential,
            decor_dir: decor_dir.or_else(|| config.render.decor_dir.clone()),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = BurstConfig::discover(cli.config.as_deref()).context("failed to load config")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log.level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Explode {
            input,
            output,
            reverse,
            sequential,
            decor_dir,
        } => {
            let options =
                ExplodeOptions::resolve(&config, &input, output, reverse, sequential, decor_dir);
            cmd_explode(&input, options)
        }
        Commands::Inspect { file, json } => cmd_inspect(&file, json),
        Commands::Info => cmd_info(),
    }
}

fn cmd_explode(input: &Path, options: ExplodeOptions) -> Result<()> {
    let start = Instant::now();

    // Reject the output format before doing any work.
    let format = AnimationFormat::from_path(&options.output)?;

    println!("💥 Burst v{}", env!("CARGO_PKG_VERSION"));
    println!("   Source: {}", input.display());

    let image = burst_render::load_image(input)
        .with_context(|| format!("failed to load file `{}`", input.display()))?;
    println!("   ✓ Loaded {}x{}", image.width, image.height);

    let custom_decor;
    let decor = match &options.decor_dir {
        Some(dir) => {
            custom_decor = DecorSet::from_dir(dir)
                .with_context(|| format!("failed to load decor frames from {}", dir.display()))?;
            &custom_decor
        }
        None => DecorSet::builtin(),
    };

    let build_start = Instant::now();
    let progress = |done: usize, total: usize| tracing::trace!("Frame {}/{} written", done, total);
    let sequence = SequenceBuilder::new(decor)
        .reverse(options.reverse)
        .parallel(options.parallel)
        .on_frame(&progress)
        .build(&image)
        .context("failed to build frame sequence")?;
    println!(
        "   ✓ Generated {} frames ({}) in {:.1}ms",
        sequence.len(),
        if options.reverse { "implode" } else { "explode" },
        build_start.elapsed().as_secs_f64() * 1000.0
    );
    tracing::debug!("Sequence hash {}", hash_sequence(&sequence));

    let encode_start = Instant::now();
    burst_encode::encode(&sequence, &options.output)
        .with_context(|| format!("failed to save {} `{}`", format, options.output.display()))?;
    println!(
        "   ✓ Encoded {} in {:.1}ms",
        format,
        encode_start.elapsed().as_secs_f64() * 1000.0
    );

    let freed = sequence.release();
    tracing::debug!("Frame arena released ({} bytes)", freed);

    println!();
    println!(
        "   ⚡ Saved `{}` in {:.2}s",
        options.output.display(),
        start.elapsed().as_secs_f64()
    );
    Ok(())
}

fn cmd_inspect(file: &Path, json: bool) -> Result<()> {
    let info = burst_encode::probe(file)
        .with_context(|| format!("failed to inspect `{}`", file.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("🎞️  {} info: {}", info.format, file.display());
    println!("   Frame count:  {}", info.frame_count);
    println!("   Frame width:  {}", info.width);
    println!("   Frame height: {}", info.height);
    println!(
        "   Duration:     {:.2}s at {}ms/frame",
        info.frame_count as f64 * FRAME_DELAY_MS as f64 / 1000.0,
        FRAME_DELAY_MS
    );
    Ok(())
}

fn cmd_info() -> Result<()> {
    let levels: Vec<String> = DistortionLevel::SCHEDULE
        .iter()
        .map(|l| format!("{:.3}", l.value()))
        .collect();

    println!("💥 Burst Explode Generator");
    println!("   Version:   {}", env!("CARGO_PKG_VERSION"));
    println!(
        "   Frames:    {} ({} distortion + {} decor)",
        DISTORTION_FRAMES + BUILTIN_DECOR_FRAMES,
        DISTORTION_FRAMES,
        BUILTIN_DECOR_FRAMES
    );
    println!("   Levels:    {}", levels.join(", "));
    println!("   Delay:     {}ms/frame, looping forever", FRAME_DELAY_MS);
    println!("   Formats:   .gif (GIF), .png / .apng (APNG)");
    println!("   Threads:   {}", rayon::current_num_threads());
    Ok(())
}
