//! Content Texture CLI
//!
//! Command-line interface for decoding packed texture records.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use content_texture::{
    BinaryReader, DecoderOptions, MipLevelPolicy, SoftwareBackend, Texture2D, Texture2DReader,
    TextureExporter, resolve_asset_path,
};
use content_texture::binary::SoftwareSurface;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "content-texture")]
#[command(about = "Decode packed 2D texture content")]
#[command(version)]
struct Cli {
    /// Log decoder stages at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a texture record and write its base level as an image
    Decode {
        /// Input record path; the extension may be omitted
        #[arg(short, long)]
        input: PathBuf,

        /// Format version of the content stream
        #[arg(long)]
        format_version: u8,

        /// Output image path (png or bmp)
        #[arg(short, long)]
        output: PathBuf,

        /// Read extra mip levels but keep only the base level
        #[arg(long)]
        base_only: bool,

        /// Pretend the target samples block formats natively
        #[arg(long)]
        native_block_compression: bool,
    },

    /// Print format, dimensions and levels of a texture record
    Info {
        /// Input record path; the extension may be omitted
        #[arg(short, long)]
        input: PathBuf,

        /// Format version of the content stream
        #[arg(long)]
        format_version: u8,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Decode {
            input,
            format_version,
            output,
            base_only,
            native_block_compression,
        } => decode_command(
            &input,
            format_version,
            &output,
            base_only,
            native_block_compression,
        ),
        Commands::Info {
            input,
            format_version,
        } => info_command(&input, format_version),
    }
}

fn load_texture(
    input: &Path,
    format_version: u8,
    options: DecoderOptions,
    backend: SoftwareBackend,
) -> Result<Texture2D<SoftwareSurface>> {
    let Some(path) = resolve_asset_path(input) else {
        bail!("No asset found at {}", input.display());
    };
    let data = std::fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))?;

    let mut reader = BinaryReader::new(&data, format_version);
    let texture = Texture2DReader::new(backend)
        .with_options(options)
        .read(&mut reader)
        .with_context(|| format!("Failed to decode {}", path.display()))?;

    info!(
        path = %path.display(),
        format = %texture.format(),
        width = texture.width(),
        height = texture.height(),
        "decoded texture"
    );
    Ok(texture)
}

fn decode_command(
    input: &Path,
    format_version: u8,
    output: &Path,
    base_only: bool,
    native_block_compression: bool,
) -> Result<()> {
    let policy = if base_only {
        MipLevelPolicy::BaseOnly
    } else {
        MipLevelPolicy::All
    };
    let options = DecoderOptions::default().with_mip_levels(policy);
    let backend = SoftwareBackend::new().with_block_compression(native_block_compression);

    let texture = load_texture(input, format_version, options, backend)?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    TextureExporter::export_auto(texture.surface(), output)
        .with_context(|| format!("Failed to export {}", output.display()))?;

    println!("Wrote {}", output.display());
    Ok(())
}

fn info_command(input: &Path, format_version: u8) -> Result<()> {
    let texture = load_texture(
        input,
        format_version,
        DecoderOptions::default(),
        SoftwareBackend::new().with_block_compression(true),
    )?;

    println!("Format:     {}", texture.format());
    println!("Dimensions: {}x{}", texture.width(), texture.height());
    println!("Levels:     {}", texture.level_count());
    for (index, level) in texture.surface().levels.iter().enumerate() {
        println!("  [{}] {} bytes", index, level.len());
    }
    Ok(())
}
