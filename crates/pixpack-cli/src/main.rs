//! pixpack - image packer for embedded displays
//!
//! Converts PNG/JPEG/BMP/GIF files and Material Design icons into packed
//! pixel arrays (binary, grayscale, RGB565, RGB24, RGBA) inside a C++ header.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pixpack_cli::{build_all, check, encode_single, HttpIconFetcher, OfflineFetcher};
use pixpack_core::source::IconFetcher;
use pixpack_core::{generate_header, DitherMode, GeneratedImage, ImageOptions, ImageType, TargetSize};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pixpack")]
#[command(about = "Image packer for embedded displays")]
#[command(version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build every image in a manifest into one header
    Build {
        /// Path to images.toml manifest
        #[arg(default_value = "images.toml")]
        manifest: PathBuf,

        /// Output header (overrides manifest)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Only use cached icons, never download
        #[arg(long)]
        offline: bool,
    },

    /// Validate manifest without building
    Check {
        /// Path to images.toml manifest
        #[arg(default_value = "images.toml")]
        manifest: PathBuf,
    },

    /// Encode a single image file
    Encode {
        /// Input PNG/JPEG/BMP/GIF file
        input: PathBuf,

        /// Identifier of the generated image
        #[arg(long, default_value = "image")]
        id: String,

        /// Pixel format (BINARY, TRANSPARENT_BINARY, GRAYSCALE, RGB565, RGB24, RGBA)
        #[arg(short = 't', long = "type")]
        image_type: Option<ImageType>,

        /// Color-key transparency (defaults from the pixel format)
        #[arg(long)]
        use_transparency: Option<bool>,

        /// Dithering (NONE, FLOYDSTEINBERG)
        #[arg(long, default_value = "NONE")]
        dither: DitherMode,

        /// Shrink to fit WIDTHxHEIGHT
        #[arg(long)]
        resize: Option<TargetSize>,

        /// Write the raw pixel bytes instead of a C++ header
        #[arg(long, requires = "output")]
        raw: bool,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Build {
            manifest,
            output,
            offline,
        } => {
            let fetcher: Box<dyn IconFetcher> = if offline {
                Box::new(OfflineFetcher)
            } else {
                Box::new(HttpIconFetcher::new()?)
            };
            build_all(&manifest, output.as_deref(), fetcher.as_ref())?;
        }
        Commands::Check { manifest } => {
            let decls = check(&manifest)?;
            for decl in &decls {
                tracing::info!(
                    "{}: {} (transparency: {}, dither: {:?})",
                    decl.id,
                    decl.config.image_type,
                    decl.config.use_transparency,
                    decl.config.dither
                );
            }
            tracing::info!("Manifest is valid: {} image(s)", decls.len());
        }
        Commands::Encode {
            input,
            id,
            image_type,
            use_transparency,
            dither,
            resize,
            raw,
            output,
        } => {
            let buffer = encode_single(&ImageOptions {
                id: id.clone(),
                file: Some(input),
                mdi: None,
                resize,
                image_type,
                use_transparency,
                dither,
            })?;
            tracing::info!(
                "Encoded {}x{} {} ({} bytes)",
                buffer.width,
                buffer.height,
                buffer.image_type,
                buffer.len()
            );

            let bytes = if raw {
                buffer.data.clone()
            } else {
                generate_header(&[GeneratedImage {
                    id: &id,
                    buffer: &buffer,
                }])
                .into_bytes()
            };
            match output {
                Some(path) => {
                    std::fs::write(&path, bytes)
                        .with_context(|| format!("Failed to write output: {:?}", path))?;
                    tracing::info!("Wrote {}", path.display());
                }
                None => std::io::stdout().write_all(&bytes)?,
            }
        }
    }

    Ok(())
}
