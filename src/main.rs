use clap::{Parser, Subcommand};
use rastermark::{config, output, process};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "rastermark")]
#[command(about = "Batch image conversion, thumbnails, and logo overlays")]
#[command(long_about = "\
Batch image conversion, thumbnails, and logo overlays

Walks a directory tree, picks up every image whose extension is on the
allow-list (jpg, png, tiff by default), and processes each one:

  overlay   composite a logo onto the center of every image, scaled to a
            fifth of each image's width, honoring the logo's alpha channel
  thumbs    replace every image with its thumbnail (default 256x256 request,
            aspect-preserving)
  convert   re-encode every image into a sibling output_<ext> directory

Omitted paths fall back to <home>/Desktop/images (and <home>/Desktop/logo.png
for the overlay image). Drop a rastermark.toml into the target directory to
override extensions, quality levels, thumbnail shape, or the overlay divider.")]
#[command(version = version_string())]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Composite a scaled logo onto the center of every image under a directory
    Overlay {
        /// Image to overlay (default: <home>/Desktop/logo.png)
        logo: Option<PathBuf>,
        /// Directory to process (default: <home>/Desktop/images)
        dir: Option<PathBuf>,
    },
    /// Replace every image under a directory with its thumbnail
    Thumbs {
        /// Directory to process (default: <home>/Desktop/images)
        dir: Option<PathBuf>,
    },
    /// Re-encode every image into a sibling output_<ext> directory
    Convert {
        /// Directory to read (default: <home>/Desktop/images)
        dir: Option<PathBuf>,
        /// Target extension (overrides config, e.g. png or jpg)
        #[arg(long)]
        to: Option<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Overlay { logo, dir } => {
            let dir = dir.unwrap_or_else(config::default_image_dir);
            let logo = logo.unwrap_or_else(config::default_logo_path);
            let cfg = config::load_config(&dir)?;
            println!("{}", output::overlay_header(&logo, &dir));
            let summary = process::overlay_run(&logo, &dir, &cfg)?;
            println!("{}", output::summary_line("overlay", &summary));
        }
        Command::Thumbs { dir } => {
            let dir = dir.unwrap_or_else(config::default_image_dir);
            let cfg = config::load_config(&dir)?;
            println!("{}", output::run_header("Thumbnail", &dir));
            let summary = process::thumbnail_run(&dir, &cfg)?;
            println!("{}", output::summary_line("thumbs", &summary));
        }
        Command::Convert { dir, to } => {
            let dir = dir.unwrap_or_else(config::default_image_dir);
            let mut cfg = config::load_config(&dir)?;
            if let Some(extension) = to {
                cfg.output_extension = extension;
                cfg.validate()?;
            }
            println!("{}", output::run_header("Convert", &dir));
            let summary = process::convert_run(&dir, &cfg)?;
            println!(
                "Output: {}",
                process::convert_output_dir(&dir, &cfg.output_extension).display()
            );
            println!("{}", output::summary_line("convert", &summary));
        }
    }

    Ok(())
}
