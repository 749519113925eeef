use clap::{Parser, Subcommand};
use respimg::imaging::{Quality, RustBackend};
use respimg::{attrs, config, convert, match_size, output, sizes, variants};
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
            // Leaked once at startup; trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "respimg")]
#[command(about = "Responsive WebP tooling for static site images")]
#[command(long_about = "\
Responsive WebP tooling for static site images

The filesystem is the database: sources sit next to their generated variants,
and re-running any command is safe: existing outputs are skipped unless
--force is given.

Source naming:

  static/images/infra/
  ├── infra1.jpg              # Source asset (prefix + number)
  ├── infra1-480.webp         # Generated variant (never rescanned as source)
  ├── infra1-800.webp
  ├── infra2.png
  └── respimg.toml            # Optional per-directory defaults

When the same base exists under several extensions, the source is chosen by
priority (jpg > jpeg > png > webp), not by directory order.

A dry run (--dry-run) prints exactly the filenames a real run would create
and writes nothing.")]
#[command(version = version_string())]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate width-scaled WebP variants for srcset use
    Variants(VariantsArgs),
    /// Convert rasters under a directory tree to sibling WebP files
    Convert(ConvertArgs),
    /// Resize images to match a reference image's dimensions
    MatchSize(MatchSizeArgs),
    /// Add loading="lazy" decoding="async" to <img> tags in HTML files
    ImgAttrs(ImgAttrsArgs),
}

#[derive(clap::Args)]
struct VariantsArgs {
    /// Source and output directory
    #[arg(default_value = ".")]
    dir: PathBuf,

    /// Base-name prefix of source images (infra matches infra1.jpg)
    #[arg(long)]
    prefix: Option<String>,

    /// Comma-separated target widths, e.g. 480,800,1200
    #[arg(long)]
    sizes: Option<String>,

    /// WebP quality (0-100)
    #[arg(long)]
    quality: Option<u32>,

    /// Overwrite existing variants
    #[arg(long)]
    force: bool,

    /// Report intended actions without writing
    #[arg(long)]
    dry_run: bool,
}

#[derive(clap::Args)]
struct ConvertArgs {
    /// Root directory to walk
    #[arg(default_value = ".")]
    dir: PathBuf,

    /// WebP quality (0-100)
    #[arg(long)]
    quality: Option<u32>,

    /// Overwrite existing .webp outputs
    #[arg(long)]
    force: bool,

    /// Report intended actions without writing
    #[arg(long)]
    dry_run: bool,
}

#[derive(clap::Args)]
struct MatchSizeArgs {
    /// Directory holding the reference and target images
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// Image whose dimensions the targets are resized to
    #[arg(long)]
    reference: String,

    /// Target filenames within the directory
    #[arg(required = true)]
    targets: Vec<String>,

    /// WebP quality (0-100)
    #[arg(long, default_value_t = 90)]
    quality: u32,

    /// Report intended actions without writing
    #[arg(long)]
    dry_run: bool,
}

#[derive(clap::Args)]
struct ImgAttrsArgs {
    /// Directory of HTML templates
    #[arg(default_value = ".")]
    dir: PathBuf,

    /// Report intended changes without writing
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let backend = RustBackend::new();

    match cli.command {
        Command::Variants(args) => {
            let defaults = config::load(&args.dir)?;

            let (widths, warnings) = match &args.sizes {
                Some(list) => sizes::parse_size_list(list).resolve(&defaults.sizes),
                None => (defaults.sizes.clone(), Vec::new()),
            };
            for warning in &warnings {
                eprintln!("Warning: {warning}");
            }

            let vconfig = variants::VariantConfig {
                prefix: args.prefix.unwrap_or(defaults.prefix),
                sizes: widths,
                quality: Quality::new(args.quality.unwrap_or(defaults.quality)),
                force: args.force,
                dry_run: args.dry_run,
            };

            let stats = variants::generate(&backend, &args.dir, &vconfig, &mut |event| {
                output::print_variant_event(&event)
            })?;
            println!("{}", output::format_summary(&stats));
        }
        Command::Convert(args) => {
            let defaults = config::load(&args.dir)?;
            let stats = convert::convert_tree(
                &backend,
                &args.dir,
                Quality::new(args.quality.unwrap_or(defaults.quality)),
                args.force,
                args.dry_run,
                &mut |event| output::print_convert_event(&event),
            )?;
            println!("{}", output::format_summary(&stats));
        }
        Command::MatchSize(args) => {
            let stats = match_size::match_reference(
                &backend,
                &args.dir,
                &args.reference,
                &args.targets,
                Quality::new(args.quality),
                args.dry_run,
                &mut |event| output::print_match_event(&event),
            )?;
            println!("{}", output::format_summary(&stats));
        }
        Command::ImgAttrs(args) => {
            let stats = attrs::inject_attrs(&args.dir, args.dry_run, &mut |event| {
                output::print_attr_event(&event)
            })?;
            println!("{}", output::format_attr_summary(&stats));
        }
    }

    Ok(())
}
