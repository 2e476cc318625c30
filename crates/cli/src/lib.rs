use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use image::RgbImage;
use pagetex_db::{Options, PagedImage, Registry};
use serde::Serialize;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "pagetex-cli")]
#[command(about = "Load PDF pages the way the scene graph does")]
pub struct Cli {
    /// Extra directory to search for input files (repeatable).
    #[arg(long = "search-path", value_name = "DIR", global = true)]
    search_paths: Vec<PathBuf>,
    /// Render pages at this multiple of their size in points.
    #[arg(long, global = true)]
    scale: Option<f32>,
    /// Log every renderer invocation.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print machine-readable details of the first page.
    Info {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Rasterize a page to PNG.
    Render {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// List the registered file extensions.
    Formats,
    /// Print CLI version.
    Version,
}

// Fields are kept in alphabetical order so the JSON is stable.
#[derive(Debug, Serialize)]
struct InfoOutput {
    height: u32,
    origin: &'static str,
    page_count: u32,
    path: String,
    width: u32,
}

pub fn run<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    let level = if cli.verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    // A logger may already be installed when run is called more than once.
    let _ = TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto);

    let mut registry = Registry::new();
    pagetex_pdf::register(&mut registry);
    log::debug!("{} reader(s) registered", registry.len());

    match &cli.command {
        Commands::Info { file } => run_info(&registry, &options(&cli)?, file),
        Commands::Render { file, page, output } => {
            run_render(&registry, &options(&cli)?, file, *page, output.as_deref())
        }
        Commands::Formats => {
            for info in registry.extensions() {
                println!("{}\t{}\t{}", info.extension, info.description, info.plugin);
            }
            Ok(())
        }
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// Environment options with the command-line flags layered on top.
fn options(cli: &Cli) -> Result<Options> {
    let mut options = Options::from_env().context("invalid environment configuration")?;

    for path in &cli.search_paths {
        options = options.with_search_path(path);
    }

    if let Some(scale) = cli.scale {
        let option_string = format!("{} scale={scale}", options.option_string);
        options = options.with_option_string(option_string.trim())?;
    }

    Ok(options)
}

fn open(registry: &Registry, options: &Options, file: &Path) -> Result<Box<dyn PagedImage>> {
    registry
        .read_image(file, options)
        .with_context(|| format!("failed to open {}", file.display()))
}

fn run_info(registry: &Registry, options: &Options, file: &Path) -> Result<()> {
    let image = open(registry, options, file)?;
    let pixels = image.image();

    let payload = InfoOutput {
        height: pixels.t(),
        origin: pixels.origin().as_str(),
        page_count: image.page_count(),
        path: image.file_name().unwrap_or(file).display().to_string(),
        width: pixels.s(),
    };

    let json = serde_json::to_string_pretty(&payload)?;
    println!("{json}");

    Ok(())
}

fn run_render(
    registry: &Registry,
    options: &Options,
    file: &Path,
    page: u32,
    output: Option<&Path>,
) -> Result<()> {
    if page == 0 {
        anyhow::bail!("--page is 1-based and must be >= 1");
    }

    let mut image = open(registry, options, file)?;
    let page_count = image.page_count();
    if page > page_count {
        anyhow::bail!("page {page} out of range (document has {page_count} pages)");
    }

    if page > 1 {
        image.page(page - 1).map_err(anyhow::Error::from_boxed).context("failed to render page")?;
    }

    let pixels = image.image();
    let rows: Vec<u8> = pixels.rows_top_down().flatten().copied().collect();
    let png = RgbImage::from_raw(pixels.s(), pixels.t(), rows)
        .context("rendered page does not match its dimensions")?;

    let output =
        output.map(ToOwned::to_owned).unwrap_or_else(|| default_render_output(file, page));

    if let Some(parent) = output.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    png.save(&output).with_context(|| format!("failed to write image to {}", output.display()))?;

    println!("{}", output.display());

    Ok(())
}

fn default_render_output(file: &Path, page: u32) -> PathBuf {
    let stem = file.file_stem().and_then(|name| name.to_str()).unwrap_or("page");

    file.with_file_name(format!("{stem}-page-{page}.png"))
}
