//! docgrid CLI - document model conversion tool

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docgrid::{
    from_json, render, resolve_titles, to_records, records_to_json, ElementKind, JsonFormat,
    OutputFormat, RenderOptions, ResolveOptions,
};

#[derive(Parser)]
#[command(name = "docgrid")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Convert serialized document models to Markdown, HTML, and table records", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert documents to Markdown
    #[command(alias = "md")]
    Markdown {
        /// Input document files (JSON)
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<PathBuf>,

        /// Output file or directory (stdout for a single input if omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        #[command(flatten)]
        resolve: ResolveArgs,

        /// Do not attach resolved captions to tables
        #[arg(long)]
        no_captions: bool,

        /// Maximum heading level (1-6)
        #[arg(long, default_value = "6")]
        max_heading: u8,
    },

    /// Convert documents to HTML
    Html {
        /// Input document files (JSON)
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<PathBuf>,

        /// Output file or directory (stdout for a single input if omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        #[command(flatten)]
        resolve: ResolveArgs,

        /// Do not attach resolved captions to tables
        #[arg(long)]
        no_captions: bool,
    },

    /// Extract table records as JSON
    Records {
        /// Input document files (JSON)
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<PathBuf>,

        /// Output file or directory (stdout for a single input if omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        #[command(flatten)]
        resolve: ResolveArgs,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show document information
    Info {
        /// Input document file (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

#[derive(clap::Args)]
struct ResolveArgs {
    /// Caption distance threshold in points (default: 1/10 of page height)
    #[arg(long, value_name = "POINTS")]
    caption_distance: Option<f32>,

    /// Comma-separated caption label tokens
    #[arg(long, value_name = "LABELS", value_delimiter = ',')]
    caption_labels: Option<Vec<String>>,

    /// Resolve tables sequentially
    #[arg(long)]
    sequential: bool,
}

impl ResolveArgs {
    fn to_options(&self) -> ResolveOptions {
        let mut options = ResolveOptions::new();
        if let Some(distance) = self.caption_distance {
            options = options.with_distance_threshold(distance);
        }
        if let Some(ref labels) = self.caption_labels {
            options = options.with_caption_labels(labels.iter().cloned());
        }
        if self.sequential {
            options = options.sequential();
        }
        options
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let failed = match cli.command {
        Commands::Markdown {
            inputs,
            output,
            resolve,
            no_captions,
            max_heading,
        } => {
            let render_options = RenderOptions::new()
                .with_captions(!no_captions)
                .with_max_heading(max_heading);
            convert_batch(&inputs, output.as_deref(), "md", |data| {
                convert_one(data, &resolve.to_options(), |doc| {
                    render(doc, OutputFormat::Markdown, &render_options)
                })
            })
        }
        Commands::Html {
            inputs,
            output,
            resolve,
            no_captions,
        } => {
            let render_options = RenderOptions::new().with_captions(!no_captions);
            convert_batch(&inputs, output.as_deref(), "html", |data| {
                convert_one(data, &resolve.to_options(), |doc| {
                    render(doc, OutputFormat::Html, &render_options)
                })
            })
        }
        Commands::Records {
            inputs,
            output,
            resolve,
            compact,
        } => {
            let format = if compact {
                JsonFormat::Compact
            } else {
                JsonFormat::Pretty
            };
            convert_batch(&inputs, output.as_deref(), "json", |data| {
                convert_one(data, &resolve.to_options(), |doc| {
                    records_to_json(&to_records(doc)?, format)
                })
            })
        }
        Commands::Info { input } => match show_info(&input) {
            Ok(()) => 0,
            Err(e) => {
                eprintln!("{} {}: {}", "error:".red().bold(), input.display(), e);
                1
            }
        },
    };

    if failed > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Load, resolve, and render one document.
fn convert_one(
    data: &[u8],
    resolve_options: &ResolveOptions,
    render_fn: impl Fn(&docgrid::Document) -> docgrid::Result<String>,
) -> docgrid::Result<String> {
    let mut doc = from_json(data)?;
    let resolved = resolve_titles(&mut doc, resolve_options)?;
    log::info!("resolved {} table titles", resolved);
    render_fn(&doc)
}

/// Convert each input, isolating failures per file. Returns the number of
/// failed inputs.
fn convert_batch(
    inputs: &[PathBuf],
    output: Option<&Path>,
    extension: &str,
    convert: impl Fn(&[u8]) -> docgrid::Result<String>,
) -> usize {
    let progress = if inputs.len() > 1 {
        let bar = ProgressBar::new(inputs.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{bar:30} {pos}/{len} {msg}")
                .expect("static template"),
        );
        Some(bar)
    } else {
        None
    };

    let mut failed = 0;
    for input in inputs {
        if let Some(ref bar) = progress {
            bar.set_message(input.display().to_string());
        }

        let result = fs::read(input)
            .map_err(docgrid::Error::from)
            .and_then(|data| convert(&data))
            .and_then(|rendered| write_output(input, output, extension, &rendered, inputs.len()));

        match result {
            Ok(()) => {
                if progress.is_none() {
                    log::info!("converted {}", input.display());
                }
            }
            Err(e) => {
                failed += 1;
                eprintln!("{} {}: {}", "error:".red().bold(), input.display(), e);
            }
        }

        if let Some(ref bar) = progress {
            bar.inc(1);
        }
    }

    if let Some(bar) = progress {
        bar.finish_and_clear();
        let ok = inputs.len() - failed;
        println!(
            "{} {} converted, {} failed",
            "done:".green().bold(),
            ok,
            failed
        );
    }

    failed
}

/// Write rendered output next to the chosen output path, or to stdout for
/// a single input with no output path.
fn write_output(
    input: &Path,
    output: Option<&Path>,
    extension: &str,
    rendered: &str,
    input_count: usize,
) -> docgrid::Result<()> {
    match output {
        None if input_count == 1 => {
            println!("{}", rendered);
            Ok(())
        }
        None => {
            let path = input.with_extension(extension);
            fs::write(path, rendered)?;
            Ok(())
        }
        Some(path) if path.is_dir() || input_count > 1 => {
            fs::create_dir_all(path)?;
            let name = input
                .file_stem()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string();
            fs::write(path.join(format!("{}.{}", name, extension)), rendered)?;
            Ok(())
        }
        Some(path) => {
            fs::write(path, rendered)?;
            Ok(())
        }
    }
}

/// Print a summary of a document's contents.
fn show_info(input: &Path) -> docgrid::Result<()> {
    let data = fs::read(input)?;
    let doc = from_json(&data)?;

    let mut text_blocks = 0;
    let mut headers = 0;
    let mut tables = 0;
    let mut figures = 0;
    let mut titled_tables = 0;
    for el in doc.elements() {
        match &el.kind {
            ElementKind::TextBlock { .. } => text_blocks += 1,
            ElementKind::Header { .. } => headers += 1,
            ElementKind::Table(t) => {
                tables += 1;
                if t.title.is_some() {
                    titled_tables += 1;
                }
            }
            ElementKind::Figure { .. } => figures += 1,
        }
    }

    println!("{}", input.display().to_string().bold());
    println!("  pages:       {}", doc.page_count());
    println!("  elements:    {}", doc.element_count());
    println!("  text blocks: {}", text_blocks);
    println!("  headers:     {}", headers);
    println!("  tables:      {} ({} titled)", tables, titled_tables);
    println!("  figures:     {}", figures);
    Ok(())
}
