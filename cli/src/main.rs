//! untable CLI - Word document text extraction with flattened tables

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use untable::{
    parse_file_with_options, render, CleanupPreset, JsonFormat, ParseOptions, RenderOptions,
};

#[derive(Parser)]
#[command(name = "untable")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Extract Word document text, flattening tables into header: value lines", long_about = None)]
struct Cli {
    /// Input DOCX file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output text file (defaults to <FILE stem>.txt next to the input)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(flatten)]
    render: RenderArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Args, Clone)]
struct RenderArgs {
    /// Line drawn above and below every table record
    #[arg(long, env = "UNTABLE_BORDER", value_name = "TEXT")]
    border: Option<String>,

    /// Skip tables whose headers cannot be made unique instead of failing
    #[arg(long)]
    skip_malformed: bool,

    /// Text cleanup preset
    #[arg(long, value_enum)]
    cleanup: Option<CleanupLevel>,

    /// Keep content read before an XML error instead of failing
    #[arg(long)]
    lenient: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert DOCX to plain text
    Text {
        /// Input DOCX file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Convert DOCX to a JSON array of paragraphs and records
    Json {
        /// Input DOCX file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Show document information
    Info {
        /// Input DOCX file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum CleanupLevel {
    /// Unicode normalization and trailing whitespace only
    Minimal,
    /// Also drop symbol-font glyphs and collapse spaces
    Standard,
}

impl From<CleanupLevel> for CleanupPreset {
    fn from(level: CleanupLevel) -> Self {
        match level {
            CleanupLevel::Minimal => CleanupPreset::Minimal,
            CleanupLevel::Standard => CleanupPreset::Standard,
        }
    }
}

impl RenderArgs {
    fn parse_options(&self) -> ParseOptions {
        if self.lenient {
            ParseOptions::new().lenient()
        } else {
            ParseOptions::new()
        }
    }

    fn render_options(&self) -> RenderOptions {
        let mut options = RenderOptions::new();
        if let Some(ref border) = self.border {
            options = options.with_table_border(border.clone());
        }
        if self.skip_malformed {
            options = options.skip_malformed_tables();
        }
        if let Some(level) = self.cleanup {
            options = options.with_cleanup_preset(level.into());
        }
        options
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Text {
            input,
            output,
            render,
        }) => cmd_text(&input, output.as_deref(), &render),
        Some(Commands::Json {
            input,
            output,
            compact,
            render,
        }) => cmd_json(&input, output.as_deref(), compact, &render),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: write text next to the input
            if let Some(input) = cli.input {
                cmd_convert(&input, cli.output.as_deref(), &cli.render)
            } else {
                println!("{}", "Usage: untable <FILE> [OUTPUT]".yellow());
                println!("       untable --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn default_output(input: &Path) -> PathBuf {
    input.with_extension("txt")
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    args: &RenderArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output(input));

    let doc = parse_file_with_options(input, args.parse_options())?;
    if doc.is_empty() {
        log::warn!("{} has no body content", input.display());
    }
    let result = render::render_with_stats(&doc, &args.render_options())?;
    fs::write(&output, &result.content)?;
    log::debug!(
        "Wrote {} bytes to {}",
        result.content_len(),
        output.display()
    );

    println!(
        "{} {} ({} records, {} paragraphs)",
        "Saved to".green(),
        output.display(),
        result.stats.record_count,
        result.stats.text_paragraph_count
    );

    Ok(())
}

fn cmd_text(
    input: &Path,
    output: Option<&Path>,
    args: &RenderArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = parse_file_with_options(input, args.parse_options())?;
    let text = render::to_text(&doc, &args.render_options())?;

    if let Some(path) = output {
        fs::write(path, &text)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", text);
    }

    Ok(())
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    args: &RenderArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = parse_file_with_options(input, args.parse_options())?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = render::to_json(&doc, &args.render_options(), format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let doc = parse_file_with_options(input, ParseOptions::new().lenient())?;
    let meta = &doc.metadata;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!(
        "{}: {}",
        "Format".bold(),
        if meta.macro_enabled { "DOCM" } else { "DOCX" }
    );

    if meta.is_empty() {
        println!("{}", "No document properties".dimmed());
    }

    let properties = [
        ("Title", &meta.title),
        ("Subject", &meta.subject),
        ("Creator", &meta.creator),
        ("Keywords", &meta.keywords),
        ("Last modified by", &meta.last_modified_by),
        ("Revision", &meta.revision),
    ];
    for (label, value) in properties {
        if let Some(value) = value {
            println!("{}: {}", label.bold(), value);
        }
    }
    if let Some(ref created) = meta.created {
        println!("{}: {}", "Created".bold(), created);
    }
    if let Some(ref modified) = meta.modified {
        println!("{}: {}", "Modified".bold(), modified);
    }

    // Statistics should show even when a table is malformed
    let options = RenderOptions::new().skip_malformed_tables();
    let stats = render::render_with_stats(&doc, &options)?.stats;
    if stats.skipped_table_count > 0 {
        log::warn!(
            "{} table(s) with ambiguous headers left out of the counts",
            stats.skipped_table_count
        );
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Sections".bold(), stats.section_count);
    println!("{}: {}", "Tables".bold(), stats.table_count);
    println!("{}: {}", "Layout tables".bold(), stats.layout_table_count);
    if stats.skipped_table_count > 0 {
        println!(
            "{}: {}",
            "Malformed tables".bold().yellow(),
            stats.skipped_table_count
        );
    }
    println!("{}: {}", "Records".bold(), stats.record_count);
    println!("{}: {}", "Paragraphs".bold(), stats.text_paragraph_count);
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "untable".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Word document text extraction tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/untable".dimmed());
    println!("License: MIT");
}
