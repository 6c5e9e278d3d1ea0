//! vaultdoc CLI - document loading and normalization tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use vaultdoc::render::{self, JsonFormat, OutputFormat};
use vaultdoc::{Document, Vaultdoc};

type CliResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "vaultdoc")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Load and normalize project documents for retrieval", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a document and print it as JSON
    Load {
        /// Project root containing data/raw and data/processed
        #[arg(value_name = "ROOT")]
        root: PathBuf,

        /// Document id
        #[arg(value_name = "DOC_ID")]
        doc_id: String,

        #[command(flatten)]
        load: LoadArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Load and normalize a document
    #[command(alias = "norm")]
    Normalize {
        /// Project root containing data/raw and data/processed
        #[arg(value_name = "ROOT")]
        root: PathBuf,

        /// Document id
        #[arg(value_name = "DOC_ID")]
        doc_id: String,

        #[command(flatten)]
        load: LoadArgs,

        #[command(flatten)]
        normalize: NormalizeArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Load and normalize every document in a project
    Batch {
        /// Project root containing data/raw and data/processed
        #[arg(value_name = "ROOT")]
        root: PathBuf,

        /// Output directory (one file per document)
        #[arg(short, long, value_name = "DIR")]
        output: PathBuf,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        load: LoadArgs,

        #[command(flatten)]
        normalize: NormalizeArgs,
    },

    /// Show where a document comes from and what normalization does to it
    Info {
        /// Project root containing data/raw and data/processed
        #[arg(value_name = "ROOT")]
        root: PathBuf,

        /// Document id
        #[arg(value_name = "DOC_ID")]
        doc_id: String,

        #[command(flatten)]
        load: LoadArgs,

        #[command(flatten)]
        normalize: NormalizeArgs,
    },

    /// List document ids in a project
    List {
        /// Project root containing data/raw and data/processed
        #[arg(value_name = "ROOT")]
        root: PathBuf,

        #[command(flatten)]
        load: LoadArgs,
    },

    /// Show version information
    Version,
}

#[derive(Args, Clone)]
struct LoadArgs {
    /// Characters per page for text without page markers
    #[arg(long, env = "VAULTDOC_BLOCK_SIZE", default_value_t = vaultdoc::loader::DEFAULT_BLOCK_SIZE)]
    block_size: usize,

    /// Ignore manual overrides in the processed directory
    #[arg(long)]
    raw_only: bool,

    /// Treat unreadable PDF pages as blank
    #[arg(long)]
    lenient: bool,
}

#[derive(Args, Clone)]
struct NormalizeArgs {
    /// Leading lines per page considered as headers
    #[arg(long, env = "VAULTDOC_TOP_N", default_value_t = 2)]
    top_n: usize,

    /// Trailing lines per page considered as footers
    #[arg(long, env = "VAULTDOC_BOTTOM_N", default_value_t = 2)]
    bottom_n: usize,

    /// Share of pages a line must appear on to be boilerplate
    #[arg(long, env = "VAULTDOC_THRESHOLD", default_value_t = 0.6)]
    threshold: f64,

    /// Remove pages that look like tables
    #[arg(long, env = "VAULTDOC_DROP_TABLES")]
    drop_tables: bool,

    /// Process pages sequentially
    #[arg(long)]
    sequential: bool,
}

#[derive(Args, Clone)]
struct OutputArgs {
    /// Output file (stdout if not specified)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output compact JSON
    #[arg(long, conflicts_with_all = ["text", "marked"])]
    compact: bool,

    /// Output full text instead of JSON
    #[arg(long, conflicts_with = "marked")]
    text: bool,

    /// Output text with [[PAGE n]] markers instead of JSON
    #[arg(long)]
    marked: bool,
}

impl OutputArgs {
    fn format(&self) -> OutputFormat {
        if self.text {
            OutputFormat::Text
        } else if self.marked {
            OutputFormat::Marked
        } else {
            OutputFormat::Json
        }
    }

    fn json_format(&self) -> JsonFormat {
        json_format(self.compact)
    }
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn build(load: &LoadArgs, normalize: Option<&NormalizeArgs>) -> Vaultdoc {
    let mut builder = Vaultdoc::new().with_block_size(load.block_size);
    if load.raw_only {
        builder = builder.raw_only();
    }
    if load.lenient {
        builder = builder.lenient_pdf();
    }

    if let Some(args) = normalize {
        builder = builder
            .with_top_n(args.top_n)
            .with_bottom_n(args.bottom_n)
            .with_threshold(args.threshold);
        if args.drop_tables {
            builder = builder.drop_table_like_pages();
        }
        if args.sequential {
            builder = builder.sequential();
        }
    }

    builder
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Load {
            root,
            doc_id,
            load,
            output,
        } => cmd_load(&root, &doc_id, &load, &output),
        Commands::Normalize {
            root,
            doc_id,
            load,
            normalize,
            output,
        } => cmd_normalize(&root, &doc_id, &load, &normalize, &output),
        Commands::Batch {
            root,
            output,
            compact,
            load,
            normalize,
        } => cmd_batch(&root, &output, compact, &load, &normalize),
        Commands::Info {
            root,
            doc_id,
            load,
            normalize,
        } => cmd_info(&root, &doc_id, &load, &normalize),
        Commands::List { root, load } => cmd_list(&root, &load),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn emit(doc: &Document, args: &OutputArgs) -> CliResult {
    let rendered = render::render(doc, args.format(), args.json_format())?;

    if let Some(path) = &args.output {
        fs::write(path, &rendered)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", rendered.trim_end());
    }

    Ok(())
}

fn cmd_load(root: &Path, doc_id: &str, load: &LoadArgs, output: &OutputArgs) -> CliResult {
    let doc = build(load, None).load(root, doc_id)?;
    emit(&doc, output)
}

fn cmd_normalize(
    root: &Path,
    doc_id: &str,
    load: &LoadArgs,
    normalize: &NormalizeArgs,
    output: &OutputArgs,
) -> CliResult {
    let doc = build(load, Some(normalize)).process(root, doc_id)?;
    emit(&doc, output)
}

fn cmd_batch(
    root: &Path,
    output_dir: &Path,
    compact: bool,
    load: &LoadArgs,
    normalize: &NormalizeArgs,
) -> CliResult {
    let builder = build(load, Some(normalize));
    builder.validate()?;

    let doc_ids = builder.list_doc_ids(root)?;
    if doc_ids.is_empty() {
        println!("{}", "No documents found".yellow());
        return Ok(());
    }

    fs::create_dir_all(output_dir)?;

    let pb = ProgressBar::new(doc_ids.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let format = json_format(compact);
    let mut failures: Vec<(String, String)> = Vec::new();
    for doc_id in &doc_ids {
        pb.set_message(doc_id.clone());
        let written = builder
            .process(root, doc_id)
            .and_then(|doc| render::to_json(&doc, format))
            .map_err(|e| e.to_string())
            .and_then(|json| {
                fs::write(output_path(output_dir, doc_id), json).map_err(|e| e.to_string())
            });
        if let Err(e) = written {
            log::warn!("{}: {}", doc_id, e);
            failures.push((doc_id.clone(), e));
        }
        pb.inc(1);
    }
    pb.finish_with_message("Done!");

    let succeeded = doc_ids.len() - failures.len();
    println!(
        "\n{} {} of {} documents written to {}",
        "Processed".green().bold(),
        succeeded,
        doc_ids.len(),
        output_dir.display()
    );

    if failures.is_empty() {
        return Ok(());
    }

    println!("\n{}", "Failures:".red().bold());
    for (i, (doc_id, e)) in failures.iter().enumerate() {
        let branch = if i + 1 == failures.len() { "└─" } else { "├─" };
        println!("  {} {}: {}", branch.dimmed(), doc_id.bold(), e);
    }

    Err(format!("{} of {} documents failed", failures.len(), doc_ids.len()).into())
}

fn output_path(dir: &Path, doc_id: &str) -> PathBuf {
    dir.join(format!("{}.{}", doc_id, OutputFormat::Json.extension()))
}

fn cmd_info(root: &Path, doc_id: &str, load: &LoadArgs, normalize: &NormalizeArgs) -> CliResult {
    let builder = build(load, Some(normalize));
    let doc = builder.load(root, doc_id)?;
    let (normalized, report) = builder.normalizer().normalize_with_report(&doc);

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Doc ID".bold(), doc.doc_id);
    println!("{}: {}", "Source".bold(), doc.source_path().display());
    println!("{}: {}", "Type".bold(), doc.file_type);
    println!("{}: {}", "Quality".bold(), doc.source_quality);
    println!("{}: {}", "Pages".bold(), doc.page_count());
    println!("{}: {}", "Page numbers".bold(), format_numbers(&doc.page_numbers()));

    println!();
    println!("{}", "Normalization".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!(
        "{}: {} -> {}",
        "Characters".bold(),
        report.char_count_before,
        report.char_count_after
    );
    println!(
        "{}: {}",
        "Table-like pages".bold(),
        format_numbers(&report.table_like_pages)
    );
    if report.dropped_pages > 0 {
        println!("{}: {}", "Dropped pages".bold(), report.dropped_pages);
    }
    println!("{}: {}", "Pages kept".bold(), normalized.page_count());

    if report.has_boilerplate() {
        println!("{}:", "Boilerplate lines".bold());
        for line in &report.boilerplate_lines {
            println!("  {} {}", "-".dimmed(), line);
        }
    } else {
        println!("{}: none", "Boilerplate lines".bold());
    }

    Ok(())
}

fn format_numbers(numbers: &[u32]) -> String {
    if numbers.is_empty() {
        return "none".to_string();
    }
    numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn cmd_list(root: &Path, load: &LoadArgs) -> CliResult {
    let builder = build(load, None);
    let loader = builder.loader();
    let doc_ids = loader.list_doc_ids(root)?;

    if doc_ids.is_empty() {
        println!("{}", "No documents found".yellow());
        return Ok(());
    }

    for doc_id in &doc_ids {
        match loader.resolve(root, doc_id) {
            Ok(source) => println!(
                "{}  {} ({})",
                doc_id.bold(),
                source.file_type,
                source.source_quality.to_string().dimmed()
            ),
            Err(e) => println!("{}  {}", doc_id.bold(), e.to_string().red()),
        }
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "vaultdoc".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Document loading and normalization tool");
    println!();
    println!("License: MIT");
}
