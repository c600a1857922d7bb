//! docxzero CLI - exact DOCX to Markdown extraction

use std::error::Error as _;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};

use docxzero::{
    ConversionReport, ConverterBuilder, Document, DocxToMdError, StyleMatching, DEFAULT_TABLES_LABEL,
};

#[derive(Parser)]
#[command(name = "docxzero")]
#[command(version)]
#[command(about = "Extract a Word document (DOCX) to Markdown exactly as it appears", long_about = None)]
struct Cli {
    /// Input DOCX file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Output file (defaults to <FILE stem>_exact_extraction.md)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// How paragraph style names are matched to heading levels
    #[arg(long, value_enum, default_value = "contains")]
    style_matching: MatchingMode,

    /// Heading line of the tables section
    #[arg(long, default_value = DEFAULT_TABLES_LABEL)]
    tables_label: String,

    /// Number of generated lines to preview
    #[arg(long, default_value = "50")]
    preview_lines: usize,

    /// Print the parsed document structure as JSON and exit
    #[arg(long)]
    dump_structure: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum MatchingMode {
    /// Exact style names only
    Exact,
    /// Exact names, then names containing "Title" / "Heading N"
    Contains,
}

impl From<MatchingMode> for StyleMatching {
    fn from(mode: MatchingMode) -> Self {
        match mode {
            MatchingMode::Exact => StyleMatching::Exact,
            MatchingMode::Contains => StyleMatching::ExactThenContains,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = if cli.dump_structure {
        cmd_dump_structure(&cli)
    } else {
        cmd_convert(&cli)
    };

    if let Err(e) = result {
        handle_error(&e);
        process::exit(1);
    }
}

fn cmd_convert(cli: &Cli) -> Result<(), DocxToMdError> {
    let converter = ConverterBuilder::new()
        .with_style_matching(cli.style_matching.into())
        .with_tables_label(cli.tables_label.clone())
        .build()?;

    let report = match &cli.output {
        Some(output) => converter.convert_file_to(&cli.input, output)?,
        None => converter.convert_file(&cli.input)?,
    };

    println!("=== DOCUMENT STRUCTURE ===");
    println!("Total paragraphs: {}", report.paragraph_count);
    println!("Total tables: {}", report.table_count);
    println!();
    println!("Exact extraction markdown file created: {}", report.output_path.display());
    println!();
    print_preview(&report, cli.preview_lines);

    Ok(())
}

fn cmd_dump_structure(cli: &Cli) -> Result<(), DocxToMdError> {
    if !cli.input.is_file() {
        return Err(DocxToMdError::FileNotFound {
            path: cli.input.clone(),
        });
    }

    let converter = ConverterBuilder::new().build()?;
    let document = converter.load(File::open(&cli.input)?)?;

    write_structure(io::stdout().lock(), &document)
}

/// 文書モデルをJSONとして書き出す
fn write_structure<W: Write>(mut out: W, document: &Document) -> Result<(), DocxToMdError> {
    serde_json::to_writer_pretty(&mut out, document).map_err(io::Error::from)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

fn print_preview(report: &ConversionReport, limit: usize) {
    println!("=== CONTENT PREVIEW ===");
    let lines = report.markdown.lines();
    for (i, line) in lines.iter().take(limit).enumerate() {
        println!("{:3}: {}", i + 1, line);
    }

    if lines.len() > limit {
        println!("\n... ({} more lines in the file)", lines.len() - limit);
    }
}

fn handle_error(error: &DocxToMdError) {
    eprintln!("Error: {}", error);

    match error {
        DocxToMdError::FileNotFound { .. } => {
            eprintln!("Please check that the input path is correct.");
        }
        e if e.is_parse_error() => {
            eprintln!("The file may not be a valid Word document or may be corrupted.");
        }
        DocxToMdError::Io(_) => {
            eprintln!("Please check that you have permission to read the input and write the output.");
        }
        _ => {}
    }

    let mut source = error.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {}", cause);
        source = cause.source();
    }
}
