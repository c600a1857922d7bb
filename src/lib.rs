//! docxzero - Pure-Rust Word (DOCX) parser and exact Markdown extractor
//!
//! This crate reads Word documents (DOCX) and converts them to Markdown,
//! preserving paragraph order, heading levels, and table structure.
//!
//! Paragraphs are emitted first, in document order, with heading styles
//! (`Title`, `Heading 1` .. `Heading 6`) mapped to Markdown headings. Tables
//! follow in a dedicated section, each rendered as a rectangular pipe table.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use docxzero::ConverterBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let converter = ConverterBuilder::new().build()?;
//!
//!     // Writes report_exact_extraction.md next to the input
//!     let report = converter.convert_file("report.docx")?;
//!     println!("{} lines written to {}", report.markdown.len(), report.output_path.display());
//!
//!     Ok(())
//! }
//! ```
//!
//! For in-memory conversion, use `Cursor`:
//!
//! ```rust,no_run
//! use std::io::Cursor;
//! use docxzero::ConverterBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let converter = ConverterBuilder::new().build()?;
//! let docx_data: Vec<u8> = vec![]; // Your DOCX file bytes
//! let markdown = converter.convert_to_string(Cursor::new(docx_data))?;
//! # Ok(())
//! # }
//! ```
//!
//! # Custom Configuration
//!
//! ```rust,no_run
//! use std::fs::File;
//! use docxzero::{ConverterBuilder, StyleMatching};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let converter = ConverterBuilder::new()
//!         .with_style_matching(StyleMatching::Exact)  // "My Heading 1" stays plain text
//!         .with_tables_label("DOCUMENT TABLES")
//!         .build()?;
//!
//!     let input = File::open("report.docx")?;
//!     let output = File::create("report.md")?;
//!     converter.convert(input, output)?;
//!
//!     Ok(())
//! }
//! ```

mod api;
mod builder;
mod error;
mod formatter;
mod grid;
mod output;
mod parser;
mod security;
mod types;

// 公開API
pub use api::{HeadingLevel, StyleMatching};
pub use builder::{ConversionReport, Converter, ConverterBuilder, DEFAULT_TABLES_LABEL};
pub use error::DocxToMdError;
pub use formatter::heading_level;
pub use output::{output_path_for, MarkdownDocument, OUTPUT_SUFFIX};
pub use types::{Cell, Document, Paragraph, Row, Table};
