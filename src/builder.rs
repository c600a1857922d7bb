//! Builder Module
//!
//! Fluent Builder APIを提供し、`Converter`インスタンスを段階的に構築する。

use std::fs::File;
use std::io::{BufWriter, Cursor, Read, Seek, Write};
use std::path::{Path, PathBuf};

use crate::api::StyleMatching;
use crate::error::DocxToMdError;
use crate::formatter::ParagraphFormatter;
use crate::grid::MarkdownTable;
use crate::output::{output_path_for, MarkdownDocument};
use crate::parser::DocxParser;
use crate::security::SecurityConfig;
use crate::types::Document;

/// 表セクションの見出しラベル（デフォルト）
pub const DEFAULT_TABLES_LABEL: &str = "TABLES SECTION";

/// 段落と表セクションを区切る水平線
const SECTION_RULE: &str = "---";

/// 変換処理の設定を保持する内部構造体
#[derive(Debug, Clone)]
pub(crate) struct ConversionConfig {
    /// 見出しスタイルの判定方式
    pub style_matching: StyleMatching,

    /// 表セクションの見出しラベル
    pub tables_label: String,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            style_matching: StyleMatching::ExactThenContains,
            tables_label: DEFAULT_TABLES_LABEL.to_string(),
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use docxzero::{ConverterBuilder, StyleMatching};
///
/// # fn main() -> Result<(), docxzero::DocxToMdError> {
/// let converter = ConverterBuilder::new()
///     .with_style_matching(StyleMatching::Exact)
///     .with_tables_label("DOCUMENT TABLES")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConverterBuilder {
    config: ConversionConfig,
}

impl Default for ConverterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConverterBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - 見出し判定: 完全一致、次に部分一致
    /// - 表セクションのラベル: `TABLES SECTION`
    pub fn new() -> Self {
        Self {
            config: ConversionConfig::default(),
        }
    }

    /// 段落スタイル名から見出しを判定する方式を指定する
    pub fn with_style_matching(mut self, matching: StyleMatching) -> Self {
        self.config.style_matching = matching;
        self
    }

    /// 表セクションの見出しラベルを指定する
    ///
    /// 出力には`# <label>`として書き出されます。
    pub fn with_tables_label(mut self, label: impl Into<String>) -> Self {
        self.config.tables_label = label.into();
        self
    }

    /// 設定を検証し、`Converter`インスタンスを生成する
    ///
    /// # 発生し得るエラー
    ///
    /// * `DocxToMdError::Config(String)`: ラベルが空、または改行を含む場合
    pub fn build(self) -> Result<Converter, DocxToMdError> {
        let label = self.config.tables_label.trim();
        if label.is_empty() {
            return Err(DocxToMdError::Config(
                "Tables section label must not be empty".to_string(),
            ));
        }
        if label.contains(|c: char| c == '\n' || c == '\r') {
            return Err(DocxToMdError::Config(format!(
                "Tables section label must be a single line: {:?}",
                label
            )));
        }

        Ok(Converter::new(self.config))
    }
}

/// ファイル変換の結果
#[derive(Debug, Clone)]
pub struct ConversionReport {
    /// 書き出したMarkdownファイルのパス
    pub output_path: PathBuf,

    /// 生成したMarkdown
    pub markdown: MarkdownDocument,

    /// 入力文書の段落数（空の段落を含む）
    pub paragraph_count: usize,

    /// 入力文書の表の数
    pub table_count: usize,
}

/// 変換処理のファサード
///
/// Word文書をMarkdown形式に変換するためのメインエントリーポイントです。
///
/// # 使用例
///
/// ```rust,no_run
/// use docxzero::ConverterBuilder;
/// use std::fs::File;
///
/// # fn main() -> Result<(), docxzero::DocxToMdError> {
/// let converter = ConverterBuilder::new().build()?;
/// let input = File::open("report.docx")?;
/// let mut output = Vec::new();
/// converter.convert(input, &mut output)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Converter {
    config: ConversionConfig,
    formatter: ParagraphFormatter,
}

impl Converter {
    pub(crate) fn new(config: ConversionConfig) -> Self {
        Self {
            formatter: ParagraphFormatter::new(config.style_matching),
            config,
        }
    }

    /// DOCXを読み込み、文書モデルを返す
    ///
    /// 入力全体をメモリに読み込んでから解析します。
    pub fn load<R: Read + Seek>(&self, mut input: R) -> Result<Document, DocxToMdError> {
        let security_config = SecurityConfig::default();
        let mut buffer = Vec::new();
        let bytes_read = input.read_to_end(&mut buffer)?;

        if bytes_read as u64 > security_config.max_input_file_size {
            return Err(DocxToMdError::SecurityViolation(format!(
                "Input file size exceeds maximum: {} bytes (max: {} bytes)",
                bytes_read, security_config.max_input_file_size
            )));
        }

        let parser = DocxParser::open(Cursor::new(buffer))?;
        log::debug!("Reading main document part '{}'", parser.document_part());

        let document = parser.parse_document()?;
        log::info!(
            "Document structure: {} paragraphs, {} tables",
            document.paragraphs.len(),
            document.tables.len()
        );

        Ok(document)
    }

    /// 文書モデルをMarkdownに変換
    ///
    /// # 処理フロー
    ///
    /// 1. 段落を文書順に処理（空の段落はスキップ、各行の後に空行）
    /// 2. 表が1つ以上あれば、水平線・空行・セクション見出し・空行を出力
    /// 3. 各表について`## Table N`、空行、パイプテーブル、空行を出力
    pub fn render(&self, document: &Document) -> MarkdownDocument {
        let mut markdown = MarkdownDocument::new();

        for (idx, paragraph) in document.paragraphs.iter().enumerate() {
            if let Some(line) = self.formatter.format_paragraph(paragraph) {
                log::debug!(
                    "Paragraph {}: Style='{}', Text='{}'",
                    idx + 1,
                    paragraph.style_name,
                    preview(&paragraph.text)
                );
                markdown.push(line);
                markdown.push_blank();
            }
        }

        if document.tables.is_empty() {
            return markdown;
        }

        markdown.push(SECTION_RULE);
        markdown.push_blank();
        markdown.push(format!("# {}", self.config.tables_label.trim()));
        markdown.push_blank();

        for (idx, table) in document.tables.iter().enumerate() {
            for (row_idx, row) in table.rows.iter().enumerate() {
                log::debug!("Table {} row {}: {} columns", idx + 1, row_idx + 1, row.cells.len());
            }

            let grid = MarkdownTable::build(table);
            log::debug!("Table {}: {} rows x {} columns", idx + 1, grid.rows(), grid.cols());

            markdown.push(format!("## Table {}", idx + 1));
            markdown.push_blank();
            markdown.extend(grid.markdown_lines());
            markdown.push_blank();
        }

        markdown
    }

    /// DOCXをMarkdown形式に変換して書き出す
    ///
    /// 解析がすべて成功してから書き込みを開始します。
    pub fn convert<R: Read + Seek, W: Write>(
        &self,
        input: R,
        mut output: W,
    ) -> Result<(), DocxToMdError> {
        let document = self.load(input)?;
        let markdown = self.render(&document);

        let mut writer = BufWriter::new(&mut output);
        markdown.write_to(&mut writer)?;
        writer.flush()?;

        Ok(())
    }

    /// DOCXをMarkdown形式の文字列に変換
    pub fn convert_to_string<R: Read + Seek>(&self, input: R) -> Result<String, DocxToMdError> {
        let document = self.load(input)?;
        Ok(self.render(&document).to_markdown())
    }

    /// DOCXファイルを変換し、`<stem>_exact_extraction.md`に書き出す
    ///
    /// 既存の出力ファイルは上書きされます。入力ファイルが存在しない場合や
    /// 解析に失敗した場合、出力ファイルは作成されません。
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use docxzero::ConverterBuilder;
    ///
    /// # fn main() -> Result<(), docxzero::DocxToMdError> {
    /// let converter = ConverterBuilder::new().build()?;
    /// let report = converter.convert_file("report.docx")?;
    /// println!("{}", report.output_path.display());
    /// # Ok(())
    /// # }
    /// ```
    pub fn convert_file<P: AsRef<Path>>(&self, input: P) -> Result<ConversionReport, DocxToMdError> {
        let output_path = output_path_for(input.as_ref());
        self.convert_file_to(input, output_path)
    }

    /// DOCXファイルを変換し、指定したパスに書き出す
    pub fn convert_file_to<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output: Q,
    ) -> Result<ConversionReport, DocxToMdError> {
        let input = input.as_ref();
        if !input.is_file() {
            return Err(DocxToMdError::FileNotFound {
                path: input.to_path_buf(),
            });
        }

        // 入力ファイルは読み込み後すぐに閉じる
        let document = {
            let file = File::open(input)?;
            self.load(file)?
        };
        let markdown = self.render(&document);

        let output_path = output.as_ref().to_path_buf();
        let mut writer = BufWriter::new(File::create(&output_path)?);
        markdown.write_to(&mut writer)?;
        writer.flush()?;
        log::info!("Exact extraction markdown file created: {}", output_path.display());

        Ok(ConversionReport {
            output_path,
            markdown,
            paragraph_count: document.paragraphs.len(),
            table_count: document.tables.len(),
        })
    }
}

/// ログ用に段落テキストの先頭50文字を取得
fn preview(text: &str) -> String {
    const MAX_CHARS: usize = 50;
    match text.char_indices().nth(MAX_CHARS) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
