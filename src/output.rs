//! Output Module
//!
//! 生成したMarkdownの行バッファと、出力ファイル名の導出を提供するモジュール。

use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::DocxToMdError;

/// 出力ファイル名の接尾辞（入力ファイルの拡張子を置き換える）
pub const OUTPUT_SUFFIX: &str = "_exact_extraction.md";

/// 生成されたMarkdown文書
///
/// 行の追加のみが可能なバッファです。各行は`\n`で終端して書き出されます。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkdownDocument {
    lines: Vec<String>,
}

impl MarkdownDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// 行を追加
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// 空行を追加
    pub fn push_blank(&mut self) {
        self.lines.push(String::new());
    }

    pub fn extend<I>(&mut self, lines: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.lines.extend(lines);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// 行を書き出す
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), DocxToMdError> {
        for line in &self.lines {
            writeln!(writer, "{}", line)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// 文書全体を1つの文字列として取得
    pub fn to_markdown(&self) -> String {
        let capacity = self.lines.iter().map(|l| l.len() + 1).sum();
        let mut out = String::with_capacity(capacity);
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

/// 入力パスから出力パスを導出
///
/// 同じディレクトリで、拡張子を`_exact_extraction.md`に置き換えます。
///
/// # 使用例
///
/// ```rust
/// use std::path::Path;
/// use docxzero::output_path_for;
///
/// assert_eq!(
///     output_path_for(Path::new("reports/q3.docx")),
///     Path::new("reports/q3_exact_extraction.md")
/// );
/// ```
pub fn output_path_for(input: &Path) -> PathBuf {
    // UTF-8でないファイル名もそのまま保持する
    let mut file_name = input.file_stem().map(OsString::from).unwrap_or_default();
    file_name.push(OUTPUT_SUFFIX);

    input.with_file_name(file_name)
}
