//! Grid Module
//!
//! 不揃いな行を持つ表から矩形のグリッド構造への変換と、
//! Markdownパイプテーブルとしての出力を提供するモジュール。

use crate::types::{Cell, Table};

/// 区切り行で1列あたりに使用する記号
const SEPARATOR_CELL: &str = "---";

/// 矩形化済みのMarkdownテーブル
///
/// すべての行が同じ列数（元の表の最大セル数）を持ちます。
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MarkdownTable {
    /// グリッドデータ（行 × 列）、エスケープ済み
    cells: Vec<Vec<String>>,

    /// 列数
    cols: usize,
}

impl MarkdownTable {
    /// 表から矩形のグリッドを構築
    ///
    /// 1. 各セルのテキストを結合・エスケープ
    /// 2. 最大列数を算出
    /// 3. 短い行の右側を空セルで埋める
    pub fn build(table: &Table) -> Self {
        let mut cells: Vec<Vec<String>> = table
            .rows
            .iter()
            .map(|row| row.cells.iter().map(cell_text).collect())
            .collect();

        let cols = table.max_cols();

        for row in &mut cells {
            row.resize(cols, String::new());
        }

        Self { cells, cols }
    }

    /// 行数を取得
    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    /// 列数を取得
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Markdownテーブルの行を生成
    ///
    /// 先頭行をヘッダーとして出力し、その直後に区切り行を挿入します。
    /// 行数または列数が0の場合は何も出力しません。
    pub fn markdown_lines(&self) -> Vec<String> {
        if self.rows() == 0 || self.cols == 0 {
            return Vec::new();
        }

        let mut lines = Vec::with_capacity(self.rows() + 1);
        for (row_idx, row) in self.cells.iter().enumerate() {
            lines.push(format_row(row));

            if row_idx == 0 {
                lines.push(self.separator());
            }
        }

        lines
    }

    fn separator(&self) -> String {
        format_row(&vec![SEPARATOR_CELL; self.cols])
    }
}

fn format_row<S: AsRef<str>>(row: &[S]) -> String {
    let joined: Vec<&str> = row.iter().map(|s| s.as_ref()).collect();
    let joined = joined.join(" | ");
    format!("| {} |", joined)
}

/// セル内の段落を1つのテキストに結合
///
/// 段落同士は空白1つで連結します（既に文字がある場合のみ区切りを挿入）。
/// 結合後にエスケープし、前後の空白を除去します。
pub(crate) fn cell_text(cell: &Cell) -> String {
    let mut text = String::new();
    for paragraph in &cell.paragraphs {
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(paragraph.trim());
    }

    escape_cell_text(&text).trim().to_string()
}

/// テーブルのグリッドを壊す文字をエスケープ
///
/// `|` → `\|`、改行（`\n`・`\r`）→ 空白
pub(crate) fn escape_cell_text(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ").replace('\r', " ")
}
