//! Types Module
//!
//! クレート全体で使用する文書データ型を定義するモジュール。
//! パーサーが1回の変換のために生成し、変換後は破棄されます。

use serde::Serialize;

/// 段落（スタイル名とトリム済みテキスト）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paragraph {
    /// 段落スタイルの表示名（例: "Heading 1", "Title", "Normal"）
    pub style_name: String,

    /// 前後の空白を除去したテキスト
    pub text: String,
}

impl Paragraph {
    pub fn new(style_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            style_name: style_name.into(),
            text: text.into(),
        }
    }

    /// テキストが空かどうか
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// 表のセル
///
/// セルは1つ以上の段落を保持します。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Cell {
    /// セル内の段落テキスト（各段落はトリム済み）
    pub paragraphs: Vec<String>,
}

impl Cell {
    pub fn new<I, S>(paragraphs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paragraphs: paragraphs.into_iter().map(Into::into).collect(),
        }
    }
}

/// 表の行
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Row {
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// 各セルが1段落だけの行を生成
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cells: texts.into_iter().map(|t| Cell::new([t])).collect(),
        }
    }
}

/// 表
///
/// 行ごとにセル数が異なる場合があります（矩形化は描画時に行う）。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// 全行の中で最大のセル数
    pub fn max_cols(&self) -> usize {
        self.rows.iter().map(|r| r.cells.len()).max().unwrap_or(0)
    }
}

/// 解析済みの文書
///
/// 本文直下の段落と表を、それぞれ文書順に保持します。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    pub paragraphs: Vec<Paragraph>,
    pub tables: Vec<Table>,
}
