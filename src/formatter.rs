//! Formatter Module
//!
//! 段落をMarkdownの行に変換するモジュール。
//! 段落スタイル名から見出しレベルを判定し、接頭辞を付与します。

use crate::api::{HeadingLevel, StyleMatching};
use crate::types::Paragraph;

/// `Title`は最上位の見出しとして扱う（`Heading 1`と区別されない）
const TITLE_STYLE: &str = "Title";

/// 段落フォーマッター
#[derive(Debug, Clone, Copy)]
pub(crate) struct ParagraphFormatter {
    matching: StyleMatching,
}

impl ParagraphFormatter {
    pub fn new(matching: StyleMatching) -> Self {
        Self { matching }
    }

    /// 段落をMarkdownの1行に変換
    ///
    /// # 戻り値
    ///
    /// * `Some(String)` - 見出し接頭辞付き、または本文そのままの行
    /// * `None` - トリム後のテキストが空の場合（出力に行を追加しない）
    pub fn format_paragraph(&self, paragraph: &Paragraph) -> Option<String> {
        let text = paragraph.text.trim();
        if text.is_empty() {
            return None;
        }

        match heading_level(&paragraph.style_name, self.matching) {
            Some(level) => Some(format!("{} {}", level.prefix(), text)),
            None => Some(text.to_string()),
        }
    }
}

/// スタイル名から見出しレベルを判定
///
/// 1. 完全一致: `Title`、`Heading N`、`HeadingN`
/// 2. 部分一致（`StyleMatching::ExactThenContains`のみ）: `Title`、`Heading N`を含む。
///    `HeadingN`形式は完全一致のみ。
pub fn heading_level(style_name: &str, matching: StyleMatching) -> Option<HeadingLevel> {
    if let Some(level) = exact_heading_level(style_name) {
        return Some(level);
    }

    match matching {
        StyleMatching::Exact => None,
        StyleMatching::ExactThenContains => contained_heading_level(style_name),
    }
}

fn exact_heading_level(style_name: &str) -> Option<HeadingLevel> {
    if style_name == TITLE_STYLE {
        return Some(HeadingLevel::H1);
    }

    HeadingLevel::ALL.into_iter().find(|level| {
        style_name == format!("Heading {}", level.depth())
            || style_name == format!("Heading{}", level.depth())
    })
}

fn contained_heading_level(style_name: &str) -> Option<HeadingLevel> {
    if style_name.contains(TITLE_STYLE) {
        return Some(HeadingLevel::H1);
    }

    HeadingLevel::ALL
        .into_iter()
        .find(|level| style_name.contains(&format!("Heading {}", level.depth())))
}
