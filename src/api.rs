//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

/// 段落スタイル名から見出しレベルを判定する方式
///
/// 判定は大文字小文字を区別し、`Title`、`Heading 1`〜`Heading 6`の順で
/// 最初に一致したものを採用します。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum StyleMatching {
    /// 完全一致のみ
    ///
    /// `Title`、`Heading N`、`HeadingN`（N = 1〜6）と完全に一致する
    /// スタイル名だけを見出しとして扱います。
    /// 例: `"My Heading 1 Variant"` → 本文
    Exact,

    /// 完全一致、次に部分一致（デフォルト）
    ///
    /// 完全一致しなかった場合、スタイル名が`Title`や`Heading N`を
    /// 含むかどうかを同じ順序で判定します。
    /// 例: `"My Heading 1 Variant"` → `#`
    #[default]
    ExactThenContains,
}

/// Markdownの見出しレベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingLevel {
    /// 判定順に並べた全レベル
    pub const ALL: [HeadingLevel; 6] = [
        HeadingLevel::H1,
        HeadingLevel::H2,
        HeadingLevel::H3,
        HeadingLevel::H4,
        HeadingLevel::H5,
        HeadingLevel::H6,
    ];

    /// 1始まりのレベル番号
    pub fn depth(self) -> usize {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
            HeadingLevel::H4 => 4,
            HeadingLevel::H5 => 5,
            HeadingLevel::H6 => 6,
        }
    }

    /// 見出しの接頭辞（例: `"##"`）
    pub fn prefix(self) -> &'static str {
        &"######"[..self.depth()]
    }
}
