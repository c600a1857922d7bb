//! Style Sheet Parser
//!
//! `word/styles.xml`から段落スタイルIDと表示名の対応を抽出するモジュール。

use std::collections::HashMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::DocxToMdError;

/// スタイル指定がなく、既定の段落スタイルも定義されていない場合の名前
pub(crate) const FALLBACK_STYLE_NAME: &str = "Normal";

/// 組み込みスタイルの内部名 → UI表示名
///
/// styles.xmlには組み込みスタイルが小文字の内部名で格納されるため、
/// Wordの画面に表示される名前へ変換する。
const BUILTIN_STYLE_NAMES: &[(&str, &str)] = &[
    ("caption", "Caption"),
    ("footer", "Footer"),
    ("header", "Header"),
    ("heading 1", "Heading 1"),
    ("heading 2", "Heading 2"),
    ("heading 3", "Heading 3"),
    ("heading 4", "Heading 4"),
    ("heading 5", "Heading 5"),
    ("heading 6", "Heading 6"),
    ("heading 7", "Heading 7"),
    ("heading 8", "Heading 8"),
    ("heading 9", "Heading 9"),
    ("normal", "Normal"),
    ("subtitle", "Subtitle"),
    ("title", "Title"),
];

/// 段落スタイルの一覧
#[derive(Debug, Clone, Default)]
pub(crate) struct StyleSheet {
    /// styleId -> 表示名
    names: HashMap<String, String>,
    /// 既定の段落スタイル（`w:default="1"`）の表示名
    default_name: Option<String>,
}

impl StyleSheet {
    /// styles.xmlの内容を解析
    ///
    /// `w:type="paragraph"`のスタイルのみを対象とします。
    pub fn from_xml(xml: &[u8]) -> Result<Self, DocxToMdError> {
        let mut reader = Reader::from_reader(xml);
        reader.trim_text(true);

        let mut sheet = StyleSheet::default();
        let mut buf = Vec::new();

        // 解析中の<w:style>: (styleId, 既定スタイルか)
        let mut current: Option<(String, bool)> = None;

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"style" => current = paragraph_style_header(&e)?,
                    b"name" => sheet.record_name(&current, &e)?,
                    _ => {}
                },
                Event::Empty(e) => match e.local_name().as_ref() {
                    b"style" => {
                        // 子要素を持たないスタイルは名前を持たない
                        if let Some((id, is_default)) = paragraph_style_header(&e)? {
                            if is_default && sheet.default_name.is_none() {
                                sheet.default_name = Some(id);
                            }
                        }
                    }
                    b"name" => sheet.record_name(&current, &e)?,
                    _ => {}
                },
                Event::End(e) => {
                    if e.local_name().as_ref() == b"style" {
                        if let Some((id, true)) = current.take() {
                            if sheet.default_name.is_none() {
                                let name = sheet.names.get(&id).cloned().unwrap_or(id);
                                sheet.default_name = Some(name);
                            }
                        }
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(sheet)
    }

    /// スタイルIDを表示名に解決
    ///
    /// * IDなし、または未定義のID → 既定の段落スタイル
    /// * 既定スタイルもない → `"Normal"`
    pub fn resolve(&self, style_id: Option<&str>) -> String {
        style_id
            .and_then(|id| self.names.get(id))
            .or(self.default_name.as_ref())
            .cloned()
            .unwrap_or_else(|| FALLBACK_STYLE_NAME.to_string())
    }

    fn record_name(
        &mut self,
        current: &Option<(String, bool)>,
        e: &BytesStart,
    ) -> Result<(), DocxToMdError> {
        if let Some((id, _)) = current {
            if let Some(name) = attribute_value(e, b"val")? {
                self.names.insert(id.clone(), ui_style_name(&name));
            }
        }
        Ok(())
    }
}

/// `<w:style>`が段落スタイルであれば (styleId, 既定か) を返す
fn paragraph_style_header(e: &BytesStart) -> Result<Option<(String, bool)>, DocxToMdError> {
    let mut style_type = None;
    let mut style_id = None;
    let mut is_default = false;

    for attr in e.attributes() {
        let attr = attr?;
        match attr.key.local_name().as_ref() {
            b"type" => style_type = Some(attr.unescape_value()?.into_owned()),
            b"styleId" => style_id = Some(attr.unescape_value()?.into_owned()),
            b"default" => {
                let value = attr.unescape_value()?;
                is_default = value == "1" || value == "true" || value == "on";
            }
            _ => {}
        }
    }

    match (style_type.as_deref(), style_id) {
        (Some("paragraph"), Some(id)) => Ok(Some((id, is_default))),
        _ => Ok(None),
    }
}

/// 要素から名前空間を除いた属性名で値を取得
pub(crate) fn attribute_value(
    e: &BytesStart,
    local_name: &[u8],
) -> Result<Option<String>, DocxToMdError> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.local_name().as_ref() == local_name {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// 組み込みスタイルの内部名をUI表示名に変換
fn ui_style_name(name: &str) -> String {
    BUILTIN_STYLE_NAMES
        .iter()
        .find(|(internal, _)| *internal == name)
        .map(|(_, ui)| ui.to_string())
        .unwrap_or_else(|| name.to_string())
}
