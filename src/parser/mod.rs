//! Parser Module
//!
//! DOCXファイル（ZIPアーカイブ）を開き、本文の段落と表を抽出するモジュール。
//! `zip`でコンテナを展開し、`quick-xml`で各XMLパートを解析します。

mod document;
mod styles;

use std::io::{Read, Seek};

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::DocxToMdError;
use crate::security::SecurityConfig;
use crate::types::Document;

use document::BodyWalker;
use styles::StyleSheet;

/// パッケージのリレーションシップ
const PACKAGE_RELS_PART: &str = "_rels/.rels";

/// リレーションシップが見つからない場合のメイン文書パート
const DEFAULT_DOCUMENT_PART: &str = "word/document.xml";

/// メイン文書を指すリレーションシップ種別の末尾
const OFFICE_DOCUMENT_REL_SUFFIX: &str = "/officeDocument";

/// DOCXパーサー
///
/// 構築時にアーカイブ全体のセキュリティ検査を行い、スタイルと本文のXMLを
/// メモリに読み込みます。アーカイブ自体は構築後に解放されます。
pub(crate) struct DocxParser {
    /// メイン文書パートの名前（例: `word/document.xml`）
    document_part: String,
    /// メイン文書のXML
    document_xml: Vec<u8>,
    /// 段落スタイル
    styles: StyleSheet,
}

impl DocxParser {
    /// DOCXファイルを開く
    ///
    /// # 戻り値
    ///
    /// * `Ok(DocxParser)` - メイン文書パートを読み込めた場合
    /// * `Err(DocxToMdError::Zip)` - ZIPアーカイブとして開けない場合
    /// * `Err(DocxToMdError::SecurityViolation)` - セキュリティ制限に違反した場合
    /// * `Err(DocxToMdError::Parse)` - メイン文書パートが存在しない場合
    pub fn open<R: Read + Seek>(reader: R) -> Result<Self, DocxToMdError> {
        let mut archive = ZipArchive::new(reader)?;

        SecurityConfig::default().check_archive(&mut archive)?;

        let document_part = match read_part(&mut archive, PACKAGE_RELS_PART)? {
            Some(rels) => main_document_target(&rels)?
                .unwrap_or_else(|| DEFAULT_DOCUMENT_PART.to_string()),
            None => DEFAULT_DOCUMENT_PART.to_string(),
        };

        let document_xml = read_part(&mut archive, &document_part)?.ok_or_else(|| {
            DocxToMdError::Parse(format!(
                "Main document part '{}' not found; the file is not a Word document",
                document_part
            ))
        })?;

        // スタイルパートはメイン文書と同じディレクトリに置かれる
        let styles_part = sibling_part(&document_part, "styles.xml");
        let styles = match read_part(&mut archive, &styles_part)? {
            Some(xml) => StyleSheet::from_xml(&xml)?,
            None => {
                log::debug!("No style part '{}'; using default paragraph style", styles_part);
                StyleSheet::default()
            }
        };

        Ok(Self {
            document_part,
            document_xml,
            styles,
        })
    }

    /// メイン文書パートの名前
    pub fn document_part(&self) -> &str {
        &self.document_part
    }

    /// 本文を解析して文書モデルを生成
    pub fn parse_document(&self) -> Result<Document, DocxToMdError> {
        BodyWalker::new(&self.styles).walk(&self.document_xml)
    }
}

/// アーカイブからパートを読み込む（存在しない場合は`None`）
fn read_part<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<Option<Vec<u8>>, DocxToMdError> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let mut content = Vec::new();
    file.read_to_end(&mut content)?;
    Ok(Some(content))
}

/// `_rels/.rels`からメイン文書パートの名前を取得
fn main_document_target(rels_xml: &[u8]) -> Result<Option<String>, DocxToMdError> {
    let mut reader = Reader::from_reader(rels_xml);
    reader.trim_text(true);

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
                let rel_type = styles::attribute_value(&e, b"Type")?;
                if rel_type.is_some_and(|t| t.ends_with(OFFICE_DOCUMENT_REL_SUFFIX)) {
                    return Ok(styles::attribute_value(&e, b"Target")?
                        .map(|target| target.trim_start_matches('/').to_string()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(None)
}

/// 同じディレクトリにあるパートの名前
fn sibling_part(part: &str, file_name: &str) -> String {
    match part.rfind('/') {
        Some(idx) => format!("{}/{}", &part[..idx], file_name),
        None => file_name.to_string(),
    }
}
