//! Document Body Parser
//!
//! `word/document.xml`を走査し、本文直下の段落と表を文書順に抽出するモジュール。
//! 入れ子の表やテキストボックス内の段落は対象外です。

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::styles::{attribute_value, StyleSheet};
use crate::error::DocxToMdError;
use crate::types::{Cell, Document, Paragraph, Row, Table};

/// Wordの表が持てる最大列数。これを超える`w:gridSpan`は切り詰める
const MAX_GRID_SPAN: usize = 63;

/// 走査中に区別が必要な要素
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Body,
    P,
    PPr,
    R,
    T,
    Tbl,
    Tr,
    Tc,
    TcPr,
    Other,
}

impl Tag {
    fn from_local_name(name: &[u8]) -> Self {
        match name {
            b"body" => Tag::Body,
            b"p" => Tag::P,
            b"pPr" => Tag::PPr,
            b"r" => Tag::R,
            b"t" => Tag::T,
            b"tbl" => Tag::Tbl,
            b"tr" => Tag::Tr,
            b"tc" => Tag::Tc,
            b"tcPr" => Tag::TcPr,
            _ => Tag::Other,
        }
    }
}

/// 縦結合の状態（`w:vMerge`）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VerticalMerge {
    None,
    Restart,
    Continue,
}

#[derive(Debug)]
struct ParagraphBuilder {
    style_id: Option<String>,
    text: String,
    in_cell: bool,
    /// テキストボックスなど、段落内に入れ子になった段落の深さ
    nested: usize,
}

impl ParagraphBuilder {
    fn new(in_cell: bool) -> Self {
        Self {
            style_id: None,
            text: String::new(),
            in_cell,
            nested: 0,
        }
    }

    fn accepts_content(&self) -> bool {
        self.nested == 0
    }
}

#[derive(Debug)]
struct CellBuilder {
    paragraphs: Vec<String>,
    span: usize,
    v_merge: VerticalMerge,
}

impl CellBuilder {
    fn new() -> Self {
        Self {
            paragraphs: Vec::new(),
            span: 1,
            v_merge: VerticalMerge::None,
        }
    }
}

#[derive(Debug)]
struct TableBuilder {
    rows: Vec<Vec<CellBuilder>>,
    row: Option<Vec<CellBuilder>>,
    cell: Option<CellBuilder>,
    /// 1 = 本文直下の表、2以上 = セル内の入れ子の表
    nesting: usize,
}

impl TableBuilder {
    fn new() -> Self {
        Self {
            rows: Vec::new(),
            row: None,
            cell: None,
            nesting: 1,
        }
    }

    fn is_outermost(&self) -> bool {
        self.nesting == 1
    }

    /// 結合セルを展開して表を確定する
    ///
    /// * 横結合（`gridSpan = n`）: 同じセルをn回並べる
    /// * 縦結合の継続: 前の行の同じグリッド列のセルを複製する
    fn finish(self) -> Table {
        let mut rows: Vec<Row> = Vec::with_capacity(self.rows.len());

        for raw_row in self.rows {
            let mut cells: Vec<Cell> = Vec::with_capacity(raw_row.len());

            for raw in raw_row {
                let col = cells.len();
                let above = match raw.v_merge {
                    VerticalMerge::Continue => rows.last().and_then(|prev| prev.cells.get(col)),
                    VerticalMerge::None | VerticalMerge::Restart => None,
                };
                let cell = match above {
                    Some(above) => above.clone(),
                    None => Cell {
                        paragraphs: raw.paragraphs,
                    },
                };

                for _ in 1..raw.span {
                    cells.push(cell.clone());
                }
                cells.push(cell);
            }

            rows.push(Row::new(cells));
        }

        Table::new(rows)
    }
}

/// 本文の走査器
pub(crate) struct BodyWalker<'a> {
    styles: &'a StyleSheet,
    stack: Vec<Tag>,
    document: Document,
    paragraph: Option<ParagraphBuilder>,
    table: Option<TableBuilder>,
    skipped_tables: usize,
}

impl<'a> BodyWalker<'a> {
    pub fn new(styles: &'a StyleSheet) -> Self {
        Self {
            styles,
            stack: Vec::new(),
            document: Document::default(),
            paragraph: None,
            table: None,
            skipped_tables: 0,
        }
    }

    /// document.xmlを解析して文書を構築
    pub fn walk(mut self, xml: &[u8]) -> Result<Document, DocxToMdError> {
        let mut reader = Reader::from_reader(xml);
        // xml:space="preserve"の空白を保持する
        reader.trim_text(false);

        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    let tag = Tag::from_local_name(e.local_name().as_ref());
                    self.open(tag, &e)?;
                    self.stack.push(tag);
                }
                Event::Empty(e) => {
                    let tag = Tag::from_local_name(e.local_name().as_ref());
                    self.open(tag, &e)?;
                    self.close(tag);
                }
                Event::End(_) => {
                    if let Some(tag) = self.stack.pop() {
                        self.close(tag);
                    }
                }
                Event::Text(e) => {
                    if self.parent() == Some(Tag::T) {
                        let text = e.unescape()?;
                        self.push_text(&text);
                    }
                }
                Event::CData(e) => {
                    if self.parent() == Some(Tag::T) {
                        let text = std::str::from_utf8(&e)?.to_string();
                        self.push_text(&text);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        if self.skipped_tables > 0 {
            log::warn!(
                "Skipped {} nested table(s); only top-level tables are converted",
                self.skipped_tables
            );
        }

        Ok(self.document)
    }

    fn parent(&self) -> Option<Tag> {
        self.stack.last().copied()
    }

    fn grandparent(&self) -> Option<Tag> {
        self.stack.iter().rev().nth(1).copied()
    }

    fn outer_table_mut(&mut self) -> Option<&mut TableBuilder> {
        self.table.as_mut().filter(|t| t.is_outermost())
    }

    fn open(&mut self, tag: Tag, e: &BytesStart) -> Result<(), DocxToMdError> {
        let parent = self.parent();

        match tag {
            Tag::P => {
                if let Some(paragraph) = self.paragraph.as_mut() {
                    paragraph.nested += 1;
                } else if parent == Some(Tag::Body) {
                    self.paragraph = Some(ParagraphBuilder::new(false));
                } else if parent == Some(Tag::Tc)
                    && self.outer_table_mut().is_some_and(|t| t.cell.is_some())
                {
                    self.paragraph = Some(ParagraphBuilder::new(true));
                }
            }
            Tag::Tbl => {
                if let Some(table) = self.table.as_mut() {
                    if table.is_outermost() {
                        self.skipped_tables += 1;
                    }
                    table.nesting += 1;
                } else if parent == Some(Tag::Body) {
                    self.table = Some(TableBuilder::new());
                }
            }
            Tag::Tr => {
                if let Some(table) = self.outer_table_mut() {
                    table.row = Some(Vec::new());
                }
            }
            Tag::Tc => {
                if let Some(table) = self.outer_table_mut() {
                    if table.row.is_some() {
                        table.cell = Some(CellBuilder::new());
                    }
                }
            }
            Tag::Other => self.open_property(parent, e)?,
            Tag::Body | Tag::PPr | Tag::R | Tag::T | Tag::TcPr => {}
        }

        Ok(())
    }

    /// 段落・セルのプロパティ要素と、ランの特殊文字要素
    fn open_property(&mut self, parent: Option<Tag>, e: &BytesStart) -> Result<(), DocxToMdError> {
        let name = e.local_name();

        // 変更履歴（w:pPrChange / w:tcPrChange）内の旧プロパティは無視する
        let owner = self.grandparent();

        match (parent, name.as_ref()) {
            (Some(Tag::PPr), b"pStyle") if owner == Some(Tag::P) => {
                if let Some(paragraph) = self.paragraph.as_mut().filter(|p| p.accepts_content()) {
                    paragraph.style_id = attribute_value(e, b"val")?;
                }
            }
            (Some(Tag::TcPr), b"gridSpan") if owner == Some(Tag::Tc) => {
                let span = attribute_value(e, b"val")?
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(1)
                    .clamp(1, MAX_GRID_SPAN);
                if let Some(cell) = self.outer_table_mut().and_then(|t| t.cell.as_mut()) {
                    cell.span = span;
                }
            }
            (Some(Tag::TcPr), b"vMerge") if owner == Some(Tag::Tc) => {
                let v_merge = match attribute_value(e, b"val")?.as_deref() {
                    Some("restart") => VerticalMerge::Restart,
                    _ => VerticalMerge::Continue,
                };
                if let Some(cell) = self.outer_table_mut().and_then(|t| t.cell.as_mut()) {
                    cell.v_merge = v_merge;
                }
            }
            (Some(Tag::R), b"tab") | (Some(Tag::R), b"ptab") => self.push_text("\t"),
            (Some(Tag::R), b"cr") => self.push_text("\n"),
            (Some(Tag::R), b"br") => {
                // ページ区切り・段区切りは文字を生成しない
                match attribute_value(e, b"type")?.as_deref() {
                    None | Some("textWrapping") => self.push_text("\n"),
                    Some(_) => {}
                }
            }
            (Some(Tag::R), b"noBreakHyphen") => self.push_text("-"),
            _ => {}
        }

        Ok(())
    }

    fn close(&mut self, tag: Tag) {
        match tag {
            Tag::P => self.close_paragraph(),
            Tag::Tc => {
                if let Some(table) = self.outer_table_mut() {
                    if let (Some(cell), Some(row)) = (table.cell.take(), table.row.as_mut()) {
                        row.push(cell);
                    }
                }
            }
            Tag::Tr => {
                if let Some(table) = self.outer_table_mut() {
                    if let Some(row) = table.row.take() {
                        table.rows.push(row);
                    }
                }
            }
            Tag::Tbl => {
                if let Some(mut table) = self.table.take() {
                    if table.is_outermost() {
                        self.document.tables.push(table.finish());
                    } else {
                        table.nesting -= 1;
                        self.table = Some(table);
                    }
                }
            }
            _ => {}
        }
    }

    fn close_paragraph(&mut self) {
        let Some(mut paragraph) = self.paragraph.take() else {
            return;
        };

        if paragraph.nested > 0 {
            paragraph.nested -= 1;
            self.paragraph = Some(paragraph);
            return;
        }

        let text = paragraph.text.trim().to_string();
        if paragraph.in_cell {
            if let Some(cell) = self.outer_table_mut().and_then(|t| t.cell.as_mut()) {
                cell.paragraphs.push(text);
            }
        } else {
            let style_name = self.styles.resolve(paragraph.style_id.as_deref());
            self.document.paragraphs.push(Paragraph { style_name, text });
        }
    }

    fn push_text(&mut self, text: &str) {
        if let Some(paragraph) = self.paragraph.as_mut().filter(|p| p.accepts_content()) {
            paragraph.text.push_str(text);
        }
    }
}
