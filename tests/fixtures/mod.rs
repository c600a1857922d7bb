//! Test fixtures: minimal DOCX packages built in memory
//!
//! Each fixture is a real ZIP archive with `[Content_Types].xml`,
//! `_rels/.rels`, `word/document.xml` and `word/styles.xml`.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use zip::write::{FileOptions, ZipWriter};
use zip::CompressionMethod;

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
  <Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
</Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;

/// Built-in paragraph styles as Word stores them (internal names are lowercase)
const STYLES: &[(&str, &str, bool)] = &[
    ("Normal", "Normal", true),
    ("Title", "Title", false),
    ("Heading1", "heading 1", false),
    ("Heading2", "heading 2", false),
    ("Heading3", "heading 3", false),
    ("Heading4", "heading 4", false),
    ("Heading5", "heading 5", false),
    ("Heading6", "heading 6", false),
    ("ListParagraph", "List Paragraph", false),
];

/// Body content builder
#[derive(Default)]
pub struct DocxBuilder {
    body: String,
    extra_styles: Vec<(String, String)>,
}

impl DocxBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paragraph with the given style id (`None` for no `w:pStyle`)
    pub fn paragraph(mut self, style_id: Option<&str>, text: &str) -> Self {
        self.body.push_str(&paragraph_xml(style_id, text));
        self
    }

    /// Paragraph with a custom style id and display name
    pub fn styled_paragraph(mut self, style_id: &str, style_name: &str, text: &str) -> Self {
        self.extra_styles
            .push((style_id.to_string(), style_name.to_string()));
        self.body.push_str(&paragraph_xml(Some(style_id), text));
        self
    }

    /// Table whose cells each hold one paragraph
    pub fn table(mut self, rows: &[&[&str]]) -> Self {
        let rows: Vec<Vec<String>> = rows
            .iter()
            .map(|row| row.iter().map(|text| paragraph_xml(None, text)).collect())
            .collect();
        self.body.push_str(&table_xml(&rows));
        self
    }

    /// Raw `w:body` content
    pub fn raw(mut self, xml: &str) -> Self {
        self.body.push_str(xml);
        self
    }

    pub fn document_xml(&self) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{}"><w:body>{}<w:sectPr/></w:body></w:document>"#,
            W_NS, self.body
        )
    }

    pub fn styles_xml(&self) -> String {
        let mut xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="{}">"#,
            W_NS
        );
        let builtin = STYLES
            .iter()
            .map(|(id, name, default)| (id.to_string(), name.to_string(), *default));
        let extra = self
            .extra_styles
            .iter()
            .map(|(id, name)| (id.clone(), name.clone(), false));
        for (id, name, default) in builtin.chain(extra) {
            let default_attr = if default { r#" w:default="1""# } else { "" };
            xml.push_str(&format!(
                r#"<w:style w:type="paragraph"{} w:styleId="{}"><w:name w:val="{}"/></w:style>"#,
                default_attr,
                id,
                escape(&name)
            ));
        }
        xml.push_str("</w:styles>");
        xml
    }

    pub fn build(&self) -> Vec<u8> {
        build_zip(&[
            ("[Content_Types].xml", CONTENT_TYPES),
            ("_rels/.rels", PACKAGE_RELS),
            ("word/document.xml", self.document_xml().as_str()),
            ("word/styles.xml", self.styles_xml().as_str()),
        ])
    }
}

pub fn paragraph_xml(style_id: Option<&str>, text: &str) -> String {
    let ppr = match style_id {
        Some(id) => format!(r#"<w:pPr><w:pStyle w:val="{}"/></w:pPr>"#, id),
        None => String::new(),
    };
    if text.is_empty() {
        return format!("<w:p>{}</w:p>", ppr);
    }
    format!(
        r#"<w:p>{}<w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
        ppr,
        escape(text)
    )
}

/// Table from pre-rendered cell contents (`w:tc` inner XML)
pub fn table_xml(rows: &[Vec<String>]) -> String {
    let mut xml = String::from("<w:tbl><w:tblPr/>");
    for row in rows {
        xml.push_str("<w:tr>");
        for cell in row {
            xml.push_str(&format!("<w:tc>{}</w:tc>", cell));
        }
        xml.push_str("</w:tr>");
    }
    xml.push_str("</w:tbl>");
    xml
}

pub fn build_zip(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, content) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
