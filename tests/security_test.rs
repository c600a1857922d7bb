//! Security Tests
//!
//! セキュリティ対策のテストケースを実装します。
//! ZIP bomb攻撃、XXE攻撃、パストラバーサル攻撃などへの対策を検証します。

mod fixtures;

use std::fs;
use std::io::{Cursor, Write};

use docxzero::{output_path_for, ConverterBuilder, DocxToMdError};
use fixtures::DocxBuilder;
use tempfile::TempDir;
use zip::write::{FileOptions, ZipWriter};
use zip::CompressionMethod;

/// 指定したエントリ名を持つZIPアーカイブ（正しいdocument.xmlも含む）
fn zip_with_entry(name: &str) -> Vec<u8> {
    let mut zip_data = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut zip_data));
        let options = FileOptions::default().compression_method(CompressionMethod::Stored);

        zip.start_file("word/document.xml", options).unwrap();
        zip.write_all(DocxBuilder::new().paragraph(None, "ok").document_xml().as_bytes())
            .unwrap();

        zip.start_file(name, options).unwrap();
        zip.write_all(b"test").unwrap();

        zip.finish().unwrap();
    }
    zip_data
}

fn convert(data: Vec<u8>) -> Result<(), DocxToMdError> {
    let converter = ConverterBuilder::new().build().unwrap();
    converter.convert(Cursor::new(data), &mut Vec::new())
}

/// ZIP bomb攻撃のテスト: 大量のファイルを含むZIPアーカイブ
#[test]
fn test_zip_bomb_too_many_files() {
    // 10,001個のファイルを含むZIPアーカイブを作成（上限: 10,000）
    let mut zip_data = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut zip_data));
        let options = FileOptions::default().compression_method(CompressionMethod::Stored);

        for i in 0..10_001 {
            let file_name = format!("word/media/file{}.xml", i);
            zip.start_file(file_name, options).unwrap();
            zip.write_all(b"test").unwrap();
        }

        zip.finish().unwrap();
    }

    match convert(zip_data) {
        Err(DocxToMdError::SecurityViolation(msg)) => {
            assert!(msg.contains("too many files"), "{}", msg);
        }
        e => panic!("Unexpected result: {:?}", e),
    }
}

/// ZIP bomb攻撃のテスト: 展開後のサイズが大きすぎるZIPアーカイブ
#[test]
#[ignore] // 大きなファイルを作成するため、通常のテストではスキップ
fn test_zip_bomb_large_decompressed_size() {
    // 100MBを超えるエントリを高圧縮で格納
    let mut zip_data = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut zip_data));
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

        let large_data = vec![b'a'; 100 * 1024 * 1024 + 1];
        zip.start_file("word/document.xml", options).unwrap();
        zip.write_all(&large_data).unwrap();

        zip.finish().unwrap();
    }

    match convert(zip_data) {
        Err(DocxToMdError::SecurityViolation(msg)) => {
            assert!(msg.contains("exceeds maximum size"), "{}", msg);
        }
        e => panic!("Unexpected result: {:?}", e),
    }
}

/// パストラバーサル攻撃のテスト: `..`を含むパス
#[test]
fn test_path_traversal_dotdot() {
    match convert(zip_with_entry("../etc/passwd")) {
        Err(DocxToMdError::SecurityViolation(msg)) => {
            assert!(msg.contains("Path traversal"), "{}", msg);
        }
        e => panic!("Unexpected result: {:?}", e),
    }
}

/// パストラバーサル攻撃のテスト: 絶対パス
#[test]
fn test_path_traversal_absolute_path() {
    match convert(zip_with_entry("/etc/passwd")) {
        Err(DocxToMdError::SecurityViolation(msg)) => {
            assert!(msg.contains("Absolute path"), "{}", msg);
        }
        e => panic!("Unexpected result: {:?}", e),
    }
}

/// パストラバーサル攻撃のテスト: Windows形式の絶対パス
#[test]
fn test_path_traversal_windows_absolute_path() {
    match convert(zip_with_entry("C:\\Windows\\system32")) {
        Err(DocxToMdError::SecurityViolation(msg)) => {
            assert!(
                msg.contains("Absolute path") || msg.contains("Backslash"),
                "{}",
                msg
            );
        }
        e => panic!("Unexpected result: {:?}", e),
    }
}

/// セキュリティ違反時は出力ファイルを作成しない
#[test]
fn test_security_violation_creates_no_output() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("evil.docx");
    fs::write(&input, zip_with_entry("../../evil.sh")).unwrap();

    let converter = ConverterBuilder::new().build().unwrap();
    let err = converter.convert_file(&input).unwrap_err();

    assert!(matches!(err, DocxToMdError::SecurityViolation(_)));
    assert!(err.is_parse_error());
    assert!(!output_path_for(&input).exists());
}

/// XXE攻撃のテスト: 外部エンティティは展開されない
#[test]
fn test_xxe_external_entity_is_not_expanded() {
    let document = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE w:document [<!ENTITY xxe SYSTEM "file:///etc/passwd">]>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
<w:body><w:p><w:r><w:t>&xxe;</w:t></w:r></w:p></w:body></w:document>"#;
    let data = fixtures::build_zip(&[("word/document.xml", document)]);

    let converter = ConverterBuilder::new().build().unwrap();
    match converter.convert_to_string(Cursor::new(data)) {
        Ok(markdown) => assert!(!markdown.contains("root:"), "{}", markdown),
        Err(e) => assert!(e.is_parse_error(), "unexpected error: {:?}", e),
    }
}

/// ファイルサイズ制限のテスト: 入力ファイルが大きすぎる場合
#[test]
#[ignore] // 大きなファイルを作成するため、通常のテストではスキップ
fn test_input_file_size_limit() {
    // 2GB + 1バイトの大きなファイルを作成
    let large_data = vec![0u8; 2_147_483_649];

    match convert(large_data) {
        Err(DocxToMdError::SecurityViolation(msg)) => {
            assert!(msg.contains("Input file size"), "{}", msg);
        }
        _ => panic!("Expected SecurityViolation error"),
    }
}

/// 正常なファイルの処理が成功することを確認
#[test]
fn test_valid_file_processing() {
    let data = DocxBuilder::new()
        .paragraph(Some("Title"), "Safe")
        .table(&[&["a"]])
        .build();

    let converter = ConverterBuilder::new().build().unwrap();
    let markdown = converter.convert_to_string(Cursor::new(data)).unwrap();
    assert!(markdown.starts_with("# Safe\n\n"));
}
