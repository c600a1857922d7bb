//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use std::path::PathBuf;

use thiserror::Error;

/// docxzeroクレート全体で使用するエラー型
///
/// Wordファイルの読み込み、解析、変換、書き出し処理中に発生する
/// すべてのエラーを統一的に扱うために使用されます。
///
/// # エラーの種類
///
/// - `FileNotFound`: 入力ファイルが存在しない
/// - `Io`: I/O操作中に発生したエラー（出力ファイルの書き込み失敗など）
/// - `Zip` / `Xml` / `Parse` / `Utf8`: DOCXとして読み込めないファイル
/// - `Config`: 設定の検証に失敗したエラー
/// - `SecurityViolation`: ZIPアーカイブのセキュリティ制限違反
///
/// # 使用例
///
/// ```rust,no_run
/// use docxzero::DocxToMdError;
/// use std::fs::File;
///
/// fn open_docx(path: &str) -> Result<(), DocxToMdError> {
///     let _file = File::open(path)?;  // Ioエラーが自動的に変換される
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum DocxToMdError {
    /// 入力ファイルが存在しない
    ///
    /// `Converter::convert_file()`が入力パスを開く前に検出します。
    /// この場合、出力ファイルは作成されません。
    #[error("File not found: {}", path.display())]
    FileNotFound {
        /// 見つからなかったパス
        path: PathBuf,
    },

    /// I/O操作中に発生したエラー
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIPアーカイブの解析エラー
    ///
    /// DOCXファイル（ZIPアーカイブ）として開けない場合に発生します。
    /// 元の`ZipError`は`source()`から参照できます。
    #[error("ZIP archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// XMLパートの解析エラー
    ///
    /// 属性の解析エラー（`AttrError`）も`quick_xml::Error`に変換して保持します。
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// DOCXの構造が不正なエラー
    ///
    /// `word/document.xml`が存在しないなど、ZIPとしては正しいが
    /// Word文書として解釈できない場合に発生します。
    #[error("Failed to parse DOCX file: {0}")]
    Parse(String),

    /// UTF-8文字列の変換エラー
    #[error("UTF-8 conversion error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// 設定の検証に失敗したエラー
    ///
    /// `ConverterBuilder::build()`時に設定を検証し、無効な設定が検出された
    /// 場合に発生します。
    ///
    /// # 例
    ///
    /// ```rust,no_run
    /// use docxzero::{ConverterBuilder, DocxToMdError};
    ///
    /// let result = ConverterBuilder::new()
    ///     .with_tables_label("")  // 空のラベルは無効
    ///     .build();
    ///
    /// match result {
    ///     Err(DocxToMdError::Config(msg)) => {
    ///         println!("設定エラー: {}", msg);
    ///     }
    ///     _ => {}
    /// }
    /// ```
    #[error("Configuration error: {0}")]
    Config(String),

    /// セキュリティ制限に違反したエラー
    ///
    /// ZIP bomb攻撃、パストラバーサル攻撃、ファイルサイズ制限などの
    /// セキュリティ制限に違反した場合に発生します。
    #[error("Security violation: {0}")]
    SecurityViolation(String),
}

impl DocxToMdError {
    /// 入力ファイルをWord文書として読めなかったエラーかどうか
    ///
    /// `Zip` / `Xml` / `Parse` / `Utf8` / `SecurityViolation` が該当します。
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            DocxToMdError::Zip(_)
                | DocxToMdError::Xml(_)
                | DocxToMdError::Parse(_)
                | DocxToMdError::Utf8(_)
                | DocxToMdError::SecurityViolation(_)
        )
    }
}

impl From<quick_xml::events::attributes::AttrError> for DocxToMdError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        DocxToMdError::Xml(quick_xml::Error::from(err))
    }
}
