//! Public API Types
//!
//! 公開APIで使用するシートセレクタ・表現形式・抽出オプションを定義するモジュール。

use crate::types::FieldList;
use std::fmt;

/// シートの指定方式
///
/// インデックス（0始まり）またはシート名でシートを指定します。
/// `usize`・`&str`・`String`からの変換を実装しているため、
/// 呼び出し側は `0` や `"Sheet1"` をそのまま渡せます。
///
/// # 使用例
///
/// ```rust,no_run
/// use sheetstream::{SheetRef, TableOptions, WorkbookStore};
///
/// # fn main() -> Result<(), sheetstream::SheetStreamError> {
/// let mut store = WorkbookStore::new("scores.xlsx");
///
/// // インデックスで指定
/// let by_index = store.get_object(0, TableOptions::new())?;
///
/// // シート名で指定
/// let by_name = store.get_object("Sheet1", TableOptions::new())?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetRef {
    /// インデックス指定（0始まり）
    Index(usize),

    /// シート名指定
    Name(String),
}

impl From<usize> for SheetRef {
    fn from(index: usize) -> Self {
        SheetRef::Index(index)
    }
}

impl From<&str> for SheetRef {
    fn from(name: &str) -> Self {
        SheetRef::Name(name.to_string())
    }
}

impl From<String> for SheetRef {
    fn from(name: String) -> Self {
        SheetRef::Name(name)
    }
}

impl fmt::Display for SheetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetRef::Index(i) => write!(f, "#{}", i),
            SheetRef::Name(n) => write!(f, "'{}'", n),
        }
    }
}

/// 抽出器が提供するデータ表現
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Representation {
    /// 行（値のタプル）のストリーム
    Rows,

    /// レコード（フィールド名→値のマップ）のストリーム
    Records,
}

impl Representation {
    /// 表現名
    pub fn as_str(&self) -> &'static str {
        match self {
            Representation::Rows => "rows",
            Representation::Records => "records",
        }
    }
}

/// 行抽出の設定
///
/// [`crate::SheetTable`]の構築時に渡す不変設定です。すべての項目に
/// デフォルト値があり、必要な設定のみをオーバーライドできます。
///
/// # デフォルト設定
///
/// - `skip_rows`: 0
/// - `has_header`: true（先頭行をヘッダーとして扱う）
/// - `stop_empty_line`: false
/// - `fields`: なし（最初のデータ行から推論）
///
/// # 使用例
///
/// ```rust,no_run
/// use sheetstream::TableOptions;
///
/// // 先頭2行を読み飛ばし、ヘッダーなし、空行で打ち切り
/// let options = TableOptions::new()
///     .with_skip_rows(2)
///     .with_header(false)
///     .stop_on_empty_line(true);
/// ```
#[derive(Debug, Clone)]
pub struct TableOptions {
    /// ヘッダー・データの判定前に読み飛ばす行数
    pub(crate) skip_rows: usize,

    /// 先頭行（読み飛ばし後）をヘッダーとして扱うか
    pub(crate) has_header: bool,

    /// 最初の全空行でストリームを打ち切るか
    pub(crate) stop_empty_line: bool,

    /// 推論を省略して使用する明示スキーマ
    pub(crate) fields: Option<FieldList>,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            skip_rows: 0,
            has_header: true,
            stop_empty_line: false,
            fields: None,
        }
    }
}

impl TableOptions {
    /// デフォルト設定のオプションを生成する
    pub fn new() -> Self {
        Self::default()
    }

    /// ヘッダー・データの判定前に読み飛ばす行数を指定する
    pub fn with_skip_rows(mut self, skip_rows: usize) -> Self {
        self.skip_rows = skip_rows;
        self
    }

    /// 先頭行をヘッダーとして扱うかを指定する
    ///
    /// `false`の場合、フィールド名は `col0, col1, …` と合成されます。
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// 最初の全空行でストリームを打ち切るかを指定する
    ///
    /// ワークブックには数百万行の空行が続くものがあるため、これは
    /// 走査を打ち切るための性能上の安全装置です。データ本体の途中に
    /// 正当な空行を含むシートはそこで切り詰められます（既知の仕様）。
    pub fn stop_on_empty_line(mut self, stop: bool) -> Self {
        self.stop_empty_line = stop;
        self
    }

    /// 推論を省略して使用する明示スキーマを指定する
    ///
    /// 指定されたフィールドリストは検証・変更なしにそのまま採用されます。
    pub fn with_fields(mut self, fields: FieldList) -> Self {
        self.fields = Some(fields);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Field, StorageType};

    #[test]
    fn test_sheet_ref_from_usize() {
        assert_eq!(SheetRef::from(3), SheetRef::Index(3));
    }

    #[test]
    fn test_sheet_ref_from_str() {
        assert_eq!(
            SheetRef::from("Sheet1"),
            SheetRef::Name("Sheet1".to_string())
        );
        assert_eq!(
            SheetRef::from("データ".to_string()),
            SheetRef::Name("データ".to_string())
        );
    }

    #[test]
    fn test_sheet_ref_display() {
        assert_eq!(SheetRef::Index(2).to_string(), "#2");
        assert_eq!(SheetRef::Name("Scores".to_string()).to_string(), "'Scores'");
    }

    #[test]
    fn test_representation_names() {
        assert_eq!(Representation::Rows.as_str(), "rows");
        assert_eq!(Representation::Records.as_str(), "records");
    }

    #[test]
    fn test_table_options_defaults() {
        let options = TableOptions::new();
        assert_eq!(options.skip_rows, 0);
        assert!(options.has_header);
        assert!(!options.stop_empty_line);
        assert!(options.fields.is_none());
    }

    #[test]
    fn test_table_options_chaining() {
        let fields: FieldList = [Field::new("a", StorageType::String)].into_iter().collect();
        let options = TableOptions::new()
            .with_skip_rows(2)
            .with_header(false)
            .stop_on_empty_line(true)
            .with_fields(fields.clone());

        assert_eq!(options.skip_rows, 2);
        assert!(!options.has_header);
        assert!(options.stop_empty_line);
        assert_eq!(options.fields, Some(fields));
    }
}
