//! Store Module
//!
//! 1つのワークブックリソースを束ねる読み取り専用ストアを定義するモジュール。
//! ワークブックは最初のアクセス時に開かれ、以降の抽出で再利用される。

use std::path::PathBuf;

use crate::api::{SheetRef, TableOptions};
use crate::error::SheetStreamError;
use crate::reader::Workbook;
use crate::table::SheetTable;

/// ワークブック1冊分の読み取り専用ストア
///
/// [`WorkbookStore::new`]はリソースのパスを記録するだけで、ファイルは
/// 開きません。ワークブックは最初の[`WorkbookStore::get_object`]または
/// [`WorkbookStore::object_names`]で開かれ、ストアの生存期間中
/// キャッシュされます（`Option`による明示的な遅延初期化）。
///
/// 各抽出器は自分のシートデータを所有するため、ストアから複数の
/// 抽出器を取り出しても互いに独立に走査できます。
///
/// # 使用例
///
/// ```rust,no_run
/// use sheetstream::{TableOptions, WorkbookStore};
///
/// # fn main() -> Result<(), sheetstream::SheetStreamError> {
/// let mut store = WorkbookStore::new("scores.xlsx");
///
/// for name in store.object_names()? {
///     let table = store.get_object(name, TableOptions::new())?;
///     println!("{}: {} fields", table.name(), table.fields().len());
/// }
/// # Ok(())
/// # }
/// ```
pub struct WorkbookStore {
    resource: PathBuf,
    book: Option<Workbook>,
}

impl WorkbookStore {
    /// パスを記録してストアを生成する（ファイルはまだ開かない）
    pub fn new(resource: impl Into<PathBuf>) -> Self {
        Self {
            resource: resource.into(),
            book: None,
        }
    }

    /// キャッシュ済みワークブックを返す（未オープンならここで開く）
    fn book(&mut self) -> Result<&mut Workbook, SheetStreamError> {
        crate::backend_support()?;
        let book = match self.book.take() {
            Some(book) => book,
            None => Workbook::open(&self.resource)?,
        };
        Ok(self.book.insert(book))
    }

    /// シートを行抽出器として取り出す
    ///
    /// # 引数
    ///
    /// * `sheet` - シートセレクタ（インデックスまたは名前）
    /// * `options` - 行抽出の設定
    ///
    /// # 発生し得るエラー
    ///
    /// * `SheetStreamError::Config` - セレクタが解決できない場合
    /// * `SheetStreamError::NoData` - スキーマ推論の対象行がない場合
    pub fn get_object(
        &mut self,
        sheet: impl Into<SheetRef>,
        options: TableOptions,
    ) -> Result<SheetTable, SheetStreamError> {
        let reader = self.book()?.sheet(&sheet.into())?;
        SheetTable::new(reader, options)
    }

    /// ワークブック内のオブジェクト名（シート名）を定義順で返す
    pub fn object_names(&mut self) -> Result<Vec<String>, SheetStreamError> {
        Ok(self.book()?.sheet_names())
    }

    /// オブジェクトの新規作成（常に失敗する）
    ///
    /// このストアは読み取り専用です。書き込み要求は副作用なしに
    /// `ReadOnly`エラーになります。
    pub fn create(&mut self, name: &str) -> Result<SheetTable, SheetStreamError> {
        Err(SheetStreamError::ReadOnly(format!(
            "cannot create object '{}': workbook store is read-only",
            name
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_does_not_touch_the_filesystem() {
        // 存在しないパスでも、アクセスするまでエラーにならない
        let store = WorkbookStore::new("no/such/workbook.xlsx");
        assert!(store.book.is_none());
    }

    #[test]
    fn test_open_is_deferred_until_first_access() {
        let mut store = WorkbookStore::new("no/such/workbook.xlsx");

        let result = store.object_names();
        assert!(result.is_err());
    }

    #[test]
    fn test_create_always_fails_read_only() {
        let mut store = WorkbookStore::new("no/such/workbook.xlsx");

        match store.create("new_sheet") {
            Err(SheetStreamError::ReadOnly(msg)) => {
                assert!(msg.contains("new_sheet"));
                assert!(msg.contains("read-only"));
            }
            _ => panic!("Expected ReadOnly error"),
        }
        // 書き込み要求でワークブックが開かれることはない
        assert!(store.book.is_none());
    }
}
