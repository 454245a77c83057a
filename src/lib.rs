//! sheetstream - Stream spreadsheet worksheets as schema-tagged rows and records
//!
//! This crate exposes spreadsheet workbooks as uniform tabular data streams
//! for data-processing pipelines. Given a workbook and a sheet selector it
//! determines a schema (field names and storage types) from a header row,
//! synthesized names, or an explicit override, and lazily produces the data
//! rows beneath the header.
//!
//! Workbook parsing itself is delegated to the `calamine` crate (XLSX, XLS
//! and ODS are auto-detected); this crate owns the schema-inference rules,
//! the row/record projection and the row-skipping bookkeeping on top of it.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use sheetstream::{TableOptions, WorkbookStore};
//!
//! fn main() -> Result<(), sheetstream::SheetStreamError> {
//!     let mut store = WorkbookStore::new("scores.xlsx");
//!
//!     // Sheets can be selected by index or by name.
//!     let table = store.get_object("Sheet1", TableOptions::new())?;
//!
//!     for field in table.fields() {
//!         println!("{} ({:?})", field.name, field.storage_type);
//!     }
//!     for record in table.records()? {
//!         println!("{:?}", record);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Headerless sheets and row skipping
//!
//! ```rust,no_run
//! use sheetstream::{SheetTable, TableOptions};
//!
//! # fn main() -> Result<(), sheetstream::SheetStreamError> {
//! // Skip two banner rows, synthesize col0..colN names, stop scanning at
//! // the first fully empty row.
//! let options = TableOptions::new()
//!     .with_skip_rows(2)
//!     .with_header(false)
//!     .stop_on_empty_line(true);
//!
//! let table = SheetTable::from_path("export.xlsx", 0, options)?;
//! for row in table.rows()? {
//!     println!("{:?}", row);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Explicit schemas
//!
//! ```rust,no_run
//! use sheetstream::{Field, FieldList, SheetTable, StorageType, TableOptions};
//!
//! # fn main() -> Result<(), sheetstream::SheetStreamError> {
//! // A supplied field list bypasses inference entirely and is used verbatim.
//! let fields: FieldList = [
//!     Field::new("id", StorageType::Float),
//!     Field::new("label", StorageType::String),
//! ]
//! .into_iter()
//! .collect();
//!
//! let table = SheetTable::from_path(
//!     "export.xlsx",
//!     "data",
//!     TableOptions::new().with_fields(fields),
//! )?;
//! # Ok(())
//! # }
//! ```

mod api;
mod error;
mod types;

#[cfg(feature = "calamine")]
mod reader;
#[cfg(feature = "calamine")]
mod schema;
#[cfg(feature = "calamine")]
mod store;
#[cfg(feature = "calamine")]
mod table;

// 公開API
pub use api::{Representation, SheetRef, TableOptions};
pub use error::SheetStreamError;
pub use types::{Field, FieldList, StorageType, TypeTag, Value};

#[cfg(feature = "calamine")]
pub use reader::{Cell, Row, SheetReader, SheetRows, Workbook};
#[cfg(feature = "calamine")]
pub use store::WorkbookStore;
#[cfg(feature = "calamine")]
pub use table::{Records, Rows, SheetTable};

/// ワークブック読み取りバックエンドの有無を検査する
///
/// `calamine`フィーチャ（デフォルトで有効）が組み込まれていれば`Ok(())`、
/// 無効化したビルドでは不足パッケージとその用途を示す
/// [`SheetStreamError::MissingBackend`]を返します。フォーマット依存の
/// 機能を使う前に、プロセス初期化時に1回呼び出して確認できます。
pub fn backend_support() -> Result<(), SheetStreamError> {
    if cfg!(feature = "calamine") {
        Ok(())
    } else {
        Err(SheetStreamError::MissingBackend {
            package: "calamine",
            purpose: "reading XLSX/XLS/ODS workbooks",
        })
    }
}
