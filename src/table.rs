//! Table Module
//!
//! 1シートを固定幅の行ストリーム／レコードストリームとして公開する
//! 行抽出器を定義するモジュール。スキーマは構築時に確定し（推論または
//! 明示指定）、データ本体の走査は行・レコードの取得時まで遅延される。

use std::collections::HashMap;
use std::path::Path;

use crate::api::{Representation, SheetRef, TableOptions};
use crate::error::SheetStreamError;
use crate::reader::{SheetReader, SheetRows, Workbook};
use crate::schema;
use crate::types::{FieldList, Value};

/// 1シート分の行抽出器
///
/// 構築時にスキーマを確定し（`fields`指定があれば推論は完全に省略）、
/// 以降の[`SheetTable::rows`] / [`SheetTable::records`]呼び出しごとに
/// シート先頭からの独立した1パス走査を開始します。呼び出し間で
/// バッファを共有・再利用することはありません。
///
/// # 使用例
///
/// ```rust,no_run
/// use sheetstream::{SheetTable, TableOptions};
///
/// # fn main() -> Result<(), sheetstream::SheetStreamError> {
/// let table = SheetTable::from_path("scores.xlsx", 0, TableOptions::new())?;
///
/// for field in table.fields() {
///     println!("{}: {:?}", field.name, field.storage_type);
/// }
/// for row in table.rows()? {
///     println!("{:?}", row);
/// }
/// # Ok(())
/// # }
/// ```
pub struct SheetTable {
    sheet: SheetReader,
    fields: FieldList,
    first_row: usize,
    stop_empty_line: bool,
}

impl SheetTable {
    /// シートリーダーと設定から抽出器を構築する
    ///
    /// `options.fields`が指定されていればそのリストを検証・変更なしに
    /// 採用し、なければ参照行（とヘッダー行）からスキーマを推論します。
    /// データ本体の走査はここでは行いません。
    ///
    /// # 発生し得るエラー
    ///
    /// * `SheetStreamError::NoData` - 推論対象の行が存在しない場合
    pub fn new(sheet: SheetReader, options: TableOptions) -> Result<Self, SheetStreamError> {
        // ヘッダーがある場合、最初のデータ行はヘッダー行の直後
        let first_row = options.skip_rows + usize::from(options.has_header);

        let fields = match options.fields {
            Some(fields) => fields,
            None => schema::infer_fields(&sheet, first_row, options.has_header)?,
        };

        Ok(Self {
            sheet,
            fields,
            first_row,
            stop_empty_line: options.stop_empty_line,
        })
    }

    /// ワークブックを自前で開いて抽出器を構築する
    ///
    /// 単発の抽出に向いた簡易コンストラクタです。複数シートを扱う場合は
    /// ワークブックをキャッシュする[`crate::WorkbookStore`]を使用してください。
    pub fn from_path(
        path: impl AsRef<Path>,
        sheet: impl Into<SheetRef>,
        options: TableOptions,
    ) -> Result<Self, SheetStreamError> {
        let mut book = Workbook::open(path)?;
        let reader = book.sheet(&sheet.into())?;
        Self::new(reader, options)
    }

    /// シート名
    pub fn name(&self) -> &str {
        self.sheet.name()
    }

    /// 確定したスキーマ
    pub fn fields(&self) -> &FieldList {
        &self.fields
    }

    /// 最初のデータ行のインデックス（0始まり）
    pub fn first_row(&self) -> usize {
        self.first_row
    }

    /// データ行数
    ///
    /// シート全体を歩いて物理行数を数え、`first_row`を差し引きます。
    /// シートの行数に比例するコストがかかります（O(1)ではありません）。
    pub fn len(&self) -> usize {
        self.sheet.rows().count().saturating_sub(self.first_row)
    }

    /// データ行が1行もないかどうか（[`SheetTable::len`]と同じコスト）
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// この抽出器が提供するデータ表現
    pub fn representations(&self) -> &'static [Representation] {
        &[Representation::Rows, Representation::Records]
    }

    /// ストリームを複数の消費者で共有できるか（常に`false`）
    ///
    /// [`SheetTable::rows`] / [`SheetTable::records`]は呼び出しごとに
    /// シートを再走査するため、下流は消費者ごとに取得し直す必要があります。
    pub fn is_consumable(&self) -> bool {
        false
    }

    /// 行ストリームを開始する
    ///
    /// シート先頭から新規に走査し、`first_row`より前の行を捨てた上で、
    /// 各行をスキーマのフィールド数ちょうどの値列として返します。
    /// 行がフィールド数より短い場合は末尾が`Value::Empty`で埋められ、
    /// 長い場合は余りのセルが黙って捨てられます。
    ///
    /// # 発生し得るエラー
    ///
    /// * `SheetStreamError::SchemaUninitialized` - フィールドリストが
    ///   空の場合（空の明示スキーマ、または空の参照行からの推論）
    pub fn rows(&self) -> Result<Rows<'_>, SheetStreamError> {
        if self.fields.is_empty() {
            return Err(SheetStreamError::SchemaUninitialized);
        }
        Ok(Rows {
            inner: self.sheet.rows(),
            position: 0,
            first_row: self.first_row,
            field_count: self.fields.len(),
            stop_empty_line: self.stop_empty_line,
            done: false,
        })
    }

    /// レコードストリームを開始する
    ///
    /// [`SheetTable::rows`]から導出される読み取り専用ビューで、各行を
    /// フィールド名→値のマップに位置対応で射影します。切り詰め・
    /// パディング・空行停止の方針は行ストリームと完全に一致します。
    /// 重複したフィールド名は後勝ちになります。
    pub fn records(&self) -> Result<Records<'_>, SheetStreamError> {
        Ok(Records {
            rows: self.rows()?,
            names: self.fields.names(),
        })
    }
}

/// 行ストリーム（遅延・前方専用）
pub struct Rows<'a> {
    inner: SheetRows<'a>,
    position: usize,
    first_row: usize,
    field_count: usize,
    stop_empty_line: bool,
    done: bool,
}

impl Iterator for Rows<'_> {
    type Item = Vec<Value>;

    fn next(&mut self) -> Option<Vec<Value>> {
        if self.done {
            return None;
        }
        for row in self.inner.by_ref() {
            let index = self.position;
            self.position += 1;
            if index < self.first_row {
                continue;
            }

            let values: Vec<Value> = (0..self.field_count)
                .map(|col| row.cell(col).value())
                .collect();

            if self.stop_empty_line && values.iter().all(Value::is_empty_like) {
                self.done = true;
                return None;
            }
            return Some(values);
        }
        self.done = true;
        None
    }
}

/// レコードストリーム（遅延・前方専用）
pub struct Records<'a> {
    rows: Rows<'a>,
    names: Vec<String>,
}

impl Iterator for Records<'_> {
    type Item = HashMap<String, Value>;

    fn next(&mut self) -> Option<HashMap<String, Value>> {
        let row = self.rows.next()?;
        Some(self.names.iter().cloned().zip(row).collect())
    }
}
