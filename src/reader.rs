//! Reader Module
//!
//! calamineを使用したワークブック読み取りの基礎実装。
//! calamineの「使用済みレンジ」モデルを、物理行0から始まる絶対インデックスの
//! 行列に正規化して上位モジュールへ提供する。使用済みレンジより手前の行・列は
//! 空セルとして読める。
//!
//! 読み取りは非評価です。数式セルは最後にキャッシュされた値を返し、
//! 再計算は行いません。

use calamine::{
    open_workbook_auto, open_workbook_auto_from_rs, Data, DataType, Range, Reader, Sheets,
};
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use crate::api::SheetRef;
use crate::error::SheetStreamError;
use crate::types::{TypeTag, Value};

static EMPTY_CELL: Data = Data::Empty;

/// 開かれたワークブックのハンドル
///
/// XLSX / XLS / ODS をフォーマット自動判別で開きます。シートの選択は
/// インデックスまたは名前で行い、解決できないセレクタは構築時に
/// `Config`エラーとして報告されます。
///
/// ハンドル自体は読み取り専用です。このクレートがワークブックを
/// 変更・クローズすることはありません。
pub struct Workbook<RS: Read + Seek = BufReader<File>> {
    sheets: Sheets<RS>,
}

impl Workbook<BufReader<File>> {
    /// パスからワークブックを開く
    ///
    /// # 引数
    ///
    /// * `path` - ワークブックファイルのパス
    ///
    /// # 戻り値
    ///
    /// * `Ok(Workbook)` - 読み込みに成功した場合
    /// * `Err(SheetStreamError)` - I/Oまたは解析エラーが発生した場合
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SheetStreamError> {
        log::debug!("opening workbook at {}", path.as_ref().display());
        let sheets = open_workbook_auto(path)?;
        Ok(Self { sheets })
    }
}

impl<RS: Read + Seek> Workbook<RS> {
    /// `Read + Seek`を実装するソースからワークブックを開く
    ///
    /// メモリ上のバッファ（`Cursor`）やその他のストリームから開く場合に
    /// 使用します。
    pub fn from_reader(reader: RS) -> Result<Self, SheetStreamError>
    where
        RS: Clone,
    {
        let sheets = open_workbook_auto_from_rs(reader)?;
        Ok(Self { sheets })
    }

    /// すべてのシート名を定義順で取得
    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.sheet_names().to_vec()
    }

    /// セレクタでシートを解決し、読み取り用の[`SheetReader`]を返す
    ///
    /// # 発生し得るエラー
    ///
    /// * `SheetStreamError::Config` - インデックスが範囲外、または
    ///   名前のシートが存在しない場合
    /// * `SheetStreamError::Workbook` - シートの解析に失敗した場合
    pub fn sheet(&mut self, sheet: &SheetRef) -> Result<SheetReader, SheetStreamError> {
        let name = self.resolve_name(sheet)?;
        let data = self.sheets.worksheet_range(&name)?;

        // 数式レンジはシートごとに1回だけ取得する。セル単位で問い合わせると
        // 非常に遅い。非対応フォーマットでは数式情報なしで続行する。
        let formulas = self.sheets.worksheet_formula(&name).ok();

        Ok(SheetReader {
            name,
            data,
            formulas,
        })
    }

    fn resolve_name(&self, sheet: &SheetRef) -> Result<String, SheetStreamError> {
        let names = self.sheet_names();
        match sheet {
            SheetRef::Index(index) => names.get(*index).cloned().ok_or_else(|| {
                SheetStreamError::Config(format!(
                    "Sheet index {} is out of range (total: {})",
                    index,
                    names.len()
                ))
            }),
            SheetRef::Name(name) => {
                if names.iter().any(|n| n == name) {
                    Ok(name.clone())
                } else {
                    Err(SheetStreamError::Config(format!(
                        "Sheet '{}' not found",
                        name
                    )))
                }
            }
        }
    }
}

/// 1シート分の読み取りハンドル
///
/// [`SheetReader::rows`]の呼び出しごとに、先頭からの独立した前方走査を
/// 新規に開始します。共有カーソルは持たないため、同一シート上の複数の
/// 走査が互いの位置を壊すことはありません。
pub struct SheetReader {
    pub(crate) name: String,
    pub(crate) data: Range<Data>,
    pub(crate) formulas: Option<Range<String>>,
}

impl SheetReader {
    /// シート名
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 物理行数（最終使用行まで、先頭の空行を含む）
    pub fn row_count(&self) -> usize {
        self.data.end().map_or(0, |(row, _)| row as usize + 1)
    }

    /// 行の遅延走査を新規に開始する（常に物理行0から）
    pub fn rows(&self) -> SheetRows<'_> {
        SheetRows {
            sheet: self,
            next: 0,
            count: self.row_count(),
        }
    }

    /// シートの使用幅（最終使用列まで）
    fn width(&self) -> usize {
        self.data.end().map_or(0, |(_, col)| col as usize + 1)
    }

    fn value_at(&self, row: usize, col: usize) -> &Data {
        self.data
            .get_value((row as u32, col as u32))
            .unwrap_or(&EMPTY_CELL)
    }

    fn has_formula_at(&self, row: usize, col: usize) -> bool {
        self.formulas
            .as_ref()
            .and_then(|range| range.get_value((row as u32, col as u32)))
            .is_some_and(|formula| !formula.is_empty())
    }
}

/// シート行のイテレータ
///
/// 物理行0から最終使用行まで、1行ずつ前方にのみ進みます。
pub struct SheetRows<'a> {
    sheet: &'a SheetReader,
    next: usize,
    count: usize,
}

impl<'a> Iterator for SheetRows<'a> {
    type Item = Row<'a>;

    fn next(&mut self) -> Option<Row<'a>> {
        if self.next >= self.count {
            return None;
        }
        let row = Row {
            sheet: self.sheet,
            index: self.next,
        };
        self.next += 1;
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.next;
        (remaining, Some(remaining))
    }
}

/// シートの1行
#[derive(Clone, Copy)]
pub struct Row<'a> {
    sheet: &'a SheetReader,
    index: usize,
}

impl<'a> Row<'a> {
    /// 行の使用長（末尾の空セルを除いたセル数）
    ///
    /// スプレッドシートは矩形を保証しないため、長さは行ごとに異なります。
    pub fn len(&self) -> usize {
        (0..self.sheet.width())
            .rev()
            .find(|&col| !matches!(self.sheet.value_at(self.index, col), Data::Empty))
            .map_or(0, |col| col + 1)
    }

    /// 行が空（使用セルなし）かどうか
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 列位置のセルを取得（使用幅の外は空セルとして読める）
    pub fn cell(&self, col: usize) -> Cell<'a> {
        Cell {
            data: self.sheet.value_at(self.index, col),
            has_formula: self.sheet.has_formula_at(self.index, col),
        }
    }
}

/// シートの1セル
///
/// 生値・日付フラグ・生の型タグの3点を公開します。
#[derive(Clone, Copy)]
pub struct Cell<'a> {
    data: &'a Data,
    has_formula: bool,
}

impl Cell<'_> {
    /// セルの生値
    pub fn value(&self) -> Value {
        match self.data {
            Data::Empty => Value::Empty,
            Data::String(s) => Value::String(s.clone()),
            Data::Float(f) => Value::Float(*f),
            Data::Int(i) => Value::Float(*i as f64),
            Data::Bool(b) => Value::Bool(*b),
            Data::DateTime(dt) => match dt.as_datetime() {
                Some(dt) => Value::DateTime(dt),
                None => Value::Float(dt.as_f64()),
            },
            Data::DateTimeIso(s) => match self.data.as_datetime() {
                Some(dt) => Value::DateTime(dt),
                None => Value::String(s.clone()),
            },
            Data::DurationIso(s) => Value::String(s.clone()),
            Data::Error(e) => Value::Error(e.to_string()),
            _ => Value::Empty,
        }
    }

    /// 日付フラグ
    ///
    /// シリアル日時セルおよびISO形式の日時・期間セルで立ちます。
    pub fn is_date(&self) -> bool {
        matches!(
            self.data,
            Data::DateTime(_) | Data::DateTimeIso(_) | Data::DurationIso(_)
        )
    }

    /// 生の型タグ
    ///
    /// 数式セルはキャッシュ値の有無で分類します: キャッシュ値のない数式は
    /// `Formula`、文字列結果をキャッシュした数式は`FormulaCacheString`、
    /// 数値・論理値をキャッシュした数式はその値自身のタグになります。
    pub fn type_tag(&self) -> TypeTag {
        match self.data {
            Data::String(_) if self.has_formula => TypeTag::FormulaCacheString,
            Data::String(_) => TypeTag::String,
            Data::Int(_) | Data::Float(_) | Data::DateTime(_) => TypeTag::Numeric,
            Data::Bool(_) => TypeTag::Boolean,
            Data::DateTimeIso(_) | Data::DurationIso(_) => TypeTag::String,
            Data::Empty if self.has_formula => TypeTag::Formula,
            Data::Empty => TypeTag::Empty,
            Data::Error(_) => TypeTag::Error,
            _ => TypeTag::Empty,
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! 単体テスト用のインメモリシート構築ヘルパー

    use super::*;

    /// セルのリストからSheetReaderを構築する
    pub(crate) fn sheet_from(cells: &[(u32, u32, Data)]) -> SheetReader {
        sheet_with_formulas(cells, &[])
    }

    /// セルと数式のリストからSheetReaderを構築する
    pub(crate) fn sheet_with_formulas(
        cells: &[(u32, u32, Data)],
        formulas: &[(u32, u32, &str)],
    ) -> SheetReader {
        let max_row = cells.iter().map(|c| c.0).max().unwrap_or(0);
        let max_col = cells.iter().map(|c| c.1).max().unwrap_or(0);
        let mut data = Range::new((0, 0), (max_row, max_col));
        for (row, col, value) in cells {
            data.set_value((*row, *col), value.clone());
        }

        let formulas = if formulas.is_empty() {
            None
        } else {
            let max_row = formulas.iter().map(|f| f.0).max().unwrap_or(0);
            let max_col = formulas.iter().map(|f| f.1).max().unwrap_or(0);
            let mut range = Range::new((0, 0), (max_row, max_col));
            for (row, col, formula) in formulas {
                range.set_value((*row, *col), formula.to_string());
            }
            Some(range)
        };

        SheetReader {
            name: "test".to_string(),
            data,
            formulas,
        }
    }
}
