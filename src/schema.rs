//! Schema Inference Module
//!
//! シートの最初のデータ行（参照行）からフィールドリストを導出するモジュール。
//! 型タグからストレージ型への変換は固定の対応表1つに集約し、
//! 推論規則を単独で監査・テストできるようにしている。

use crate::error::SheetStreamError;
use crate::reader::SheetReader;
use crate::types::{Field, FieldList, StorageType, TypeTag};

/// 型タグからストレージ型への固定対応表
///
/// 日付フラグが立っているセルはこの表を通らず、無条件に`Date`になります。
/// 認識できないタグ（空セル・エラーセルを含む）は`Unknown`です。
pub(crate) fn storage_type_for(tag: TypeTag) -> StorageType {
    match tag {
        TypeTag::String => StorageType::String,
        TypeTag::Formula => StorageType::Unknown,
        TypeTag::Numeric => StorageType::Float,
        TypeTag::Boolean => StorageType::Boolean,
        TypeTag::InlineString => StorageType::String,
        TypeTag::FormulaCacheString => StorageType::String,
        // 認識対象外のタグ
        TypeTag::Empty | TypeTag::Error => StorageType::Unknown,
    }
}

/// 文字列内部の空白の連なり（手動改行を含む）を1個のスペースに畳む
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// シートの参照行（とヘッダー行）からフィールドリストを推論する
///
/// `first_row`以降で最初に現れる行が参照行になり、その各セルの
/// 日付フラグと型タグからストレージ型が決まります。`has_header`の場合は
/// `first_row - 1`以降で最初に現れる行のセル値がフィールド名になり、
/// そうでなければ `col0, col1, …` が合成されます。
///
/// 名前とセルは位置で対応付けられます。ヘッダー行が参照行より長い場合、
/// 余った名前は捨てられます。参照行の方が長い場合、名前のない末尾セルは
/// スキーマに含まれません。
///
/// # 発生し得るエラー
///
/// * `SheetStreamError::NoData` - `first_row`以降に行が存在しない場合
pub(crate) fn infer_fields(
    sheet: &SheetReader,
    first_row: usize,
    has_header: bool,
) -> Result<FieldList, SheetStreamError> {
    let no_data = |row: usize| SheetStreamError::NoData {
        sheet: sheet.name().to_string(),
        row,
    };

    let reference = sheet.rows().nth(first_row).ok_or_else(|| no_data(first_row))?;

    let names: Vec<String> = if has_header {
        // ヘッダー行は独立した走査で取得する
        let header = sheet
            .rows()
            .nth(first_row - 1)
            .ok_or_else(|| no_data(first_row - 1))?;
        (0..header.len())
            .map(|col| collapse_whitespace(&header.cell(col).value().as_text()))
            .collect()
    } else {
        (0..reference.len()).map(|i| format!("col{}", i)).collect()
    };

    let fields: FieldList = names
        .into_iter()
        .zip(0..reference.len())
        .map(|(name, col)| {
            let cell = reference.cell(col);
            let storage_type = if cell.is_date() {
                StorageType::Date
            } else {
                storage_type_for(cell.type_tag())
            };
            Field::new(name, storage_type)
        })
        .collect();

    log::debug!(
        "inferred {} field(s) from sheet '{}' (reference row {})",
        fields.len(),
        sheet.name(),
        first_row
    );

    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::test_support::sheet_from;
    use calamine::Data;
    use proptest::prelude::*;

    #[test]
    fn test_storage_type_table() {
        assert_eq!(storage_type_for(TypeTag::String), StorageType::String);
        assert_eq!(storage_type_for(TypeTag::Formula), StorageType::Unknown);
        assert_eq!(storage_type_for(TypeTag::Numeric), StorageType::Float);
        assert_eq!(storage_type_for(TypeTag::Boolean), StorageType::Boolean);
        assert_eq!(storage_type_for(TypeTag::InlineString), StorageType::String);
        assert_eq!(
            storage_type_for(TypeTag::FormulaCacheString),
            StorageType::String
        );
        assert_eq!(storage_type_for(TypeTag::Empty), StorageType::Unknown);
        assert_eq!(storage_type_for(TypeTag::Error), StorageType::Unknown);
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("Score "), "Score");
        assert_eq!(collapse_whitespace("  total \n amount "), "total amount");
        assert_eq!(collapse_whitespace("a\t\tb"), "a b");
        assert_eq!(collapse_whitespace(""), "");
    }

    #[test]
    fn test_infer_with_header() {
        let sheet = sheet_from(&[
            (0, 0, Data::String("Name".to_string())),
            (0, 1, Data::String("Score ".to_string())),
            (1, 0, Data::String("Ann".to_string())),
            (1, 1, Data::Float(9.5)),
        ]);

        let fields = infer_fields(&sheet, 1, true).unwrap();

        assert_eq!(fields.len(), 2);
        assert_eq!(fields.get(0).unwrap().name, "Name");
        assert_eq!(fields.get(0).unwrap().storage_type, StorageType::String);
        assert_eq!(fields.get(1).unwrap().name, "Score");
        assert_eq!(fields.get(1).unwrap().storage_type, StorageType::Float);
    }

    #[test]
    fn test_infer_without_header_synthesizes_names() {
        let sheet = sheet_from(&[
            (0, 0, Data::String("Ann".to_string())),
            (0, 1, Data::Float(9.5)),
            (0, 2, Data::Bool(true)),
        ]);

        let fields = infer_fields(&sheet, 0, false).unwrap();

        assert_eq!(fields.names(), vec!["col0", "col1", "col2"]);
        assert_eq!(fields.get(2).unwrap().storage_type, StorageType::Boolean);
    }

    #[test]
    fn test_infer_skips_rows_before_first_row() {
        // 行0〜1はごみ、行2がヘッダー、行3が参照行
        let sheet = sheet_from(&[
            (0, 0, Data::String("junk".to_string())),
            (2, 0, Data::String("id".to_string())),
            (3, 0, Data::Float(1.0)),
        ]);

        let fields = infer_fields(&sheet, 3, true).unwrap();

        assert_eq!(fields.len(), 1);
        assert_eq!(fields.get(0).unwrap().name, "id");
        assert_eq!(fields.get(0).unwrap().storage_type, StorageType::Float);
    }

    #[test]
    fn test_infer_date_flag_wins_over_tag() {
        let sheet = sheet_from(&[
            (0, 0, Data::String("When".to_string())),
            (1, 0, Data::DateTimeIso("2024-03-15T00:00:00".to_string())),
        ]);

        let fields = infer_fields(&sheet, 1, true).unwrap();

        assert_eq!(fields.get(0).unwrap().storage_type, StorageType::Date);
    }

    #[test]
    fn test_infer_header_longer_than_reference_drops_extra_names() {
        let sheet = sheet_from(&[
            (0, 0, Data::String("a".to_string())),
            (0, 1, Data::String("b".to_string())),
            (0, 2, Data::String("c".to_string())),
            (1, 0, Data::Float(1.0)),
        ]);

        let fields = infer_fields(&sheet, 1, true).unwrap();

        // 参照行は1セルなので、余った名前 b, c は捨てられる
        assert_eq!(fields.names(), vec!["a"]);
    }

    #[test]
    fn test_infer_reference_longer_than_header_drops_unnamed_cells() {
        let sheet = sheet_from(&[
            (0, 0, Data::String("a".to_string())),
            (1, 0, Data::Float(1.0)),
            (1, 1, Data::Float(2.0)),
            (1, 2, Data::Float(3.0)),
        ]);

        let fields = infer_fields(&sheet, 1, true).unwrap();

        // 名前のない末尾セルはスキーマに含まれない
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn test_infer_empty_header_cell_yields_empty_name() {
        let sheet = sheet_from(&[
            (0, 1, Data::String("b".to_string())),
            (1, 0, Data::Float(1.0)),
            (1, 1, Data::Float(2.0)),
        ]);

        let fields = infer_fields(&sheet, 1, true).unwrap();

        assert_eq!(fields.names(), vec!["", "b"]);
    }

    #[test]
    fn test_infer_no_row_at_first_row_fails() {
        let sheet = sheet_from(&[(0, 0, Data::Float(1.0)), (1, 0, Data::Float(2.0))]);

        let result = infer_fields(&sheet, 5, false);

        match result {
            Err(SheetStreamError::NoData { sheet, row }) => {
                assert_eq!(sheet, "test");
                assert_eq!(row, 5);
            }
            _ => panic!("Expected NoData error"),
        }
    }

    proptest! {
        // 畳み込み後の名前は先頭・末尾に空白を持たず、空白の連なりを含まない
        #[test]
        fn test_collapse_whitespace_is_normalized(input in ".{0,64}") {
            let collapsed = collapse_whitespace(&input);

            prop_assert!(!collapsed.starts_with(' '));
            prop_assert!(!collapsed.ends_with(' '));
            prop_assert!(!collapsed.contains("  "));
            prop_assert!(!collapsed.contains('\n'));
            prop_assert!(!collapsed.contains('\t'));
        }
    }
}
