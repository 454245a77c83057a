//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。
//! セルの生値、リーダーが報告する型タグ、スキーマ（フィールドリスト）を提供する。

use chrono::NaiveDateTime;
use serde::ser::{Serialize, Serializer};

/// セルの生値を表す列挙型
///
/// ワークブックリーダーから取り出したままのスカラー値です。行・レコードの
/// ストリームはこの型の値をそのまま下流に渡します（書式適用なし）。
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// 空セル（欠損セルのパディングにも使用される）
    Empty,

    /// 文字列
    String(String),

    /// 数値（f64、整数セルも含む）
    Float(f64),

    /// 論理値
    Bool(bool),

    /// 日時（シリアル値から変換済み）
    DateTime(NaiveDateTime),

    /// エラー値（例: #DIV/0!）
    Error(String),
}

impl Value {
    /// 値が「空とみなされる」かどうかを判定
    ///
    /// 空行停止（`stop_empty_line`）の判定に使用されます。
    /// 空セル、空文字列、数値ゼロ、`false` が空扱いになります。
    pub fn is_empty_like(&self) -> bool {
        match self {
            Value::Empty => true,
            Value::String(s) => s.is_empty(),
            Value::Float(n) => *n == 0.0,
            Value::Bool(b) => !b,
            _ => false,
        }
    }

    /// 値をテキストとして取得（書式適用前）
    ///
    /// ヘッダー行からフィールド名を導出する際に使用されます。
    /// 空セルは空文字列になります。
    pub fn as_text(&self) -> String {
        match self {
            Value::Empty => String::new(),
            Value::String(s) => s.clone(),
            Value::Float(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::DateTime(dt) => dt.to_string(),
            Value::Error(e) => e.clone(),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Empty => serializer.serialize_unit(),
            Value::String(s) => serializer.serialize_str(s),
            Value::Float(n) => serializer.serialize_f64(*n),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::DateTime(dt) => serializer.collect_str(&dt.format("%Y-%m-%dT%H:%M:%S")),
            Value::Error(e) => serializer.serialize_str(e),
        }
    }
}

/// リーダーが報告するセルの生の型タグ
///
/// ワークブックリーダーの都合で決まる低水準の分類で、ストレージ型への
/// 固定変換表の入力になります。`Empty` と `Error` は変換表の
/// 「未認識」扱いです。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeTag {
    /// 共有文字列セル
    String,

    /// 数式セル（キャッシュ値なし）
    Formula,

    /// 数値セル
    Numeric,

    /// 論理値セル
    Boolean,

    /// インライン文字列セル
    InlineString,

    /// 数式セルのキャッシュ済み文字列結果
    FormulaCacheString,

    /// 空セル
    Empty,

    /// エラーセル
    Error,
}

/// フィールドのストレージ型
///
/// ワークブック内部の型タグとは独立した、パイプライン向けの粗い意味型です。
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageType {
    String,
    Float,
    Boolean,
    Date,
    Unknown,
}

/// スキーマの1フィールド
///
/// 名前とストレージ型の組。名前の一意性は保証されません（重複可）。
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Field {
    /// フィールド名
    pub name: String,

    /// ストレージ型
    pub storage_type: StorageType,
}

impl Field {
    /// 新しいフィールドを生成
    pub fn new(name: impl Into<String>, storage_type: StorageType) -> Self {
        Self {
            name: name.into(),
            storage_type,
        }
    }
}

/// 順序付きフィールドリスト
///
/// スキーマ本体。一度確定したリストは抽出器の生存期間中、不変として
/// 扱われます。重複名は保持されます（レコード射影時のみ後勝ち）。
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct FieldList {
    fields: Vec<Field>,
}

impl FieldList {
    /// 空のフィールドリストを生成
    pub fn new() -> Self {
        Self::default()
    }

    /// フィールドを末尾に追加
    pub fn push(&mut self, field: Field) {
        self.fields.push(field);
    }

    /// フィールド数
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// フィールドが1つもないかどうか
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// 位置指定でフィールドを取得
    pub fn get(&self, index: usize) -> Option<&Field> {
        self.fields.get(index)
    }

    /// フィールドのイテレータ
    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.fields.iter()
    }

    /// フィールド名のリスト（定義順）
    pub fn names(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.name.clone()).collect()
    }
}

impl FromIterator<Field> for FieldList {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a FieldList {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
