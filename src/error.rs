//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use thiserror::Error;

/// sheetstreamクレート全体で使用するエラー型
///
/// # エラーの種類
///
/// - `Io`: I/O操作中に発生したエラー（ファイル読み込み失敗など）
/// - `Workbook`: ワークブックの解析中に発生したエラー（calamine由来）
/// - `Config`: 呼び出し側の設定ミス（存在しないシート、範囲外のインデックスなど）。
///   構築時に同期的に報告され、初回利用まで遅延されることはありません。
/// - `NoData`: スキーマ推論の対象行が存在しない（シートが空、または
///   `skip_rows`がシート末尾を越えている）
/// - `SchemaUninitialized`: スキーマが確定していない状態での行抽出。
///   プログラミングエラーとして扱われ、リトライ対象ではありません。
/// - `ReadOnly`: 読み取り専用ストアへの書き込み要求
/// - `MissingBackend`: ワークブック読み取りバックエンドが組み込まれていない
///
/// すべてのエラーは直接の呼び出し元に同期的に伝播します。リトライや
/// 部分結果の抑制は行いません（推論・抽出中の失敗は操作全体を中断します）。
///
/// # 使用例
///
/// ```rust,no_run
/// use sheetstream::SheetStreamError;
/// use std::fs::File;
///
/// fn open_resource(path: &str) -> Result<(), SheetStreamError> {
///     let file = File::open(path)?; // Ioエラーが自動的に変換される
///     // ... 処理 ...
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum SheetStreamError {
    /// I/O操作中に発生したエラー
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ワークブックの解析中に発生したエラー
    ///
    /// calamineクレートがワークブックを解析する際に発生したエラーです。
    /// ファイル形式が不正、破損したファイルなどが原因となります。
    ///
    /// `#[from]`属性により、`calamine::Error`から自動的に変換されます。
    #[cfg(feature = "calamine")]
    #[error("Failed to read workbook: {0}")]
    Workbook(#[from] calamine::Error),

    /// 呼び出し側の設定ミス
    ///
    /// シートセレクタが解決できない場合など、構築時に検出される
    /// 設定エラーです。
    #[error("Configuration error: {0}")]
    Config(String),

    /// スキーマ推論の対象行が存在しない
    ///
    /// `first_row_index`以降に行が1つもないシートに対して推論を
    /// 要求した場合に発生します。空のスキーマを黙って返すことはしません。
    #[error("Sheet '{sheet}' has no row at or after index {row}")]
    NoData {
        /// 対象シート名
        sheet: String,
        /// 最初のデータ行として期待されたインデックス（0始まり）
        row: usize,
    },

    /// スキーマが確定していない状態での行抽出
    #[error("Field list is not initialized")]
    SchemaUninitialized,

    /// 読み取り専用ストアへの書き込み要求
    #[error("Read-only store: {0}")]
    ReadOnly(String),

    /// ワークブック読み取りバックエンドが組み込まれていない
    ///
    /// `calamine`フィーチャを無効にしてビルドした場合、フォーマット依存の
    /// 機能はすべてこのエラーになります。
    #[error("Missing package '{package}': required for {purpose}")]
    MissingBackend {
        /// 不足しているパッケージ名
        package: &'static str,
        /// パッケージの用途
        purpose: &'static str,
    },
}
