//! シートのスキーマとレコードをダンプする小さなデモ
//!
//! ```text
//! cargo run --example dump_sheet -- workbook.xlsx [sheet]
//! ```
//!
//! `sheet`は省略時に先頭シート。数字ならインデックス、それ以外は名前として
//! 解釈される。

use sheetstream::{SheetRef, TableOptions, WorkbookStore};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let path = match args.next() {
        Some(path) => path,
        None => {
            eprintln!("usage: dump_sheet <workbook> [sheet]");
            std::process::exit(2);
        }
    };
    let sheet = match args.next() {
        Some(arg) => match arg.parse::<usize>() {
            Ok(index) => SheetRef::Index(index),
            Err(_) => SheetRef::Name(arg),
        },
        None => SheetRef::Index(0),
    };

    let mut store = WorkbookStore::new(&path);
    println!("sheets: {:?}", store.object_names()?);

    let table = store.get_object(sheet, TableOptions::new())?;
    println!("schema of '{}':", table.name());
    for field in table.fields() {
        println!("  {:<20} {:?}", field.name, field.storage_type);
    }

    for record in table.records()? {
        println!("{}", serde_json::to_string(&record)?);
    }

    Ok(())
}
