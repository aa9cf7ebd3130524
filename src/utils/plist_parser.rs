use plist::Value;
use std::path::Path;

use crate::utils::{AppError, AppResult};

pub fn read_info_plist(app_path: &Path) -> AppResult<plist::Dictionary> {
    let plist_path = app_path.join("Contents/Info.plist");
    let val = Value::from_file(&plist_path)?;
    val.into_dictionary()
        .ok_or_else(|| AppError::Custom("Info.plist is not a dictionary".into()))
}

/// Parse plist output captured from a command (`hdiutil info -plist`).
pub fn parse_plist_bytes(bytes: &[u8]) -> AppResult<Value> {
    Ok(Value::from_reader(std::io::Cursor::new(bytes))?)
}

pub fn get_string(dict: &plist::Dictionary, key: &str) -> Option<String> {
    dict.get(key)?.as_string().map(String::from)
}
