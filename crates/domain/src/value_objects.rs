//! # 共通値オブジェクト
//!
//! 複数の通知ペイロードで共有される値とデシリアライズ補助を定義する。
//!
//! ## 含まれる要素
//!
//! | 要素 | 用途 |
//! |---|------|
//! | [`NOT_AVAILABLE`] | 欠損フィールドの表示用プレースホルダ |
//! | [`lenient_text`] | 文字列・数値・真偽値を文字列として受け取る serde 補助 |
//! | [`display_or_placeholder`] | 欠損値をプレースホルダに置き換える |

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// 欠損フィールドの表示用プレースホルダ
pub const NOT_AVAILABLE: &str = "N/A";

/// ペイロード中のスカラー値を文字列として受け取る
///
/// 呼び出し元のアプリケーションは日付や時刻を文字列で渡すが、
/// 数値や真偽値が混入しても失敗させずに文字列化する。
/// `null` と欠損は `None` になる。
pub fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "文字列として扱えない値です: {other}"
        ))),
    }
}

/// 値が欠損している場合に [`NOT_AVAILABLE`] を返す
pub fn display_or_placeholder(value: Option<&str>) -> &str {
    value.unwrap_or(NOT_AVAILABLE)
}

/// 値が欠損または空文字列の場合に `None` を返す
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}
