//! # 通知受信者
//!
//! 通知メールの宛先となるユーザーを定義する。
//! 呼び出し元のペイロード `user` オブジェクトに対応する。

use serde::Deserialize;

use crate::value_objects::{lenient_text, non_empty};

/// 名前が未指定の場合に使用する呼びかけ
pub const DEFAULT_RECIPIENT_NAME: &str = "Utente";

/// 通知受信者
///
/// `email` が欠損している場合は空文字列になる。空の宛先は送信時に
/// アドレス不正として失敗する。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Recipient {
    /// 宛先メールアドレス
    #[serde(default, deserialize_with = "lenient_text")]
    email: Option<String>,
    /// 表示名
    #[serde(default, deserialize_with = "lenient_text")]
    name:  Option<String>,
}

impl Recipient {
    pub fn new(email: impl Into<String>, name: Option<String>) -> Self {
        Self {
            email: Some(email.into()),
            name,
        }
    }

    pub fn email(&self) -> &str {
        self.email.as_deref().unwrap_or_default()
    }

    /// 本文の呼びかけに使用する名前
    pub fn display_name(&self) -> &str {
        non_empty(self.name.as_deref()).unwrap_or(DEFAULT_RECIPIENT_NAME)
    }
}
