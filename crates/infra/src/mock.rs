//! # テスト用モック送信
//!
//! ユースケーステストで使用するインメモリ送信実装。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! staffsync-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use staffsync_domain::notification::{EmailMessage, NotificationError};

use crate::notification::NotificationSender;

// ===== MockNotificationSender =====

/// 送信を記録するモック
///
/// 呼び出し回数（= SMTP 接続の試行回数に相当）と送信内容を記録する。
/// [`failing`](Self::failing) で作成すると常に `SendFailed` を返す。
#[derive(Clone, Default)]
pub struct MockNotificationSender {
    attempts:      Arc<Mutex<Vec<EmailMessage>>>,
    failure_cause: Option<String>,
}

impl MockNotificationSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// 常に送信失敗するモックを作成
    pub fn failing(cause: impl Into<String>) -> Self {
        Self {
            attempts:      Arc::new(Mutex::new(Vec::new())),
            failure_cause: Some(cause.into()),
        }
    }

    /// 送信に成功したメール
    pub fn sent_emails(&self) -> Vec<EmailMessage> {
        if self.failure_cause.is_some() {
            return Vec::new();
        }
        self.attempts.lock().unwrap().clone()
    }

    /// 送信が試行された回数
    pub fn attempt_count(&self) -> usize {
        self.attempts.lock().unwrap().len()
    }
}

#[async_trait]
impl NotificationSender for MockNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        self.attempts.lock().unwrap().push(email.clone());

        match &self.failure_cause {
            Some(cause) => Err(NotificationError::SendFailed(cause.clone())),
            None => Ok(()),
        }
    }
}
