//! # 通知送信
//!
//! メール通知の送信を担当するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `NotificationSender` trait でメール送信を抽象化
//! - **SMTP 実装**: STARTTLS + 認証付きの SMTP リレー経由で送信する
//! - **1 回のみ送信**: リトライは行わず、失敗はそのまま呼び出し元へ返す

mod smtp;

use async_trait::async_trait;
pub use smtp::{SmtpNotificationSender, SmtpSettings};
use staffsync_domain::notification::{EmailMessage, NotificationError};

/// メール送信トレイト
///
/// 通知基盤の中核。メール送信の具体的な方法を抽象化する。
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// メールを送信する
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError>;
}
