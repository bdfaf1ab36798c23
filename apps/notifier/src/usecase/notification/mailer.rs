//! # メーラー
//!
//! 送信設定を検査した上で [`NotificationSender`] に 1 回だけ送信を依頼する。
//!
//! ## 設計方針
//!
//! - **接続前に判定**: 無効化・設定不足は SMTP 接続を試みる前に検出する
//! - **リトライなし**: 送信失敗はそのまま呼び出し元へ返す
//! - **失敗は値で返す**: [`Mailer::send`] は成否を bool で返し、パニックしない

use std::sync::Arc;

use staffsync_domain::notification::{EmailMessage, NotificationError};
use staffsync_infra::notification::NotificationSender;
use staffsync_shared::event_log::error::{category, kind};

use crate::config::EmailConfig;

/// メーラー
///
/// 不変の [`EmailConfig`] と送信実装を保持する。
pub struct Mailer {
    config: EmailConfig,
    sender: Arc<dyn NotificationSender>,
}

impl Mailer {
    pub fn new(config: EmailConfig, sender: Arc<dyn NotificationSender>) -> Self {
        Self { config, sender }
    }

    /// 送信が有効化されているか
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// メールを送信する
    ///
    /// 送信が無効化されている場合は [`NotificationError::Disabled`]、
    /// 必須設定が欠けている場合は [`NotificationError::IncompleteConfig`] を返し、
    /// どちらも送信実装を呼び出さない。
    pub async fn deliver(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        if !self.config.enabled {
            return Err(NotificationError::Disabled);
        }

        let missing = self.config.missing_settings();
        if !missing.is_empty() {
            return Err(NotificationError::IncompleteConfig(missing));
        }

        self.sender.send_email(email).await
    }

    /// メールを送信し、成否を返す
    ///
    /// 結果ごとに 1 行ログを出力する（成功: info、無効化: warn、それ以外: error）。
    pub async fn send(&self, email: &EmailMessage) -> bool {
        match self.deliver(email).await {
            Ok(()) => {
                tracing::info!(
                    to = %email.to,
                    subject = %email.subject,
                    "メールを送信しました"
                );
                true
            }
            Err(e @ NotificationError::Disabled) => {
                tracing::warn!(
                    error.category = category::CONFIGURATION,
                    error.kind = kind::EMAIL_DISABLED,
                    to = %email.to,
                    subject = %email.subject,
                    "{e}"
                );
                false
            }
            Err(e @ NotificationError::IncompleteConfig(_)) => {
                tracing::error!(
                    error.category = category::CONFIGURATION,
                    error.kind = kind::INCOMPLETE_CONFIG,
                    to = %email.to,
                    "{e}"
                );
                false
            }
            Err(e) => {
                tracing::error!(
                    error.category = category::EXTERNAL_SERVICE,
                    error.kind = kind::SMTP,
                    to = %email.to,
                    error = %e,
                    "メール送信に失敗しました"
                );
                false
            }
        }
    }
}
