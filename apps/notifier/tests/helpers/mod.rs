//! 通知テストビルダー
//!
//! モック送信と標準的な SMTP 設定で [`NotificationService`] を組み立てる。

use std::sync::Arc;

use staffsync_infra::{mock::MockNotificationSender, notification::SmtpSettings};
use staffsync_notifier::{
    config::EmailConfig,
    usecase::notification::{Mailer, NotificationService, TemplateRenderer},
};

/// 通知テストビルダー
///
/// # 使用例
///
/// ```ignore
/// let setup = NotifierTestBuilder::new().disabled().build();
/// let outcome = dispatch("shift", payload, &setup.service).await;
/// assert_eq!(setup.sender.attempt_count(), 0);
/// ```
pub struct NotifierTestBuilder {
    enabled:  bool,
    sender:   MockNotificationSender,
    base_url: Option<String>,
}

/// ビルド結果
pub struct NotifierTestSetup {
    pub service: NotificationService,
    pub sender:  MockNotificationSender,
}

impl Default for NotifierTestBuilder {
    fn default() -> Self {
        Self {
            enabled:  true,
            sender:   MockNotificationSender::new(),
            base_url: None,
        }
    }
}

impl NotifierTestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// `EMAIL_ENABLED=false` 相当にする
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// 送信が常に失敗するようにする
    pub fn failing(mut self, cause: &str) -> Self {
        self.sender = MockNotificationSender::failing(cause);
        self
    }

    pub fn base_url(mut self, base_url: &str) -> Self {
        self.base_url = Some(base_url.to_string());
        self
    }

    pub fn build(self) -> NotifierTestSetup {
        let config = EmailConfig {
            enabled: self.enabled,
            smtp:    SmtpSettings {
                server:         "smtp.example.com".to_string(),
                port:           587,
                username:       "notifier".to_string(),
                password:       "s3cret".to_string(),
                sender_address: "noreply@staffsync.example.com".to_string(),
                sender_name:    Some("StaffSync".to_string()),
            },
        };
        let mailer = Mailer::new(config, Arc::new(self.sender.clone()));
        let renderer = TemplateRenderer::new(self.base_url).unwrap();

        NotifierTestSetup {
            service: NotificationService::new(mailer, renderer),
            sender:  self.sender,
        }
    }
}
