//! # 通知サービス
//!
//! テンプレートレンダリング → メール送信 → ログ記録を統合するサービス。
//!
//! ## 設計方針
//!
//! - **失敗は bool で返す**: `notify()` はどのステップで失敗してもパニックせず `false` を返す
//! - **ビジネスイベント**: 送信の成否（無効化によるスキップを含む）を `log_business_event!` で記録する
//! - **依存性注入**: 送信処理は [`Mailer`] 経由で `NotificationSender` trait に委譲する

use staffsync_domain::notification::Notification;
use staffsync_shared::{
    event_log::{error, event},
    log_business_event,
};

use super::{Mailer, TemplateRenderer};

/// 通知サービス
pub struct NotificationService {
    mailer:            Mailer,
    template_renderer: TemplateRenderer,
}

impl NotificationService {
    pub fn new(mailer: Mailer, template_renderer: TemplateRenderer) -> Self {
        Self {
            mailer,
            template_renderer,
        }
    }

    /// 通知を送信し、成否を返す
    pub async fn notify(&self, notification: Notification) -> bool {
        let kind: &'static str = notification.kind().into();
        let recipient_email = notification.recipient().email().to_string();

        // テンプレートレンダリング
        let email = match self.template_renderer.render(&notification) {
            Ok(email) => email,
            Err(e) => {
                tracing::error!(
                    error.category = error::category::RENDERING,
                    error.kind = error::kind::TEMPLATE,
                    notification.kind = kind,
                    error = %e,
                    "通知テンプレートのレンダリングに失敗"
                );
                return false;
            }
        };

        // メール送信
        let sent = self.mailer.send(&email).await;

        if sent {
            log_business_event!(
                event.category = event::category::NOTIFICATION,
                event.action = event::action::NOTIFICATION_SENT,
                event.result = event::result::SUCCESS,
                notification.kind = kind,
                notification.recipient = %recipient_email,
                "通知メール送信成功"
            );
        } else if !self.mailer.is_enabled() {
            log_business_event!(
                event.category = event::category::NOTIFICATION,
                event.action = event::action::NOTIFICATION_SKIPPED,
                event.result = event::result::SKIPPED,
                notification.kind = kind,
                notification.recipient = %recipient_email,
                "送信無効のため通知メールをスキップ"
            );
        } else {
            log_business_event!(
                event.category = event::category::NOTIFICATION,
                event.action = event::action::NOTIFICATION_FAILED,
                event.result = event::result::FAILURE,
                notification.kind = kind,
                notification.recipient = %recipient_email,
                "通知メール送信失敗"
            );
        }

        sent
    }
}
