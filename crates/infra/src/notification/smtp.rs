//! SMTP 通知送信実装
//!
//! lettre の `AsyncSmtpTransport` を使用してメールを送信する。
//! 平文で接続した後 STARTTLS で暗号化し、設定された資格情報で認証する。
//!
//! トランスポートは送信ごとに生成し、送信完了（成功・失敗とも）で破棄する。
//! コネクションプールは使用しない。

use std::fmt;

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport,
    AsyncTransport,
    Tokio1Executor,
    message::{
        Attachment as MimeAttachment,
        Mailbox,
        Message,
        MultiPart,
        SinglePart,
        header::ContentType,
    },
    transport::smtp::authentication::Credentials,
};
use staffsync_domain::notification::{Attachment, EmailMessage, NotificationError};

use super::NotificationSender;

/// 添付ファイルの Content-Type が解釈できない場合の既定値
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// SMTP 接続設定
#[derive(Clone)]
pub struct SmtpSettings {
    /// SMTP リレーのホスト名
    pub server:         String,
    /// SMTP リレーのポート番号（通常 587）
    pub port:           u16,
    /// 認証ユーザー名
    pub username:       String,
    /// 認証パスワード
    pub password:       String,
    /// 送信元メールアドレス
    pub sender_address: String,
    /// 送信元の表示名
    pub sender_name:    Option<String>,
}

impl fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("server", &self.server)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("sender_address", &self.sender_address)
            .field("sender_name", &self.sender_name)
            .finish()
    }
}

/// SMTP 通知送信
///
/// `lettre::AsyncSmtpTransport<Tokio1Executor>` を送信ごとに構築する。
pub struct SmtpNotificationSender {
    settings: SmtpSettings,
}

impl SmtpNotificationSender {
    /// 新しい SMTP 送信インスタンスを作成
    ///
    /// 接続はこの時点では行わない。
    pub fn new(settings: SmtpSettings) -> Self {
        Self { settings }
    }

    /// 送信元の Mailbox を構築する
    fn sender_mailbox(&self) -> Result<Mailbox, NotificationError> {
        let address = self.settings.sender_address.parse().map_err(|e| {
            NotificationError::SendFailed(format!(
                "送信元アドレス不正 ({}): {e}",
                self.settings.sender_address
            ))
        })?;
        Ok(Mailbox::new(self.settings.sender_name.clone(), address))
    }

    /// EmailMessage から MIME メッセージを構築する
    fn build_message(&self, email: &EmailMessage) -> Result<Message, NotificationError> {
        let to: Mailbox = email.to.parse().map_err(|e| {
            NotificationError::SendFailed(format!("宛先アドレス不正 ({}): {e}", email.to))
        })?;

        let alternative = alternative_body(email);
        let body = if email.attachments.is_empty() {
            alternative
        } else {
            let mut mixed = MultiPart::mixed().multipart(alternative);
            for attachment in &email.attachments {
                mixed = mixed.singlepart(attachment_part(attachment)?);
            }
            mixed
        };

        Message::builder()
            .from(self.sender_mailbox()?)
            .to(to)
            .subject(&email.subject)
            .multipart(body)
            .map_err(|e| NotificationError::SendFailed(format!("メッセージ構築失敗: {e}")))
    }

    /// STARTTLS + 認証付きのトランスポートを構築する
    fn build_transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, NotificationError> {
        let credentials = Credentials::new(
            self.settings.username.clone(),
            self.settings.password.clone(),
        );

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.settings.server)
            .map_err(|e| NotificationError::SendFailed(format!("SMTP リレー設定失敗: {e}")))?
            .port(self.settings.port)
            .credentials(credentials)
            .build();

        Ok(transport)
    }
}

/// テキスト（任意）と HTML（必須）の multipart/alternative を構築する
fn alternative_body(email: &EmailMessage) -> MultiPart {
    let html = SinglePart::builder()
        .header(ContentType::TEXT_HTML)
        .body(email.html_body.clone());

    match &email.text_body {
        Some(text) => MultiPart::alternative()
            .singlepart(
                SinglePart::builder()
                    .header(ContentType::TEXT_PLAIN)
                    .body(text.clone()),
            )
            .singlepart(html),
        None => MultiPart::alternative().singlepart(html),
    }
}

/// 添付ファイルを `Content-Disposition: attachment` 付きのバイナリパートにする
fn attachment_part(attachment: &Attachment) -> Result<SinglePart, NotificationError> {
    let content_type = ContentType::parse(&attachment.content_type)
        .or_else(|_| ContentType::parse(FALLBACK_CONTENT_TYPE))
        .map_err(|e| NotificationError::SendFailed(format!("Content-Type 不正: {e}")))?;

    Ok(MimeAttachment::new(attachment.filename.clone())
        .body(attachment.data.clone(), content_type))
}

#[async_trait]
impl NotificationSender for SmtpNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        let message = self.build_message(email)?;
        let transport = self.build_transport()?;

        transport
            .send(message)
            .await
            .map_err(|e| NotificationError::SendFailed(format!("SMTP 送信失敗: {e}")))?;

        tracing::debug!(
            to = %email.to,
            server = %self.settings.server,
            port = self.settings.port,
            "SMTP セッション完了"
        );

        Ok(())
    }
}
