//! # 通知
//!
//! メール通知に関するドメインモデルを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`NotificationKind`] | 通知種別 | コマンドライン第 1 引数（`shift` / `shift_update` / `document` / `time_off`） |
//! | [`Notification`] | 通知イベント | 種別ごとのペイロードを型付けしたもの |
//! | [`EmailMessage`] | メールメッセージ | テンプレートレンダリングの出力 |
//!
//! ## 設計方針
//!
//! - **enum による通知イベント**: 各バリアントが 1 つのメールテンプレートに対応
//! - **失敗は値で返す**: 送信・レンダリング・ペイロードの失敗はすべて [`NotificationError`] で表現し、
//!   プロセスを異常終了させない

use strum::IntoStaticStr;
use thiserror::Error;

use crate::{
    document::Document,
    schedule::{SchedulePeriod, Shift},
    time_off::TimeOffRequest,
    user::Recipient,
};

/// 通知送信エラー
#[derive(Debug, Error)]
pub enum NotificationError {
    /// メール送信が無効化されている（`EMAIL_ENABLED` が true でない）
    #[error("メール送信が無効化されています")]
    Disabled,

    /// 必須の SMTP 設定が空
    #[error("SMTP 設定が不完全です: {}", .0.join(", "))]
    IncompleteConfig(Vec<&'static str>),

    /// メール送信に失敗
    #[error("メール送信に失敗: {0}")]
    SendFailed(String),

    /// テンプレートレンダリングに失敗
    #[error("テンプレートレンダリングに失敗: {0}")]
    TemplateFailed(String),

    /// ペイロードが不正
    #[error("{0}")]
    InvalidPayload(String),

    /// 未知の通知種別
    #[error("通知種別が認識できません: {0}")]
    UnknownKind(String),
}

/// 通知種別
///
/// コマンドライン引数の文字列と相互変換する。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    IntoStaticStr,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum NotificationKind {
    /// シフト公開
    Shift,
    /// シフト更新
    ShiftUpdate,
    /// ドキュメントアップロード
    Document,
    /// 休暇申請の状態変更
    TimeOff,
}

impl NotificationKind {
    /// 引数文字列から通知種別を決定する
    pub fn parse(kind: &str) -> Result<Self, NotificationError> {
        kind.parse()
            .map_err(|_| NotificationError::UnknownKind(kind.to_string()))
    }
}

/// メール添付ファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// ファイル名（Content-Disposition に出力される）
    pub filename:     String,
    /// Content-Type（例: `application/pdf`）
    pub content_type: String,
    /// バイナリデータ
    pub data:         Vec<u8>,
}

/// メールメッセージ
///
/// テンプレートレンダリングの出力。送信処理の前に完全に構築される。
#[derive(Debug, Clone)]
pub struct EmailMessage {
    /// 送信先メールアドレス
    pub to:          String,
    /// 件名
    pub subject:     String,
    /// HTML 本文
    pub html_body:   String,
    /// プレーンテキスト本文（省略可）
    pub text_body:   Option<String>,
    /// 添付ファイル
    pub attachments: Vec<Attachment>,
}

/// 通知イベント
#[derive(Debug, Clone)]
pub enum Notification {
    /// シフト公開: 受信者の担当シフト一覧を表で送る
    ShiftPublished {
        recipient: Recipient,
        period:    SchedulePeriod,
        shifts:    Vec<Shift>,
    },
    /// シフト更新: 期間のシフトが更新されたことを知らせる
    ShiftUpdated {
        recipient: Recipient,
        period:    SchedulePeriod,
    },
    /// ドキュメントアップロード
    DocumentUploaded {
        recipient:   Recipient,
        document:    Document,
        attachments: Vec<Attachment>,
    },
    /// 休暇申請の状態変更
    TimeOffStatusChanged {
        recipient: Recipient,
        request:   TimeOffRequest,
    },
}

impl Notification {
    /// 通知種別を返す
    pub fn kind(&self) -> NotificationKind {
        match self {
            Self::ShiftPublished { .. } => NotificationKind::Shift,
            Self::ShiftUpdated { .. } => NotificationKind::ShiftUpdate,
            Self::DocumentUploaded { .. } => NotificationKind::Document,
            Self::TimeOffStatusChanged { .. } => NotificationKind::TimeOff,
        }
    }

    /// 受信者を返す
    pub fn recipient(&self) -> &Recipient {
        match self {
            Self::ShiftPublished { recipient, .. }
            | Self::ShiftUpdated { recipient, .. }
            | Self::DocumentUploaded { recipient, .. }
            | Self::TimeOffStatusChanged { recipient, .. } => recipient,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn notification_kindの文字列変換が正しい() {
        assert_eq!(NotificationKind::Shift.to_string(), "shift");
        assert_eq!(NotificationKind::ShiftUpdate.to_string(), "shift_update");
        assert_eq!(NotificationKind::Document.to_string(), "document");
        assert_eq!(NotificationKind::TimeOff.to_string(), "time_off");

        assert_eq!(
            NotificationKind::from_str("time_off").unwrap(),
            NotificationKind::TimeOff
        );
        assert_eq!(
            NotificationKind::from_str("shift_update").unwrap(),
            NotificationKind::ShiftUpdate
        );
    }

    #[test]
    fn 未知の通知種別はunknown_kindになる() {
        let result = NotificationKind::parse("newsletter");
        assert!(matches!(result, Err(NotificationError::UnknownKind(kind)) if kind == "newsletter"));
    }

    #[test]
    fn 大文字の通知種別は認識しない() {
        assert!(NotificationKind::parse("SHIFT").is_err());
    }

    #[test]
    fn kindとrecipientが各バリアントで正しい値を返す() {
        let recipient = Recipient::new("a@x.com", Some("Anna".to_string()));

        let shift = Notification::ShiftPublished {
            recipient: recipient.clone(),
            period:    SchedulePeriod::new("2024-01-01", "2024-01-07"),
            shifts:    vec![],
        };
        let time_off = Notification::TimeOffStatusChanged {
            recipient: recipient.clone(),
            request:   TimeOffRequest::default(),
        };

        assert_eq!(shift.kind(), NotificationKind::Shift);
        assert_eq!(time_off.kind(), NotificationKind::TimeOff);
        assert_eq!(shift.recipient().email(), "a@x.com");
        assert_eq!(time_off.recipient().display_name(), "Anna");
    }

    #[test]
    fn incomplete_configのメッセージに欠損項目が含まれる() {
        let error = NotificationError::IncompleteConfig(vec!["SMTP_USERNAME", "EMAIL_SENDER"]);
        assert_eq!(
            error.to_string(),
            "SMTP 設定が不完全です: SMTP_USERNAME, EMAIL_SENDER"
        );
    }
}
