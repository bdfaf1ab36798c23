//! # 通知ディスパッチ
//!
//! 通知種別と JSON ペイロードを受け取り、対応する通知を送信して
//! 結果 JSON を返す。
//!
//! ## 処理順序
//!
//! 1. ペイロードを JSON としてパース（失敗時はエラーメッセージ付きで失敗）
//! 2. 通知種別を判定（未知の種別はメッセージなしで失敗、レンダリングしない）
//! 3. 種別ごとのサブオブジェクトを取り出して [`Notification`] を構築
//! 4. [`NotificationService::notify`] に委譲
//!
//! サブオブジェクトが欠損または `null` の場合は空として扱う。

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use staffsync_domain::{
    document::Document,
    notification::{Attachment, Notification, NotificationError, NotificationKind},
    schedule::{SchedulePeriod, Shift},
    time_off::TimeOffRequest,
    user::Recipient,
};
use staffsync_shared::event_log::error::{category, kind};

use crate::usecase::notification::NotificationService;

/// 引数不足時に返すエラーメッセージ
pub const USAGE_ERROR: &str =
    "Parametri insufficienti. Utilizzo: staffsync-notifier <notification_type> <data_json>";

/// ペイロードが JSON オブジェクトでない場合に返すエラーメッセージ
pub const NOT_AN_OBJECT_ERROR: &str = "Il payload deve essere un oggetto JSON";

/// 添付ファイルの Content-Type が省略された場合の既定値
const DEFAULT_ATTACHMENT_CONTENT_TYPE: &str = "application/octet-stream";

/// ディスパッチ結果
///
/// 標準出力に 1 行の JSON として書き出す。`error` は存在する場合のみ出力する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error:   Option<String>,
}

impl DispatchOutcome {
    /// 送信結果から作成する
    pub fn from_sent(sent: bool) -> Self {
        Self {
            success: sent,
            error:   None,
        }
    }

    /// エラーメッセージ付きの失敗
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error:   Some(message.into()),
        }
    }

    /// 引数不足の失敗
    pub fn usage_error() -> Self {
        Self::failure(USAGE_ERROR)
    }

    /// 結果 JSON の 1 行表現
    pub fn to_json_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| r#"{"success":false}"#.to_string())
    }
}

/// ドキュメントに添付されるファイル（`data` は base64）
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AttachmentPayload {
    filename:     String,
    #[serde(default)]
    content_type: Option<String>,
    data:         String,
}

impl TryFrom<AttachmentPayload> for Attachment {
    type Error = NotificationError;

    fn try_from(payload: AttachmentPayload) -> Result<Self, Self::Error> {
        let data = BASE64.decode(payload.data.as_bytes()).map_err(|e| {
            NotificationError::InvalidPayload(format!(
                "添付ファイル {} の data を base64 としてデコードできません: {e}",
                payload.filename
            ))
        })?;

        Ok(Self {
            filename: payload.filename,
            content_type: payload
                .content_type
                .filter(|content_type| !content_type.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_ATTACHMENT_CONTENT_TYPE.to_string()),
            data,
        })
    }
}

/// 通知要求を処理する
///
/// どの経路でもパニックせず、必ず [`DispatchOutcome`] を返す。
pub async fn dispatch(
    kind_arg: &str,
    payload: &str,
    service: &NotificationService,
) -> DispatchOutcome {
    let value: Value = match serde_json::from_str(payload) {
        Ok(value) => value,
        Err(e) => {
            tracing::error!(
                error.category = category::INPUT,
                error.kind = kind::PAYLOAD,
                error = %e,
                "ペイロードを JSON としてパースできません"
            );
            return DispatchOutcome::failure(e.to_string());
        }
    };

    let Value::Object(payload) = value else {
        tracing::error!(
            error.category = category::INPUT,
            error.kind = kind::PAYLOAD,
            "ペイロードが JSON オブジェクトではありません"
        );
        return DispatchOutcome::failure(NOT_AN_OBJECT_ERROR);
    };

    let notification_kind = match NotificationKind::parse(kind_arg) {
        Ok(notification_kind) => notification_kind,
        Err(e) => {
            tracing::error!(
                error.category = category::INPUT,
                error.kind = kind::UNKNOWN_KIND,
                "{e}"
            );
            return DispatchOutcome::from_sent(false);
        }
    };

    let notification = match build_notification(notification_kind, &payload) {
        Ok(notification) => notification,
        Err(e) => {
            tracing::error!(
                error.category = category::INPUT,
                error.kind = kind::PAYLOAD,
                notification.kind = %notification_kind,
                error = %e,
                "通知データを読み取れません"
            );
            return DispatchOutcome::from_sent(false);
        }
    };

    DispatchOutcome::from_sent(service.notify(notification).await)
}

/// 通知種別に応じたサブオブジェクトから通知イベントを構築する
fn build_notification(
    kind: NotificationKind,
    payload: &Map<String, Value>,
) -> Result<Notification, NotificationError> {
    let recipient: Recipient = section(payload, "user")?;

    let notification = match kind {
        NotificationKind::Shift => Notification::ShiftPublished {
            recipient,
            period: section::<SchedulePeriod>(payload, "schedule")?,
            shifts: section::<Vec<Shift>>(payload, "shifts")?,
        },
        NotificationKind::ShiftUpdate => Notification::ShiftUpdated {
            recipient,
            period: section::<SchedulePeriod>(payload, "schedule")?,
        },
        NotificationKind::Document => Notification::DocumentUploaded {
            recipient,
            document: section::<Document>(payload, "document")?,
            attachments: document_attachments(payload)?,
        },
        NotificationKind::TimeOff => Notification::TimeOffStatusChanged {
            recipient,
            request: section::<TimeOffRequest>(payload, "timeOff")?,
        },
    };

    Ok(notification)
}

/// サブオブジェクトをデシリアライズする（欠損・`null` はデフォルト値）
fn section<'a, T>(payload: &'a Map<String, Value>, key: &str) -> Result<T, NotificationError>
where
    T: Default + Deserialize<'a>,
{
    match payload.get(key) {
        None | Some(Value::Null) => Ok(T::default()),
        Some(value) => T::deserialize(value)
            .map_err(|e| NotificationError::InvalidPayload(format!("{key}: {e}"))),
    }
}

fn document_attachments(payload: &Map<String, Value>) -> Result<Vec<Attachment>, NotificationError> {
    let attachments = match payload.get("document").and_then(|document| document.get("attachments")) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(value) => Vec::<AttachmentPayload>::deserialize(value).map_err(|e| {
            NotificationError::InvalidPayload(format!("document.attachments: {e}"))
        })?,
    };

    attachments.into_iter().map(Attachment::try_from).collect()
}
