//! # 休暇申請
//!
//! 休暇・私用休暇・病欠の申請と、その承認状態を定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | ペイロード |
//! |---|------------|-----------|
//! | [`TimeOffRequest`] | 休暇申請 | `timeOff` |
//! | [`TimeOffType`] | 休暇種別 | `timeOff.type`（欠損時 `vacation`） |
//! | [`TimeOffStatus`] | 申請状態 | `timeOff.status`（欠損時 `pending`） |
//!
//! ## 設計方針
//!
//! - **却下理由は却下時のみ**: `rejected` 以外では理由が渡されても本文に含めない
//! - **アクセントカラー**: 承認は緑、却下は赤、それ以外（保留・未知）は黄色

use serde::Deserialize;

use crate::value_objects::{display_or_placeholder, lenient_text, non_empty};

/// 休暇種別
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeOffType {
    /// 休暇
    Vacation,
    /// 私用休暇
    Permission,
    /// 病欠
    Sickness,
    /// 未知のコード
    Other(String),
}

impl TimeOffType {
    /// ペイロードのコードから休暇種別を決定する
    ///
    /// プラットフォーム画面が送る `leave` / `personal` は私用休暇、`sick` は病欠として扱う。
    pub fn from_code(code: &str) -> Self {
        match code {
            "vacation" => Self::Vacation,
            "permission" | "leave" | "personal" => Self::Permission,
            "sickness" | "sick" => Self::Sickness,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Vacation => "Ferie",
            Self::Permission => "Permesso",
            Self::Sickness => "Malattia",
            Self::Other(_) => "Assenza",
        }
    }
}

/// 申請状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeOffStatus {
    /// 承認
    Approved,
    /// 却下
    Rejected,
    /// 保留
    Pending,
    /// 未知のコード
    Other(String),
}

impl TimeOffStatus {
    pub fn from_code(code: &str) -> Self {
        match code {
            "approved" => Self::Approved,
            "rejected" => Self::Rejected,
            "pending" => Self::Pending,
            other => Self::Other(other.to_string()),
        }
    }

    /// 本文中の状態表記（小文字）
    pub fn label(&self) -> &'static str {
        match self {
            Self::Approved => "approvata",
            Self::Rejected => "rifiutata",
            Self::Pending => "in attesa",
            Self::Other(_) => "aggiornata",
        }
    }

    /// 詳細欄の状態表記（先頭のみ大文字）
    pub fn capitalized_label(&self) -> String {
        let label = self.label();
        let mut chars = label.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// 状態を強調するアクセントカラー
    pub fn accent_color(&self) -> &'static str {
        match self {
            Self::Approved => "#28a745",
            Self::Rejected => "#dc3545",
            Self::Pending | Self::Other(_) => "#ffc107",
        }
    }

    /// 件名を組み立てる
    pub fn subject_for(&self, type_label: &str) -> String {
        match self {
            Self::Approved => format!("Richiesta di {type_label} approvata"),
            Self::Rejected => format!("Richiesta di {type_label} rifiutata"),
            Self::Pending | Self::Other(_) => format!("Aggiornamento richiesta di {type_label}"),
        }
    }
}

/// 休暇申請
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeOffRequest {
    #[serde(rename = "type", default, deserialize_with = "lenient_text")]
    type_code:        Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    status:           Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    start_date:       Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    end_date:         Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    rejection_reason: Option<String>,
}

impl TimeOffRequest {
    pub fn new(
        type_code: impl Into<String>,
        status: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
        rejection_reason: Option<String>,
    ) -> Self {
        Self {
            type_code: Some(type_code.into()),
            status: Some(status.into()),
            start_date: Some(start_date.into()),
            end_date: Some(end_date.into()),
            rejection_reason,
        }
    }

    pub fn time_off_type(&self) -> TimeOffType {
        TimeOffType::from_code(self.type_code.as_deref().unwrap_or("vacation"))
    }

    pub fn status(&self) -> TimeOffStatus {
        TimeOffStatus::from_code(self.status.as_deref().unwrap_or("pending"))
    }

    pub fn start_date(&self) -> &str {
        display_or_placeholder(self.start_date.as_deref())
    }

    pub fn end_date(&self) -> &str {
        display_or_placeholder(self.end_date.as_deref())
    }

    /// 本文に表示する却下理由
    ///
    /// 状態が `rejected` かつ理由が空でない場合のみ `Some` を返す。
    pub fn displayed_rejection_reason(&self) -> Option<&str> {
        match self.status() {
            TimeOffStatus::Rejected => non_empty(self.rejection_reason.as_deref()),
            _ => None,
        }
    }
}
