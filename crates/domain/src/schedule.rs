//! # シフト
//!
//! 公開されたスケジュールの期間と、受信者に割り当てられたシフトを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | ペイロード |
//! |---|------------|-----------|
//! | [`SchedulePeriod`] | スケジュール期間 | `schedule` |
//! | [`Shift`] | シフト | `shifts[]` |
//! | [`ShiftType`] | シフト種別 | `shifts[].type` |
//!
//! ## 設計方針
//!
//! - **欠損値はプレースホルダ表示**: 日付や時刻が欠けていても失敗せず `N/A` を表示する
//! - **種別は fallback 付き enum**: 未知のコードは [`ShiftType::Other`] で保持し、白背景で表示する

use serde::Deserialize;

use crate::value_objects::{display_or_placeholder, lenient_text};

/// シフト種別が欠損している場合に表示するコード
pub const DEFAULT_SHIFT_TYPE_CODE: &str = "lavoro";

/// スケジュール期間
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulePeriod {
    #[serde(default, deserialize_with = "lenient_text")]
    start_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    end_date:   Option<String>,
}

impl SchedulePeriod {
    pub fn new(start_date: impl Into<String>, end_date: impl Into<String>) -> Self {
        Self {
            start_date: Some(start_date.into()),
            end_date:   Some(end_date.into()),
        }
    }

    pub fn start_date(&self) -> &str {
        display_or_placeholder(self.start_date.as_deref())
    }

    pub fn end_date(&self) -> &str {
        display_or_placeholder(self.end_date.as_deref())
    }
}

/// シフト種別
///
/// 表の行の背景色を決める。未知のコードは白背景になる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShiftType {
    /// 勤務
    Work,
    /// 休暇
    Vacation,
    /// 私用休暇
    Permission,
    /// 病欠
    Sickness,
    /// 未知のコード
    Other(String),
}

impl ShiftType {
    /// ペイロードのコードからシフト種別を決定する
    pub fn from_code(code: &str) -> Self {
        match code {
            "work" => Self::Work,
            "vacation" => Self::Vacation,
            "permission" => Self::Permission,
            "sickness" => Self::Sickness,
            other => Self::Other(other.to_string()),
        }
    }

    /// 表示用のコード（受け取った値そのもの）
    pub fn code(&self) -> &str {
        match self {
            Self::Work => "work",
            Self::Vacation => "vacation",
            Self::Permission => "permission",
            Self::Sickness => "sickness",
            Self::Other(code) => code,
        }
    }

    /// 表の行の背景色
    pub fn background_color(&self) -> &'static str {
        match self {
            Self::Work => "#e0ffe0",
            Self::Vacation => "#e0e0ff",
            Self::Permission => "#fff0e0",
            Self::Sickness => "#ffe0e0",
            Self::Other(_) => "#ffffff",
        }
    }
}

/// シフト
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    #[serde(default, deserialize_with = "lenient_text")]
    day:        Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    start_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    end_time:   Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient_text")]
    type_code:  Option<String>,
}

impl Shift {
    pub fn new(
        day: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
        type_code: impl Into<String>,
    ) -> Self {
        Self {
            day:        Some(day.into()),
            start_time: Some(start_time.into()),
            end_time:   Some(end_time.into()),
            type_code:  Some(type_code.into()),
        }
    }

    pub fn day(&self) -> &str {
        display_or_placeholder(self.day.as_deref())
    }

    pub fn start_time(&self) -> &str {
        display_or_placeholder(self.start_time.as_deref())
    }

    pub fn end_time(&self) -> &str {
        display_or_placeholder(self.end_time.as_deref())
    }

    /// 受信したままの種別コード（欠損時は [`DEFAULT_SHIFT_TYPE_CODE`]）
    pub fn type_code(&self) -> &str {
        self.type_code
            .as_deref()
            .unwrap_or(DEFAULT_SHIFT_TYPE_CODE)
    }

    pub fn shift_type(&self) -> ShiftType {
        ShiftType::from_code(self.type_code())
    }
}
