//! # ドキュメント
//!
//! 受信者のアカウントにアップロードされたドキュメント（給与明細、源泉徴収票、
//! 雇用契約書など）を定義する。
//!
//! ## 設計判断
//!
//! - 種別コードは [`DocumentType`] に変換し、表示ラベルを一箇所で管理する
//! - 未知のコードと `other` はどちらも汎用ラベル `Documento` で表示する
//! - 期間が空の場合は本文から期間行ごと省略する

use serde::Deserialize;

use crate::value_objects::{lenient_text, non_empty};

/// ドキュメント種別
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentType {
    /// 給与明細
    Payslip,
    /// 源泉徴収票（Certificazione Unica）
    Cud,
    /// 雇用契約書
    Contract,
    /// その他（`other` または未知のコード）
    Other(String),
}

impl DocumentType {
    /// ペイロードのコードからドキュメント種別を決定する
    ///
    /// アップロード画面が送る `tax` / `tax_document` は CUD として扱う。
    pub fn from_code(code: &str) -> Self {
        match code {
            "payslip" => Self::Payslip,
            "cud" | "tax" | "tax_document" => Self::Cud,
            "contract" => Self::Contract,
            other => Self::Other(other.to_string()),
        }
    }

    /// 件名・本文に使用する表示ラベル
    pub fn label(&self) -> &'static str {
        match self {
            Self::Payslip => "Busta Paga",
            Self::Cud => "Certificazione Unica (CUD)",
            Self::Contract => "Contratto di Lavoro",
            Self::Other(_) => "Documento",
        }
    }
}

/// アップロードされたドキュメント
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Document {
    #[serde(rename = "type", default, deserialize_with = "lenient_text")]
    type_code: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    period:    Option<String>,
}

impl Document {
    pub fn new(type_code: impl Into<String>, period: Option<String>) -> Self {
        Self {
            type_code: Some(type_code.into()),
            period,
        }
    }

    pub fn document_type(&self) -> DocumentType {
        DocumentType::from_code(self.type_code.as_deref().unwrap_or_default())
    }

    /// 参照期間（空の場合は `None`）
    pub fn period(&self) -> Option<&str> {
        non_empty(self.period.as_deref())
    }
}
