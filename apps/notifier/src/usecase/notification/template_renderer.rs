//! # テンプレートレンダラー
//!
//! tera テンプレートエンジンで通知メールを HTML/plaintext 両形式で生成する。
//!
//! ## 設計方針
//!
//! - **`include_str!` によるコンパイル時埋め込み**: テンプレートはバイナリに埋め込まれる
//! - **共通レイアウト**: HTML は `base.html` を継承し、挨拶文とフッターを共有する
//! - **プラットフォームリンク**: ベース URL が設定されている場合のみ HTML にボタンを表示する
//! - **HTML の自動エスケープ**: `.html` テンプレートに埋め込むペイロード値はエスケープされる

use serde::Serialize;
use staffsync_domain::{
    document::Document,
    notification::{Attachment, EmailMessage, Notification, NotificationError},
    schedule::{SchedulePeriod, Shift},
    time_off::TimeOffRequest,
};
use tera::{Context, Tera};

/// シフト公開の件名
const SHIFT_PUBLISHED_SUBJECT: &str = "Nuovi turni pubblicati";

/// テンプレートに渡すシフト行
#[derive(Debug, Serialize)]
struct ShiftRow<'a> {
    day:        &'a str,
    start_time: &'a str,
    end_time:   &'a str,
    type_code:  &'a str,
    color:      &'static str,
}

impl<'a> From<&'a Shift> for ShiftRow<'a> {
    fn from(shift: &'a Shift) -> Self {
        let shift_type = shift.shift_type();
        Self {
            day:        shift.day(),
            start_time: shift.start_time(),
            end_time:   shift.end_time(),
            type_code:  shift.type_code(),
            color:      shift_type.background_color(),
        }
    }
}

/// プラットフォーム上の関連ページへのリンク
#[derive(Debug, Serialize)]
struct PlatformLink {
    url:   String,
    label: &'static str,
}

/// テンプレートレンダラー
///
/// tera テンプレートエンジンをラップし、[`Notification`] から
/// [`EmailMessage`] を生成する。
pub struct TemplateRenderer {
    engine:   Tera,
    base_url: Option<String>,
}

impl TemplateRenderer {
    /// 新しいレンダラーインスタンスを作成
    ///
    /// `include_str!` で埋め込んだテンプレートを tera に登録する。
    /// `base_url` が `None` の場合、本文にリンクボタンを出力しない。
    pub fn new(base_url: Option<String>) -> Result<Self, NotificationError> {
        let mut engine = Tera::default();

        engine
            .add_raw_templates(vec![
                (
                    "base.html",
                    include_str!("../../../templates/notifications/base.html"),
                ),
                (
                    "shift_published.html",
                    include_str!("../../../templates/notifications/shift_published.html"),
                ),
                (
                    "shift_published.txt",
                    include_str!("../../../templates/notifications/shift_published.txt"),
                ),
                (
                    "shift_updated.html",
                    include_str!("../../../templates/notifications/shift_updated.html"),
                ),
                (
                    "shift_updated.txt",
                    include_str!("../../../templates/notifications/shift_updated.txt"),
                ),
                (
                    "document_uploaded.html",
                    include_str!("../../../templates/notifications/document_uploaded.html"),
                ),
                (
                    "document_uploaded.txt",
                    include_str!("../../../templates/notifications/document_uploaded.txt"),
                ),
                (
                    "time_off_status.html",
                    include_str!("../../../templates/notifications/time_off_status.html"),
                ),
                (
                    "time_off_status.txt",
                    include_str!("../../../templates/notifications/time_off_status.txt"),
                ),
            ])
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        Ok(Self { engine, base_url })
    }

    /// 通知イベントからメールメッセージを生成する
    pub fn render(&self, notification: &Notification) -> Result<EmailMessage, NotificationError> {
        let recipient = notification.recipient();

        let mut context = Context::new();
        context.insert("recipient_name", recipient.display_name());

        let (template_name, subject, attachments) = match notification {
            Notification::ShiftPublished { period, shifts, .. } => {
                self.shift_published_params(&mut context, period, shifts)
            }
            Notification::ShiftUpdated { period, .. } => {
                self.shift_updated_params(&mut context, period)
            }
            Notification::DocumentUploaded {
                document,
                attachments,
                ..
            } => self.document_uploaded_params(&mut context, document, attachments),
            Notification::TimeOffStatusChanged { request, .. } => {
                self.time_off_status_params(&mut context, request)
            }
        };

        let html_body = self
            .engine
            .render(&format!("{template_name}.html"), &context)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        let text_body = self
            .engine
            .render(&format!("{template_name}.txt"), &context)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        Ok(EmailMessage {
            to: recipient.email().to_string(),
            subject,
            html_body,
            text_body: Some(text_body),
            attachments,
        })
    }

    fn shift_published_params(
        &self,
        context: &mut Context,
        period: &SchedulePeriod,
        shifts: &[Shift],
    ) -> (&'static str, String, Vec<Attachment>) {
        let rows: Vec<ShiftRow<'_>> = shifts.iter().map(ShiftRow::from).collect();

        insert_period(context, period);
        context.insert("shifts", &rows);
        context.insert("platform_link", &self.link("/my-schedule", "Visualizza Turni"));

        (
            "shift_published",
            SHIFT_PUBLISHED_SUBJECT.to_string(),
            Vec::new(),
        )
    }

    fn shift_updated_params(
        &self,
        context: &mut Context,
        period: &SchedulePeriod,
    ) -> (&'static str, String, Vec<Attachment>) {
        insert_period(context, period);
        context.insert("platform_link", &self.link("/my-schedule", "Visualizza Turni"));

        (
            "shift_updated",
            format!(
                "Aggiornamento turno ({} - {})",
                period.start_date(),
                period.end_date()
            ),
            Vec::new(),
        )
    }

    fn document_uploaded_params(
        &self,
        context: &mut Context,
        document: &Document,
        attachments: &[Attachment],
    ) -> (&'static str, String, Vec<Attachment>) {
        let label = document.document_type().label();

        context.insert("document_label", label);
        context.insert("period", &document.period());
        context.insert(
            "platform_link",
            &self.link("/documents", "Visualizza Documento"),
        );

        (
            "document_uploaded",
            format!("Nuovo {label} disponibile"),
            attachments.to_vec(),
        )
    }

    fn time_off_status_params(
        &self,
        context: &mut Context,
        request: &TimeOffRequest,
    ) -> (&'static str, String, Vec<Attachment>) {
        let type_label = request.time_off_type().label();
        let status = request.status();

        context.insert("type_label", type_label);
        context.insert("status_label", status.label());
        context.insert("status_label_capitalized", &status.capitalized_label());
        context.insert("accent_color", status.accent_color());
        context.insert("start_date", request.start_date());
        context.insert("end_date", request.end_date());
        context.insert("rejection_reason", &request.displayed_rejection_reason());
        context.insert("platform_link", &self.link("/time-off", "Le Mie Richieste"));

        (
            "time_off_status",
            status.subject_for(type_label),
            Vec::new(),
        )
    }

    /// ベース URL が設定されている場合のみリンクを返す
    ///
    /// URL は設定値から組み立てるため、テンプレート側では `safe` で出力する。
    fn link(&self, path: &str, label: &'static str) -> Option<PlatformLink> {
        self.base_url.as_ref().map(|base_url| PlatformLink {
            url: format!("{base_url}{path}"),
            label,
        })
    }
}

fn insert_period(context: &mut Context, period: &SchedulePeriod) {
    context.insert("start_date", period.start_date());
    context.insert("end_date", period.end_date());
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use staffsync_domain::user::Recipient;

    use super::*;

    fn anna() -> Recipient {
        Recipient::new("a@x.com", Some("Anna".to_string()))
    }

    fn renderer() -> TemplateRenderer {
        TemplateRenderer::new(None).unwrap()
    }

    fn render_shift(shift: Shift) -> EmailMessage {
        renderer()
            .render(&Notification::ShiftPublished {
                recipient: anna(),
                period:    SchedulePeriod::new("2024-01-01", "2024-01-07"),
                shifts:    vec![shift],
            })
            .unwrap()
    }

    fn render_time_off(request: TimeOffRequest) -> EmailMessage {
        renderer()
            .render(&Notification::TimeOffStatusChanged {
                recipient: anna(),
                request,
            })
            .unwrap()
    }

    #[test]
    fn 全テンプレートを登録できる() {
        assert!(TemplateRenderer::new(None).is_ok());
    }

    #[test]
    fn シフト公開メールに名前と期間と勤務行が含まれる() {
        let email = render_shift(Shift::new("Mon", "09:00", "17:00", "work"));

        assert_eq!(email.to, "a@x.com");
        assert_eq!(email.subject, "Nuovi turni pubblicati");
        assert!(email.html_body.contains("Anna"));
        assert!(email.html_body.contains("2024-01-01"));
        assert!(email.html_body.contains("2024-01-07"));
        assert!(
            email
                .html_body
                .contains(r#"<tr style="background-color: #e0ffe0;"><td>Mon</td><td>09:00</td><td>17:00</td><td>work</td></tr>"#)
        );
    }

    #[rstest]
    #[case("work", "#e0ffe0")]
    #[case("vacation", "#e0e0ff")]
    #[case("permission", "#fff0e0")]
    #[case("sickness", "#ffe0e0")]
    #[case("overtime", "#ffffff")]
    fn シフト種別ごとに行の背景色が決まる(#[case] code: &str, #[case] color: &str) {
        let email = render_shift(Shift::new("Tue", "08:00", "14:00", code));

        assert!(
            email
                .html_body
                .contains(&format!(r#"<tr style="background-color: {color};"><td>Tue</td>"#))
        );
    }

    #[test]
    fn シフト公開のテキスト本文は期間のみで表を含まない() {
        let email = render_shift(Shift::new("Mon", "09:00", "17:00", "work"));
        let text = email.text_body.unwrap();

        assert!(text.contains("Gentile Anna,"));
        assert!(text.contains("2024-01-01 - 2024-01-07"));
        assert!(!text.contains("09:00"));
    }

    #[test]
    fn 欠損した期間はプレースホルダで表示される() {
        let email = renderer()
            .render(&Notification::ShiftPublished {
                recipient: Recipient::default(),
                period:    SchedulePeriod::default(),
                shifts:    vec![Shift::default()],
            })
            .unwrap();

        assert!(email.html_body.contains("Gentile Utente,"));
        assert!(
            email
                .html_body
                .contains("<strong>N&#x2F;A</strong> - <strong>N&#x2F;A</strong>")
        );
        assert!(email.html_body.contains(
            r#"<tr style="background-color: #ffffff;"><td>N&#x2F;A</td><td>N&#x2F;A</td><td>N&#x2F;A</td><td>lavoro</td></tr>"#
        ));
    }

    #[test]
    fn シフト更新メールは表を含まない() {
        let email = renderer()
            .render(&Notification::ShiftUpdated {
                recipient: anna(),
                period:    SchedulePeriod::new("2024-02-01", "2024-02-29"),
            })
            .unwrap();

        assert_eq!(email.subject, "Aggiornamento turno (2024-02-01 - 2024-02-29)");
        assert!(email.html_body.contains("<strong>2024-02-01</strong>"));
        assert!(!email.html_body.contains("<table"));
    }

    #[rstest]
    #[case("payslip", "Busta Paga")]
    #[case("cud", "Certificazione Unica (CUD)")]
    #[case("contract", "Contratto di Lavoro")]
    #[case("badge", "Documento")]
    fn ドキュメント種別のラベルが件名と本文に使われる(
        #[case] code: &str,
        #[case] label: &str,
    ) {
        let email = renderer()
            .render(&Notification::DocumentUploaded {
                recipient:   anna(),
                document:    Document::new(code, None),
                attachments: vec![],
            })
            .unwrap();

        assert_eq!(email.subject, format!("Nuovo {label} disponibile"));
        assert!(email.html_body.contains(&format!("Nuovo {label} Disponibile")));
        assert!(
            email
                .html_body
                .contains(&format!("un nuovo {} nel tuo account", label.to_lowercase()))
        );
    }

    #[test]
    fn 期間があるドキュメントは両本文に期間行を含む() {
        let email = renderer()
            .render(&Notification::DocumentUploaded {
                recipient:   anna(),
                document:    Document::new("payslip", Some("Gennaio 2024".to_string())),
                attachments: vec![],
            })
            .unwrap();

        assert!(
            email
                .html_body
                .contains(r#"Periodo di riferimento: <span class="highlight">Gennaio 2024</span>"#)
        );
        assert!(
            email
                .text_body
                .unwrap()
                .contains("Periodo di riferimento: Gennaio 2024")
        );
    }

    #[rstest]
    #[case(None)]
    #[case(Some(String::new()))]
    fn 期間がないドキュメントは期間行を省略する(#[case] period: Option<String>) {
        let email = renderer()
            .render(&Notification::DocumentUploaded {
                recipient:   anna(),
                document:    Document::new("payslip", period),
                attachments: vec![],
            })
            .unwrap();

        assert!(!email.html_body.contains("Periodo di riferimento"));
        assert!(!email.text_body.unwrap().contains("Periodo di riferimento"));
    }

    #[test]
    fn ドキュメントの添付ファイルはメッセージに引き継がれる() {
        let attachment = Attachment {
            filename:     "cud_2023.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            data:         b"%PDF".to_vec(),
        };

        let email = renderer()
            .render(&Notification::DocumentUploaded {
                recipient:   anna(),
                document:    Document::new("cud", Some("2023".to_string())),
                attachments: vec![attachment.clone()],
            })
            .unwrap();

        assert_eq!(email.attachments, vec![attachment]);
    }

    #[test]
    fn 承認された休暇申請は承認の件名と緑のアクセントになる() {
        let email = render_time_off(TimeOffRequest::new(
            "vacation",
            "approved",
            "2024-08-05",
            "2024-08-16",
            None,
        ));

        assert_eq!(email.subject, "Richiesta di Ferie approvata");
        assert!(email.subject.contains("approvata"));
        assert!(email.html_body.contains("color: #28a745;"));
        assert!(email.html_body.contains("<strong>Status:</strong>"));
        assert!(email.html_body.contains("Approvata"));
    }

    #[test]
    fn 却下理由は両本文に含まれる() {
        let email = render_time_off(TimeOffRequest::new(
            "permission",
            "rejected",
            "2024-03-01",
            "2024-03-01",
            Some("Personale insufficiente".to_string()),
        ));

        assert_eq!(email.subject, "Richiesta di Permesso rifiutata");
        assert!(email.html_body.contains("color: #dc3545;"));
        assert!(email.html_body.contains("Personale insufficiente"));
        assert!(
            email
                .text_body
                .unwrap()
                .contains("Motivazione del rifiuto: Personale insufficiente")
        );
    }

    #[rstest]
    #[case("rejected", None)]
    #[case("rejected", Some(String::new()))]
    #[case("approved", Some("Non applicabile".to_string()))]
    fn 却下理由がない場合は理由行を含まない(
        #[case] status: &str,
        #[case] reason: Option<String>,
    ) {
        let email = render_time_off(TimeOffRequest::new(
            "sickness",
            status,
            "2024-03-01",
            "2024-03-02",
            reason,
        ));

        assert!(!email.html_body.contains("Motivazione del rifiuto"));
        assert!(!email.text_body.unwrap().contains("Motivazione del rifiuto"));
    }

    #[test]
    fn 未知の状態は更新の件名と黄色のアクセントになる() {
        let email = render_time_off(TimeOffRequest::new(
            "unpaid",
            "cancelled",
            "2024-03-01",
            "2024-03-02",
            None,
        ));

        assert_eq!(email.subject, "Aggiornamento richiesta di Assenza");
        assert!(email.html_body.contains("color: #ffc107;"));
        assert!(email.html_body.contains("è stata <span class=\"status\">aggiornata</span>"));
    }

    #[test]
    fn ペイロードの値はhtmlでエスケープされる() {
        let email = renderer()
            .render(&Notification::ShiftPublished {
                recipient: Recipient::new("a@x.com", Some("<b>Anna</b>".to_string())),
                period:    SchedulePeriod::new("2024-01-01", "2024-01-07"),
                shifts:    vec![],
            })
            .unwrap();

        assert!(!email.html_body.contains("<b>Anna</b>"));
        assert!(email.html_body.contains("&lt;b&gt;Anna"));
    }

    #[test]
    fn 期間欠損時のシフト更新の件名はプレースホルダを含む() {
        let email = renderer()
            .render(&Notification::ShiftUpdated {
                recipient: anna(),
                period:    SchedulePeriod::default(),
            })
            .unwrap();

        assert_eq!(email.subject, "Aggiornamento turno (N/A - N/A)");
    }

    #[test]
    fn ベースurl設定時はリンクボタンを含む() {
        let renderer = TemplateRenderer::new(Some("https://staffsync.example.com".to_string()))
            .unwrap();

        let email = renderer
            .render(&Notification::TimeOffStatusChanged {
                recipient: anna(),
                request:   TimeOffRequest::default(),
            })
            .unwrap();

        assert!(
            email
                .html_body
                .contains(r#"href="https://staffsync.example.com/time-off">Le Mie Richieste</a>"#)
        );
    }

    #[test]
    fn ベースurl未設定時はリンクボタンを含まない() {
        let email = render_shift(Shift::new("Mon", "09:00", "17:00", "work"));

        assert!(!email.html_body.contains("class=\"button\" href"));
    }
}
