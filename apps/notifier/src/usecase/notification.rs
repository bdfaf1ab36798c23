//! # 通知ユースケース
//!
//! 通知メールの生成・送信・ログ記録を統合する。
//!
//! ## モジュール構成
//!
//! - [`template_renderer`] - tera テンプレートエンジンによるメール生成
//! - [`mailer`] - 送信可否の判定と送信結果の bool 化
//! - [`service`] - テンプレートレンダリング + 送信 + ログ記録の統合サービス

pub mod mailer;
pub mod service;
pub mod template_renderer;

pub use mailer::Mailer;
pub use service::NotificationService;
pub use template_renderer::TemplateRenderer;
