//! # StaffSync ドメイン層
//!
//! 通知メールの元になるドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **ペイロードの型付け**: 呼び出し元から渡される JSON を serde で型に変換する
//! - **コード → ラベルの変換**: 種別・状態コードは fallback 付き enum で表現し、
//!   未知の値でも既定のラベル・色で表示する
//! - **I/O を持たない**: メール送信・テンプレートエンジンには依存しない
//!
//! ## 依存関係の方向
//!
//! ```text
//! notifier → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`notification`] - 通知種別、通知イベント、メールメッセージ、エラー
//! - [`user`] - 通知受信者
//! - [`schedule`] - スケジュール期間とシフト
//! - [`document`] - アップロードされたドキュメント
//! - [`time_off`] - 休暇申請
//! - [`value_objects`] - 共通の値とデシリアライズ補助
//!
//! ## 使用例
//!
//! ```rust
//! use staffsync_domain::schedule::ShiftType;
//!
//! assert_eq!(ShiftType::from_code("work").background_color(), "#e0ffe0");
//! assert_eq!(ShiftType::from_code("overtime").background_color(), "#ffffff");
//! ```

pub mod document;
pub mod notification;
pub mod schedule;
pub mod time_off;
pub mod user;
pub mod value_objects;

pub use notification::NotificationError;
