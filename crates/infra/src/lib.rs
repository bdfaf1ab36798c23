//! # StaffSync インフラ層
//!
//! 外部システムとの通信を担当するインフラストラクチャ層。
//!
//! ## 設計方針
//!
//! 通知送信の具体的な方法（SMTP リレー）をカプセル化し、テンプレートや
//! 設定判定などの上位ロジックを送信方式の変更から保護する。
//!
//! ## 依存関係
//!
//! ```text
//! notifier → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`notification`] - `NotificationSender` trait と SMTP 実装
//! - `mock` - テスト用インメモリ送信（`test-utils` feature）

pub mod notification;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
