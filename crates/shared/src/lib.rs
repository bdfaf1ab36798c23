//! # StaffSync 共有ユーティリティ
//!
//! このクレートは、StaffSync 通知ツール全体で使用される共通ユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - 他のすべてのクレート（domain, infra, notifier）から依存される
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - 外部クレートへの依存は最小限に抑える
//!
//! ## モジュール構成
//!
//! - [`event_log`] - ビジネスイベントログのマクロとフィールド定数
//! - [`observability`] - トレーシング初期化（`observability` feature）

pub mod event_log;
pub mod observability;
