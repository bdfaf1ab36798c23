//! # エントリーポイントハンドラ
//!
//! コマンドライン引数で受け取った通知要求を処理する関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、レンダリングと送信はユースケース層に委譲

pub mod cli;
pub mod dispatch;

pub use cli::run_cli;
pub use dispatch::{DispatchOutcome, NOT_AN_OBJECT_ERROR, USAGE_ERROR, dispatch};
