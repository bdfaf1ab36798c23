//! # ユースケース層
//!
//! 通知イベントからメールを生成し、送信するまでの処理を提供する。

pub mod notification;
