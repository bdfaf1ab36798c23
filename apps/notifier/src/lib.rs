//! # Notifier ライブラリ
//!
//! 通知ツールの設定・ユースケース・ディスパッチを公開する。
//! バイナリ（`main.rs`）と統合テストの両方から利用する。

pub mod config;
pub mod handler;
pub mod usecase;
