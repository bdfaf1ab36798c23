//! # StaffSync Notifier
//!
//! スケジュール管理プラットフォームからサブプロセスとして起動される通知ツール。
//!
//! ## 役割
//!
//! 通知種別と JSON ペイロードを受け取り、メールを生成して SMTP リレー経由で送信する。
//! 結果は標準出力に 1 行の JSON として返す:
//!
//! ```text
//! {"success": true}
//! {"success": false}
//! {"success": false, "error": "..."}
//! ```
//!
//! 終了コードは常に 0。成否は JSON でのみ伝える。ログは標準エラー出力に書き出す。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `EMAIL_ENABLED` | No | `true` で送信を有効化（デフォルト: 無効） |
//! | `SMTP_SERVER` | No | リレーホスト（デフォルト: `smtp.gmail.com`） |
//! | `SMTP_PORT` | No | ポート番号（デフォルト: `587`） |
//! | `SMTP_USERNAME` / `SMTP_PASSWORD` | **Yes** | SMTP 認証情報 |
//! | `EMAIL_SENDER` | **Yes** | 送信元アドレス |
//! | `EMAIL_SENDER_NAME` | No | 送信元の表示名 |
//! | `APP_BASE_URL` | No | メール内リンクのベース URL |
//! | `LOG_FORMAT` | No | `json` / `pretty`（デフォルト: `pretty`） |
//!
//! ## 起動方法
//!
//! ```bash
//! staffsync-notifier shift '{"user": {"email": "a@x.com", "name": "Anna"}, "schedule": {...}, "shifts": [...]}'
//! ```

use std::io::{self, Write};

use anyhow::Context as _;
use staffsync_notifier::handler::{DispatchOutcome, run_cli};
use staffsync_shared::observability::{TracingConfig, init_tracing};
use tracing::Instrument;

/// Notifier のエントリーポイント
///
/// 1 プロセスで 1 通知のみを処理するため、シングルスレッドのランタイムを使用する。
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化（stderr へ出力）
    init_tracing(TracingConfig::from_env("notifier"));

    let args: Vec<String> = std::env::args().skip(1).collect();
    let span = tracing::info_span!("app", service = "notifier");
    let outcome = run_cli(&args, |key| std::env::var(key).ok())
        .instrument(span)
        .await;

    if let Err(e) = write_outcome(&outcome) {
        tracing::error!(error = %e, "結果の書き出しに失敗しました");
    }
}

/// 結果 JSON を標準出力に 1 行で書き出す
fn write_outcome(outcome: &DispatchOutcome) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", outcome.to_json_line()).context("標準出力への書き込みに失敗")?;
    stdout.flush().context("標準出力のフラッシュに失敗")?;
    Ok(())
}
