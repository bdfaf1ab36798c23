//! # コマンドライン実行
//!
//! 位置引数と環境変数の参照関数から 1 件の通知要求を処理する。
//!
//! 引数が 2 つに満たない場合は設定の読み込みやペイロードのパースより前に
//! 利用方法のエラーを返す。

use std::sync::Arc;

use staffsync_infra::notification::SmtpNotificationSender;
use staffsync_shared::event_log::error::{category, kind};

use super::dispatch::{DispatchOutcome, dispatch};
use crate::{
    config::NotifierConfig,
    usecase::notification::{Mailer, NotificationService, TemplateRenderer},
};

/// テンプレート初期化に失敗した場合に返すエラーメッセージ
pub const TEMPLATE_INIT_ERROR: &str = "Impossibile inizializzare i template delle email";

/// 位置引数（`<notification_type> <data_json>`）から通知を 1 件処理する
///
/// `lookup` は環境変数の参照関数。3 つ目以降の引数は無視する。
pub async fn run_cli<F>(args: &[String], lookup: F) -> DispatchOutcome
where
    F: Fn(&str) -> Option<String>,
{
    let [kind_arg, payload, ..] = args else {
        return DispatchOutcome::usage_error();
    };

    let config = match NotifierConfig::from_lookup(lookup) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(
                error.category = category::CONFIGURATION,
                error.kind = kind::INVALID_CONFIG,
                "{e}"
            );
            return DispatchOutcome::failure(e.to_string());
        }
    };

    tracing::debug!(
        enabled = config.email.enabled,
        smtp = ?config.email.smtp,
        "設定を読み込みました"
    );

    let template_renderer = match TemplateRenderer::new(config.app_base_url.clone()) {
        Ok(renderer) => renderer,
        Err(e) => {
            tracing::error!(
                error.category = category::RENDERING,
                error.kind = kind::TEMPLATE,
                error = %e,
                "テンプレートの初期化に失敗しました"
            );
            return DispatchOutcome::failure(TEMPLATE_INIT_ERROR);
        }
    };

    let sender = Arc::new(SmtpNotificationSender::new(config.email.smtp.clone()));
    let mailer = Mailer::new(config.email, sender);
    let service = NotificationService::new(mailer, template_renderer);

    dispatch(kind_arg, payload, &service).await
}
