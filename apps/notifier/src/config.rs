//! # Notifier 設定
//!
//! 環境変数から通知ツールの設定を読み込む。
//!
//! 設定はプロセス起動時に 1 度だけ構築し、以降は変更しない。
//! テストでは [`NotifierConfig::from_lookup`] に任意の参照関数を渡して
//! プロセスの環境変数に触れずに設定を注入する。

use staffsync_infra::notification::SmtpSettings;
use thiserror::Error;

/// `SMTP_SERVER` 未設定時のリレーホスト
pub const DEFAULT_SMTP_SERVER: &str = "smtp.gmail.com";
/// `SMTP_PORT` 未設定時のポート番号
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// 設定読み込みエラー
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `SMTP_PORT` が数値として解釈できない
    ///
    /// メッセージは結果 JSON の `error` として呼び出し元に返るためイタリア語。
    #[error("SMTP_PORT deve essere un numero di porta valido: {0:?}")]
    InvalidPort(String),
}

/// 通知ツールの設定
#[derive(Debug, Clone)]
pub struct NotifierConfig {
    /// メール送信設定
    pub email:        EmailConfig,
    /// プラットフォームのベース URL（メール内リンク用、未設定ならリンクなし）
    pub app_base_url: Option<String>,
}

/// メール送信の設定
///
/// | 環境変数 | デフォルト |
/// |---------|-----------|
/// | `EMAIL_ENABLED` | `false`（`true` のみ有効、大文字小文字は無視） |
/// | `SMTP_SERVER` | `smtp.gmail.com` |
/// | `SMTP_PORT` | `587` |
/// | `SMTP_USERNAME` / `SMTP_PASSWORD` / `EMAIL_SENDER` | 空 |
/// | `EMAIL_SENDER_NAME` | 未設定 |
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// 送信の有効/無効
    pub enabled: bool,
    /// SMTP 接続設定
    pub smtp:    SmtpSettings,
}

impl EmailConfig {
    /// 空になっている必須設定の環境変数名を返す
    ///
    /// ポート番号 0 は未設定として扱う。
    pub fn missing_settings(&self) -> Vec<&'static str> {
        let smtp = &self.smtp;
        [
            ("SMTP_SERVER", smtp.server.trim().is_empty()),
            ("SMTP_PORT", smtp.port == 0),
            ("SMTP_USERNAME", smtp.username.is_empty()),
            ("SMTP_PASSWORD", smtp.password.is_empty()),
            ("EMAIL_SENDER", smtp.sender_address.trim().is_empty()),
        ]
        .into_iter()
        .filter_map(|(name, missing)| missing.then_some(name))
        .collect()
    }
}

impl NotifierConfig {
    /// 参照関数から設定を読み込む
    ///
    /// `lookup` は未設定のキーに対して `None` を返す。本番では `std::env::var` を渡す。
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("SMTP_PORT") {
            None => DEFAULT_SMTP_PORT,
            Some(raw) if raw.trim().is_empty() => 0,
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
        };

        let enabled = lookup("EMAIL_ENABLED")
            .is_some_and(|value| value.trim().eq_ignore_ascii_case("true"));

        let smtp = SmtpSettings {
            server: lookup("SMTP_SERVER").unwrap_or_else(|| DEFAULT_SMTP_SERVER.to_string()),
            port,
            username: lookup("SMTP_USERNAME").unwrap_or_default(),
            password: lookup("SMTP_PASSWORD").unwrap_or_default(),
            sender_address: lookup("EMAIL_SENDER").unwrap_or_default(),
            sender_name: lookup("EMAIL_SENDER_NAME").filter(|name| !name.trim().is_empty()),
        };

        let app_base_url = lookup("APP_BASE_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());

        Ok(Self {
            email: EmailConfig { enabled, smtp },
            app_base_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<NotifierConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        NotifierConfig::from_lookup(|key| vars.get(key).cloned())
    }

    fn complete_vars() -> Vec<(&'static str, &'static str)> {
        vec![
            ("EMAIL_ENABLED", "true"),
            ("SMTP_SERVER", "smtp.example.com"),
            ("SMTP_PORT", "2525"),
            ("SMTP_USERNAME", "notifier"),
            ("SMTP_PASSWORD", "s3cret"),
            ("EMAIL_SENDER", "noreply@staffsync.example.com"),
        ]
    }

    #[test]
    fn 未設定時はデフォルト値になる() {
        let config = load(&[]).unwrap();

        assert!(!config.email.enabled);
        assert_eq!(config.email.smtp.server, DEFAULT_SMTP_SERVER);
        assert_eq!(config.email.smtp.port, DEFAULT_SMTP_PORT);
        assert_eq!(config.email.smtp.username, "");
        assert_eq!(config.email.smtp.sender_name, None);
        assert_eq!(config.app_base_url, None);
    }

    #[test]
    fn すべて設定されている場合は欠損なし() {
        let config = load(&complete_vars()).unwrap();

        assert!(config.email.enabled);
        assert_eq!(config.email.smtp.port, 2525);
        assert!(config.email.missing_settings().is_empty());
    }

    #[test]
    fn email_enabledは大文字小文字を区別しない() {
        assert!(load(&[("EMAIL_ENABLED", "TRUE")]).unwrap().email.enabled);
        assert!(load(&[("EMAIL_ENABLED", "True")]).unwrap().email.enabled);
        assert!(!load(&[("EMAIL_ENABLED", "1")]).unwrap().email.enabled);
        assert!(!load(&[("EMAIL_ENABLED", "yes")]).unwrap().email.enabled);
    }

    #[test]
    fn 空の必須設定が列挙される() {
        let config = load(&[("SMTP_SERVER", ""), ("SMTP_PORT", "")]).unwrap();

        assert_eq!(
            config.email.missing_settings(),
            vec![
                "SMTP_SERVER",
                "SMTP_PORT",
                "SMTP_USERNAME",
                "SMTP_PASSWORD",
                "EMAIL_SENDER",
            ]
        );
    }

    #[test]
    fn 数値でないポート番号はエラーになる() {
        let result = load(&[("SMTP_PORT", "smtp")]);
        assert!(matches!(&result, Err(ConfigError::InvalidPort(raw)) if raw == "smtp"));
        assert_eq!(
            result.unwrap_err().to_string(),
            r#"SMTP_PORT deve essere un numero di porta valido: "smtp""#
        );
    }

    #[test]
    fn app_base_urlの末尾スラッシュを取り除く() {
        let config = load(&[("APP_BASE_URL", "https://staffsync.example.com/")]).unwrap();
        assert_eq!(
            config.app_base_url.as_deref(),
            Some("https://staffsync.example.com")
        );
    }

    #[test]
    fn 空の送信元表示名は未設定として扱う() {
        let config = load(&[("EMAIL_SENDER_NAME", " ")]).unwrap();
        assert_eq!(config.email.smtp.sender_name, None);
    }
}
