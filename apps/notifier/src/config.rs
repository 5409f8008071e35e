//! # Notifier 設定
//!
//! 環境変数から Notifier サーバーの設定を読み込む。
//!
//! 起動時に一度だけ読み込んで検証し、以降は参照で渡す。
//! 読み込みは `from_vars` に渡す検索関数経由で行うので、テストでは
//! `HashMap` を環境変数の代わりに使える。

use std::env;

use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_SMTP_PORT: u16 = 465;
const DEFAULT_MAILPIT_PORT: u16 = 1025;
const DEFAULT_FROM_ADDRESS: &str = "noreply@orderflow.example.com";

/// 設定読み込みエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// 必須の環境変数が未設定
    #[error("{0} が設定されていません")]
    Missing(&'static str),

    /// 値の形式が不正
    #[error("{name} の値が不正です: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Notifier サーバーの設定
#[derive(Debug, Clone)]
pub struct NotifierConfig {
    /// バインドアドレス
    pub host:         String,
    /// ポート番号
    pub port:         u16,
    /// プロフィールストア（PostgreSQL）の接続 URL
    pub database_url: String,
    /// プッシュ送信設定
    pub push:         PushConfig,
    /// メール中継設定
    pub mail:         MailConfig,
}

/// プッシュ送信バックエンドの設定
///
/// `PUSH_BACKEND` で切り替える:
/// - `fcm`: Firebase Cloud Messaging HTTP v1
/// - `noop`: 送信しない（ログ出力のみ）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushConfig {
    Fcm(FcmConfig),
    Noop,
}

/// FCM の接続設定
#[derive(Clone, PartialEq, Eq)]
pub struct FcmConfig {
    pub project_id:   String,
    pub access_token: String,
}

impl std::fmt::Debug for FcmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FcmConfig")
            .field("project_id", &self.project_id)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

/// メール中継の設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailConfig {
    /// 送信元メールアドレス（全メール共通の固定値）
    pub from_address: String,
    /// 中継バックエンド
    pub backend:      MailBackend,
}

/// メール中継バックエンド
///
/// `MAIL_BACKEND` で切り替える:
/// - `smtp`: 認証付き SMTP リレー（TLS）
/// - `mailpit`: TLS・認証なしのローカル SMTP（開発用）
/// - `ses`: Amazon SES v2
/// - `noop`: 送信しない（ログ出力のみ）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MailBackend {
    Smtp(SmtpConfig),
    Mailpit { host: String, port: u16 },
    Ses,
    Noop,
}

/// 認証付き SMTP リレーの設定
#[derive(Clone, PartialEq, Eq)]
pub struct SmtpConfig {
    pub host:     String,
    pub port:     u16,
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl NotifierConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// 検索関数から設定を読み込む
    ///
    /// 空文字列は未設定として扱う。
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(lookup);

        Ok(Self {
            host:         vars.optional("NOTIFIER_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port:         vars.port("NOTIFIER_PORT")?.ok_or(ConfigError::Missing("NOTIFIER_PORT"))?,
            database_url: vars.required("DATABASE_URL")?,
            push:         PushConfig::from_vars(&vars)?,
            mail:         MailConfig::from_vars(&vars)?,
        })
    }
}

impl PushConfig {
    fn from_vars<F>(vars: &Vars<F>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match vars.optional("PUSH_BACKEND").as_deref() {
            None | Some("noop") => Ok(Self::Noop),
            Some("fcm") => Ok(Self::Fcm(FcmConfig {
                project_id:   vars.required("FCM_PROJECT_ID")?,
                access_token: vars.required("FCM_ACCESS_TOKEN")?,
            })),
            Some(other) => Err(ConfigError::Invalid {
                name:  "PUSH_BACKEND",
                value: other.to_string(),
            }),
        }
    }
}

impl MailConfig {
    fn from_vars<F>(vars: &Vars<F>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = match vars.optional("MAIL_BACKEND").as_deref() {
            None | Some("noop") => MailBackend::Noop,
            Some("ses") => MailBackend::Ses,
            Some("smtp") => MailBackend::Smtp(SmtpConfig {
                host:     vars.required("SMTP_HOST")?,
                port:     vars.port("SMTP_PORT")?.unwrap_or(DEFAULT_SMTP_PORT),
                username: vars.required("SMTP_USERNAME")?,
                password: vars.required("SMTP_PASSWORD")?,
            }),
            Some("mailpit") => MailBackend::Mailpit {
                host: vars.required("SMTP_HOST")?,
                port: vars.port("SMTP_PORT")?.unwrap_or(DEFAULT_MAILPIT_PORT),
            },
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name:  "MAIL_BACKEND",
                    value: other.to_string(),
                });
            }
        };

        Ok(Self {
            from_address: vars
                .optional("MAIL_FROM_ADDRESS")
                .unwrap_or_else(|| DEFAULT_FROM_ADDRESS.to_string()),
            backend,
        })
    }
}

/// 環境変数の検索関数ラッパー
struct Vars<F>(F);

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn optional(&self, name: &str) -> Option<String> {
        (self.0)(name).filter(|value| !value.is_empty())
    }

    fn required(&self, name: &'static str) -> Result<String, ConfigError> {
        self.optional(name).ok_or(ConfigError::Missing(name))
    }

    fn port(&self, name: &'static str) -> Result<Option<u16>, ConfigError> {
        self.optional(name)
            .map(|value| {
                value
                    .parse()
                    .map_err(|_| ConfigError::Invalid { name, value })
            })
            .transpose()
    }
}
