//! # 注文オーナー
//!
//! 通知の受信者となるオーナーと、その通知先（デバイストークン）を定義する。
//!
//! オーナーのプロフィールはオーナー自身のクライアントが更新するもので、
//! このシステムは読み取るだけ。トークン未登録は正常な状態として扱う。
//!
//! ## 保存形式
//!
//! ```json
//! { "profile": { "fcmToken": "..." } }
//! ```
//!
//! `profile` 自体が無い、オブジェクトでない、トークンが空文字列といった
//! 不正な形のドキュメントでも、パニックせず「トークンなし」として読む。

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::IntoStaticStr;

define_string_id! {
    /// オーナー ID
    ///
    /// `users/{userId}` の `userId` 部分。
    pub struct OwnerId;
}

/// プロフィールのサブ構造を指すキー
const PROFILE_KEY: &str = "profile";
/// 通知トークンのキー（`profile` 配下）
const TOKEN_KEY: &str = "fcmToken";

/// 通知先
///
/// プッシュ通知を配送するためのデバイストークン。中身は不透明な文字列。
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[serde(transparent)]
#[display("{_0}")]
pub struct Destination(String);

impl Destination {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// トークンはログに全体を出さない
impl std::fmt::Debug for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix: String = self.0.chars().take(8).collect();
        f.debug_tuple("Destination")
            .field(&format!("{prefix}…"))
            .finish()
    }
}

/// オーナープロフィール
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerProfile {
    owner_id:           OwnerId,
    notification_token: Option<Destination>,
}

impl OwnerProfile {
    pub fn new(owner_id: OwnerId, notification_token: Option<Destination>) -> Self {
        Self {
            owner_id,
            notification_token,
        }
    }

    /// 保存されたオーナードキュメントからプロフィールを組み立てる
    ///
    /// `profile.fcmToken` が空でない文字列のときだけトークンありとする。
    pub fn from_document(owner_id: OwnerId, document: &Value) -> Self {
        Self::from_profile_section(owner_id, document.get(PROFILE_KEY))
    }

    /// `profile` サブ構造だけからプロフィールを組み立てる
    ///
    /// サブ構造を別カラムに保存しているストア向け。`None` はサブ構造なしを表す。
    pub fn from_profile_section(owner_id: OwnerId, profile: Option<&Value>) -> Self {
        let token = profile
            .and_then(|profile| profile.get(TOKEN_KEY))
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .map(Destination::new);

        Self::new(owner_id, token)
    }

    pub fn owner_id(&self) -> &OwnerId {
        &self.owner_id
    }

    pub fn notification_token(&self) -> Option<&Destination> {
        self.notification_token.as_ref()
    }
}

/// 受信者解決の結果
///
/// 「プロフィールが無い」と「トークンが無い」はどちらもユーザーデータ側の欠落で、
/// 通知は送らない。ストア障害はこれとは別に `Err` で表す。
#[derive(Debug, Clone, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Resolution {
    /// 通知先が見つかった
    Resolved(Destination),
    /// オーナードキュメントが存在しない
    NoProfile,
    /// ドキュメントはあるがトークンが未登録
    NoToken,
}

impl Resolution {
    /// プロフィールの有無から解決結果を作る
    pub fn from_profile(profile: Option<OwnerProfile>) -> Self {
        match profile {
            None => Self::NoProfile,
            Some(profile) => match profile.notification_token {
                Some(token) => Self::Resolved(token),
                None => Self::NoToken,
            },
        }
    }

    /// 通知先を返す（見つからなかった場合は `None`）
    pub fn destination(&self) -> Option<&Destination> {
        match self {
            Self::Resolved(destination) => Some(destination),
            Self::NoProfile | Self::NoToken => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn owner() -> OwnerId {
        OwnerId::new("user-1")
    }

    #[test]
    fn profile配下のトークンを読み取る() {
        let profile =
            OwnerProfile::from_document(owner(), &json!({"profile": {"fcmToken": "T1"}}));

        assert_eq!(profile.notification_token(), Some(&Destination::new("T1")));
        assert_eq!(profile.owner_id(), &owner());
    }

    #[rstest]
    #[case::profileなし(json!({"name": "山田"}))]
    #[case::profileがnull(json!({"profile": null}))]
    #[case::profileが文字列(json!({"profile": "broken"}))]
    #[case::トークンなし(json!({"profile": {}}))]
    #[case::トークンが空文字列(json!({"profile": {"fcmToken": ""}}))]
    #[case::トークンが数値(json!({"profile": {"fcmToken": 123}}))]
    #[case::ドキュメントが配列(json!([1, 2, 3]))]
    fn 不正な形のドキュメントはトークンなしとして読む(#[case] document: Value) {
        let profile = OwnerProfile::from_document(owner(), &document);

        assert_eq!(profile.notification_token(), None);
    }

    #[test]
    fn profileサブ構造だけからも読み取れる() {
        let with_token =
            OwnerProfile::from_profile_section(owner(), Some(&json!({"fcmToken": "T1"})));
        let without_section = OwnerProfile::from_profile_section(owner(), None);

        assert_eq!(with_token.notification_token(), Some(&Destination::new("T1")));
        assert_eq!(without_section.notification_token(), None);
    }

    #[test]
    fn resolutionはプロフィールの有無とトークンの有無を区別する() {
        assert_eq!(Resolution::from_profile(None), Resolution::NoProfile);
        assert_eq!(
            Resolution::from_profile(Some(OwnerProfile::new(owner(), None))),
            Resolution::NoToken
        );
        assert_eq!(
            Resolution::from_profile(Some(OwnerProfile::new(
                owner(),
                Some(Destination::new("T1"))
            ))),
            Resolution::Resolved(Destination::new("T1"))
        );
    }

    #[test]
    fn resolutionの種別名がスネークケースになる() {
        let no_profile: &str = Resolution::NoProfile.into();
        let no_token: &str = Resolution::NoToken.into();

        assert_eq!(no_profile, "no_profile");
        assert_eq!(no_token, "no_token");
    }

    #[test]
    fn destinationのdebug出力はトークン全体を含まない() {
        let destination = Destination::new("abcdefghijklmnopqrstuvwxyz");

        let debug = format!("{destination:?}");

        assert!(debug.contains("abcdefgh"));
        assert!(!debug.contains("xyz"));
    }
}
