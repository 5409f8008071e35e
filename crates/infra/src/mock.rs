//! # テスト用モック
//!
//! ユースケーステストで使用するインメモリモック。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! orderflow-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use orderflow_domain::{
    mail::{MailReceipt, MailRequest},
    notification::{NotificationError, NotificationPayload},
    owner::{Destination, OwnerId, OwnerProfile},
};

use crate::{
    error::InfraError,
    mail::MailRelay,
    push::PushSender,
    repository::OwnerProfileRepository,
};

// ===== MockOwnerProfileRepository =====

#[derive(Clone, Default)]
pub struct MockOwnerProfileRepository {
    profiles:    Arc<Mutex<HashMap<OwnerId, OwnerProfile>>>,
    unreachable: Arc<Mutex<bool>>,
    lookups:     Arc<Mutex<Vec<OwnerId>>>,
}

impl MockOwnerProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// トークン付きのオーナーを登録する
    pub fn add_owner_with_token(&self, owner_id: &str, token: &str) {
        self.add_profile(OwnerProfile::new(
            OwnerId::new(owner_id),
            Some(Destination::new(token)),
        ));
    }

    /// トークン未登録のオーナーを登録する
    pub fn add_owner_without_token(&self, owner_id: &str) {
        self.add_profile(OwnerProfile::new(OwnerId::new(owner_id), None));
    }

    pub fn add_profile(&self, profile: OwnerProfile) {
        self.profiles
            .lock()
            .unwrap()
            .insert(profile.owner_id().clone(), profile);
    }

    /// 以降の参照をストア障害にする
    pub fn set_unreachable(&self) {
        *self.unreachable.lock().unwrap() = true;
    }

    /// 参照されたオーナー ID の履歴
    pub fn lookups(&self) -> Vec<OwnerId> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl OwnerProfileRepository for MockOwnerProfileRepository {
    async fn find_by_owner_id(
        &self,
        owner_id: &OwnerId,
    ) -> Result<Option<OwnerProfile>, InfraError> {
        self.lookups.lock().unwrap().push(owner_id.clone());

        if *self.unreachable.lock().unwrap() {
            return Err(InfraError::unexpected("プロフィールストアに接続できません"));
        }

        Ok(self.profiles.lock().unwrap().get(owner_id).cloned())
    }
}

// ===== MockPushSender =====

/// モックが記録する送信内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentPush {
    pub destination: Destination,
    pub payload:     NotificationPayload,
}

/// 送信を記録するモック
///
/// `failing()` で作成すると、送信を記録したうえで常にエラーを返す。
#[derive(Clone, Default)]
pub struct MockPushSender {
    sent:    Arc<Mutex<Vec<SentPush>>>,
    failure: Option<String>,
}

impl MockPushSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// 常に指定のエラーで失敗するモックを作成する
    pub fn failing(detail: impl Into<String>) -> Self {
        Self {
            sent:    Arc::default(),
            failure: Some(detail.into()),
        }
    }

    /// 送信が試行された通知の一覧
    pub fn sent(&self) -> Vec<SentPush> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl PushSender for MockPushSender {
    async fn send(
        &self,
        destination: &Destination,
        payload: &NotificationPayload,
    ) -> Result<String, NotificationError> {
        let mut sent = self.sent.lock().unwrap();
        sent.push(SentPush {
            destination: destination.clone(),
            payload:     payload.clone(),
        });

        match &self.failure {
            Some(detail) => Err(NotificationError::send_failed(detail.clone())),
            None => Ok(format!("projects/mock/messages/{}", sent.len())),
        }
    }
}

// ===== MockMailRelay =====

/// メール送信を記録するモック
#[derive(Clone, Default)]
pub struct MockMailRelay {
    sent:      Arc<Mutex<Vec<MailRequest>>>,
    rejection: Option<String>,
}

impl MockMailRelay {
    /// すべてのメールを受け付けるモックを作成する
    pub fn accepting() -> Self {
        Self::default()
    }

    /// すべてのメールを指定のエラーで拒否するモックを作成する
    pub fn rejecting(detail: impl Into<String>) -> Self {
        Self {
            sent:      Arc::default(),
            rejection: Some(detail.into()),
        }
    }

    /// 中継が試行されたリクエストの一覧
    pub fn sent(&self) -> Vec<MailRequest> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailRelay for MockMailRelay {
    async fn send_mail(&self, request: &MailRequest) -> Result<MailReceipt, NotificationError> {
        let mut sent = self.sent.lock().unwrap();
        sent.push(request.clone());

        match &self.rejection {
            Some(detail) => Err(NotificationError::send_failed(detail.clone())),
            None => Ok(MailReceipt::new(format!("250 2.0.0 OK queued as mock-{}", sent.len()))),
        }
    }
}
