//! # OwnerProfileRepository
//!
//! 注文オーナーのプロフィール（通知トークン）を読み取るリポジトリ。
//!
//! ## 設計方針
//!
//! - **読み取り専用**: プロフィールはオーナーのクライアントが更新する。
//!   このシステムは ID による単一行の参照だけを行う
//! - **フォールバックなし**: 1 回の参照で見つからなければ「なし」を返す
//! - **障害と欠落の区別**: 行が無いことは `Ok(None)`、DB 障害は `Err`

use async_trait::async_trait;
use orderflow_domain::owner::{OwnerId, OwnerProfile};
use sqlx::PgPool;

use crate::error::InfraError;

/// オーナープロフィールリポジトリトレイト
#[async_trait]
pub trait OwnerProfileRepository: Send + Sync {
    /// オーナー ID でプロフィールを取得する
    ///
    /// # 戻り値
    ///
    /// - `Ok(Some(profile))`: オーナーが存在する場合（トークンが無いこともある）
    /// - `Ok(None)`: オーナーが存在しない場合
    /// - `Err(_)`: ストアに到達できない場合
    async fn find_by_owner_id(
        &self,
        owner_id: &OwnerId,
    ) -> Result<Option<OwnerProfile>, InfraError>;
}

/// PostgreSQL 実装の OwnerProfileRepository
///
/// `users.profile`（JSONB）を読み、`fcmToken` を取り出す。
#[derive(Debug, Clone)]
pub struct PostgresOwnerProfileRepository {
    pool: PgPool,
}

impl PostgresOwnerProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OwnerProfileRepository for PostgresOwnerProfileRepository {
    #[tracing::instrument(skip_all, fields(owner_id = %owner_id))]
    async fn find_by_owner_id(
        &self,
        owner_id: &OwnerId,
    ) -> Result<Option<OwnerProfile>, InfraError> {
        // 外側の Option は行の有無、内側は profile カラムの NULL
        let row: Option<Option<serde_json::Value>> =
            sqlx::query_scalar("SELECT profile FROM users WHERE id = $1")
                .bind(owner_id.as_str())
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|profile| {
            OwnerProfile::from_profile_section(owner_id.clone(), profile.as_ref())
        }))
    }
}
