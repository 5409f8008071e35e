//! # リポジトリ実装
//!
//! 外部ストアへのアクセスをトレイトで抽象化し、具体的な実装を提供する。
//!
//! ## 設計方針
//!
//! - **データベース抽象化**: sqlx を使用し、PostgreSQL 固有の処理をカプセル化
//! - **テスタビリティ**: トレイト経由でモック可能な設計

pub mod owner_profile_repository;

pub use owner_profile_repository::{OwnerProfileRepository, PostgresOwnerProfileRepository};
