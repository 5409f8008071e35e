//! # OrderFlow Notifier
//!
//! 注文ステータスの変更をオーナーのデバイスへプッシュ通知し、
//! あわせてトランザクションメールの中継エンドポイントを提供するサービス。
//!
//! ## モジュール構成
//!
//! - `app_builder`: 送信バックエンドの初期化とルーター構築
//! - `config`: 環境変数からの設定読み込み
//! - `error`: HTTP 層のエラーとレスポンス変換
//! - `handler`: HTTP ハンドラ
//! - `usecase`: 注文通知パイプラインとメール中継

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;
