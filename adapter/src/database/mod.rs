use shared::{
    config::DatabaseConfig,
    error::{AppError, AppResult},
};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool},
    Sqlite, Transaction,
};
use std::time::Duration;

pub mod model;
pub mod schema;

fn make_sqlite_connect_options(cfg: &DatabaseConfig) -> SqliteConnectOptions {
    SqliteConnectOptions::new()
        .filename(&cfg.filename)
        .create_if_missing(true)
        // 参照整合性は接続単位で常に有効にする
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
}

#[derive(Clone)]
pub struct ConnectionPool(SqlitePool);

impl ConnectionPool {
    pub fn new(pool: SqlitePool) -> Self {
        Self(pool)
    }

    pub fn inner_ref(&self) -> &SqlitePool {
        &self.0
    }

    pub async fn begin(&self) -> AppResult<Transaction<'_, Sqlite>> {
        self.0.begin().await.map_err(AppError::TransactionError)
    }

    // 書き込みロックを先頭で獲得するトランザクションを開始する。
    // 予約操作の在庫確認と状態更新の間に他の書き込みが割り込まないよう、
    // バッグ状態を変更する経路はすべてこちらを使うこと
    pub async fn begin_immediate(&self) -> AppResult<Transaction<'_, Sqlite>> {
        self.0
            .begin_with("BEGIN IMMEDIATE")
            .await
            .map_err(AppError::TransactionError)
    }
}

pub fn connect_database_with(cfg: &DatabaseConfig) -> ConnectionPool {
    ConnectionPool(SqlitePool::connect_lazy_with(make_sqlite_connect_options(
        cfg,
    )))
}
