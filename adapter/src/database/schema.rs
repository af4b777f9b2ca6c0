use crate::database::ConnectionPool;
use shared::error::{AppError, AppResult};

// テーブル定義。列挙値・価格・受け取り時間帯の制約は
// Rust 側の検証に加えて CHECK 制約としても書き込み時に強制する
const DDL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS establishments (
        establishment_id BLOB PRIMARY KEY,
        name TEXT NOT NULL,
        address TEXT,
        phone TEXT,
        cuisine_type TEXT
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS bags (
        bag_id BLOB PRIMARY KEY,
        bag_type TEXT NOT NULL CHECK (bag_type IN ('surprise', 'regular')),
        size TEXT NOT NULL CHECK (size IN ('small', 'medium', 'large')),
        price REAL NOT NULL CHECK (price >= 0),
        content TEXT NOT NULL DEFAULT '[]',
        pickup_start TEXT NOT NULL,
        pickup_end TEXT NOT NULL,
        state TEXT NOT NULL DEFAULT 'available'
            CHECK (state IN ('available', 'reserved')),
        establishment_id BLOB NOT NULL
            REFERENCES establishments (establishment_id),
        CHECK (pickup_start < pickup_end)
    );
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_bags_establishment_id
        ON bags (establishment_id);
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS users (
        user_id BLOB PRIMARY KEY,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        birth_year INTEGER
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS reservations (
        reservation_id BLOB PRIMARY KEY,
        user_id BLOB NOT NULL REFERENCES users (user_id),
        reserved_at TEXT NOT NULL
    );
    "#,
    // bag_id の UNIQUE 制約が二重予約の最終防衛線になる
    r#"
    CREATE TABLE IF NOT EXISTS reservation_items (
        reservation_item_id BLOB PRIMARY KEY,
        reservation_id BLOB NOT NULL REFERENCES reservations (reservation_id),
        bag_id BLOB NOT NULL UNIQUE REFERENCES bags (bag_id)
    );
    "#,
];

pub async fn init_database(db: &ConnectionPool) -> AppResult<()> {
    for ddl in DDL {
        sqlx::query(ddl)
            .execute(db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;
    }
    Ok(())
}
