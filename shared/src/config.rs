use anyhow::Result;

pub struct AppConfig {
    pub database: DatabaseConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        let database = DatabaseConfig {
            // 元のスクリプトと同じく surplusfood.db を既定値とする
            filename: std::env::var("DATABASE_FILENAME")
                .unwrap_or_else(|_| "surplusfood.db".into()),
        };
        Ok(Self { database })
    }
}

pub struct DatabaseConfig {
    pub filename: String,
}
