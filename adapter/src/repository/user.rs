use crate::database::model::user::UserRow;
use crate::database::ConnectionPool;
use async_trait::async_trait;
use chrono::{Datelike, Utc};
use derive_new::new;
use kernel::model::id::UserId;
use kernel::model::user::{event::CreateUser, User};
use kernel::repository::user::UserRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct UserRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn create(&self, event: CreateUser) -> AppResult<UserId> {
        if event.first_name.trim().is_empty() {
            return Err(AppError::UnprocessableEntity(
                "名（first_name）が空です。".into(),
            ));
        }
        if event.last_name.trim().is_empty() {
            return Err(AppError::UnprocessableEntity(
                "姓（last_name）が空です。".into(),
            ));
        }
        // 生年は任意だが、指定された場合は妥当な範囲に収まっていること
        if let Some(birth_year) = event.birth_year {
            let current_year = Utc::now().year();
            if !(1900..=current_year).contains(&birth_year) {
                return Err(AppError::UnprocessableEntity(format!(
                    "生年（birth_year = {birth_year}）が妥当な範囲にありません。"
                )));
            }
        }

        let user_id = UserId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO users (user_id, first_name, last_name, birth_year)
                VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(&event.first_name)
        .bind(&event.last_name)
        .bind(event.birth_year)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No user record has been created".into(),
            ));
        }

        Ok(user_id)
    }

    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
                SELECT user_id, first_name, last_name, birth_year
                FROM users
                WHERE user_id = ?
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(User::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::schema;

    #[sqlx::test(migrations = false)]
    async fn test_register_user(pool: sqlx::SqlitePool) -> anyhow::Result<()> {
        let db = ConnectionPool::new(pool);
        schema::init_database(&db).await?;
        let repo = UserRepositoryImpl::new(db);

        let user_id = repo
            .create(CreateUser::new("Hasti".into(), "Doe".into(), Some(1996)))
            .await?;

        let found = repo.find_by_id(user_id).await?;
        let user = found.unwrap();
        assert_eq!(user.first_name, "Hasti");
        assert_eq!(user.last_name, "Doe");
        assert_eq!(user.birth_year, Some(1996));
        Ok(())
    }

    #[sqlx::test(migrations = false)]
    async fn test_invalid_user_is_rejected(pool: sqlx::SqlitePool) -> anyhow::Result<()> {
        let db = ConnectionPool::new(pool);
        schema::init_database(&db).await?;
        let repo = UserRepositoryImpl::new(db);

        let res = repo
            .create(CreateUser::new("".into(), "Doe".into(), None))
            .await;
        assert!(matches!(res, Err(AppError::UnprocessableEntity(_))));

        let res = repo
            .create(CreateUser::new("Hasti".into(), "Doe".into(), Some(1600)))
            .await;
        assert!(matches!(res, Err(AppError::UnprocessableEntity(_))));
        Ok(())
    }
}
