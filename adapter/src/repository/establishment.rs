use crate::database::model::establishment::EstablishmentRow;
use crate::database::ConnectionPool;
use async_trait::async_trait;
use derive_new::new;
use kernel::model::establishment::{event::CreateEstablishment, Establishment};
use kernel::model::id::EstablishmentId;
use kernel::repository::establishment::EstablishmentRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct EstablishmentRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl EstablishmentRepository for EstablishmentRepositoryImpl {
    async fn create(&self, event: CreateEstablishment) -> AppResult<EstablishmentId> {
        // 店舗名は必須
        if event.name.trim().is_empty() {
            return Err(AppError::UnprocessableEntity(
                "店舗名（name）が空です。".into(),
            ));
        }

        let establishment_id = EstablishmentId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO establishments
                (establishment_id, name, address, phone, cuisine_type)
                VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(establishment_id)
        .bind(&event.name)
        .bind(&event.address)
        .bind(&event.phone)
        .bind(&event.cuisine_type)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No establishment record has been created".into(),
            ));
        }

        Ok(establishment_id)
    }

    async fn find_all(&self) -> AppResult<Vec<Establishment>> {
        let rows: Vec<EstablishmentRow> = sqlx::query_as(
            r#"
                SELECT establishment_id, name, address, phone, cuisine_type
                FROM establishments
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Establishment::from).collect())
    }

    async fn find_by_id(
        &self,
        establishment_id: EstablishmentId,
    ) -> AppResult<Option<Establishment>> {
        let row: Option<EstablishmentRow> = sqlx::query_as(
            r#"
                SELECT establishment_id, name, address, phone, cuisine_type
                FROM establishments
                WHERE establishment_id = ?
            "#,
        )
        .bind(establishment_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Establishment::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::schema;

    #[sqlx::test(migrations = false)]
    async fn test_register_establishment(pool: sqlx::SqlitePool) -> anyhow::Result<()> {
        let db = ConnectionPool::new(pool);
        schema::init_database(&db).await?;
        let repo = EstablishmentRepositoryImpl::new(db);

        let event = CreateEstablishment::new(
            "FreshMart".into(),
            Some("123 Market St".into()),
            Some("123-456-7890".into()),
            Some("Grocery".into()),
        );
        let establishment_id = repo.create(event).await?;

        let all = repo.find_all().await?;
        assert_eq!(all.len(), 1);

        let found = repo.find_by_id(establishment_id).await?;
        assert!(found.is_some());

        let Establishment {
            establishment_id: id,
            name,
            address,
            phone,
            cuisine_type,
        } = found.unwrap();
        assert_eq!(id, establishment_id);
        assert_eq!(name, "FreshMart");
        assert_eq!(address.as_deref(), Some("123 Market St"));
        assert_eq!(phone.as_deref(), Some("123-456-7890"));
        assert_eq!(cuisine_type.as_deref(), Some("Grocery"));
        Ok(())
    }

    #[sqlx::test(migrations = false)]
    async fn test_empty_name_is_rejected(pool: sqlx::SqlitePool) -> anyhow::Result<()> {
        let db = ConnectionPool::new(pool);
        schema::init_database(&db).await?;
        let repo = EstablishmentRepositoryImpl::new(db);

        let event = CreateEstablishment::new("  ".into(), None, None, None);
        let res = repo.create(event).await;
        assert!(matches!(res, Err(AppError::UnprocessableEntity(_))));

        assert!(repo.find_all().await?.is_empty());
        Ok(())
    }
}
