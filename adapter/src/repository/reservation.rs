use crate::database::model::reservation::{
    ReservationItemRow, ReservationRow, ReservedBagStateRow,
};
use crate::database::ConnectionPool;
use async_trait::async_trait;
use derive_new::new;
use kernel::model::bag::BagState;
use kernel::model::id::{BagId, ReservationId, ReservationItemId, UserId};
use kernel::model::reservation::{
    event::{ReleaseBag, ReserveBags},
    Reservation, ReservationItem,
};
use kernel::repository::reservation::ReservationRepository;
use shared::error::{AppError, AppResult};
use std::collections::HashSet;

#[derive(new)]
pub struct ReservationRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ReservationRepository for ReservationRepositoryImpl {
    // 予約操作を行う
    async fn reserve(&self, event: ReserveBags) -> AppResult<ReservationId> {
        // 入力チェック。バッグ ID の集合は空でなく、重複を含まないこと
        if event.bag_ids.is_empty() {
            return Err(AppError::UnprocessableEntity(
                "予約対象のバッグが指定されていません。".into(),
            ));
        }
        {
            let mut seen = HashSet::new();
            let duplicated: Vec<String> = event
                .bag_ids
                .iter()
                .filter(|id| !seen.insert(**id))
                .map(ToString::to_string)
                .collect();
            if !duplicated.is_empty() {
                return Err(AppError::UnprocessableEntity(format!(
                    "バッグ ID が重複しています（{}）。",
                    duplicated.join(", ")
                )));
            }
        }

        // 書き込みロックを先頭で獲得する。以降のチェックと状態更新の間に
        // 他の予約が割り込むことはない
        let mut tx = self.db.begin_immediate().await?;

        // 事前のチェックとして、以下を調べる。
        // - 指定の利用者 ID をもつ利用者が存在するか
        // - 要求された各バッグが存在し、かつ予約済みでないか
        //
        // 上記がすべて Yes だった場合のみ、このブロック以降の処理に進む
        {
            //
            // ① 利用者の存在確認
            //
            let user: Option<(UserId,)> =
                sqlx::query_as("SELECT user_id FROM users WHERE user_id = ?")
                    .bind(event.reserved_by)
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(AppError::SpecificOperationError)?;

            if user.is_none() {
                return Err(AppError::EntityNotFound(format!(
                    "利用者（{}）が見つかりませんでした。",
                    event.reserved_by
                )));
            }

            //
            // ② 各バッグの現在状態をロック下で読み直す
            //
            let mut missing: Vec<String> = Vec::new();
            let mut conflicted: Vec<String> = Vec::new();
            for bag_id in &event.bag_ids {
                let row: Option<(String,)> =
                    sqlx::query_as("SELECT state FROM bags WHERE bag_id = ?")
                        .bind(*bag_id)
                        .fetch_optional(&mut *tx)
                        .await
                        .map_err(AppError::SpecificOperationError)?;

                match row {
                    None => missing.push(bag_id.to_string()),
                    Some((state,)) => {
                        if state.parse::<BagState>()? != BagState::Available {
                            conflicted.push(bag_id.to_string());
                        }
                    }
                }
            }

            // 一つでも確保できないバッグがあれば予約全体を失敗させる
            if !missing.is_empty() {
                return Err(AppError::EntityNotFound(format!(
                    "バッグ（{}）が見つかりませんでした。",
                    missing.join(", ")
                )));
            }
            if !conflicted.is_empty() {
                return Err(AppError::ResourceConflict(format!(
                    "バッグ（{}）は既に予約されています。",
                    conflicted.join(", ")
                )));
            }
        }

        // 予約処理を行う。reservations レコードを 1 件追加し、
        // バッグごとに状態遷移と reservation_items の追加を行う
        let reservation_id = ReservationId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO reservations (reservation_id, user_id, reserved_at)
                VALUES (?, ?, ?)
            "#,
        )
        .bind(reservation_id)
        .bind(event.reserved_by)
        .bind(event.reserved_at)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No reservation record has been created".into(),
            ));
        }

        for bag_id in &event.bag_ids {
            // state の条件付き UPDATE が二重予約の最終チェックになる
            let res = sqlx::query(
                r#"
                    UPDATE bags
                    SET state = 'reserved'
                    WHERE bag_id = ? AND state = 'available'
                "#,
            )
            .bind(*bag_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

            if res.rows_affected() < 1 {
                return Err(AppError::ResourceConflict(format!(
                    "バッグ（{bag_id}）は既に予約されています。"
                )));
            }

            let res = sqlx::query(
                r#"
                    INSERT INTO reservation_items
                    (reservation_item_id, reservation_id, bag_id)
                    VALUES (?, ?, ?)
                "#,
            )
            .bind(ReservationItemId::new())
            .bind(reservation_id)
            .bind(*bag_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

            if res.rows_affected() < 1 {
                return Err(AppError::NoRowsAffectedError(
                    "No reservation_items record has been created".into(),
                ));
            }
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(reservation_id)
    }

    async fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Reservation> {
        let row: Option<ReservationRow> = sqlx::query_as(
            r#"
                SELECT reservation_id, user_id, reserved_at
                FROM reservations
                WHERE reservation_id = ?
            "#,
        )
        .bind(reservation_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let Some(row) = row else {
            return Err(AppError::EntityNotFound(format!(
                "予約（{reservation_id}）が見つかりませんでした。"
            )));
        };

        let item_rows: Vec<ReservationItemRow> = sqlx::query_as(
            r#"
                SELECT
                    ri.reservation_item_id,
                    ri.bag_id,
                    b.bag_type,
                    b.size,
                    b.price,
                    b.establishment_id,
                    e.name AS establishment_name
                FROM reservation_items AS ri
                INNER JOIN bags AS b ON ri.bag_id = b.bag_id
                INNER JOIN establishments AS e
                    ON b.establishment_id = e.establishment_id
                WHERE ri.reservation_id = ?
                ORDER BY ri.bag_id ASC
            "#,
        )
        .bind(reservation_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let items = item_rows
            .into_iter()
            .map(ReservationItem::try_from)
            .collect::<AppResult<Vec<ReservationItem>>>()?;

        Ok(Reservation {
            reservation_id: row.reservation_id,
            reserved_by: row.user_id,
            reserved_at: row.reserved_at,
            items,
        })
    }

    // 予約済みバッグの解放操作を行う
    async fn release(&self, event: ReleaseBag) -> AppResult<()> {
        let ReleaseBag { bag_id } = event;

        // 予約時と同じロック規律で行う
        let mut tx = self.db.begin_immediate().await?;

        // 解放操作時は事前のチェックとして、以下を調べる。
        // - 指定のバッグ ID をもつバッグが存在するか
        // - 存在した場合、そのバッグが予約中であるか
        let item = {
            //
            // ① バッグの存在確認 ＋ 状態チェック
            //
            let bag_row: Option<(String,)> =
                sqlx::query_as("SELECT state FROM bags WHERE bag_id = ?")
                    .bind(bag_id)
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(AppError::SpecificOperationError)?;

            let Some((state,)) = bag_row else {
                return Err(AppError::EntityNotFound(format!(
                    "バッグ（{bag_id}）が見つかりませんでした。"
                )));
            };

            if state.parse::<BagState>()? != BagState::Reserved {
                return Err(AppError::UnprocessableEntity(format!(
                    "バッグ（{bag_id}）は予約されていません。"
                )));
            }

            //
            // ② 対象バッグの予約明細を特定する
            //
            let item: Option<ReservedBagStateRow> = sqlx::query_as(
                r#"
                    SELECT reservation_item_id, reservation_id
                    FROM reservation_items
                    WHERE bag_id = ?
                "#,
            )
            .bind(bag_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

            let Some(item) = item else {
                // 予約中なのに明細がないのは整合性エラー
                return Err(AppError::NoRowsAffectedError(format!(
                    "バッグ（{bag_id}）に対応する予約明細が存在しません。"
                )));
            };
            item
        };

        // 明細を削除し、バッグを available に戻す
        let res = sqlx::query("DELETE FROM reservation_items WHERE reservation_item_id = ?")
            .bind(item.reservation_item_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No reservation_items record has been deleted".into(),
            ));
        }

        let res = sqlx::query("UPDATE bags SET state = 'available' WHERE bag_id = ?")
            .bind(bag_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No bag record has been updated".into(),
            ));
        }

        // 明細が 0 件になった予約は残さない
        let (remaining,): (i64,) = sqlx::query_as(
            r#"
                SELECT COUNT(*)
                FROM reservation_items
                WHERE reservation_id = ?
            "#,
        )
        .bind(item.reservation_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if remaining == 0 {
            sqlx::query("DELETE FROM reservations WHERE reservation_id = ?")
                .bind(item.reservation_id)
                .execute(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::schema;
    use crate::repository::bag::BagRepositoryImpl;
    use crate::repository::establishment::EstablishmentRepositoryImpl;
    use crate::repository::user::UserRepositoryImpl;
    use chrono::{TimeZone, Utc};
    use kernel::model::bag::{event::CreateBag, BagContentItem, BagSize, BagType};
    use kernel::model::establishment::event::CreateEstablishment;
    use kernel::model::id::EstablishmentId;
    use kernel::model::user::event::CreateUser;
    use kernel::repository::bag::BagRepository;
    use kernel::repository::establishment::EstablishmentRepository;
    use kernel::repository::user::UserRepository;

    struct Fixture {
        db: ConnectionPool,
        establishment_id: EstablishmentId,
        user_id: UserId,
    }

    async fn setup(pool: sqlx::SqlitePool) -> anyhow::Result<Fixture> {
        let db = ConnectionPool::new(pool);
        schema::init_database(&db).await?;

        let establishment_id = EstablishmentRepositoryImpl::new(db.clone())
            .create(CreateEstablishment::new(
                "FreshMart".into(),
                Some("123 Market St".into()),
                Some("123-456-7890".into()),
                Some("Grocery".into()),
            ))
            .await?;
        let user_id = UserRepositoryImpl::new(db.clone())
            .create(CreateUser::new("Hasti".into(), "Doe".into(), Some(1996)))
            .await?;

        Ok(Fixture {
            db,
            establishment_id,
            user_id,
        })
    }

    async fn register_bag(db: &ConnectionPool, establishment_id: EstablishmentId) -> BagId {
        BagRepositoryImpl::new(db.clone())
            .create(CreateBag::new(
                BagType::Regular,
                BagSize::Medium,
                5.99,
                vec![BagContentItem {
                    name: "Bread".into(),
                    quantity: 3,
                }],
                Utc.with_ymd_and_hms(2025, 4, 5, 10, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2025, 4, 5, 11, 0, 0).unwrap(),
                establishment_id,
            ))
            .await
            .unwrap()
    }

    fn reserve_event(user_id: UserId, bag_ids: Vec<BagId>) -> ReserveBags {
        ReserveBags::new(user_id, Utc::now(), bag_ids)
    }

    async fn count(db: &ConnectionPool, table: &str) -> i64 {
        let (n,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(db.inner_ref())
            .await
            .unwrap();
        n
    }

    // 予約の成功パス。予約後は一覧上もバッグが reserved になること
    #[sqlx::test(migrations = false)]
    async fn test_reserve_bag(pool: sqlx::SqlitePool) -> anyhow::Result<()> {
        let f = setup(pool).await?;
        let bag_id = register_bag(&f.db, f.establishment_id).await;
        let repo = ReservationRepositoryImpl::new(f.db.clone());

        let reservation_id = repo
            .reserve(reserve_event(f.user_id, vec![bag_id]))
            .await?;

        let reservation = repo.find_by_id(reservation_id).await?;
        assert_eq!(reservation.reserved_by, f.user_id);
        assert_eq!(reservation.items.len(), 1);
        assert_eq!(reservation.items[0].bag.bag_id, bag_id);
        assert_eq!(reservation.items[0].bag.establishment_name, "FreshMart");

        let listed = BagRepositoryImpl::new(f.db.clone())
            .find_by_establishment_id(f.establishment_id)
            .await?;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].state, BagState::Reserved);
        Ok(())
    }

    // 複数店舗にまたがるバッグも 1 回の予約でまとめて確保できる
    #[sqlx::test(migrations = false)]
    async fn test_reserve_across_establishments(pool: sqlx::SqlitePool) -> anyhow::Result<()> {
        let f = setup(pool).await?;
        let other_establishment_id = EstablishmentRepositoryImpl::new(f.db.clone())
            .create(CreateEstablishment::new(
                "Bakery Corner".into(),
                None,
                None,
                Some("Bakery".into()),
            ))
            .await?;

        let bag_a = register_bag(&f.db, f.establishment_id).await;
        let bag_b = register_bag(&f.db, other_establishment_id).await;
        let repo = ReservationRepositoryImpl::new(f.db.clone());

        let reservation_id = repo
            .reserve(reserve_event(f.user_id, vec![bag_a, bag_b]))
            .await?;

        let reservation = repo.find_by_id(reservation_id).await?;
        assert_eq!(reservation.items.len(), 2);
        let names: Vec<&str> = reservation
            .items
            .iter()
            .map(|i| i.bag.establishment_name.as_str())
            .collect();
        assert!(names.contains(&"FreshMart"));
        assert!(names.contains(&"Bakery Corner"));
        Ok(())
    }

    // 存在しないバッグを含む予約は全体が失敗し、部分的な行が残らないこと
    #[sqlx::test(migrations = false)]
    async fn test_reserve_unknown_bag(pool: sqlx::SqlitePool) -> anyhow::Result<()> {
        let f = setup(pool).await?;
        let known = register_bag(&f.db, f.establishment_id).await;
        let unknown = BagId::new();
        let repo = ReservationRepositoryImpl::new(f.db.clone());

        let res = repo
            .reserve(reserve_event(f.user_id, vec![known, unknown]))
            .await;
        let Err(AppError::EntityNotFound(message)) = res else {
            panic!("EntityNotFound ではありませんでした: {res:?}");
        };
        assert!(message.contains(&unknown.to_string()));

        // 既存のバッグは available のまま、予約の行も作られない
        let bag = BagRepositoryImpl::new(f.db.clone())
            .find_by_id(known)
            .await?
            .unwrap();
        assert_eq!(bag.state, BagState::Available);
        assert_eq!(count(&f.db, "reservations").await, 0);
        assert_eq!(count(&f.db, "reservation_items").await, 0);
        Ok(())
    }

    // 存在しない利用者による予約は失敗すること
    #[sqlx::test(migrations = false)]
    async fn test_reserve_unknown_user(pool: sqlx::SqlitePool) -> anyhow::Result<()> {
        let f = setup(pool).await?;
        let bag_id = register_bag(&f.db, f.establishment_id).await;
        let repo = ReservationRepositoryImpl::new(f.db.clone());

        let res = repo
            .reserve(reserve_event(UserId::new(), vec![bag_id]))
            .await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));
        assert_eq!(count(&f.db, "reservations").await, 0);
        Ok(())
    }

    // 空集合・重複を含むバッグ ID は入力エラーになること
    #[sqlx::test(migrations = false)]
    async fn test_reserve_invalid_bag_ids(pool: sqlx::SqlitePool) -> anyhow::Result<()> {
        let f = setup(pool).await?;
        let bag_id = register_bag(&f.db, f.establishment_id).await;
        let repo = ReservationRepositoryImpl::new(f.db.clone());

        let res = repo.reserve(reserve_event(f.user_id, vec![])).await;
        assert!(matches!(res, Err(AppError::UnprocessableEntity(_))));

        let res = repo
            .reserve(reserve_event(f.user_id, vec![bag_id, bag_id]))
            .await;
        let Err(AppError::UnprocessableEntity(message)) = res else {
            panic!("UnprocessableEntity ではありませんでした: {res:?}");
        };
        assert!(message.contains(&bag_id.to_string()));

        // 入力エラーでは状態は一切変わらない
        let bag = BagRepositoryImpl::new(f.db.clone())
            .find_by_id(bag_id)
            .await?
            .unwrap();
        assert_eq!(bag.state, BagState::Available);
        Ok(())
    }

    // 予約済みバッグへの予約は、別の利用者でも同じ利用者でも競合になること
    #[sqlx::test(migrations = false)]
    async fn test_reserved_bag_conflicts(pool: sqlx::SqlitePool) -> anyhow::Result<()> {
        let f = setup(pool).await?;
        let bag_id = register_bag(&f.db, f.establishment_id).await;
        let other_user_id = UserRepositoryImpl::new(f.db.clone())
            .create(CreateUser::new("Kenji".into(), "Sato".into(), None))
            .await?;
        let repo = ReservationRepositoryImpl::new(f.db.clone());

        repo.reserve(reserve_event(f.user_id, vec![bag_id])).await?;

        // 別の利用者
        let res = repo
            .reserve(reserve_event(other_user_id, vec![bag_id]))
            .await;
        let Err(AppError::ResourceConflict(message)) = res else {
            panic!("ResourceConflict ではありませんでした: {res:?}");
        };
        assert!(message.contains(&bag_id.to_string()));

        // 同一リクエストの再送も黙って二重予約にはせず競合を返す
        let res = repo.reserve(reserve_event(f.user_id, vec![bag_id])).await;
        assert!(matches!(res, Err(AppError::ResourceConflict(_))));

        assert_eq!(count(&f.db, "reservations").await, 1);
        assert_eq!(count(&f.db, "reservation_items").await, 1);
        Ok(())
    }

    // 同一バッグへ同時に予約をかけた場合、成功はちょうど 1 件になること
    #[sqlx::test(migrations = false)]
    async fn test_concurrent_reserve_single_winner(
        pool: sqlx::SqlitePool,
    ) -> anyhow::Result<()> {
        let f = setup(pool).await?;
        let bag_id = register_bag(&f.db, f.establishment_id).await;
        let other_user_id = UserRepositoryImpl::new(f.db.clone())
            .create(CreateUser::new("Kenji".into(), "Sato".into(), None))
            .await?;

        let barrier = std::sync::Arc::new(tokio::sync::Barrier::new(2));

        let mut handles = Vec::new();
        for user_id in [f.user_id, other_user_id] {
            let repo = ReservationRepositoryImpl::new(f.db.clone());
            let barrier = barrier.clone();
            handles.push(tokio::spawn(async move {
                barrier.wait().await;
                repo.reserve(reserve_event(user_id, vec![bag_id])).await
            }));
        }

        let mut ok = 0;
        let mut conflict = 0;
        for handle in handles {
            match handle.await? {
                Ok(_) => ok += 1,
                Err(AppError::ResourceConflict(message)) => {
                    assert!(message.contains(&bag_id.to_string()));
                    conflict += 1;
                }
                Err(e) => panic!("想定外のエラー: {e:?}"),
            }
        }
        assert_eq!(ok, 1);
        assert_eq!(conflict, 1);
        assert_eq!(count(&f.db, "reservation_items").await, 1);
        Ok(())
    }

    // 解放したバッグは再度予約できること。明細が空になった予約は消えること
    #[sqlx::test(migrations = false)]
    async fn test_release_and_re_reserve(pool: sqlx::SqlitePool) -> anyhow::Result<()> {
        let f = setup(pool).await?;
        let bag_id = register_bag(&f.db, f.establishment_id).await;
        let repo = ReservationRepositoryImpl::new(f.db.clone());

        repo.reserve(reserve_event(f.user_id, vec![bag_id])).await?;
        repo.release(ReleaseBag::new(bag_id)).await?;

        let bag = BagRepositoryImpl::new(f.db.clone())
            .find_by_id(bag_id)
            .await?
            .unwrap();
        assert_eq!(bag.state, BagState::Available);
        assert_eq!(count(&f.db, "reservations").await, 0);
        assert_eq!(count(&f.db, "reservation_items").await, 0);

        // 解放後の再予約は成功する
        repo.reserve(reserve_event(f.user_id, vec![bag_id])).await?;

        // 予約されていないバッグの解放は操作エラー
        let res = repo.release(ReleaseBag::new(BagId::new())).await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));
        repo.release(ReleaseBag::new(bag_id)).await?;
        let res = repo.release(ReleaseBag::new(bag_id)).await;
        assert!(matches!(res, Err(AppError::UnprocessableEntity(_))));
        Ok(())
    }

    #[sqlx::test(migrations = false)]
    async fn test_find_unknown_reservation(pool: sqlx::SqlitePool) -> anyhow::Result<()> {
        let f = setup(pool).await?;
        let repo = ReservationRepositoryImpl::new(f.db.clone());

        let res = repo.find_by_id(ReservationId::new()).await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));
        Ok(())
    }
}
