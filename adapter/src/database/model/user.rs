use kernel::model::{id::UserId, user::User};
use sqlx::FromRow;

#[derive(FromRow)]
pub struct UserRow {
    pub user_id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub birth_year: Option<i32>,
}

impl From<UserRow> for User {
    fn from(value: UserRow) -> Self {
        let UserRow {
            user_id,
            first_name,
            last_name,
            birth_year,
        } = value;
        User {
            user_id,
            first_name,
            last_name,
            birth_year,
        }
    }
}
