use garde::Validate;
use kernel::model::{
    id::UserId,
    user::{event::CreateUser, User},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[garde(length(min = 1))]
    pub first_name: String,
    #[garde(length(min = 1))]
    pub last_name: String,
    #[garde(inner(range(min = 1900, max = 2100)))]
    pub birth_year: Option<i32>,
}

impl From<CreateUserRequest> for CreateUser {
    fn from(value: CreateUserRequest) -> Self {
        let CreateUserRequest {
            first_name,
            last_name,
            birth_year,
        } = value;
        CreateUser {
            first_name,
            last_name,
            birth_year,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedUserResponse {
    pub user_id: UserId,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub user_id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub birth_year: Option<i32>,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        let User {
            user_id,
            first_name,
            last_name,
            birth_year,
        } = value;
        Self {
            user_id,
            first_name,
            last_name,
            birth_year,
        }
    }
}
