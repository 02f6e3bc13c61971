use crate::models::user::{Role, UserPublic};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct SignupReq {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub profile_picture: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub contact_info: Option<String>,
    pub timings: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct LoginReq {
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Partial profile update; absent fields are left untouched. A supplied
/// password is re-hashed before it reaches the database.
#[derive(Deserialize, ToSchema)]
pub struct UpdateProfileReq {
    pub name: Option<String>,
    pub password: Option<String>,
    pub profile_picture: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub contact_info: Option<String>,
    pub timings: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct AuthResp {
    pub status: String,
    pub user: Option<UserPublic>,
    pub error: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct MessageResp {
    pub status: String,
    pub error: Option<String>,
}
