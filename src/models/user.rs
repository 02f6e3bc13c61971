use chrono::{DateTime, Utc};
use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::pg::{Pg, PgValue};
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use diesel::{AsChangeset, Identifiable, Insertable, Queryable};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use std::str::FromStr;
use utoipa::ToSchema;

/// Account role, fixed at signup. Gates which API routes are reachable.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, AsExpression, FromSqlRow,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Restaurant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Restaurant => "restaurant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Role::Customer),
            "restaurant" => Ok(Role::Restaurant),
            other => Err(format!("unrecognized role: {other}")),
        }
    }
}

impl ToSql<Text, Pg> for Role {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for Role {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        let s = std::str::from_utf8(bytes.as_bytes())?;
        s.parse().map_err(|e: String| e.into())
    }
}

#[derive(Queryable, Identifiable, Debug)]
#[diesel(table_name = crate::db::schema::users)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub profile_picture: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub contact_info: Option<String>,
    pub timings: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::db::schema::users)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub profile_picture: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub contact_info: Option<String>,
    pub timings: Option<String>,
}

/// Partial profile update. `None` fields are left untouched; role is
/// deliberately absent (immutable after signup).
#[derive(AsChangeset, Debug, Default)]
#[diesel(table_name = crate::db::schema::users)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub password_hash: Option<String>,
    pub profile_picture: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub contact_info: Option<String>,
    pub timings: Option<String>,
}

/// User projection safe to serialize. The password hash never leaves the
/// db layer in any response body.
#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct UserPublic {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub profile_picture: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub contact_info: Option<String>,
    pub timings: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserPublic {
    fn from(user: User) -> Self {
        UserPublic {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            profile_picture: user.profile_picture,
            country: user.country,
            state: user.state,
            location: user.location,
            description: user.description,
            contact_info: user.contact_info,
            timings: user.timings,
            created_at: user.created_at,
        }
    }
}

/// Restaurant card shown in browse/search results and favorites lists.
#[derive(Queryable, Serialize, ToSchema, Debug)]
pub struct RestaurantSummary {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub profile_picture: Option<String>,
    pub timings: Option<String>,
    pub contact_info: Option<String>,
}
