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

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, AsExpression, FromSqlRow,
)]
#[diesel(sql_type = Text)]
pub enum DishCategory {
    Appetizer,
    Salad,
    #[serde(rename = "Main Course")]
    MainCourse,
    Dessert,
    Beverage,
}

impl DishCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            DishCategory::Appetizer => "Appetizer",
            DishCategory::Salad => "Salad",
            DishCategory::MainCourse => "Main Course",
            DishCategory::Dessert => "Dessert",
            DishCategory::Beverage => "Beverage",
        }
    }
}

impl fmt::Display for DishCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DishCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Appetizer" => Ok(DishCategory::Appetizer),
            "Salad" => Ok(DishCategory::Salad),
            "Main Course" => Ok(DishCategory::MainCourse),
            "Dessert" => Ok(DishCategory::Dessert),
            "Beverage" => Ok(DishCategory::Beverage),
            other => Err(format!("unrecognized dish category: {other}")),
        }
    }
}

impl ToSql<Text, Pg> for DishCategory {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for DishCategory {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        let s = std::str::from_utf8(bytes.as_bytes())?;
        s.parse().map_err(|e: String| e.into())
    }
}

/// A menu item owned by exactly one restaurant-role user. Prices are
/// integer cents.
#[derive(Queryable, Identifiable, Serialize, ToSchema, Debug)]
#[diesel(table_name = crate::db::schema::dishes)]
pub struct Dish {
    pub id: i32,
    pub restaurant_id: i32,
    pub name: String,
    pub description: String,
    pub price: i32,
    pub image: Option<String>,
    pub category: DishCategory,
    pub ingredients: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::db::schema::dishes)]
pub struct NewDish {
    pub restaurant_id: i32,
    pub name: String,
    pub description: String,
    pub price: i32,
    pub image: Option<String>,
    pub category: DishCategory,
    pub ingredients: String,
}

#[derive(AsChangeset, Deserialize, ToSchema, Debug, Default)]
#[diesel(table_name = crate::db::schema::dishes)]
pub struct UpdateDish {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<i32>,
    pub image: Option<String>,
    pub category: Option<DishCategory>,
    pub ingredients: Option<String>,
}
