use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// A catalog entry. The application never writes to this table.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Serialize)]
#[diesel(table_name = crate::schema::products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Product {
    pub id_product: i32,
    pub product_name: String,
    pub category: String,
    pub nutriscore: i32,
    pub fat: Option<f64>,
    pub saturated_fat: Option<f64>,
    pub salt: Option<f64>,
    pub sugar: Option<f64>,
    pub img: String,
    pub url: String,
}

#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = crate::schema::substitutes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Substitute {
    pub id: i32,
    pub origin: i32,
    pub replacement: i32,
    pub user_id: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = crate::schema::substitutes)]
pub struct NewSubstitute {
    pub origin: i32,
    pub replacement: i32,
    pub user_id: i32,
}

/// A saved edge with both of its products loaded, as shown on the saved list.
#[derive(Debug, Clone, Serialize)]
pub struct SavedSubstitute {
    pub origin: Product,
    pub replacement: Product,
    pub saved_at: NaiveDateTime,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub date_joined: NaiveDateTime,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// `origin`/`replacement` form body posted by the save and unsave buttons.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SubstitutePair {
    pub origin: i32,
    pub replacement: i32,
}
