#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{cookie::Cookie, web};
use healthy_swap::{
    AppState,
    auth::{SESSION_COOKIE, SessionKeys},
    models::{NewUser, Product, User},
    store::{MemoryStore, UserStore},
};

pub const SECRET: &[u8] = b"test-secret-test-secret-test-secret";
pub const TEST_BCRYPT_COST: u32 = 4;

pub fn product(id: i32, name: &str, category: &str, nutriscore: i32) -> Product {
    Product {
        id_product: id,
        product_name: name.to_string(),
        category: category.to_string(),
        nutriscore,
        fat: None,
        saturated_fat: None,
        salt: None,
        sugar: None,
        img: format!("https://images.example/{id}.jpg"),
        url: format!("https://world.openfoodfacts.org/product/{id}"),
    }
}

/// Snacks 1..=4 and 6, dairy 5. Nutriscores: 1=15, 2=10, 3=20, 4=2, 6=12.
pub fn catalog() -> Vec<Product> {
    let mut bar = product(1, "Crunchy Nut Bar", "Snacks", 15);
    bar.fat = Some(22.5);
    bar.saturated_fat = Some(4.0);
    bar.salt = Some(0.1);
    bar.sugar = None;

    vec![
        bar,
        product(2, "Oat Biscuit", "Snacks", 10),
        product(3, "Chocolate Wafer", "Snacks", 20),
        product(4, "Rice Cake", "Snacks", 2),
        product(5, "Plain Yogurt", "Dairy", 1),
        product(6, "Crunchy Nut Bar Mini", "Snacks", 12),
    ]
}

pub fn store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::with_products(catalog()))
}

pub fn sessions() -> SessionKeys {
    SessionKeys::new(SECRET, 1).unwrap()
}

pub fn app_state(store: Arc<MemoryStore>) -> web::Data<AppState> {
    web::Data::new(AppState::new(store, sessions(), TEST_BCRYPT_COST))
}

pub fn create_user(store: &MemoryStore, username: &str) -> User {
    store
        .create_user(NewUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: bcrypt::hash("correct-horse", TEST_BCRYPT_COST).unwrap(),
        })
        .unwrap()
}

pub fn session_cookie(user: &User) -> Cookie<'static> {
    Cookie::new(SESSION_COOKIE, sessions().issue(user).unwrap())
}

pub fn ids(products: &serde_json::Value) -> Vec<i64> {
    products["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id_product"].as_i64().unwrap())
        .collect()
}
