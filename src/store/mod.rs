//! Storage seams for the catalog, saved substitutes and accounts.
//!
//! Handlers only talk to [`Store`]. [`PgStore`] backs it with diesel on a
//! Postgres pool; [`MemoryStore`] keeps everything in process for tests and
//! local demos. All methods are blocking, so async callers go through
//! `web::block`.

use thiserror::Error;

use crate::models::{NewSubstitute, NewUser, Product, SavedSubstitute, User};

pub mod memory;
pub mod pg;

pub use memory::MemoryStore;
pub use pg::PgStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),

    #[error("Query failed: {0}")]
    Query(#[from] diesel::result::Error),

    #[error("{0} already exists")]
    Conflict(&'static str),
}

pub type StoreResult<T> = Result<T, StoreError>;

pub trait ProductStore {
    fn product(&self, id: i32) -> StoreResult<Option<Product>>;

    /// Case-insensitive exact match on the name. Lowest id wins.
    fn product_named(&self, name: &str) -> StoreResult<Option<Product>>;

    /// Case-insensitive substring match on the name. Lowest id wins.
    fn product_name_containing(&self, fragment: &str) -> StoreResult<Option<Product>>;

    /// Products of `category` scoring `max_nutriscore` or better, ordered by
    /// nutriscore then id.
    fn products_in_category(
        &self,
        category: &str,
        max_nutriscore: i32,
    ) -> StoreResult<Vec<Product>>;
}

pub trait SubstituteStore {
    /// Creates the edge. Saving an existing edge is a no-op.
    fn save_substitute(&self, edge: NewSubstitute) -> StoreResult<()>;

    /// Deletes the exact edge, returning whether one existed.
    fn delete_substitute(&self, edge: NewSubstitute) -> StoreResult<bool>;

    /// Replacement ids `user_id` has saved for `origin`.
    fn saved_replacements(&self, origin: i32, user_id: i32) -> StoreResult<Vec<i32>>;

    /// Every edge of `user_id`, oldest first.
    fn saved_substitutes(&self, user_id: i32) -> StoreResult<Vec<SavedSubstitute>>;
}

pub trait UserStore {
    fn user(&self, id: i32) -> StoreResult<Option<User>>;

    fn user_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    /// Fails with [`StoreError::Conflict`] when the username is taken.
    fn create_user(&self, user: NewUser) -> StoreResult<User>;
}

pub trait Store: ProductStore + SubstituteStore + UserStore + Send + Sync {}

impl<T> Store for T where T: ProductStore + SubstituteStore + UserStore + Send + Sync {}
