use std::collections::HashMap;

use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sql_types::Text;

use super::{ProductStore, StoreError, StoreResult, SubstituteStore, UserStore};
use crate::db::PgPool;
use crate::models::{NewSubstitute, NewUser, Product, SavedSubstitute, Substitute, User};
use crate::schema::{products, substitutes, users};

diesel::define_sql_function!(fn lower(x: Text) -> Text);

/// Postgres-backed store. Each call checks one connection out of the pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Escapes `LIKE` metacharacters so user input only ever matches literally.
fn like_fragment(fragment: &str) -> String {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for c in fragment.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

impl ProductStore for PgStore {
    fn product(&self, id: i32) -> StoreResult<Option<Product>> {
        let mut conn = self.pool.get()?;

        let product = products::table
            .find(id)
            .select(Product::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(product)
    }

    fn product_named(&self, name: &str) -> StoreResult<Option<Product>> {
        let mut conn = self.pool.get()?;

        let product = products::table
            .filter(lower(products::product_name).eq(lower(name)))
            .order(products::id_product.asc())
            .select(Product::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(product)
    }

    fn product_name_containing(&self, fragment: &str) -> StoreResult<Option<Product>> {
        let mut conn = self.pool.get()?;

        let product = products::table
            .filter(products::product_name.ilike(like_fragment(fragment)))
            .order(products::id_product.asc())
            .select(Product::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(product)
    }

    fn products_in_category(
        &self,
        category: &str,
        max_nutriscore: i32,
    ) -> StoreResult<Vec<Product>> {
        let mut conn = self.pool.get()?;

        let found = products::table
            .filter(products::category.eq(category))
            .filter(products::nutriscore.le(max_nutriscore))
            .order((products::nutriscore.asc(), products::id_product.asc()))
            .select(Product::as_select())
            .load(&mut conn)?;

        Ok(found)
    }
}

impl SubstituteStore for PgStore {
    fn save_substitute(&self, edge: NewSubstitute) -> StoreResult<()> {
        let mut conn = self.pool.get()?;

        let inserted = diesel::insert_into(substitutes::table)
            .values(&edge)
            .on_conflict_do_nothing()
            .execute(&mut conn)?;

        if inserted == 0 {
            log::info!(
                "Substitute {} -> {} already saved for user {}",
                edge.origin,
                edge.replacement,
                edge.user_id
            );
        }

        Ok(())
    }

    fn delete_substitute(&self, edge: NewSubstitute) -> StoreResult<bool> {
        let mut conn = self.pool.get()?;

        let deleted = diesel::delete(
            substitutes::table
                .filter(substitutes::origin.eq(edge.origin))
                .filter(substitutes::replacement.eq(edge.replacement))
                .filter(substitutes::user_id.eq(edge.user_id)),
        )
        .execute(&mut conn)?;

        Ok(deleted > 0)
    }

    fn saved_replacements(&self, origin: i32, user_id: i32) -> StoreResult<Vec<i32>> {
        let mut conn = self.pool.get()?;

        let ids = substitutes::table
            .filter(substitutes::origin.eq(origin))
            .filter(substitutes::user_id.eq(user_id))
            .select(substitutes::replacement)
            .load(&mut conn)?;

        Ok(ids)
    }

    fn saved_substitutes(&self, user_id: i32) -> StoreResult<Vec<SavedSubstitute>> {
        let mut conn = self.pool.get()?;

        let edges = substitutes::table
            .filter(substitutes::user_id.eq(user_id))
            .order(substitutes::id.asc())
            .select(Substitute::as_select())
            .load(&mut conn)?;

        let ids: Vec<i32> = edges
            .iter()
            .flat_map(|edge| [edge.origin, edge.replacement])
            .collect();

        let by_id: HashMap<i32, Product> = products::table
            .filter(products::id_product.eq_any(ids))
            .select(Product::as_select())
            .load(&mut conn)?
            .into_iter()
            .map(|product| (product.id_product, product))
            .collect();

        let saved = edges
            .into_iter()
            .filter_map(|edge| {
                match (by_id.get(&edge.origin), by_id.get(&edge.replacement)) {
                    (Some(origin), Some(replacement)) => Some(SavedSubstitute {
                        origin: origin.clone(),
                        replacement: replacement.clone(),
                        saved_at: edge.created_at,
                    }),
                    _ => {
                        log::warn!("Substitute {} references a missing product", edge.id);
                        None
                    }
                }
            })
            .collect();

        Ok(saved)
    }
}

impl UserStore for PgStore {
    fn user(&self, id: i32) -> StoreResult<Option<User>> {
        let mut conn = self.pool.get()?;

        let user = users::table
            .find(id)
            .select(User::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(user)
    }

    fn user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let mut conn = self.pool.get()?;

        let user = users::table
            .filter(users::username.eq(username))
            .select(User::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(user)
    }

    fn create_user(&self, user: NewUser) -> StoreResult<User> {
        let mut conn = self.pool.get()?;

        diesel::insert_into(users::table)
            .values(&user)
            .returning(User::as_returning())
            .get_result(&mut conn)
            .map_err(|e| match e {
                DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                    StoreError::Conflict("username")
                }
                other => StoreError::Query(other),
            })
    }
}
