use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;

use super::{ProductStore, StoreError, StoreResult, SubstituteStore, UserStore};
use crate::models::{NewSubstitute, NewUser, Product, SavedSubstitute, Substitute, User};

/// Process-local store. Products are iterated in id order, which stands in
/// for the `ORDER BY id_product` of the Postgres queries.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    products: BTreeMap<i32, Product>,
    substitutes: Vec<Substitute>,
    users: Vec<User>,
    next_substitute_id: i32,
    next_user_id: i32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let store = Self::new();
        for product in products {
            store.add_product(product);
        }
        store
    }

    /// Adds or replaces a catalog entry.
    pub fn add_product(&self, product: Product) {
        self.write().products.insert(product.id_product, product);
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn same_edge(substitute: &Substitute, edge: &NewSubstitute) -> bool {
    substitute.origin == edge.origin
        && substitute.replacement == edge.replacement
        && substitute.user_id == edge.user_id
}

impl ProductStore for MemoryStore {
    fn product(&self, id: i32) -> StoreResult<Option<Product>> {
        Ok(self.read().products.get(&id).cloned())
    }

    fn product_named(&self, name: &str) -> StoreResult<Option<Product>> {
        let name = name.to_lowercase();

        Ok(self
            .read()
            .products
            .values()
            .find(|product| product.product_name.to_lowercase() == name)
            .cloned())
    }

    fn product_name_containing(&self, fragment: &str) -> StoreResult<Option<Product>> {
        let fragment = fragment.to_lowercase();

        Ok(self
            .read()
            .products
            .values()
            .find(|product| product.product_name.to_lowercase().contains(&fragment))
            .cloned())
    }

    fn products_in_category(
        &self,
        category: &str,
        max_nutriscore: i32,
    ) -> StoreResult<Vec<Product>> {
        let mut found: Vec<Product> = self
            .read()
            .products
            .values()
            .filter(|product| product.category == category && product.nutriscore <= max_nutriscore)
            .cloned()
            .collect();

        found.sort_by_key(|product| product.nutriscore);
        Ok(found)
    }
}

impl SubstituteStore for MemoryStore {
    fn save_substitute(&self, edge: NewSubstitute) -> StoreResult<()> {
        let mut inner = self.write();

        if inner.substitutes.iter().any(|saved| same_edge(saved, &edge)) {
            return Ok(());
        }

        inner.next_substitute_id += 1;
        let id = inner.next_substitute_id;
        inner.substitutes.push(Substitute {
            id,
            origin: edge.origin,
            replacement: edge.replacement,
            user_id: edge.user_id,
            created_at: Utc::now().naive_utc(),
        });

        Ok(())
    }

    fn delete_substitute(&self, edge: NewSubstitute) -> StoreResult<bool> {
        let mut inner = self.write();
        let before = inner.substitutes.len();

        inner.substitutes.retain(|saved| !same_edge(saved, &edge));

        Ok(inner.substitutes.len() < before)
    }

    fn saved_replacements(&self, origin: i32, user_id: i32) -> StoreResult<Vec<i32>> {
        Ok(self
            .read()
            .substitutes
            .iter()
            .filter(|saved| saved.origin == origin && saved.user_id == user_id)
            .map(|saved| saved.replacement)
            .collect())
    }

    fn saved_substitutes(&self, user_id: i32) -> StoreResult<Vec<SavedSubstitute>> {
        let inner = self.read();

        Ok(inner
            .substitutes
            .iter()
            .filter(|saved| saved.user_id == user_id)
            .filter_map(|saved| {
                Some(SavedSubstitute {
                    origin: inner.products.get(&saved.origin)?.clone(),
                    replacement: inner.products.get(&saved.replacement)?.clone(),
                    saved_at: saved.created_at,
                })
            })
            .collect())
    }
}

impl UserStore for MemoryStore {
    fn user(&self, id: i32) -> StoreResult<Option<User>> {
        Ok(self.read().users.iter().find(|user| user.id == id).cloned())
    }

    fn user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(self
            .read()
            .users
            .iter()
            .find(|user| user.username == username)
            .cloned())
    }

    fn create_user(&self, user: NewUser) -> StoreResult<User> {
        let mut inner = self.write();

        if inner.users.iter().any(|existing| existing.username == user.username) {
            return Err(StoreError::Conflict("username"));
        }

        inner.next_user_id += 1;
        let created = User {
            id: inner.next_user_id,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            date_joined: Utc::now().naive_utc(),
        };
        inner.users.push(created.clone());

        Ok(created)
    }
}
