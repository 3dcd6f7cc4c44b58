use std::sync::Arc;

use crate::auth::SessionKeys;
use crate::store::Store;

/// Shared by every worker through `web::Data`.
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub sessions: SessionKeys,
    pub bcrypt_cost: u32,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, sessions: SessionKeys, bcrypt_cost: u32) -> Self {
        Self {
            store,
            sessions,
            bcrypt_cost,
        }
    }
}
