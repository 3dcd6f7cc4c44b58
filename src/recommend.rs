//! Healthier-substitute recommendations for a searched product.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::AppError;
use crate::models::{NewSubstitute, Product, SubstitutePair};
use crate::store::Store;

/// The product a query resolved to and the substitutes offered for it.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub reference: Product,
    pub candidates: Vec<Product>,
}

/// Exact (case-insensitive) name first, then the first name containing the
/// query.
pub fn resolve_reference(store: &dyn Store, query: &str) -> Result<Product, AppError> {
    if query.trim().is_empty() {
        return Err(AppError::NotFound);
    }

    if let Some(product) = store.product_named(query)? {
        return Ok(product);
    }

    store
        .product_name_containing(query)?
        .ok_or(AppError::NotFound)
}

/// Same-category products scoring at least as well as the reference,
/// healthiest first. With a `user_id`, substitutes that user already saved
/// for the reference are left out.
pub fn find_substitutes(
    store: &dyn Store,
    query: &str,
    user_id: Option<i32>,
) -> Result<Recommendation, AppError> {
    let reference = resolve_reference(store, query)?;

    let mut candidates: Vec<Product> = store
        .products_in_category(&reference.category, reference.nutriscore)?
        .into_iter()
        .filter(|product| {
            product.id_product != reference.id_product
                && product.category == reference.category
                && product.nutriscore <= reference.nutriscore
        })
        .collect();

    candidates.sort_by_key(|product| product.nutriscore);

    if let Some(user_id) = user_id {
        let saved: HashSet<i32> = store
            .saved_replacements(reference.id_product, user_id)?
            .into_iter()
            .collect();

        candidates.retain(|product| !saved.contains(&product.id_product));
    }

    log::info!(
        "Query {:?} resolved to product {} with {} candidates",
        query,
        reference.id_product,
        candidates.len()
    );

    Ok(Recommendation {
        reference,
        candidates,
    })
}

/// Saves `pair` for `user_id` and drops the replacement from the candidates
/// being returned.
pub fn save_and_exclude(
    store: &dyn Store,
    recommendation: &mut Recommendation,
    pair: SubstitutePair,
    user_id: i32,
) -> Result<(), AppError> {
    for id in [pair.origin, pair.replacement] {
        if store.product(id)?.is_none() {
            log::warn!("Refusing to save substitute with unknown product {}", id);
            return Err(AppError::NotFound);
        }
    }

    store.save_substitute(NewSubstitute {
        origin: pair.origin,
        replacement: pair.replacement,
        user_id,
    })?;

    log::info!(
        "User {} saved substitute {} -> {}",
        user_id,
        pair.origin,
        pair.replacement
    );

    recommendation
        .candidates
        .retain(|product| product.id_product != pair.replacement);

    Ok(())
}
