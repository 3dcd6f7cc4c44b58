use crate::error::AppError;
use crate::models::{NewSubstitute, SavedSubstitute, SubstitutePair};
use crate::store::Store;

pub fn list_saved(store: &dyn Store, user_id: i32) -> Result<Vec<SavedSubstitute>, AppError> {
    Ok(store.saved_substitutes(user_id)?)
}

/// Removes one saved edge. Removing an edge that is not there is `NotFound`.
pub fn unsave(store: &dyn Store, pair: SubstitutePair, user_id: i32) -> Result<(), AppError> {
    let removed = store.delete_substitute(NewSubstitute {
        origin: pair.origin,
        replacement: pair.replacement,
        user_id,
    })?;

    if !removed {
        log::warn!(
            "User {} tried to remove unsaved substitute {} -> {}",
            user_id,
            pair.origin,
            pair.replacement
        );
        return Err(AppError::NotFound);
    }

    log::info!(
        "User {} removed substitute {} -> {}",
        user_id,
        pair.origin,
        pair.replacement
    );

    Ok(())
}
