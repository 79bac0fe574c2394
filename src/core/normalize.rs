//! Error normalization
//!
//! Funnels one or many raw failures through a changeset's own error
//! ingestion and returns the canonical shape: the single error unwrapped
//! when exactly one resulted, the full aggregate otherwise. Callers must
//! handle both shapes; the asymmetry keeps single-error call sites free of
//! list handling.

use crate::core::errors::ActionError;
use crate::core::subject::Changeset;

/// Normalize raw failures into the changeset's canonical error form.
///
/// The changeset's existing error list is cleared first; ingestion may
/// expand aggregates and drop duplicates, so the result can differ in
/// count from the input.
pub fn normalize(
    changeset: &mut Changeset,
    errors: impl IntoIterator<Item = ActionError>,
) -> ActionError {
    changeset.clear_errors();
    for error in errors {
        changeset.add_error(error);
    }

    let mut resulting = changeset.errors().to_vec();
    if resulting.len() == 1 {
        resulting.remove(0)
    } else {
        ActionError::Multiple(resulting)
    }
}
