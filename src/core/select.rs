//! Result selection
//!
//! A caller that selected a subset of fields gets exactly that subset back:
//! every attribute outside the select set is blanked on the record, even if
//! the storage layer returned it, and the record is stamped with which
//! fields were actually selected. Primary key and always-selected
//! attributes survive any selection.

use crate::core::outcome::{ActionPayload, ActionResult};
use crate::core::record::Record;
use crate::core::subject::SelectionSource;
use crate::core::value::Value;

/// Blank unselected attributes on a result's records.
///
/// Failed and empty outcomes pass through unchanged; so does every record
/// when the subject carries no select set, since the storage layer already
/// satisfied the selection.
pub fn apply_selection<S: SelectionSource>(result: ActionResult, subject: &S) -> ActionResult {
    let payload = match result {
        Ok(payload) => payload,
        Err(_) => return result,
    };

    let Some(selected) = subject.selected() else {
        return Ok(payload);
    };

    match payload {
        ActionPayload::Empty => Ok(ActionPayload::Empty),
        ActionPayload::One(record) => Ok(ActionPayload::One(project(record, subject, selected))),
        ActionPayload::Many(records) => Ok(ActionPayload::Many(
            records
                .into_iter()
                .map(|record| project(record, subject, selected))
                .collect(),
        )),
    }
}

fn project<S: SelectionSource>(mut record: Record, subject: &S, selected: &[String]) -> Record {
    for attribute in subject.selection_resource().attributes() {
        if attribute.always_select || attribute.primary_key {
            continue;
        }
        if selected.contains(&attribute.name) {
            continue;
        }
        record.put(attribute.name.clone(), Value::Null);
    }
    record.set_selected(selected.to_vec());
    record
}

/// The attribute names a fetch for this subject will carry.
///
/// With no select set, every attribute; otherwise the selected attributes
/// plus the primary key and always-selected ones, in declaration order.
pub fn attributes_to_select<S: SelectionSource>(subject: &S) -> Vec<String> {
    let resource = subject.selection_resource();
    match subject.selected() {
        None => resource
            .attributes()
            .iter()
            .map(|attribute| attribute.name.clone())
            .collect(),
        Some(selected) => resource
            .attributes()
            .iter()
            .filter(|attribute| {
                attribute.always_select
                    || attribute.primary_key
                    || selected.contains(&attribute.name)
            })
            .map(|attribute| attribute.name.clone())
            .collect(),
    }
}
