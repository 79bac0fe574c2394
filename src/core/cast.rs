//! Runtime type casting of action results
//!
//! After the storage layer executes, attribute and calculation values whose
//! types are not storage-native are re-cast into runtime form. The cast set
//! is computed once per call; when it is empty the outcome passes through
//! with no per-record work at all.
//!
//! Reduction over a batch is fail-fast: records are processed in order,
//! attributes before calculations within each record, and the first cast
//! failure becomes the outcome of the whole batch. No partial results are
//! ever returned.

use crate::core::errors::ActionError;
use crate::core::outcome::{ActionPayload, ActionResult};
use crate::core::record::Record;
use crate::core::subject::{Query, SelectionSource, SubjectContext};
use crate::resource::{cast_from_storage, Attribute, Calculation};

/// Re-cast a result's attribute and calculation values into runtime form.
///
/// Failed and empty outcomes pass through unchanged. `cast_attributes`
/// turns attribute casting off entirely (calculations are still cast), for
/// callers whose storage path already produced runtime values.
pub fn cast_results(result: ActionResult, query: &Query, cast_attributes: bool) -> ActionResult {
    let payload = match result {
        Ok(payload) => payload,
        Err(_) => return result,
    };

    let resource = query.resource();

    let attributes: Vec<&Attribute> = if cast_attributes {
        match query.selected() {
            Some(selected) => selected
                .iter()
                .filter_map(|name| resource.attribute(name))
                .filter(|attribute| !attribute.is_storage_native())
                .collect(),
            None => resource
                .attributes()
                .iter()
                .filter(|attribute| !attribute.is_storage_native())
                .collect(),
        }
    } else {
        Vec::new()
    };

    let calculations: Vec<&Calculation> = query
        .calculations()
        .iter()
        .filter_map(|name| resource.calculation(name))
        .filter(|calculation| !calculation.is_storage_native())
        .collect();

    // Fast path: nothing to cast, skip the per-record walk
    if attributes.is_empty() && calculations.is_empty() {
        return Ok(payload);
    }

    match payload {
        ActionPayload::Empty => Ok(ActionPayload::Empty),
        ActionPayload::One(record) => {
            cast_record(record, &attributes, &calculations).map(ActionPayload::One)
        }
        ActionPayload::Many(records) => {
            let mut cast = Vec::with_capacity(records.len());
            for record in records {
                // First failure aborts the batch; later records are untouched
                cast.push(cast_record(record, &attributes, &calculations)?);
            }
            Ok(ActionPayload::Many(cast))
        }
    }
}

fn cast_record(
    mut record: Record,
    attributes: &[&Attribute],
    calculations: &[&Calculation],
) -> Result<Record, ActionError> {
    for attribute in attributes {
        // Only fields the storage layer actually returned
        if let Some(raw) = record.remove_field(&attribute.name) {
            let cast = cast_from_storage(&attribute.attr_type, raw, &attribute.constraints)
                .map_err(|e| e.at(&attribute.name))?;
            record.put(attribute.name.clone(), cast);
        }
    }

    for calculation in calculations {
        match &calculation.load {
            // The raw output was materialized into a top-level field
            Some(field) => {
                if let Some(raw) = record.remove_field(field) {
                    let cast =
                        cast_from_storage(&calculation.calc_type, raw, &calculation.constraints)
                            .map_err(|e| e.at(field))?;
                    record.put(field.clone(), cast);
                }
            }
            None => {
                if let Some(raw) = record.remove_calculation(&calculation.name) {
                    let cast =
                        cast_from_storage(&calculation.calc_type, raw, &calculation.constraints)
                            .map_err(|e| e.at(&calculation.name))?;
                    record.put_calculation(calculation.name.clone(), cast);
                }
            }
        }
    }

    Ok(record)
}
