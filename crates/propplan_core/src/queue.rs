//! Purchase queue construction
//!
//! Expands a quantity-per-type selection into the FIFO list of acquisition
//! slots the simulator works through. Types keep the order in which they were
//! first selected; a type selected twice merges into its first position.

use rustc_hash::FxHashMap;

use crate::error::{ConfigError, Result};
use crate::model::{AcquisitionSlot, Money, PropertyCatalog, PropertyTypeId, Selection};

/// Most acquisition slots a single run accepts
pub const MAX_QUEUE_SLOTS: u64 = 10_000;

/// Build the ordered acquisition queue
///
/// Fails with [`ConfigError::UnknownPropertyType`] when a selection names a
/// type the catalog does not contain, even if its quantity is zero, and with
/// [`ConfigError::QueueTooLong`] when the quantities add up to more than
/// [`MAX_QUEUE_SLOTS`].
pub fn build_queue(
    selections: &[Selection],
    catalog: &PropertyCatalog,
) -> Result<Vec<AcquisitionSlot>> {
    let index = catalog.index();

    let mut grouped: Vec<(&PropertyTypeId, u64)> = Vec::new();
    let mut positions: FxHashMap<&PropertyTypeId, usize> = FxHashMap::default();

    for selection in selections {
        if !index.contains_key(&selection.property_type) {
            return Err(ConfigError::UnknownPropertyType(
                selection.property_type.clone(),
            ));
        }
        match positions.get(&selection.property_type) {
            Some(&pos) => {
                grouped[pos].1 = grouped[pos].1.saturating_add(u64::from(selection.quantity));
            }
            None => {
                positions.insert(&selection.property_type, grouped.len());
                grouped.push((&selection.property_type, u64::from(selection.quantity)));
            }
        }
    }

    let total = grouped
        .iter()
        .fold(0u64, |acc, (_, qty)| acc.saturating_add(*qty));
    if total > MAX_QUEUE_SLOTS {
        return Err(ConfigError::QueueTooLong {
            slots: total,
            max: MAX_QUEUE_SLOTS,
        });
    }
    let mut slots = Vec::with_capacity(total as usize);

    for (id, quantity) in grouped {
        let assumption = index[id];
        // Bounded by MAX_QUEUE_SLOTS above
        for ordinal in 1..=quantity as u32 {
            slots.push(AcquisitionSlot {
                sequence: slots.len(),
                property_type: id.clone(),
                ordinal,
                cost: Money::from_dollars(assumption.average_cost),
                deposit_percent: assumption.deposit_percent,
                yield_percent: assumption.yield_percent,
                growth_percent: assumption.growth_percent,
            });
        }
    }

    Ok(slots)
}
