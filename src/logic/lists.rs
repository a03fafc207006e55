use crate::state::{Collection, Identified};

/// Remove the first item whose id matches `id`.
///
/// Purely local: the cursor and exhausted flag are untouched and nothing is
/// re-fetched. Returns the removed item, if any.
pub fn remove_item<T: Identified>(collection: &mut Collection<T>, id: &str) -> Option<T> {
    let items = collection.items_mut();
    let pos = items.iter().position(|it| it.id() == id)?;
    Some(items.remove(pos))
}

/// Insert `item` at the front of the collection.
///
/// Used after a create/favorite elsewhere so the new entry is visible at the
/// top without a round-trip.
pub fn add_item<T>(collection: &mut Collection<T>, item: T) {
    collection.items_mut().insert(0, item);
}

/// Replace the item with the same id as `item`, keeping its position.
///
/// Returns `false` when no item has that id (the collection is unchanged).
pub fn update_item<T: Identified>(collection: &mut Collection<T>, item: T) -> bool {
    let items = collection.items_mut();
    match items.iter_mut().find(|it| it.id() == item.id()) {
        Some(slot) => {
            *slot = item;
            true
        }
        None => false,
    }
}
