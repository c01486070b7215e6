use crate::error::{ChronitonError, Result};
use crate::model::{Category, Event};
use crate::store::DataStore;

/// The Category that owns `event`.
///
/// An Event whose owner is gone means the stored data is corrupt, which is reported
/// as a consistency error rather than a plain "not found".
pub fn owner_of<S: DataStore>(store: &S, event: &Event) -> Result<Category> {
    store.get_category(&event.category_id).map_err(|_| {
        ChronitonError::Consistency(format!(
            "Event '{}' ({}) belongs to missing category {}",
            event.title, event.id, event.category_id
        ))
    })
}

pub fn stage_categories<S: DataStore>(store: &mut S, categories: &[Category]) -> Result<()> {
    for category in categories {
        store.save_category(category)?;
    }
    Ok(())
}

pub fn stage_events<S: DataStore>(store: &mut S, events: &[Event]) -> Result<()> {
    for event in events {
        store.save_event(event)?;
    }
    Ok(())
}

pub fn log_category_order(action: &str, categories: &[Category]) {
    if tracing::enabled!(tracing::Level::DEBUG) {
        let order: Vec<String> = categories
            .iter()
            .map(|c| format!("[{}] {}", c.order_index, c.name))
            .collect();
        tracing::debug!(action, order = ?order, "category order");
    }
}

pub fn log_event_order(action: &str, category: &Category, events: &[Event]) {
    if tracing::enabled!(tracing::Level::DEBUG) {
        let order: Vec<String> = events
            .iter()
            .map(|e| format!("[{}] {}", e.order_index, e.title))
            .collect();
        tracing::debug!(action, category = %category.name, order = ?order, "event order");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::DataStore;
    use uuid::Uuid;

    #[test]
    fn test_owner_of_found() {
        let fixture = StoreFixture::new().with_category("Car", &["Oil"]);
        let event = fixture.store.list_events().unwrap().remove(0);
        let owner = owner_of(&fixture.store, &event).unwrap();
        assert_eq!(owner.name, "Car");
    }

    #[test]
    fn test_owner_of_missing_is_consistency_error() {
        let fixture = StoreFixture::new();
        let event = Event::new("Stray", Uuid::new_v4());
        let err = owner_of(&fixture.store, &event).unwrap_err();
        assert!(matches!(err, ChronitonError::Consistency(_)));
        assert!(err.to_string().contains("Stray"));
    }
}
