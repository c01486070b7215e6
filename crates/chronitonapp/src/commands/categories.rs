use crate::commands::helpers::{log_category_order, stage_categories};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Category, CategoryId};
use crate::notify::ModelChange;
use crate::ordering;
use crate::store::DataStore;

/// Create a Category at `at_index` (default: the end), shifting later Categories down.
pub fn create<S: DataStore>(
    store: &mut S,
    name: &str,
    at_index: Option<usize>,
) -> Result<CmdResult> {
    let mut categories = store.list_categories()?;
    let category = Category::new(name);
    let id = category.id;
    let position = ordering::insert(&mut categories, category, at_index)?;

    stage_categories(store, &categories)?;
    store.commit()?;
    log_category_order("create", &categories);

    let created = store.get_category(&id)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Category created: {} (position {})",
        created.name,
        position + 1
    )));
    result.add_change(ModelChange::CategoryCreated { category: id });
    if position + 1 < categories.len() {
        result.add_change(ModelChange::CategoriesReordered);
    }
    Ok(result.with_category(created))
}

/// Delete a Category together with every Event it owns.
pub fn delete<S: DataStore>(store: &mut S, id: CategoryId) -> Result<CmdResult> {
    let category = store.get_category(&id)?;
    let mut categories = store.list_categories()?;
    ordering::remove(&mut categories, id)?;
    let owned = store.list_events_in(&id)?;

    for event in &owned {
        store.delete_event(&event.id)?;
    }
    store.delete_category(&id)?;
    stage_categories(store, &categories)?;
    store.commit()?;
    log_category_order("delete", &categories);

    let mut result = CmdResult::default();
    let noun = if owned.len() == 1 { "event" } else { "events" };
    result.add_message(CmdMessage::success(format!(
        "Category deleted: {} ({} {})",
        category.name,
        owned.len(),
        noun
    )));
    result.add_change(ModelChange::CategoryDeleted {
        category: id,
        events_removed: owned.len(),
    });
    if category.order_index < categories.len() {
        result.add_change(ModelChange::CategoriesReordered);
    }
    Ok(result.with_category(category))
}

/// Move a Category to `to_index`; the others keep their relative order.
pub fn move_to<S: DataStore>(store: &mut S, id: CategoryId, to_index: usize) -> Result<CmdResult> {
    let category = store.get_category(&id)?;
    let mut categories = store.list_categories()?;
    ordering::move_to_index(&mut categories, id, to_index)?;

    stage_categories(store, &categories)?;
    store.commit()?;
    log_category_order("move", &categories);

    let mut result = CmdResult::default();
    if category.order_index == to_index {
        result.add_message(CmdMessage::info(format!(
            "{} is already at position {}",
            category.name,
            to_index + 1
        )));
    } else {
        result.add_message(CmdMessage::success(format!(
            "Moved {} to position {}",
            category.name,
            to_index + 1
        )));
        result.add_change(ModelChange::CategoriesReordered);
    }
    let moved = store.get_category(&id)?;
    Ok(result.with_category(moved))
}

pub fn rename<S: DataStore>(store: &mut S, id: CategoryId, name: &str) -> Result<CmdResult> {
    let mut category = store.get_category(&id)?;
    let old_name = std::mem::replace(&mut category.name, name.to_string());

    store.save_category(&category)?;
    store.commit()?;

    let renamed = store.get_category(&id)?;
    let mut result = CmdResult::default();
    if renamed.name != old_name {
        result.add_message(CmdMessage::success(format!(
            "Renamed {} to {}",
            old_name, renamed.name
        )));
        result.add_change(ModelChange::CategoryRenamed { category: id });
    }
    Ok(result.with_category(renamed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChronitonError;
    use crate::model::DEFAULT_CATEGORY_NAME;
    use crate::ordering::is_dense;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    fn names<S: DataStore>(store: &S) -> Vec<String> {
        store
            .list_categories()
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect()
    }

    #[test]
    fn test_create_appends_by_default() {
        let mut store = InMemoryStore::new();
        create(&mut store, "A", None).unwrap();
        let result = create(&mut store, "B", None).unwrap();

        assert_eq!(names(&store), vec!["A", "B"]);
        assert_eq!(result.category().unwrap().order_index, 1);
        assert!(!result.changes.contains(&ModelChange::CategoriesReordered));
    }

    #[test]
    fn test_create_at_front_shifts_others() {
        let mut store = InMemoryStore::new();
        create(&mut store, "A", None).unwrap();
        let result = create(&mut store, "B", Some(0)).unwrap();

        let categories = store.list_categories().unwrap();
        assert_eq!(names(&store), vec!["B", "A"]);
        assert!(is_dense(&categories));
        assert!(result.changes.contains(&ModelChange::CategoriesReordered));
    }

    #[test]
    fn test_create_blank_name_uses_placeholder() {
        let mut store = InMemoryStore::new();
        let result = create(&mut store, "", None).unwrap();
        assert_eq!(result.category().unwrap().name, DEFAULT_CATEGORY_NAME);
    }

    #[test]
    fn test_create_out_of_range_changes_nothing() {
        let mut fixture = StoreFixture::new().with_category("A", &[]);
        let err = create(&mut fixture.store, "B", Some(2)).unwrap_err();

        assert!(matches!(
            err,
            ChronitonError::IndexOutOfRange { index: 2, len: 1 }
        ));
        assert_eq!(names(&fixture.store), vec!["A"]);
        assert!(!fixture.store.has_changes());
    }

    #[test]
    fn test_delete_cascades_and_renumbers() {
        let mut fixture = StoreFixture::new()
            .with_category("Car", &["Oil", "Tires"])
            .with_category("House", &["Filters"])
            .with_category("Garden", &[]);
        let car = fixture.category_id(0);

        let result = delete(&mut fixture.store, car).unwrap();

        assert_eq!(names(&fixture.store), vec!["House", "Garden"]);
        assert!(is_dense(&fixture.store.list_categories().unwrap()));
        let remaining = fixture.store.list_events().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].title, "Filters");
        assert!(result.changes.contains(&ModelChange::CategoryDeleted {
            category: car,
            events_removed: 2,
        }));
    }

    #[test]
    fn test_delete_last_does_not_reorder() {
        let mut fixture = StoreFixture::new()
            .with_category("A", &[])
            .with_category("B", &[]);
        let b = fixture.category_id(1);

        let result = delete(&mut fixture.store, b).unwrap();
        assert_eq!(names(&fixture.store), vec!["A"]);
        assert!(!result.changes.contains(&ModelChange::CategoriesReordered));
    }

    #[test]
    fn test_delete_missing_category() {
        let mut store = InMemoryStore::new();
        let id = uuid::Uuid::new_v4();
        assert!(matches!(
            delete(&mut store, id),
            Err(ChronitonError::CategoryNotFound(_))
        ));
    }

    #[test]
    fn test_move_to_back_and_front() {
        let mut fixture = StoreFixture::new()
            .with_category("A", &[])
            .with_category("B", &[])
            .with_category("C", &[]);
        let a = fixture.category_id(0);

        move_to(&mut fixture.store, a, 2).unwrap();
        assert_eq!(names(&fixture.store), vec!["B", "C", "A"]);

        move_to(&mut fixture.store, a, 0).unwrap();
        assert_eq!(names(&fixture.store), vec!["A", "B", "C"]);
        assert!(is_dense(&fixture.store.list_categories().unwrap()));
    }

    #[test]
    fn test_move_to_same_index_is_noop() {
        let mut fixture = StoreFixture::new()
            .with_category("A", &[])
            .with_category("B", &[]);
        let b = fixture.category_id(1);

        let result = move_to(&mut fixture.store, b, 1).unwrap();
        assert_eq!(names(&fixture.store), vec!["A", "B"]);
        assert!(result.changes.is_empty());
    }

    #[test]
    fn test_move_out_of_range() {
        let mut fixture = StoreFixture::new()
            .with_category("A", &[])
            .with_category("B", &[]);
        let a = fixture.category_id(0);

        let err = move_to(&mut fixture.store, a, 2).unwrap_err();
        assert!(matches!(err, ChronitonError::IndexOutOfRange { .. }));
        assert_eq!(names(&fixture.store), vec!["A", "B"]);
    }

    #[test]
    fn test_rename() {
        let mut fixture = StoreFixture::new().with_category("Car", &["Oil"]);
        let car = fixture.category_id(0);

        let result = rename(&mut fixture.store, car, "Vehicle").unwrap();
        assert_eq!(result.category().unwrap().name, "Vehicle");
        assert_eq!(names(&fixture.store), vec!["Vehicle"]);
        assert_eq!(fixture.store.list_events_in(&car).unwrap().len(), 1);

        let result = rename(&mut fixture.store, car, "  ").unwrap();
        assert_eq!(result.category().unwrap().name, DEFAULT_CATEGORY_NAME);
    }
}
