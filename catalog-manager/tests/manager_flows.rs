// catalog-manager/tests/manager_flows.rs
// Product manager against the in-memory store

use catalog_manager::catalog_client::{InMemoryProductStore, ProductStore, StoreOperation};
use catalog_manager::shared::{Category, Decimal, Discount, Product, ProductDraft};
use catalog_manager::{CatalogEvent, ProductManager, SortKey};
use std::sync::Arc;
use tokio::sync::broadcast::error::TryRecvError;

fn product(id: &str, name: &str, price: i64, discount: Option<Discount>) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        price: Decimal::from(price),
        category: Category::Electronics,
        discount,
        image: format!("https://img.example.com/{}.jpg", id),
    }
}

fn draft(name: &str, price: i64) -> ProductDraft {
    ProductDraft {
        name: name.to_string(),
        price: Decimal::from(price),
        category: Category::Grocery,
        discount: Some(Discount::Ten),
        image: "https://img.example.com/new.jpg".to_string(),
    }
}

fn seeded_store() -> Arc<InMemoryProductStore> {
    Arc::new(InMemoryProductStore::with_products(vec![
        product("1", "Keyboard", 1500, None),
        product("2", "Mouse", 700, Some(Discount::Five)),
        product("3", "Monitor", 12000, Some(Discount::TwentyFive)),
    ]))
}

/// Drain everything currently queued on the receiver
fn drain(rx: &mut tokio::sync::broadcast::Receiver<CatalogEvent>) -> Vec<CatalogEvent> {
    let mut out = Vec::new();
    loop {
        match rx.try_recv() {
            Ok(event) => out.push(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return out,
            Err(TryRecvError::Lagged(_)) => continue,
        }
    }
}

// ========================================================================
// load_all
// ========================================================================

#[tokio::test]
async fn test_load_preserves_store_order() {
    let manager = ProductManager::activate(seeded_store()).await;
    let ids: Vec<String> = manager.products().into_iter().map(|p| p.id).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
}

#[tokio::test]
async fn test_failed_load_keeps_list_and_signals_once() {
    let store = seeded_store();
    let manager = ProductManager::activate(store.clone()).await;
    let before = manager.products();
    let mut rx = manager.subscribe();

    store.set_failing(StoreOperation::List, true);
    let event = manager.load_all().await;
    assert!(matches!(event, Some(CatalogEvent::LoadFailed { .. })));

    assert_eq!(manager.products(), before);
    let events = drain(&mut rx);
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], CatalogEvent::LoadFailed { .. }));
}

#[tokio::test]
async fn test_failed_initial_load_leaves_manager_usable() {
    let store = seeded_store();
    store.set_failing(StoreOperation::List, true);
    let manager = ProductManager::activate(store.clone()).await;
    assert!(manager.products().is_empty());

    store.set_failing(StoreOperation::List, false);
    assert_eq!(manager.load_all().await, Some(CatalogEvent::Loaded { count: 3 }));
    assert_eq!(manager.products().len(), 3);
}

// ========================================================================
// submit
// ========================================================================

#[tokio::test]
async fn test_create_then_reload() {
    let store = seeded_store();
    let manager = ProductManager::activate(store.clone()).await;
    let mut rx = manager.subscribe();
    manager.update_form(|form| form.name = "half typed".into());

    let new = draft("Rice 5kg", 450);
    let event = manager.submit(new.clone()).await;

    let created = match event {
        Some(CatalogEvent::Created { product }) => product,
        other => panic!("expected Created, got {:?}", other),
    };
    assert_eq!(created.id, "4");

    // Reloaded list carries the store-assigned id and the draft's fields
    let listed = manager.product("4").expect("new product listed after reload");
    assert!(new.matches(&listed));
    assert_eq!(manager.products().len(), 4);
    assert_eq!(store.calls(StoreOperation::List), 2);

    assert!(!manager.edit_session().is_active());
    assert!(manager.form().is_empty());

    let events = drain(&mut rx);
    assert!(matches!(events[0], CatalogEvent::Created { .. }));
    assert_eq!(events[1], CatalogEvent::Loaded { count: 4 });
}

#[tokio::test]
async fn test_update_replaces_edited_record() {
    let store = seeded_store();
    let manager = ProductManager::activate(store.clone()).await;
    assert!(manager.begin_edit("2"));

    let event = manager.submit(draft("Wireless Mouse", 900)).await;
    assert!(matches!(event, Some(CatalogEvent::Updated { ref product }) if product.id == "2"));

    let updated = manager.product("2").unwrap();
    assert_eq!(updated.name, "Wireless Mouse");
    assert_eq!(updated.category, Category::Grocery);
    assert_eq!(manager.products().len(), 3);
    assert_eq!(store.calls(StoreOperation::Create), 0);
    assert!(!manager.edit_session().is_active());
}

#[tokio::test]
async fn test_submit_form_round_trip_through_edit() {
    let manager = ProductManager::activate(seeded_store()).await;
    assert!(manager.begin_edit("3"));
    manager.update_form(|form| form.price = "11000".into());

    let event = manager.submit_form().await.unwrap();
    assert!(matches!(event, Some(CatalogEvent::Updated { .. })));

    let monitor = manager.product("3").unwrap();
    assert_eq!(monitor.price, Decimal::from(11000));
    // Discount restored by begin_edit survives the save
    assert_eq!(monitor.discount, Some(Discount::TwentyFive));
}

#[tokio::test]
async fn test_submit_form_blocks_invalid_draft() {
    let store = seeded_store();
    let manager = ProductManager::activate(store.clone()).await;
    manager.update_form(|form| {
        form.name = "Cable".into();
        form.price = "120".into();
    });

    assert!(manager.submit_form().await.is_err());
    assert_eq!(store.calls(StoreOperation::Create), 0);
    assert_eq!(manager.form().name, "Cable");
}

#[tokio::test]
async fn test_failed_save_keeps_form_and_session() {
    let store = seeded_store();
    let manager = ProductManager::activate(store.clone()).await;
    assert!(manager.begin_edit("1"));
    manager.update_form(|form| form.name = "Mechanical Keyboard".into());
    let form_before = manager.form();

    store.set_failing(StoreOperation::Update, true);
    let event = manager.submit_form().await.unwrap();
    assert!(matches!(event, Some(CatalogEvent::SaveFailed { .. })));

    assert_eq!(manager.edit_session().id(), Some("1"));
    assert_eq!(manager.form(), form_before);
    assert_eq!(manager.product("1").unwrap().name, "Keyboard");
    assert_eq!(store.calls(StoreOperation::List), 1);
    assert!(!manager.is_busy());
}

// ========================================================================
// remove
// ========================================================================

#[tokio::test]
async fn test_remove_is_local_without_refetch() {
    let store = seeded_store();
    let manager = ProductManager::activate(store.clone()).await;
    let lists_before = store.calls(StoreOperation::List);

    let event = manager.remove("2").await;
    assert_eq!(event, Some(CatalogEvent::Deleted { id: "2".into() }));

    assert!(manager.product("2").is_none());
    assert_eq!(manager.products().len(), 2);
    assert_eq!(store.calls(StoreOperation::List), lists_before);
    assert_eq!(store.snapshot().len(), 2);
}

#[tokio::test]
async fn test_failed_remove_keeps_list() {
    let store = seeded_store();
    let manager = ProductManager::activate(store.clone()).await;
    store.set_failing(StoreOperation::Delete, true);

    let event = manager.remove("1").await;
    assert!(matches!(event, Some(CatalogEvent::DeleteFailed { ref id, .. }) if id == "1"));
    assert_eq!(manager.products().len(), 3);
    assert!(event.unwrap().notification().is_some());
}

#[tokio::test]
async fn test_remove_of_unlisted_id_is_noop() {
    let store = seeded_store();
    let manager = ProductManager::activate(store.clone()).await;

    // Present in the store but not in the local list
    store.create(&draft("Late arrival", 10)).await.unwrap();
    let event = manager.remove("4").await;
    assert_eq!(event, Some(CatalogEvent::Deleted { id: "4".into() }));
    assert_eq!(manager.products().len(), 3);
}

// ========================================================================
// begin_edit
// ========================================================================

#[tokio::test]
async fn test_begin_edit_populates_exact_values() {
    let manager = ProductManager::activate(seeded_store()).await;
    assert!(manager.begin_edit("3"));

    let form = manager.form();
    assert_eq!(form.name, "Monitor");
    assert_eq!(form.price, "12000");
    assert_eq!(form.category, "Electronics");
    assert_eq!(form.discount, "25");
    assert_eq!(form.image, "https://img.example.com/3.jpg");
    assert!(form.validate().unwrap().matches(&manager.product("3").unwrap()));
}

#[tokio::test]
async fn test_begin_edit_unknown_id_changes_nothing() {
    let manager = ProductManager::activate(seeded_store()).await;
    manager.update_form(|form| form.name = "draft".into());

    assert!(!manager.begin_edit("99"));
    assert!(!manager.edit_session().is_active());
    assert_eq!(manager.form().name, "draft");
}

// ========================================================================
// Derived view
// ========================================================================

#[tokio::test]
async fn test_view_recomputes_on_each_input() {
    let manager = ProductManager::activate(seeded_store()).await;

    manager.set_sort(SortKey::PriceAsc);
    let ids: Vec<String> = manager.view().iter().map(|p| p.id.clone()).collect();
    assert_eq!(ids, vec!["2", "1", "3"]);

    manager.set_search("MO");
    let ids: Vec<String> = manager.view().iter().map(|p| p.id.clone()).collect();
    assert_eq!(ids, vec!["2", "3"]);

    manager.remove("2").await;
    let ids: Vec<String> = manager.view().iter().map(|p| p.id.clone()).collect();
    assert_eq!(ids, vec!["3"]);

    let first = manager.view();
    let second = manager.view();
    assert!(Arc::ptr_eq(&first, &second));
}

// ========================================================================
// In-flight and teardown
// ========================================================================

#[tokio::test]
async fn test_overlapping_save_is_rejected() {
    let store = seeded_store();
    let manager = Arc::new(ProductManager::activate(store.clone()).await);

    store.hold();
    let first = tokio::spawn({
        let manager = manager.clone();
        async move { manager.submit(draft("First", 1)).await }
    });
    while store.calls(StoreOperation::Create) == 0 {
        tokio::task::yield_now().await;
    }
    assert!(manager.is_busy());

    assert!(manager.submit(draft("Second", 2)).await.is_none());
    assert!(manager.remove("1").await.is_none());
    assert_eq!(store.calls(StoreOperation::Create), 1);
    assert_eq!(store.calls(StoreOperation::Delete), 0);

    store.release();
    assert!(matches!(first.await.unwrap(), Some(CatalogEvent::Created { .. })));
    assert!(!manager.is_busy());
    assert_eq!(manager.products().len(), 4);
}

#[tokio::test]
async fn test_response_after_dispose_is_ignored() {
    let store = seeded_store();
    let manager = Arc::new(ProductManager::activate(store.clone()).await);
    let mut rx = manager.subscribe();

    store.hold();
    let pending = tokio::spawn({
        let manager = manager.clone();
        async move { manager.remove("1").await }
    });
    while store.calls(StoreOperation::Delete) == 0 {
        tokio::task::yield_now().await;
    }

    manager.dispose();
    store.release();

    assert!(pending.await.unwrap().is_none());
    // Store applied the delete, the disposed manager did not
    assert_eq!(store.snapshot().len(), 2);
    assert_eq!(manager.products().len(), 3);
    assert!(drain(&mut rx).is_empty());
}
