use linkpack_core::store::document::{DocumentRecord, DocumentStore};
use linkpack_core::store::{SqliteDocumentStore, StoreError};
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn create_generates_distinct_ids_and_persists_bodies() {
    let mut store = SqliteDocumentStore::open_in_memory().unwrap();

    let first = store
        .create("linkGroups", &json!({"title": "a", "createdAt": 100}))
        .unwrap();
    let second = store
        .create("linkGroups", &json!({"title": "b", "createdAt": 200}))
        .unwrap();
    assert_ne!(first, second);

    let body = store.get("linkGroups", &first).unwrap().unwrap();
    assert_eq!(body["title"], "a");
}

#[test]
fn replace_overwrites_full_body_and_reports_missing_records() {
    let mut store = SqliteDocumentStore::open_in_memory().unwrap();
    let id = store
        .create("linkGroups", &json!({"title": "before", "createdAt": 100}))
        .unwrap();

    store
        .replace("linkGroups", &id, &json!({"title": "after", "createdAt": 100}))
        .unwrap();
    let body = store.get("linkGroups", &id).unwrap().unwrap();
    assert_eq!(body["title"], "after");
    assert!(body.get("tags").is_none(), "replacement is full, not a patch");

    let err = store
        .replace("linkGroups", "missing", &json!({}))
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
}

#[test]
fn delete_removes_record_and_reports_missing_records() {
    let mut store = SqliteDocumentStore::open_in_memory().unwrap();
    let id = store
        .create("linkGroups", &json!({"createdAt": 100}))
        .unwrap();

    store.delete("linkGroups", &id).unwrap();
    assert!(store.get("linkGroups", &id).unwrap().is_none());

    let err = store.delete("linkGroups", &id).unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
}

#[test]
fn snapshot_orders_descending_by_ordering_field() {
    let mut store = SqliteDocumentStore::open_in_memory().unwrap();
    store
        .create("linkGroups", &json!({"title": "old", "createdAt": 100}))
        .unwrap();
    store
        .create("linkGroups", &json!({"title": "new", "createdAt": 300}))
        .unwrap();
    store
        .create("linkGroups", &json!({"title": "mid", "createdAt": 200}))
        .unwrap();

    let snapshot = store.snapshot("linkGroups", "createdAt").unwrap();
    let titles: Vec<&str> = snapshot
        .iter()
        .map(|record| record.body["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["new", "mid", "old"]);
}

#[test]
fn subscribe_delivers_initial_snapshot_then_every_change() {
    let mut store = SqliteDocumentStore::open_in_memory().unwrap();
    store
        .create("linkGroups", &json!({"title": "seed", "createdAt": 100}))
        .unwrap();

    let deliveries: Rc<RefCell<Vec<Vec<DocumentRecord>>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&deliveries);
    store
        .subscribe(
            "linkGroups",
            "createdAt",
            Box::new(move |records| sink.borrow_mut().push(records.to_vec())),
        )
        .unwrap();

    // Initial delivery fires on registration.
    assert_eq!(deliveries.borrow().len(), 1);
    assert_eq!(deliveries.borrow()[0].len(), 1);

    let id = store
        .create("linkGroups", &json!({"title": "second", "createdAt": 200}))
        .unwrap();
    assert_eq!(deliveries.borrow().len(), 2);
    assert_eq!(deliveries.borrow()[1].len(), 2);
    assert_eq!(deliveries.borrow()[1][0].body["title"], "second");

    store.delete("linkGroups", &id).unwrap();
    assert_eq!(deliveries.borrow().len(), 3);
    assert_eq!(deliveries.borrow()[2].len(), 1);
}

#[test]
fn subscribers_only_see_their_own_collection() {
    let mut store = SqliteDocumentStore::open_in_memory().unwrap();

    let deliveries: Rc<RefCell<Vec<usize>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&deliveries);
    store
        .subscribe(
            "linkGroups",
            "createdAt",
            Box::new(move |records| sink.borrow_mut().push(records.len())),
        )
        .unwrap();
    assert_eq!(deliveries.borrow().len(), 1);

    store
        .create("other", &json!({"createdAt": 100}))
        .unwrap();
    assert_eq!(
        deliveries.borrow().len(),
        1,
        "mutation in another collection must not notify"
    );
}

#[test]
fn unsubscribe_stops_deliveries() {
    let mut store = SqliteDocumentStore::open_in_memory().unwrap();

    let deliveries: Rc<RefCell<Vec<usize>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&deliveries);
    let subscription = store
        .subscribe(
            "linkGroups",
            "createdAt",
            Box::new(move |records| sink.borrow_mut().push(records.len())),
        )
        .unwrap();

    store.unsubscribe(subscription);
    store
        .create("linkGroups", &json!({"createdAt": 100}))
        .unwrap();
    assert_eq!(deliveries.borrow().len(), 1, "only the initial delivery");
}
