use linkpack_core::model::group::{GroupValidationError, LinkGroup};
use linkpack_core::service::group_service::{GroupDraft, GroupService, LinkDraft};
use linkpack_core::store::document::{DocumentStore, SnapshotFn, SubscriptionId};
use linkpack_core::store::{
    GroupStore, SqliteDocumentStore, StoreError, StoreResult, GROUPS_COLLECTION,
};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::rc::Rc;
use uuid::Uuid;

fn service() -> GroupService<SqliteDocumentStore> {
    GroupService::new(SqliteDocumentStore::open_in_memory().unwrap())
}

fn draft(title: &str, urls: &[&str]) -> GroupDraft {
    GroupDraft {
        title: title.to_string(),
        links: urls
            .iter()
            .map(|url| LinkDraft {
                url: url.to_string(),
                description: String::new(),
            })
            .collect(),
        tags: Vec::new(),
        is_favorite: false,
    }
}

fn subscribe_latest(
    service: &mut GroupService<SqliteDocumentStore>,
) -> Rc<RefCell<Vec<LinkGroup>>> {
    let latest: Rc<RefCell<Vec<LinkGroup>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&latest);
    service
        .subscribe(move |groups| *sink.borrow_mut() = groups)
        .unwrap();
    latest
}

#[test]
fn create_group_validates_title_and_links() {
    let mut service = service();

    let err = service.create_group(draft("  ", &["https://example.com"]));
    assert_eq!(err.unwrap_err(), GroupValidationError::EmptyTitle);

    let err = service.create_group(draft("No links", &["", "   "]));
    assert_eq!(err.unwrap_err(), GroupValidationError::NoUsableLinks);
}

#[test]
fn create_group_drops_blank_link_rows_and_stamps_creation_time() {
    let mut service = service();
    let latest = subscribe_latest(&mut service);

    let id = service
        .create_group(draft("Mixed rows", &["https://example.com/a.pdf", "  "]))
        .unwrap()
        .expect("persistence should succeed");

    let groups = latest.borrow();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].id.to_string(), id, "store id is authoritative");
    assert_eq!(groups[0].links.len(), 1);
    assert!(groups[0].created_at > 0);
}

#[test]
fn create_group_deduplicates_tags_case_sensitively() {
    let mut service = service();
    let latest = subscribe_latest(&mut service);

    let mut input = draft("Tagged", &["https://example.com"]);
    input.tags = vec!["Work".to_string(), "work".to_string(), "Work".to_string()];
    service.create_group(input).unwrap();

    assert_eq!(
        latest.borrow()[0].tags,
        vec!["Work".to_string(), "work".to_string()]
    );
}

#[test]
fn update_group_is_full_replacement() {
    let mut service = service();
    let latest = subscribe_latest(&mut service);

    let mut input = draft("Before", &["https://example.com/a.pdf"]);
    input.tags = vec!["keep".to_string()];
    service.create_group(input).unwrap();

    let mut edited = latest.borrow()[0].clone();
    edited.title = "After".to_string();
    edited.tags.clear();
    assert!(service.update_group(&edited).unwrap());

    let groups = latest.borrow();
    assert_eq!(groups[0].title, "After");
    assert!(groups[0].tags.is_empty(), "replacement, not a patch");
}

#[test]
fn update_group_still_validates_edited_input() {
    let mut service = service();
    let latest = subscribe_latest(&mut service);
    service
        .create_group(draft("Valid", &["https://example.com"]))
        .unwrap();

    let mut edited = latest.borrow()[0].clone();
    edited.title = String::new();
    assert_eq!(
        service.update_group(&edited).unwrap_err(),
        GroupValidationError::EmptyTitle
    );
}

#[test]
fn toggle_favorite_round_trips_through_store() {
    let mut service = service();
    let latest = subscribe_latest(&mut service);
    service
        .create_group(draft("Fav target", &["https://example.com"]))
        .unwrap();

    let group = latest.borrow()[0].clone();
    assert!(service.toggle_favorite(&group));
    assert!(latest.borrow()[0].is_favorite);

    let group = latest.borrow()[0].clone();
    assert!(service.toggle_favorite(&group));
    assert!(!latest.borrow()[0].is_favorite);
}

#[test]
fn delete_group_removes_record_from_snapshot() {
    let mut service = service();
    let latest = subscribe_latest(&mut service);
    service
        .create_group(draft("Doomed", &["https://example.com"]))
        .unwrap();

    let id = latest.borrow()[0].id;
    assert!(service.delete_group(&id));
    assert!(latest.borrow().is_empty());
}

#[test]
fn link_urls_are_stored_verbatim() {
    let mut service = service();
    let latest = subscribe_latest(&mut service);

    service
        .create_group(draft("Raw", &[" https://example.com/a.pdf "]))
        .unwrap();
    assert_eq!(latest.borrow()[0].links[0].url, " https://example.com/a.pdf ");
}

#[test]
fn undecodable_records_are_skipped_never_fatal() {
    let mut groups = GroupStore::new(SqliteDocumentStore::open_in_memory().unwrap());
    let valid = draft("Valid", &["https://example.com"])
        .into_group(100)
        .unwrap();
    groups.create_group(&valid).unwrap();
    // A bare body with no title/links cannot decode into a group.
    groups
        .store_mut()
        .create(GROUPS_COLLECTION, &json!({"createdAt": 200}))
        .unwrap();

    let latest: Rc<RefCell<Vec<LinkGroup>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&latest);
    groups
        .subscribe(move |snapshot| *sink.borrow_mut() = snapshot)
        .unwrap();

    let snapshot = latest.borrow();
    assert_eq!(snapshot.len(), 1, "bad record is skipped, rest survive");
    assert_eq!(snapshot[0].title, "Valid");
}

/// Store double whose every write fails, for exercising the swallow policy.
struct FailingStore;

impl FailingStore {
    fn refusal(collection: &str) -> StoreError {
        StoreError::InvalidData(format!("write refused for {collection}"))
    }
}

impl DocumentStore for FailingStore {
    fn create(&mut self, collection: &str, _body: &Value) -> StoreResult<String> {
        Err(Self::refusal(collection))
    }

    fn replace(&mut self, collection: &str, _id: &str, _body: &Value) -> StoreResult<()> {
        Err(Self::refusal(collection))
    }

    fn delete(&mut self, collection: &str, _id: &str) -> StoreResult<()> {
        Err(Self::refusal(collection))
    }

    fn subscribe(
        &mut self,
        collection: &str,
        _ordering_field: &str,
        _callback: SnapshotFn,
    ) -> StoreResult<SubscriptionId> {
        Err(Self::refusal(collection))
    }

    fn unsubscribe(&mut self, _subscription_id: SubscriptionId) {}
}

#[test]
fn create_failures_are_swallowed_not_propagated() {
    let mut service = GroupService::new(FailingStore);

    let created = service
        .create_group(draft("Unpersisted", &["https://example.com"]))
        .expect("a valid draft never surfaces a store failure");
    assert_eq!(created, None);
}

#[test]
fn store_failures_are_swallowed_not_propagated() {
    let mut service = service();

    // Unknown ids surface as a logged no-op, never as an error.
    assert!(!service.delete_group(&Uuid::new_v4()));

    let phantom = draft("Phantom", &["https://example.com"])
        .into_group(123)
        .unwrap();
    assert!(!service.update_group(&phantom).unwrap());
    assert!(!service.toggle_favorite(&phantom));
}

#[test]
fn unsubscribe_stops_snapshot_deliveries() {
    let mut service = service();

    let deliveries: Rc<RefCell<usize>> = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&deliveries);
    let subscription = service.subscribe(move |_| *sink.borrow_mut() += 1).unwrap();
    assert_eq!(*deliveries.borrow(), 1);

    service.unsubscribe(subscription);
    service
        .create_group(draft("After", &["https://example.com"]))
        .unwrap();
    assert_eq!(*deliveries.borrow(), 1);
}
