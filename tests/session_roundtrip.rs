//! Flash messages crossing a redirect: set in one request, persisted with the
//! session, read in the next.

use pretty_assertions::assert_eq;
use serde_json::json;
use session_flash::{FlashMessage, FlashMiddleware, FlashRequest, Request, FLASH_KEY};
use session_store::{session_root, SessionStore};

fn serve<T>(store: &SessionStore, id: &str, handler: impl FnOnce(&mut Request) -> T) -> T {
    let session = store
        .load(id)
        .expect("load should succeed")
        .expect("session should exist");
    let mut request = Request::with_session(session);

    let result = FlashMiddleware::default().handle(&mut request, handler);

    let session = request.session().snapshot().expect("session attached");
    store.save(&session).expect("save should succeed");
    result
}

#[test]
fn message_survives_exactly_one_read_across_requests() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let store = SessionStore::open(&session_root(dir.path())).expect("store should open");
    let id = store.create().expect("session should be created").id;

    let queued = serve(&store, &id, |request| {
        let flash = request.flash().expect("flash installed");
        flash.enqueue("info", "post published").expect("enqueue")
    });
    assert_eq!(queued, 1);

    let persisted = store.load(&id).expect("load").expect("session exists");
    assert_eq!(
        persisted.get(FLASH_KEY),
        Some(&json!({ "info": ["post published"] }))
    );

    let shown = serve(&store, &id, |request| {
        request.flash().expect("flash installed").drain("info").expect("drain")
    });
    assert_eq!(shown, vec![FlashMessage::from("post published")]);

    let shown_again = serve(&store, &id, |request| {
        request.flash().expect("flash installed").drain("info").expect("drain")
    });
    assert!(shown_again.is_empty());
}

#[test]
fn records_persist_as_plain_json() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let store = SessionStore::open(&session_root(dir.path())).expect("store should open");
    let id = store.create().expect("session should be created").id;

    serve(&store, &id, |request| {
        let flash = request.flash().expect("flash installed");
        flash
            .enqueue("toast", json!({ "level": "warn", "text": "quota at 90%" }))
            .expect("enqueue");
        flash
            .enqueue_fmt("info", "%d drafts", &[json!(3)])
            .expect("enqueue");
    });

    let persisted = store.load(&id).expect("load").expect("session exists");
    assert_eq!(
        persisted.get(FLASH_KEY),
        Some(&json!({
            "toast": [{ "level": "warn", "text": "quota at 90%" }],
            "info": ["3 drafts"],
        }))
    );
}
