//! SQLite session store: persistence across reopen, clear on logout.

use backoffice_core::{Session, SessionKey, SessionStore, SqliteSessionStore};

#[test]
fn session_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    {
        let store = SqliteSessionStore::open(dir.path()).unwrap();
        Session {
            token: "tok".to_string(),
            user_id: Some("1".to_string()),
            role: None,
            company_id: Some("2".to_string()),
        }
        .persist(&store)
        .unwrap();
        store.set(SessionKey::MenuState, "open").unwrap();
    }
    let store = SqliteSessionStore::open(dir.path()).unwrap();
    let session = Session::load(&store).unwrap().unwrap();
    assert_eq!(session.token, "tok");
    assert_eq!(session.company_id.as_deref(), Some("2"));
    assert_eq!(session.role, None);
    assert_eq!(store.get(SessionKey::MenuState).unwrap().as_deref(), Some("open"));
}

#[test]
fn set_overwrites_and_clear_empties() {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteSessionStore::open(dir.path().join("nested")).unwrap();
    store.set(SessionKey::Token, "a").unwrap();
    store.set(SessionKey::Token, "b").unwrap();
    assert_eq!(store.get(SessionKey::Token).unwrap().as_deref(), Some("b"));

    store.remove(SessionKey::Token).unwrap();
    assert_eq!(store.get(SessionKey::Token).unwrap(), None);

    store.set(SessionKey::Role, "ADMIN").unwrap();
    store.clear().unwrap();
    assert!(Session::load(&store).unwrap().is_none());
    assert_eq!(store.get(SessionKey::Role).unwrap(), None);
}
