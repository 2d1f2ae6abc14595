use nyumba_core::db::{open_db, open_db_in_memory};
use nyumba_core::{
    MessageStore, SqliteMessageStore, StableMap, StoreError, MAX_KEY_BYTES, MAX_VALUE_BYTES,
};
use rusqlite::Connection;

#[test]
fn values_enumerate_in_ascending_key_order() {
    let conn = open_db_in_memory().unwrap();
    let map = StableMap::try_new(&conn).unwrap();

    map.insert("charlie", b"3").unwrap();
    map.insert("alpha", b"1").unwrap();
    map.insert("bravo", b"2").unwrap();

    let values = map.values().unwrap();
    assert_eq!(values, vec![b"1".to_vec(), b"2".to_vec(), b"3".to_vec()]);
}

#[test]
fn insert_overwrites_existing_key() {
    let conn = open_db_in_memory().unwrap();
    let map = StableMap::try_new(&conn).unwrap();

    map.insert("key", b"first").unwrap();
    map.insert("key", b"second").unwrap();

    assert_eq!(map.get("key").unwrap(), Some(b"second".to_vec()));
    assert_eq!(map.len().unwrap(), 1);
}

#[test]
fn remove_returns_prior_value_then_absence() {
    let conn = open_db_in_memory().unwrap();
    let map = StableMap::try_new(&conn).unwrap();

    map.insert("key", b"value").unwrap();

    assert_eq!(map.remove("key").unwrap(), Some(b"value".to_vec()));
    assert_eq!(map.remove("key").unwrap(), None);
    assert!(!map.contains_key("key").unwrap());
}

#[test]
fn get_missing_key_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let map = StableMap::try_new(&conn).unwrap();

    assert_eq!(map.get("absent").unwrap(), None);
    assert!(map.is_empty().unwrap());
}

#[test]
fn oversized_key_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let map = StableMap::try_new(&conn).unwrap();

    let key = "k".repeat(MAX_KEY_BYTES + 1);
    let err = map.insert(&key, b"value").unwrap_err();
    assert!(matches!(err, StoreError::KeyTooLarge { len } if len == MAX_KEY_BYTES + 1));

    let boundary_key = "k".repeat(MAX_KEY_BYTES);
    map.insert(&boundary_key, b"value").unwrap();
}

#[test]
fn oversized_value_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let map = StableMap::try_new(&conn).unwrap();

    let value = vec![0u8; MAX_VALUE_BYTES + 1];
    let err = map.insert("key", &value).unwrap_err();
    assert!(matches!(err, StoreError::ValueTooLarge { len } if len == MAX_VALUE_BYTES + 1));

    let boundary_value = vec![0u8; MAX_VALUE_BYTES];
    map.insert("key", &boundary_value).unwrap();
}

#[test]
fn entries_persist_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("map.db");

    {
        let conn = open_db(&path).unwrap();
        let map = StableMap::try_new(&conn).unwrap();
        map.insert("durable", b"payload").unwrap();
    }

    let conn = open_db(&path).unwrap();
    let map = StableMap::try_new(&conn).unwrap();
    assert_eq!(map.get("durable").unwrap(), Some(b"payload".to_vec()));
}

#[test]
fn corrupt_envelope_surfaces_as_invalid_data_not_panic() {
    let conn = open_db_in_memory().unwrap();
    let map = StableMap::try_new(&conn).unwrap();
    map.insert("bad", b"not json").unwrap();

    let store = SqliteMessageStore::try_new(&conn).unwrap();

    let get_err = store.get("bad").unwrap_err();
    assert!(matches!(get_err, StoreError::InvalidData(_)));

    let list_err = store.list().unwrap_err();
    assert!(matches!(list_err, StoreError::InvalidData(_)));
}

#[test]
fn rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match StableMap::try_new(&conn) {
        Err(StoreError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn rejects_connection_without_required_messages_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!(
        "PRAGMA user_version = {};",
        nyumba_core::db::migrations::latest_version()
    ))
    .unwrap();

    let result = StableMap::try_new(&conn);
    assert!(matches!(
        result,
        Err(StoreError::MissingRequiredTable("messages"))
    ));
}

#[test]
fn rejects_connection_missing_required_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch("CREATE TABLE messages (key TEXT NOT NULL PRIMARY KEY);")
        .unwrap();
    conn.execute_batch(&format!(
        "PRAGMA user_version = {};",
        nyumba_core::db::migrations::latest_version()
    ))
    .unwrap();

    let result = StableMap::try_new(&conn);
    assert!(matches!(
        result,
        Err(StoreError::MissingRequiredColumn {
            table: "messages",
            column: "value"
        })
    ));
}
