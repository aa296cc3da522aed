//! Session store: token and a handful of session fields.
//! Populated at login, cleared at logout and whenever the backend answers 401.

use crate::error::ApiError;
use rusqlite::{params, Connection};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionKey {
    Token,
    UserId,
    Role,
    CompanyId,
    MenuState,
}

impl SessionKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionKey::Token => "token",
            SessionKey::UserId => "user_id",
            SessionKey::Role => "role",
            SessionKey::CompanyId => "company_id",
            SessionKey::MenuState => "menu_state",
        }
    }
}

/// Key/value capability injected into the API client.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: SessionKey) -> Result<Option<String>, ApiError>;
    fn set(&self, key: SessionKey, value: &str) -> Result<(), ApiError>;
    fn remove(&self, key: SessionKey) -> Result<(), ApiError>;
    fn clear(&self) -> Result<(), ApiError>;
}

/// Process-local store; the default for tests and short-lived tools.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    values: Mutex<HashMap<SessionKey, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<SessionKey, String>>, ApiError> {
        self.values
            .lock()
            .map_err(|_| ApiError::Storage("session lock poisoned".to_string()))
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: SessionKey) -> Result<Option<String>, ApiError> {
        Ok(self.lock()?.get(&key).cloned())
    }

    fn set(&self, key: SessionKey, value: &str) -> Result<(), ApiError> {
        self.lock()?.insert(key, value.to_string());
        Ok(())
    }

    fn remove(&self, key: SessionKey) -> Result<(), ApiError> {
        self.lock()?.remove(&key);
        Ok(())
    }

    fn clear(&self) -> Result<(), ApiError> {
        self.lock()?.clear();
        Ok(())
    }
}

/// SQLite-backed store that survives restarts.
pub struct SqliteSessionStore {
    conn: Mutex<Connection>,
}

fn storage_err(e: impl std::fmt::Display) -> ApiError {
    ApiError::Storage(e.to_string())
}

impl SqliteSessionStore {
    /// Open (or create) `session.db` inside `dir`.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, ApiError> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir).map_err(storage_err)?;
        let db_path = dir.join("session.db");
        debug!(path = ?db_path, "opening session store");
        let conn = Connection::open(&db_path).map_err(storage_err)?;
        conn.execute_batch("CREATE TABLE IF NOT EXISTS session (key TEXT PRIMARY KEY, value TEXT NOT NULL);")
            .map_err(storage_err)?;
        Ok(SqliteSessionStore {
            conn: Mutex::new(conn),
        })
    }

    fn with_conn<F, T>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&Connection) -> Result<T, rusqlite::Error>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|_| ApiError::Storage("session lock poisoned".to_string()))?;
        f(&conn).map_err(storage_err)
    }
}

impl SessionStore for SqliteSessionStore {
    fn get(&self, key: SessionKey) -> Result<Option<String>, ApiError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT value FROM session WHERE key = ?1")?;
            let mut rows = stmt.query(params![key.as_str()])?;
            if let Some(row) = rows.next()? {
                return Ok(Some(row.get(0)?));
            }
            Ok(None)
        })
    }

    fn set(&self, key: SessionKey, value: &str) -> Result<(), ApiError> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO session (key, value) VALUES (?1, ?2) ON CONFLICT(key) DO UPDATE SET value = ?2",
                params![key.as_str(), value],
            )?;
            Ok(())
        })
    }

    fn remove(&self, key: SessionKey) -> Result<(), ApiError> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM session WHERE key = ?1", params![key.as_str()])?;
            Ok(())
        })
    }

    fn clear(&self) -> Result<(), ApiError> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM session", [])?;
            Ok(())
        })
    }
}

/// Fields written at login.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user_id: Option<String>,
    pub role: Option<String>,
    pub company_id: Option<String>,
}

impl Session {
    pub fn persist(&self, store: &dyn SessionStore) -> Result<(), ApiError> {
        store.set(SessionKey::Token, &self.token)?;
        let optional = [
            (SessionKey::UserId, &self.user_id),
            (SessionKey::Role, &self.role),
            (SessionKey::CompanyId, &self.company_id),
        ];
        for (key, value) in optional {
            match value {
                Some(v) => store.set(key, v)?,
                None => store.remove(key)?,
            }
        }
        Ok(())
    }

    /// `None` when no token is stored.
    pub fn load(store: &dyn SessionStore) -> Result<Option<Session>, ApiError> {
        let Some(token) = store.get(SessionKey::Token)? else {
            return Ok(None);
        };
        Ok(Some(Session {
            token,
            user_id: store.get(SessionKey::UserId)?,
            role: store.get(SessionKey::Role)?,
            company_id: store.get(SessionKey::CompanyId)?,
        }))
    }
}
