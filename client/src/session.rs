//! Token persistence between CLI invocations, the localStorage analogue.

use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user_id: i32,
    pub name: String,
    pub email: String,
}

pub fn session_path() -> PathBuf {
    if let Ok(path) = std::env::var("BUGTRAIL_SESSION_FILE") {
        return PathBuf::from(path);
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".bugtrail").join("session.json")
}

/// Load the stored session, if any. Unreadable or corrupt files count as
/// no session.
pub fn load() -> Option<Session> {
    let bytes = fs::read(session_path()).ok()?;
    serde_json::from_slice(&bytes).ok()
}

pub fn save(session: &Session) -> io::Result<()> {
    let path = session_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_vec_pretty(session)?)
}

pub fn clear() -> io::Result<()> {
    match fs::remove_file(session_path()) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        result => result,
    }
}
