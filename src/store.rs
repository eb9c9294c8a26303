use std::fs;
use std::path::PathBuf;

use crate::model::User;

const STATE_DIR: &str = "cornhole_terminal";
const SESSION_FILE: &str = "session.json";

/// File-backed stand-in for browser local storage: one record, the
/// serialized signed-in user. All operations are best-effort; a missing
/// or unwritable directory simply disables persistence.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: Option<PathBuf>,
}

impl SessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }

    pub fn from_env() -> Self {
        Self { dir: state_dir() }
    }

    /// Reads the persisted user record. A record that no longer parses is
    /// deleted on the spot so the next start comes up anonymous cleanly.
    pub fn load(&self) -> Option<User> {
        let path = self.session_path()?;
        let raw = fs::read_to_string(&path).ok()?;
        match serde_json::from_str::<User>(&raw) {
            Ok(user) => Some(user),
            Err(_) => {
                let _ = fs::remove_file(&path);
                None
            }
        }
    }

    pub fn save(&self, user: &User) {
        let Some(path) = self.session_path() else {
            return;
        };
        let Some(dir) = path.parent() else {
            return;
        };
        let _ = fs::create_dir_all(dir);

        if let Ok(json) = serde_json::to_string(user) {
            let tmp = path.with_extension("json.tmp");
            if fs::write(&tmp, json).is_ok() {
                let _ = fs::rename(&tmp, &path);
            }
        }
    }

    pub fn clear(&self) {
        let Some(path) = self.session_path() else {
            return;
        };
        let _ = fs::remove_file(path);
    }

    pub fn session_path(&self) -> Option<PathBuf> {
        self.dir.as_ref().map(|dir| dir.join(SESSION_FILE))
    }
}

fn state_dir() -> Option<PathBuf> {
    if let Ok(base) = std::env::var("CORNHOLE_STATE_DIR") {
        if !base.trim().is_empty() {
            return Some(PathBuf::from(base));
        }
    }
    if let Ok(base) = std::env::var("XDG_CONFIG_HOME") {
        if !base.trim().is_empty() {
            return Some(PathBuf::from(base).join(STATE_DIR));
        }
    }
    let home = std::env::var("HOME").ok()?;
    if home.trim().is_empty() {
        return None;
    }
    Some(PathBuf::from(home).join(".config").join(STATE_DIR))
}
