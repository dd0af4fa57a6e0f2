use super::LockState;
use serde::Serialize;

// ============================================================================
// TrueNAS API Types
// ============================================================================

/// Body of `POST /pool/dataset/unlock`.
#[derive(Serialize)]
pub struct UnlockRequest<'a> {
    pub id: &'a str,
    pub options: UnlockOptions<'a>,
}

#[derive(Serialize)]
pub struct UnlockOptions<'a> {
    pub key_file: bool,
    pub recursive: bool,
    pub force: bool,
    pub toggle_attachments: bool,
    pub datasets: Vec<DatasetPassphrase<'a>>,
}

#[derive(Serialize)]
pub struct DatasetPassphrase<'a> {
    pub name: &'a str,
    pub passphrase: &'a str,
}

impl<'a> UnlockRequest<'a> {
    /// Unlock exactly one dataset with a passphrase, forcing and restarting attachments.
    pub fn single(path: &'a str, passphrase: &'a str) -> Self {
        Self {
            id: path,
            options: UnlockOptions {
                key_file: false,
                recursive: false,
                force: true,
                toggle_attachments: true,
                datasets: vec![DatasetPassphrase {
                    name: path,
                    passphrase,
                }],
            },
        }
    }
}

/// Classify a `GET /pool/dataset?id=...` response body.
///
/// Only a strict boolean `locked` on the first element counts.
pub fn classify_lock_response(body: &serde_json::Value) -> LockState {
    let Some(items) = body.as_array() else {
        return LockState::Unknown("response is not a list".to_string());
    };
    let Some(first) = items.first() else {
        return LockState::Unknown("dataset not found".to_string());
    };
    match first.get("locked") {
        Some(serde_json::Value::Bool(true)) => LockState::Locked,
        Some(serde_json::Value::Bool(false)) => LockState::Unlocked,
        Some(_) => LockState::Unknown("'locked' is not a boolean".to_string()),
        None => LockState::Unknown("'locked' missing from response".to_string()),
    }
}
