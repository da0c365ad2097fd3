use axum::extract::FromRef;
use storage::Database;

use crate::notify::Notifier;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub notifier: Notifier,
}

impl FromRef<AppState> for Database {
    fn from_ref(state: &AppState) -> Database {
        state.db.clone()
    }
}

impl FromRef<AppState> for Notifier {
    fn from_ref(state: &AppState) -> Notifier {
        state.notifier.clone()
    }
}
