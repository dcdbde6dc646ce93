use std::sync::Arc;

use crate::auth::TokenService;
use crate::store::{TaskStore, UserStore};

/// Shared application state, handed to every worker and to the handlers via
/// `web::Data<AppState>`.
///
/// The store handles and the token service are injected here at startup (or
/// by a test harness) instead of living as process globals, so handlers stay
/// testable against the in-memory stores.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub tasks: Arc<dyn TaskStore>,
    pub tokens: TokenService,
    /// bcrypt work factor used when hashing sign-up passwords.
    pub bcrypt_cost: u32,
}
