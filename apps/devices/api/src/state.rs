//! Shared application state, cloned into the routers that need it.

/// Cloning is cheap: the connection is a pool handle.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// PostgreSQL connection pool
    pub db: database::postgres::DatabaseConnection,
}
