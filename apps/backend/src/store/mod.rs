//! External session store: redis-backed snapshots, hands, and the
//! matchmaking queue.

pub mod session_store;

pub use session_store::SessionStore;
