pub mod guard;
pub mod keyring_storage;
pub mod session;
pub mod storage;
pub mod token_introspection;
pub mod token_manager;

pub use guard::{RouteAccess, check_route};
pub use keyring_storage::KeyringStorage;
pub use session::{Navigator, NoopNavigator, SessionService};
pub use storage::{MemoryStorage, TokenStorage};
pub use token_manager::TokenManager;
