// Root module for API clients
pub mod backend_client;
pub mod error_handling;
pub mod fournisseur_client;
pub mod produit_client;

// Re-export API client components
pub use backend_client::*;
pub use error_handling::*;
pub use fournisseur_client::*;
pub use produit_client::*;
