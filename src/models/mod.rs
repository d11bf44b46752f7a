pub mod fournisseur;
pub mod produit;
pub mod user;

pub use fournisseur::{Fournisseur, FournisseurPayload};
pub use produit::{CategorieProduit, Produit, ProduitPayload, UniteMesure};
pub use user::{LoginCredentials, RegisterData, TokenResponse, User};
