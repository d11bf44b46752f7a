use serde::{Deserialize, Serialize};
use std::fmt;

/// Product categories used by the procurement backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CategorieProduit {
    MatierePremiere,
    ProduitFini,
    Emballage,
    Fourniture,
}

impl fmt::Display for CategorieProduit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::MatierePremiere => "Matière Première",
            Self::ProduitFini => "Produit Fini",
            Self::Emballage => "Emballage",
            Self::Fourniture => "Fourniture",
        };
        write!(f, "{}", label)
    }
}

/// Units of measure for stock quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UniteMesure {
    Piece,
    Kilogramme,
    Litre,
    Metre,
    MetreCarre,
    MetreCube,
    Boite,
    Carton,
}

impl fmt::Display for UniteMesure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Piece => "Pièce",
            Self::Kilogramme => "Kilogramme",
            Self::Litre => "Litre",
            Self::Metre => "Mètre",
            Self::MetreCarre => "Mètre Carré",
            Self::MetreCube => "Mètre Cube",
            Self::Boite => "Boîte",
            Self::Carton => "Carton",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Produit {
    pub id: Option<i64>,
    pub reference: String,
    pub name: String,
    pub description: String,
    pub unit_price: f64,
    pub category: CategorieProduit,
    pub reorder_point: f64,
    pub unit_of_measure: UniteMesure,
}

// Body for create and update calls
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProduitPayload {
    pub reference: String,
    pub name: String,
    pub description: String,
    pub unit_price: f64,
    pub category: CategorieProduit,
    pub reorder_point: f64,
    pub unit_of_measure: UniteMesure,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_wire_format() {
        let json = serde_json::to_string(&CategorieProduit::MatierePremiere).unwrap();
        assert_eq!(json, r#""MATIERE_PREMIERE""#);
        let parsed: CategorieProduit = serde_json::from_str(r#""PRODUIT_FINI""#).unwrap();
        assert_eq!(parsed, CategorieProduit::ProduitFini);
    }

    #[test]
    fn test_produit_deserializes_backend_payload() {
        let json = r#"{
            "id": 7,
            "reference": "MP-004",
            "name": "Fil de laine",
            "description": "Bobine 2kg",
            "unitPrice": 85.5,
            "category": "MATIERE_PREMIERE",
            "reorderPoint": 20,
            "unitOfMeasure": "KILOGRAMME"
        }"#;
        let produit: Produit = serde_json::from_str(json).unwrap();
        assert_eq!(produit.id, Some(7));
        assert_eq!(produit.category, CategorieProduit::MatierePremiere);
        assert_eq!(produit.unit_of_measure, UniteMesure::Kilogramme);
        assert!((produit.reorder_point - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_payload_serializes_camel_case() {
        let payload = ProduitPayload {
            reference: "EMB-001".to_string(),
            name: "Carton 60x40".to_string(),
            description: "Emballage standard".to_string(),
            unit_price: 3.2,
            category: CategorieProduit::Emballage,
            reorder_point: 100.0,
            unit_of_measure: UniteMesure::Carton,
        };
        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains(r#""unitPrice":3.2"#));
        assert!(json.contains(r#""reorderPoint":100.0"#));
        assert!(json.contains(r#""unitOfMeasure":"CARTON""#));
    }
}
