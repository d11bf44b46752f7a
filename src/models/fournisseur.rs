use serde::{Deserialize, Serialize};

// Supplier model. `ice` is the Moroccan company identifier
// (Identifiant Commun de l'Entreprise).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fournisseur {
    pub id: Option<i64>,
    pub raison_sociale: String,
    pub address: String,
    pub city: String,
    pub ice: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
}

// Body for create and update calls
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FournisseurPayload {
    pub raison_sociale: String,
    pub address: String,
    pub city: String,
    pub ice: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fournisseur_round_trips_camel_case() {
        let json = r#"{
            "id": 2,
            "raisonSociale": "Textile Atlas SARL",
            "address": "12 Rue des Tisserands",
            "city": "Casablanca",
            "ice": "001234567000089",
            "contactPerson": "M. Bennis",
            "email": "contact@textileatlas.ma",
            "phone": "+212 5 22 00 00 00"
        }"#;
        let fournisseur: Fournisseur = serde_json::from_str(json).unwrap();
        assert_eq!(fournisseur.raison_sociale, "Textile Atlas SARL");
        assert_eq!(fournisseur.contact_person, "M. Bennis");

        let back = serde_json::to_string(&fournisseur).unwrap();
        assert!(back.contains(r#""raisonSociale":"Textile Atlas SARL""#));
        assert!(back.contains(r#""contactPerson":"M. Bennis""#));
    }
}
