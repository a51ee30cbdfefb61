// src/noyau/resultat.rs
//
// Enregistrement de sortie du noyau. Appartient à l’appelant : le noyau
// ne le stocke jamais. Les noms JSON suivent le contrat d’échange
// (expression, resultDecimal, resultFeetInches, resultTotalInches, isInchMode).

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub expression: String,
    pub result_decimal: f64,
    pub result_feet_inches: String,
    pub result_total_inches: String,
    pub is_inch_mode: bool,
}

/// Famille de calcul, pour la couche de persistance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalcKind {
    Length,
    Custom,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalcSubtype {
    FeetInches,
    FeetOnly,
    InchesFractions,
    Mixed,
    Decimal,
}

/// Vue “prête à stocker” d’un résultat.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Classification {
    pub kind: CalcKind,
    pub subtype: CalcSubtype,
    pub unit: &'static str,
    pub formatted: String,
}

impl CalculationResult {
    pub fn kind(&self) -> CalcKind {
        if self.is_inch_mode {
            CalcKind::Length
        } else {
            CalcKind::Custom
        }
    }

    pub fn subtype(&self) -> CalcSubtype {
        if !self.is_inch_mode {
            return CalcSubtype::Decimal;
        }
        let pied = self.expression.contains('\'');
        let pouce = self.expression.contains('"');
        if pied && pouce {
            CalcSubtype::FeetInches
        } else if pied {
            CalcSubtype::FeetOnly
        } else if pouce || self.expression.contains('/') {
            CalcSubtype::InchesFractions
        } else {
            CalcSubtype::Mixed
        }
    }

    pub fn unite(&self) -> &'static str {
        if self.is_inch_mode {
            "inches"
        } else {
            "decimal"
        }
    }

    /// Texte stocké : pieds-pouces en mode mesure, le décimal sinon.
    pub fn formatted(&self) -> String {
        if self.is_inch_mode {
            self.result_feet_inches.clone()
        } else {
            self.result_total_inches.clone()
        }
    }

    pub fn classification(&self) -> Classification {
        Classification {
            kind: self.kind(),
            subtype: self.subtype(),
            unit: self.unite(),
            formatted: self.formatted(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn res(expression: &str, mesure: bool) -> CalculationResult {
        CalculationResult {
            expression: expression.to_string(),
            result_decimal: 8.75,
            result_feet_inches: if mesure { "8 3/4\"" } else { "8.75" }.to_string(),
            result_total_inches: "8.75".to_string(),
            is_inch_mode: mesure,
        }
    }

    #[test]
    fn sous_types() {
        assert_eq!(res("3' 2\" + 1", true).subtype(), CalcSubtype::FeetInches);
        assert_eq!(res("3' 2 + 1", true).subtype(), CalcSubtype::FeetOnly);
        assert_eq!(res("5 1/2 + 3 1/4", true).subtype(), CalcSubtype::InchesFractions);
        assert_eq!(res("5 + 3.75", false).subtype(), CalcSubtype::Decimal);
    }

    #[test]
    fn classification_mesure_vs_decimal() {
        let c = res("5 1/2 + 3 1/4", true).classification();
        assert_eq!(c.kind, CalcKind::Length);
        assert_eq!(c.unit, "inches");
        assert_eq!(c.formatted, "8 3/4\"");

        let c = res("5 + 3.75", false).classification();
        assert_eq!(c.kind, CalcKind::Custom);
        assert_eq!(c.unit, "decimal");
        assert_eq!(c.formatted, "8.75");
    }

    #[test]
    fn json_noms_du_contrat() {
        let v = serde_json::to_value(res("5 1/2 + 3 1/4", true)).unwrap();
        assert_eq!(v["expression"], "5 1/2 + 3 1/4");
        assert_eq!(v["resultDecimal"], 8.75);
        assert_eq!(v["resultFeetInches"], "8 3/4\"");
        assert_eq!(v["resultTotalInches"], "8.75");
        assert_eq!(v["isInchMode"], true);

        let c = serde_json::to_value(res("3' 2 + 1", true).classification()).unwrap();
        assert_eq!(c["subtype"], "feet_only");
    }
}
