// src/cli.rs
//
// Ligne de commande (natif) : sans --expr, on ouvre la fenêtre ;
// avec --expr, on évalue une expression canonique et on sort.

use clap::Parser;
use serde::Serialize;
use tracing::info;

use crate::noyau::resultat::Classification;
use crate::noyau::{calculate, CalculationResult};

/// Filtre de logs par défaut (surchargé par RUST_LOG ou --log).
pub const FILTRE_DEFAUT: &str = "toise=info";

#[derive(Parser, Debug)]
#[command(
    name = "toise",
    version,
    about = "Calculatrice de chantier : pieds, pouces et fractions exactes."
)]
pub struct Options {
    /// Expression canonique à évaluer sans ouvrir la fenêtre (ex: "5 1/2 + 3 1/4").
    #[arg(short, long, allow_hyphen_values = true)]
    pub expr: Option<String>,

    /// Sortie JSON (champs du contrat CalculationResult + classification).
    #[arg(long, requires = "expr")]
    pub json: bool,

    /// Filtre tracing (ex: "toise=debug").
    #[arg(long)]
    pub log: Option<String>,
}

#[derive(Serialize)]
struct Sortie<'a> {
    #[serde(flatten)]
    resultat: &'a CalculationResult,
    classification: Classification,
}

/// Texte imprimé pour un résultat : JSON, ou `pieds-pouces  (total")`.
pub fn rendu(r: &CalculationResult, json: bool) -> String {
    if json {
        let sortie = Sortie {
            resultat: r,
            classification: r.classification(),
        };
        // struct plate, clés texte : la sérialisation ne peut pas échouer
        return serde_json::to_string_pretty(&sortie).unwrap_or_default();
    }

    if r.is_inch_mode {
        format!("{}  ({}\")", r.result_feet_inches, r.result_total_inches)
    } else {
        r.result_feet_inches.clone()
    }
}

/// Mode sans fenêtre : code de sortie 0 si résultat, 1 sinon.
/// La cause précise de l’échec part dans les logs (niveau debug).
pub fn evaluer_une(expr: &str, json: bool) -> i32 {
    match calculate(expr) {
        Some(r) => {
            info!(expression = %r.expression, "évaluation sans fenêtre");
            println!("{}", rendu(&r, json));
            0
        }
        None => {
            eprintln!("aucun résultat");
            1
        }
    }
}
