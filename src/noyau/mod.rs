//! Noyau exact de mesure (pieds / pouces / fractions)
//!
//! Organisation interne :
//! - jetons.rs    : tokenisation de l’expression canonique
//! - analyse.rs   : jetons -> Expression (adjacence nombre mixte / pieds-pouces)
//! - quantite.rs  : Quantity exacte sur le treillis des seizièmes
//! - eval.rs      : pipeline complet + repli gauche à droite
//! - format.rs    : pieds-pouces-fraction + total décimal
//! - resultat.rs  : CalculationResult + classification
//! - erreur.rs    : ErreurNoyau (jetons / analyse / division par zéro)

pub mod analyse;
pub mod erreur;
pub mod eval;
pub mod format;
pub mod jetons;
pub mod quantite;
pub mod resultat;

#[cfg(test)]
mod tests_mesures;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreur::ErreurNoyau;
pub use eval::{calculate, eval_expression, evaluate};
pub use resultat::CalculationResult;
