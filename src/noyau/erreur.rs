// src/noyau/erreur.rs
//
// Taxonomie d’erreurs du noyau : jetons, analyse, division par zéro.
// Les trois sont récupérées localement (calculate() -> None) ; le détail
// ne sert qu’au diagnostic (logs, CLI, tests).

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErreurNoyau {
    /// Caractère inconnu ou fraction mal formée.
    #[error("jetons (position {position}) : {message}")]
    Jetons { position: usize, message: String },

    /// Suite opérande/opérateur invalide, entrée vide, opérateur pendant.
    #[error("analyse (jeton {position}) : {message}")]
    Analyse { position: usize, message: String },

    #[error("division par zéro")]
    DivisionParZero,
}

impl ErreurNoyau {
    pub fn jetons(position: usize, message: impl Into<String>) -> Self {
        ErreurNoyau::Jetons {
            position,
            message: message.into(),
        }
    }

    pub fn analyse(position: usize, message: impl Into<String>) -> Self {
        ErreurNoyau::Analyse {
            position,
            message: message.into(),
        }
    }
}
