//! src/app/etat.rs
//!
//! État du clavier (sans vue).
//!
//! Rôle : contenir l’expression en cours, l’affichage, le dernier résultat,
//! et offrir les actions du clavier (touches, fractions, opérateurs, C, ⌫, =).
//!
//! Contrats :
//! - Aucun parsing ici : l’évaluation passe par `noyau::eval_expression`.
//! - Mémoire : après un calcul, un opérateur repart du résultat affiché.
//! - Un échec de calcul ne touche à rien d’autre que le drapeau d’erreur.

use tracing::{info, warn};

use crate::noyau::{eval_expression, CalculationResult};

/// Affichage au repos.
const AFFICHAGE_DEFAUT: &str = "0";

#[derive(Clone, Default, Debug)]
pub struct Demarche {
    pub jetons: String,
    pub expression: String,
    pub mesure: bool,
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub expression: String,

    // --- sorties ---
    pub affichage: String,
    pub dernier: Option<CalculationResult>,
    pub vient_de_calculer: bool,
    pub erreur: bool,

    // --- démarche (panneau d’explication) ---
    pub demarche: Demarche,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            expression: String::new(),
            affichage: AFFICHAGE_DEFAUT.to_string(),
            dernier: None,
            vient_de_calculer: false,
            erreur: false,
            demarche: Demarche::default(),
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }
}

impl AppCalc {
    /* ------------------------ Calcul ------------------------ */

    /// `=` : évalue l’expression courante.
    pub fn compute(&mut self) -> Option<CalculationResult> {
        match eval_expression(&self.expression) {
            Ok((r, d)) => {
                info!(
                    expression = %r.expression,
                    resultat = %r.result_feet_inches,
                    mesure = r.is_inch_mode,
                    "calcul"
                );
                self.affichage = r.result_feet_inches.clone();
                self.dernier = Some(r.clone());
                self.vient_de_calculer = true;
                self.erreur = false;
                self.demarche = Demarche {
                    jetons: d.jetons,
                    expression: d.expression,
                    mesure: d.mesure,
                };
                self.focus_entree = true;
                Some(r)
            }
            Err(e) => {
                // l’utilisateur ne voit qu’un échec générique
                warn!(expression = %self.expression, erreur = %e, "calcul sans résultat");
                self.erreur = true;
                self.focus_entree = true;
                None
            }
        }
    }

    /// Chemin voix : remplace l’expression puis calcule tout de suite.
    pub fn set_expression_and_compute(&mut self, s: &str) -> Option<CalculationResult> {
        self.expression = s.to_string();
        self.compute()
    }

    /// Expression tapée ou reçue (chaîne canonique).
    pub fn set_expression(&mut self, s: &str) {
        self.expression = s.to_string();
        self.vient_de_calculer = false;
    }

    /* ------------------------ Actions “boutons” ------------------------ */

    /// C : remise à zéro totale.
    pub fn clear(&mut self) {
        self.expression.clear();
        self.affichage = AFFICHAGE_DEFAUT.to_string();
        self.dernier = None;
        self.vient_de_calculer = false;
        self.erreur = false;
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    /// ⌫ : retire le dernier caractère.
    pub fn backspace(&mut self) {
        self.expression.pop();
        self.vient_de_calculer = false;
        self.focus_entree = true;
    }

    /// Chiffre, `.` ou marque de pied. Après un calcul : nouvelle expression.
    pub fn append_key(&mut self, touche: &str) {
        if self.vient_de_calculer {
            self.expression = touche.to_string();
            self.vient_de_calculer = false;
        } else {
            self.expression.push_str(touche);
        }
        self.focus_entree = true;
    }

    /// Pavé de fractions (`1/8"` … `7/8"`) : le `"` est retiré ; un espace
    /// est inséré après un chiffre pour former le nombre mixte `5 1/2`.
    pub fn append_fraction(&mut self, fraction: &str) {
        let valeur = fraction.replace('"', "");

        if self.vient_de_calculer && self.dernier.is_some() {
            self.expression = valeur;
            self.vient_de_calculer = false;
        } else if self.expression.ends_with(|c: char| c.is_ascii_digit()) {
            self.expression.push(' ');
            self.expression.push_str(&valeur);
        } else {
            self.expression.push_str(&valeur);
        }
        self.focus_entree = true;
    }

    /// Opérateur (`+ - * / %`). Après un calcul, MÉMOIRE : le résultat
    /// précédent devient la tête de la nouvelle expression.
    pub fn append_operator(&mut self, operateur: &str) {
        let op = format!(" {operateur} ");

        match (&self.dernier, self.vient_de_calculer) {
            (Some(r), true) => {
                let precedent = if r.is_inch_mode {
                    r.result_feet_inches.replace('"', "")
                } else {
                    r.result_feet_inches.clone()
                };
                self.expression = precedent + &op;
                self.vient_de_calculer = false;
            }
            _ => self.expression.push_str(&op),
        }
        self.focus_entree = true;
    }

    /// Texte de l’affichage principal.
    pub fn affichage_principal(&self) -> &str {
        match &self.dernier {
            Some(r) if r.is_inch_mode => &r.result_feet_inches,
            _ => &self.affichage,
        }
    }

    /// Affichage secondaire : total en pouces (mode mesure seulement).
    pub fn affichage_secondaire(&self) -> Option<&str> {
        match &self.dernier {
            Some(r) if r.is_inch_mode => Some(&r.result_total_inches),
            _ => None,
        }
    }
}
