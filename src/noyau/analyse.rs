// src/noyau/analyse.rs
//
// Jetons -> Expression (opérandes + opérateurs, gauche à droite).
//
// Règles d’adjacence (seules exceptions à « un opérateur entre deux opérandes ») :
// - nombre mixte : Num suivi d’une Frac  -> `5 1/2` est UNE opérande
// - pieds + pouces : Num' suivi d’un Num et/ou d’une Frac -> `3' 2 1/2` est UNE opérande
//
// Aucune précédence : `*` et `/` ne passent pas avant `+`/`-`.
// C’est l’évaluateur qui replie la suite dans l’ordre, comme un clavier
// de calculatrice non scientifique.

use std::fmt;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};

use super::erreur::ErreurNoyau;
use super::jetons::{Op, Tok};

/// Une mesure : pieds, pouces entiers, fraction (magnitudes) + signe global.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Operande {
    pub negatif: bool,
    pub pieds: Option<BigRational>,
    pub pouces: Option<BigRational>,
    pub fraction: Option<BigRational>,
    /// `50 %` : opérande divisée par 100 avant d’être combinée.
    pub pourcent: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operateur {
    Add,
    Sub,
    Mul,
    Div,
    /// `a % b` : a * (b / 100).
    Pourcent,
}

/// Opérande de tête + suite (opérateur, opérande). Jamais d’opérande pendante.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expression {
    pub tete: Operande,
    pub suite: Vec<(Operateur, Operande)>,
}

struct Analyseur<'a> {
    tokens: &'a [Tok],
    pos: usize,
}

impl<'a> Analyseur<'a> {
    fn peek(&self) -> Option<&'a Tok> {
        self.tokens.get(self.pos)
    }

    fn peek_suivant(&self) -> Option<&'a Tok> {
        self.tokens.get(self.pos + 1)
    }

    fn avance(&mut self) {
        self.pos += 1;
    }

    fn saute_pouce(&mut self) {
        if matches!(self.peek(), Some(Tok::Pouce)) {
            self.avance();
        }
    }

    /// Frac optionnelle (toujours positive ici : un `-` après une opérande est binaire).
    fn fraction_optionnelle(&mut self) -> Option<BigRational> {
        if let Some(Tok::Frac { numer, denom }) = self.peek() {
            self.avance();
            return Some(BigRational::new(numer.abs(), denom.clone()));
        }
        None
    }

    fn operande(&mut self) -> Result<Operande, ErreurNoyau> {
        let debut = self.pos;
        let mut o = Operande::default();

        match self.peek() {
            None => {
                return Err(ErreurNoyau::analyse(debut, "opérateur sans opérande à droite"));
            }
            Some(Tok::Op(_) | Tok::Percent) => {
                let msg = if debut == 0 {
                    "expression commençant par un opérateur"
                } else {
                    "deux opérateurs consécutifs"
                };
                return Err(ErreurNoyau::analyse(debut, msg));
            }
            Some(Tok::Pied | Tok::Pouce) => {
                return Err(ErreurNoyau::analyse(debut, "marque d’unité sans nombre"));
            }

            Some(Tok::Num(v)) => {
                self.avance();
                o.negatif = v.is_negative();
                let mag = v.abs();

                if matches!(self.peek(), Some(Tok::Pied)) {
                    self.avance();
                    o.pieds = Some(mag);

                    // continuation en pouces : `3' 2`, `3' 2 1/2`, `3' 1/2`
                    if let Some(Tok::Num(w)) = self.peek() {
                        self.avance();
                        o.pouces = Some(w.abs());
                    }
                    o.fraction = self.fraction_optionnelle();
                } else {
                    o.pouces = Some(mag);
                    o.fraction = self.fraction_optionnelle();
                }
                self.saute_pouce();
            }

            Some(Tok::Frac { numer, denom }) => {
                self.avance();
                o.negatif = numer.is_negative();
                o.fraction = Some(BigRational::new(numer.abs(), denom.clone()));
                self.saute_pouce();
            }
        }

        // `%` postfixé : suivi d’un opérateur ou de la fin
        if matches!(self.peek(), Some(Tok::Percent))
            && matches!(self.peek_suivant(), None | Some(Tok::Op(_)))
        {
            self.avance();
            o.pourcent = true;
        }

        if matches!(self.peek(), Some(Tok::Num(_) | Tok::Frac { .. })) {
            return Err(ErreurNoyau::analyse(
                self.pos,
                "deux opérandes sans opérateur",
            ));
        }

        Ok(o)
    }

    fn operateur(&mut self) -> Result<Operateur, ErreurNoyau> {
        let op = match self.peek() {
            Some(Tok::Op(Op::Plus)) => Operateur::Add,
            Some(Tok::Op(Op::Minus)) => Operateur::Sub,
            Some(Tok::Op(Op::Star)) => Operateur::Mul,
            Some(Tok::Op(Op::Slash)) => Operateur::Div,
            Some(Tok::Percent) => Operateur::Pourcent,
            _ => return Err(ErreurNoyau::analyse(self.pos, "opérateur attendu")),
        };
        self.avance();
        Ok(op)
    }
}

/// Construit l’Expression à partir des jetons.
pub fn analyser(tokens: &[Tok]) -> Result<Expression, ErreurNoyau> {
    if tokens.is_empty() {
        return Err(ErreurNoyau::analyse(0, "entrée vide"));
    }

    let mut a = Analyseur { tokens, pos: 0 };
    let tete = a.operande()?;

    let mut suite = Vec::new();
    while a.peek().is_some() {
        let op = a.operateur()?;
        let rhs = a.operande()?;
        suite.push((op, rhs));
    }

    Ok(Expression { tete, suite })
}

/* ------------------------ Affichage (démarche / logs) ------------------------ */

fn format_rat(r: &BigRational) -> String {
    if r.denom() == &BigInt::from(1) {
        format!("{}", r.numer())
    } else {
        format!("{}/{}", r.numer(), r.denom())
    }
}

impl fmt::Display for Operande {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if let Some(p) = &self.pieds {
            parts.push(format!("{}'", format_rat(p)));
        }
        if let Some(p) = &self.pouces {
            parts.push(format_rat(p));
        }
        if let Some(fr) = &self.fraction {
            if !fr.is_zero() || parts.is_empty() {
                parts.push(format_rat(fr));
            }
        }
        let signe = if self.negatif { "-" } else { "" };
        let pct = if self.pourcent { " %" } else { "" };
        write!(f, "[{signe}{}{pct}]", parts.join(" "))
    }
}

impl fmt::Display for Operateur {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Operateur::Add => "+",
            Operateur::Sub => "-",
            Operateur::Mul => "*",
            Operateur::Div => "/",
            Operateur::Pourcent => "%",
        };
        write!(f, "{s}")
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tete)?;
        for (op, o) in &self.suite {
            write!(f, " {op} {o}")?;
        }
        Ok(())
    }
}
