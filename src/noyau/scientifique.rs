// src/noyau/scientifique.rs
//
// Fonctions scientifiques "directes" : appliquées à l’opérande courant (le tampon
// lu comme UN nombre), sans passer par l’évaluateur général.
//
// - sin/cos/tan : argument en DEGRÉS
// - log : base 10 ; ln : népérien
// - PI / E : ignorent l’opérande

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::erreur::{fini, Resultat};
use super::eval::factorielle;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FonctionSci {
    Sin,
    Cos,
    Tan,
    Log,
    Ln,
    Carre,
    Cube,
    Racine,
    Factorielle,
    Pi,
    E,
}

impl FonctionSci {
    /// Toutes les fonctions, dans l’ordre du pavé.
    pub const TOUTES: [FonctionSci; 11] = [
        FonctionSci::Sin,
        FonctionSci::Cos,
        FonctionSci::Tan,
        FonctionSci::Log,
        FonctionSci::Ln,
        FonctionSci::Carre,
        FonctionSci::Cube,
        FonctionSci::Racine,
        FonctionSci::Factorielle,
        FonctionSci::Pi,
        FonctionSci::E,
    ];

    /// Vrai si la fonction a besoin d’un opérande (PI et E n’en ont pas).
    pub fn prend_operande(self) -> bool {
        !matches!(self, FonctionSci::Pi | FonctionSci::E)
    }

    /// Applique la fonction à `x`.
    /// Un résultat NaN/∞ (log(0), √-1...) est une erreur, comme dans l’évaluateur.
    pub fn appliquer(self, x: f64) -> Resultat<f64> {
        use FonctionSci::*;

        let radians = |deg: f64| deg * std::f64::consts::PI / 180.0;

        let v = match self {
            Sin => radians(x).sin(),
            Cos => radians(x).cos(),
            Tan => radians(x).tan(),
            Log => x.log10(),
            Ln => x.ln(),
            Carre => x * x,
            Cube => x * x * x,
            Racine => x.sqrt(),
            Factorielle => factorielle(x)?,
            Pi => std::f64::consts::PI,
            E => std::f64::consts::E,
        };

        fini(v)
    }
}

/// Étiquette de touche inconnue.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("fonction inconnue: '{0}'")]
pub struct EtiquetteInconnue(pub String);

impl FromStr for FonctionSci {
    type Err = EtiquetteInconnue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let f = match s {
            "sin" => FonctionSci::Sin,
            "cos" => FonctionSci::Cos,
            "tan" => FonctionSci::Tan,
            "log" => FonctionSci::Log,
            "ln" => FonctionSci::Ln,
            "x^2" | "x²" => FonctionSci::Carre,
            "x^3" | "x³" => FonctionSci::Cube,
            "sqrt" | "√" => FonctionSci::Racine,
            "!" => FonctionSci::Factorielle,
            "PI" | "π" => FonctionSci::Pi,
            "E" | "e" => FonctionSci::E,
            _ => return Err(EtiquetteInconnue(s.to_string())),
        };
        Ok(f)
    }
}

impl fmt::Display for FonctionSci {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FonctionSci::Sin => "sin",
            FonctionSci::Cos => "cos",
            FonctionSci::Tan => "tan",
            FonctionSci::Log => "log",
            FonctionSci::Ln => "ln",
            FonctionSci::Carre => "x²",
            FonctionSci::Cube => "x³",
            FonctionSci::Racine => "√",
            FonctionSci::Factorielle => "n!",
            FonctionSci::Pi => "π",
            FonctionSci::E => "e",
        };
        f.write_str(s)
    }
}
