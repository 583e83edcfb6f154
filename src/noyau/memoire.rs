// src/noyau/memoire.rs
//
// Registre mémoire : un seul accumulateur f64, initialisé à 0, jamais persisté.

use std::fmt;
use std::str::FromStr;

use super::scientifique::EtiquetteInconnue;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpMemoire {
    Ajouter,    // M+
    Soustraire, // M-
    Rappeler,   // MR
    Effacer,    // MC
}

impl OpMemoire {
    pub const TOUTES: [OpMemoire; 4] = [
        OpMemoire::Ajouter,
        OpMemoire::Soustraire,
        OpMemoire::Rappeler,
        OpMemoire::Effacer,
    ];
}

impl FromStr for OpMemoire {
    type Err = EtiquetteInconnue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "M+" => Ok(OpMemoire::Ajouter),
            "M-" => Ok(OpMemoire::Soustraire),
            "MR" => Ok(OpMemoire::Rappeler),
            "MC" => Ok(OpMemoire::Effacer),
            _ => Err(EtiquetteInconnue(s.to_string())),
        }
    }
}

impl fmt::Display for OpMemoire {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OpMemoire::Ajouter => "M+",
            OpMemoire::Soustraire => "M-",
            OpMemoire::Rappeler => "MR",
            OpMemoire::Effacer => "MC",
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Memoire {
    valeur: f64,
}

impl Memoire {
    pub fn valeur(&self) -> f64 {
        self.valeur
    }

    /// Applique une opération avec la valeur affichée.
    /// Retourne la valeur rappelée pour MR, None sinon.
    pub fn appliquer(&mut self, op: OpMemoire, affiche: f64) -> Option<f64> {
        match op {
            OpMemoire::Ajouter => self.valeur += affiche,
            OpMemoire::Soustraire => self.valeur -= affiche,
            OpMemoire::Rappeler => return Some(self.valeur),
            OpMemoire::Effacer => self.valeur = 0.0,
        }
        None
    }
}
