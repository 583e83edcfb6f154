//! src/noyau/session.rs
//!
//! Session de calcul : TOUT l’état mutable de la calculatrice, sans UI.
//!
//! Rôle : recevoir des intentions (saisie, =, fonction, mémoire, C, ⌫, rejouer)
//! et tenir à jour tampon / écran principal / écran secondaire.
//!
//! Contrats :
//! - Une erreur d’évaluation ne sort jamais d’ici : écran "Error", tampon vidé,
//!   prêt pour une nouvelle saisie.
//! - "=" sur tampon vide : aucun changement d’état.
//! - Fonctions scientifiques et mémoire sur un affichage non numérique : no-op.
//! - Après un résultat, un opérateur continue le calcul ; un chiffre en démarre un nouveau.

use tracing::{debug, info};

use super::erreur::{ErreurCalc, Resultat};
use super::eval::eval_expression;
use super::format::{affichage, formater_resultat, nombre_en_texte};
use super::historique::Historique;
use super::memoire::{Memoire, OpMemoire};
use super::scientifique::FonctionSci;

/// Écran principal en cas d’erreur.
pub const AFFICHAGE_ERREUR: &str = "Error";

/// Écran secondaire après C.
pub const SECONDAIRE_VIDE: &str = "No calculations done";

/// Motifs effacés d’un bloc par ⌫.
const MOTIFS_RETOUR: [&str; 4] = ["x²", "x³", "sqrt", "pi"];

#[derive(Debug)]
pub struct Session {
    tampon: String,
    affichage: String,
    secondaire: String,
    nouvelle_operation: bool,
    memoire: Memoire,
    historique: Historique,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Historique::en_memoire())
    }
}

impl Session {
    pub fn new(historique: Historique) -> Self {
        Self {
            tampon: String::new(),
            affichage: "0".to_string(),
            secondaire: String::new(),
            nouvelle_operation: true,
            memoire: Memoire::default(),
            historique,
        }
    }

    /* ------------------------ Lecture ------------------------ */

    pub fn tampon(&self) -> &str {
        &self.tampon
    }

    pub fn affichage(&self) -> &str {
        &self.affichage
    }

    pub fn secondaire(&self) -> &str {
        &self.secondaire
    }

    pub fn nouvelle_operation(&self) -> bool {
        self.nouvelle_operation
    }

    pub fn memoire(&self) -> f64 {
        self.memoire.valeur()
    }

    pub fn historique(&self) -> &Historique {
        &self.historique
    }

    /* ------------------------ Intentions ------------------------ */

    /// Saisie (chiffre, opérateur, symbole).
    pub fn saisir(&mut self, texte: &str) {
        if texte.is_empty() {
            return;
        }

        if self.nouvelle_operation {
            // le résultat précédent sert de graine seulement si on enchaîne un opérateur
            if !commence_par_operateur(texte) {
                self.tampon.clear();
            }
            self.nouvelle_operation = false;
        }

        self.tampon.push_str(texte);
        self.rafraichir_saisie();
    }

    /// "=" : évalue le tampon, enregistre le calcul, le résultat devient la graine.
    /// None si le tampon est vide (aucun changement d’état).
    pub fn evaluer(&mut self) -> Option<Resultat<f64>> {
        if self.tampon.is_empty() {
            return None;
        }

        let expression = self.tampon.clone();
        let res = eval_expression(&expression);

        match res {
            Ok(v) => {
                info!(%expression, resultat = v, "calcul");
                let libelle = format!("{expression} =");
                self.historique.enregistrer(libelle.clone(), v);

                self.tampon = nombre_en_texte(v);
                self.affichage = formater_resultat(v);
                self.secondaire = libelle;
                self.nouvelle_operation = true;
            }
            Err(e) => self.passer_en_erreur(&expression, e),
        }

        Some(res)
    }

    /// Fonction scientifique directe sur l’opérande courant.
    /// Retourne le tampon (inchangé si no-op).
    pub fn appliquer_scientifique(&mut self, f: FonctionSci) -> &str {
        let x = if f.prend_operande() {
            match lire_nombre(&self.tampon) {
                Some(x) => x,
                None => {
                    debug!(fonction = %f, tampon = %self.tampon, "opérande non numérique: no-op");
                    return &self.tampon;
                }
            }
        } else {
            0.0
        };

        match f.appliquer(x) {
            Ok(v) => {
                debug!(fonction = %f, x, resultat = v, "fonction scientifique");
                self.tampon = nombre_en_texte(v);
                self.affichage = affichage(&self.tampon);
                self.nouvelle_operation = true;
            }
            Err(e) => {
                let expression = format!("{f}({x})");
                self.passer_en_erreur(&expression, e);
            }
        }

        &self.tampon
    }

    /// M+ / M- / MR / MC avec la valeur affichée.
    /// Retourne le nouvel affichage pour MR ; None sinon (ou no-op).
    pub fn appliquer_memoire(&mut self, op: OpMemoire) -> Option<String> {
        let Some(affiche) = lire_nombre(&self.affichage) else {
            debug!(%op, affichage = %self.affichage, "affichage non numérique: no-op");
            return None;
        };

        let rappel = self.memoire.appliquer(op, affiche)?;

        self.tampon = nombre_en_texte(rappel);
        self.affichage = affichage(&self.tampon);
        self.nouvelle_operation = true;
        Some(self.affichage.clone())
    }

    /// C : tout effacer sauf mémoire et historique.
    pub fn effacer(&mut self) {
        self.tampon.clear();
        self.nouvelle_operation = true;
        self.secondaire = SECONDAIRE_VIDE.to_string();
        self.affichage = "0".to_string();
    }

    /// ⌫ : retire le dernier symbole (ou un motif connu d’un bloc).
    pub fn retour_arriere(&mut self) {
        match MOTIFS_RETOUR.iter().find(|m| self.tampon.ends_with(*m)) {
            Some(m) => {
                let garde = self.tampon.len() - m.len();
                self.tampon.truncate(garde);
            }
            None => {
                self.tampon.pop();
            }
        }

        if self.tampon.is_empty() {
            self.effacer();
        } else {
            self.nouvelle_operation = false;
            self.rafraichir_saisie();
        }
    }

    /// Réinjecte le RÉSULTAT d’une entrée comme nouvel opérande (sans recalcul,
    /// sans nouvel ajout à l’historique).
    pub fn rejouer(&mut self, index: usize) -> bool {
        let Some(entree) = self.historique.get(index) else {
            return false;
        };

        self.tampon = entree.resultat().to_string();
        self.secondaire.clear();
        self.affichage = affichage(&self.tampon);
        self.nouvelle_operation = true;
        true
    }

    /* ------------------------ Interne ------------------------ */

    fn rafraichir_saisie(&mut self) {
        self.secondaire = self.tampon.clone();
        self.affichage = affichage(&self.tampon);
    }

    fn passer_en_erreur(&mut self, expression: &str, e: ErreurCalc) {
        info!(%expression, erreur = %e, "calcul refusé");
        self.tampon.clear();
        self.affichage = AFFICHAGE_ERREUR.to_string();
        self.secondaire.clear();
        self.nouvelle_operation = true;
    }
}

/// Lecture STRICTE d’un nombre affiché / tapé (pas d’expression, pas de NaN/∞).
fn lire_nombre(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Vrai si la saisie prolonge l’opérande précédent (opérateur binaire ou suffixe).
fn commence_par_operateur(texte: &str) -> bool {
    texte
        .chars()
        .next()
        .is_some_and(|c| "+-−*×/÷^!²³".contains(c))
        || texte.starts_with("x²")
        || texte.starts_with("x³")
}
