//! Noyau de calcul (f64)
//!
//! Organisation interne :
//! - erreur.rs       : taxonomie (expression invalide, factorielle invalide)
//! - jetons.rs       : normaliseur (π, e, x², x³, √, !) -> jetons
//! - rpn.rs          : shunting-yard + construction Expr
//! - expr.rs         : AST f64 + évaluation
//! - eval.rs         : pipeline complet + factorielle finale
//! - format.rs       : texte des nombres, exponentielle au-delà de 15 caractères
//! - scientifique.rs : fonctions directes sur l’opérande (degrés)
//! - memoire.rs      : registre M+ M- MR MC
//! - historique.rs   : registre des calculs + persistance
//! - session.rs      : état complet, une méthode par intention

pub mod erreur;
pub mod eval;
pub mod expr;
pub mod format;
pub mod historique;
pub mod jetons;
pub mod memoire;
pub mod rpn;
pub mod scientifique;
pub mod session;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use historique::Historique;
pub use memoire::OpMemoire;
pub use scientifique::FonctionSci;
pub use session::Session;
