//! src/noyau/historique.rs
//!
//! Historique des calculs (le "registre").
//!
//! Contrats :
//! - Ajout en tête : l’entrée la plus récente est toujours la première.
//! - Une entrée n’est jamais modifiée après sa création.
//! - Chaque ajout persiste la séquence COMPLÈTE, de façon synchrone.
//! - Un échec de persistance est journalisé puis ignoré : il ne casse jamais un calcul.
//! - Rétention : illimitée par défaut ; plafond optionnel (les plus anciennes sortent).
//!
//! Format persistant : tableau JSON `[{ "expression": "...", "result": 42 | "..." }, ...]`,
//! le plus récent en premier, sous la clé unique `calculatorHistory`.

use std::fmt;

use eyre::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::format::nombre_en_texte;

/// Clé unique de persistance (nom de fichier natif, clé localStorage en web).
pub const CLE_HISTORIQUE: &str = "calculatorHistory";

/// Résultat tel que stocké : nombre ou texte.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValeurHistorique {
    Nombre(f64),
    Texte(String),
}

impl fmt::Display for ValeurHistorique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValeurHistorique::Nombre(v) => f.write_str(&nombre_en_texte(*v)),
            ValeurHistorique::Texte(s) => f.write_str(s),
        }
    }
}

impl From<f64> for ValeurHistorique {
    fn from(v: f64) -> Self {
        ValeurHistorique::Nombre(v)
    }
}

impl From<String> for ValeurHistorique {
    fn from(s: String) -> Self {
        ValeurHistorique::Texte(s)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntreeHistorique {
    expression: String,
    #[serde(rename = "result")]
    resultat: ValeurHistorique,
}

impl EntreeHistorique {
    pub fn new(expression: impl Into<String>, resultat: impl Into<ValeurHistorique>) -> Self {
        Self {
            expression: expression.into(),
            resultat: resultat.into(),
        }
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn resultat(&self) -> &ValeurHistorique {
        &self.resultat
    }
}

/* ------------------------ Stockage ------------------------ */

/// Support de persistance : charge / remplace la séquence complète.
pub trait StockageHistorique: fmt::Debug {
    fn charger(&self) -> Result<Vec<EntreeHistorique>>;
    fn sauver(&mut self, entrees: &[EntreeHistorique]) -> Result<()>;
}

/// Stockage volatil (tests, ou repli sans répertoire de données).
#[derive(Clone, Debug, Default)]
pub struct StockageMemoire {
    pub entrees: Vec<EntreeHistorique>,
}

impl StockageHistorique for StockageMemoire {
    fn charger(&self) -> Result<Vec<EntreeHistorique>> {
        Ok(self.entrees.clone())
    }

    fn sauver(&mut self, entrees: &[EntreeHistorique]) -> Result<()> {
        self.entrees = entrees.to_vec();
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use natif::StockageFichier;

#[cfg(not(target_arch = "wasm32"))]
mod natif {
    use std::fs;
    use std::path::{Path, PathBuf};

    use eyre::{Result, WrapErr};
    use tracing::debug;

    use super::{EntreeHistorique, StockageHistorique};

    /// Fichier JSON (écriture atomique : fichier temporaire puis renommage).
    #[derive(Clone, Debug)]
    pub struct StockageFichier {
        chemin: PathBuf,
    }

    impl StockageFichier {
        pub fn new(chemin: impl Into<PathBuf>) -> Self {
            Self {
                chemin: chemin.into(),
            }
        }

        pub fn chemin(&self) -> &Path {
            &self.chemin
        }
    }

    impl StockageHistorique for StockageFichier {
        fn charger(&self) -> Result<Vec<EntreeHistorique>> {
            if !self.chemin.exists() {
                return Ok(Vec::new());
            }
            let contenu = fs::read_to_string(&self.chemin)
                .wrap_err_with(|| format!("lecture impossible: {:?}", self.chemin))?;
            let entrees = serde_json::from_str(&contenu)
                .wrap_err_with(|| format!("historique JSON invalide: {:?}", self.chemin))?;
            Ok(entrees)
        }

        fn sauver(&mut self, entrees: &[EntreeHistorique]) -> Result<()> {
            if let Some(dossier) = self.chemin.parent() {
                fs::create_dir_all(dossier)
                    .wrap_err_with(|| format!("création impossible: {dossier:?}"))?;
            }

            let contenu = serde_json::to_string_pretty(entrees)?;
            let tmp = self.chemin.with_extension("tmp");
            fs::write(&tmp, contenu).wrap_err_with(|| format!("écriture impossible: {tmp:?}"))?;
            fs::rename(&tmp, &self.chemin)
                .wrap_err_with(|| format!("renommage impossible: {:?}", self.chemin))?;

            debug!(chemin = ?self.chemin, n = entrees.len(), "historique sauvé");
            Ok(())
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::StockageLocal;

#[cfg(target_arch = "wasm32")]
mod web {
    use eyre::{eyre, Result};

    use super::{EntreeHistorique, StockageHistorique, CLE_HISTORIQUE};

    /// `window.localStorage[calculatorHistory]`.
    #[derive(Clone, Debug, Default)]
    pub struct StockageLocal;

    fn local_storage() -> Result<web_sys::Storage> {
        web_sys::window()
            .ok_or_else(|| eyre!("window() indisponible"))?
            .local_storage()
            .map_err(|e| eyre!("localStorage refusé: {e:?}"))?
            .ok_or_else(|| eyre!("localStorage indisponible"))
    }

    impl StockageHistorique for StockageLocal {
        fn charger(&self) -> Result<Vec<EntreeHistorique>> {
            let brut = local_storage()?
                .get_item(CLE_HISTORIQUE)
                .map_err(|e| eyre!("lecture localStorage: {e:?}"))?;
            match brut {
                Some(s) => Ok(serde_json::from_str(&s)?),
                None => Ok(Vec::new()),
            }
        }

        fn sauver(&mut self, entrees: &[EntreeHistorique]) -> Result<()> {
            let contenu = serde_json::to_string(entrees)?;
            local_storage()?
                .set_item(CLE_HISTORIQUE, &contenu)
                .map_err(|e| eyre!("écriture localStorage: {e:?}"))
        }
    }
}

/* ------------------------ Registre ------------------------ */

#[derive(Debug)]
pub struct Historique {
    entrees: Vec<EntreeHistorique>,
    capacite: Option<usize>,
    stockage: Box<dyn StockageHistorique>,
}

impl Historique {
    /// Ouvre le registre sur un stockage. Un historique illisible repart à vide.
    pub fn new(stockage: Box<dyn StockageHistorique>, capacite: Option<usize>) -> Self {
        let mut entrees = stockage.charger().unwrap_or_else(|e| {
            warn!("historique illisible, on repart à vide: {e:#}");
            Vec::new()
        });
        if let Some(max) = capacite {
            entrees.truncate(max);
        }
        debug!(n = entrees.len(), ?capacite, "historique chargé");

        Self {
            entrees,
            capacite,
            stockage,
        }
    }

    /// Registre volatil, sans plafond.
    pub fn en_memoire() -> Self {
        Self::new(Box::<StockageMemoire>::default(), None)
    }

    /// Ajoute en tête puis persiste toute la séquence.
    pub fn enregistrer(
        &mut self,
        expression: impl Into<String>,
        resultat: impl Into<ValeurHistorique>,
    ) {
        self.entrees
            .insert(0, EntreeHistorique::new(expression, resultat));

        if let Some(max) = self.capacite {
            self.entrees.truncate(max);
        }

        if let Err(e) = self.stockage.sauver(&self.entrees) {
            warn!("historique non persisté: {e:#}");
        }
    }

    /// Entrées, la plus récente en premier.
    pub fn entrees(&self) -> &[EntreeHistorique] {
        &self.entrees
    }

    pub fn get(&self, index: usize) -> Option<&EntreeHistorique> {
        self.entrees.get(index)
    }

    pub fn len(&self) -> usize {
        self.entrees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entrees.is_empty()
    }
}
