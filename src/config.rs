//! Configuration utilisateur (TOML).
//!
//! Natif : `<config_dir>/calculatrice-sci/config.toml`, créé avec les valeurs par défaut
//! s’il n’existe pas. Web : même texte TOML dans `localStorage["calculatriceConfig"]`.
//!
//! Clés :
//! - `theme`        : "clair" | "sombre" (sauvé à chaque bascule)
//! - `mode`         : "basique" | "scientifique" (mode au démarrage)
//! - `history_max`  : plafond optionnel de l’historique (absent = illimité)
//! - `history_path` : fichier d’historique (natif seulement, optionnel)

use eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Dossier applicatif (config + données).
pub const DOSSIER_APP: &str = "calculatrice-sci";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Clair,
    Sombre,
}

impl Theme {
    pub fn basculer(self) -> Self {
        match self {
            Theme::Clair => Theme::Sombre,
            Theme::Sombre => Theme::Clair,
        }
    }

    /// Icône du bouton : ce vers quoi on bascule.
    pub fn icone(self) -> &'static str {
        match self {
            Theme::Clair => "🌙",
            Theme::Sombre => "☀",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Basique,
    Scientifique,
}

impl Mode {
    pub fn basculer(self) -> Self {
        match self {
            Mode::Basique => Mode::Scientifique,
            Mode::Scientifique => Mode::Basique,
        }
    }

    /// Libellé du bouton : le mode vers lequel on bascule.
    pub fn libelle_bouton(self) -> &'static str {
        match self {
            Mode::Basique => "Sci",
            Mode::Scientifique => "Basic",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: Theme,
    pub mode: Mode,
    pub history_max: Option<usize>,
    pub history_path: Option<String>,
}

impl Config {
    pub fn from_toml(contenu: &str) -> Result<Self> {
        toml::from_str(contenu).wrap_err("configuration TOML invalide")
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).wrap_err("sérialisation TOML impossible")
    }

    /// Charge la configuration ; la crée avec les valeurs par défaut si absente.
    pub fn load() -> Result<Self> {
        match stockage::lire()? {
            Some(contenu) => {
                let config = Self::from_toml(&contenu)?;
                debug!(?config, "configuration chargée");
                Ok(config)
            }
            None => {
                let config = Self::default();
                config.save()?;
                Ok(config)
            }
        }
    }

    pub fn save(&self) -> Result<()> {
        stockage::ecrire(&self.to_toml()?)?;
        debug!(config = ?self, "configuration sauvée");
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use stockage::chemin_historique;

#[cfg(not(target_arch = "wasm32"))]
mod stockage {
    use std::fs;
    use std::path::PathBuf;

    use eyre::{eyre, Result, WrapErr};
    use tracing::info;

    use super::{Config, DOSSIER_APP};
    use crate::noyau::historique::CLE_HISTORIQUE;

    pub fn chemin_config() -> Result<PathBuf> {
        let base = dirs::config_dir()
            .ok_or_else(|| eyre!("répertoire de configuration introuvable"))?;
        Ok(base.join(DOSSIER_APP).join("config.toml"))
    }

    /// Fichier d’historique : `history_path` s’il est donné, sinon le répertoire de données.
    pub fn chemin_historique(config: &Config) -> Result<PathBuf> {
        if let Some(p) = &config.history_path {
            return Ok(PathBuf::from(p));
        }
        let base =
            dirs::data_dir().ok_or_else(|| eyre!("répertoire de données introuvable"))?;
        Ok(base
            .join(DOSSIER_APP)
            .join(format!("{CLE_HISTORIQUE}.json")))
    }

    pub fn lire() -> Result<Option<String>> {
        let chemin = chemin_config()?;
        if !chemin.exists() {
            info!("config absente, création des valeurs par défaut: {chemin:?}");
            return Ok(None);
        }
        let contenu = fs::read_to_string(&chemin)
            .wrap_err_with(|| format!("lecture impossible: {chemin:?}"))?;
        Ok(Some(contenu))
    }

    pub fn ecrire(contenu: &str) -> Result<()> {
        let chemin = chemin_config()?;
        if let Some(dossier) = chemin.parent() {
            fs::create_dir_all(dossier)
                .wrap_err_with(|| format!("création impossible: {dossier:?}"))?;
        }
        fs::write(&chemin, contenu).wrap_err_with(|| format!("écriture impossible: {chemin:?}"))
    }
}

#[cfg(target_arch = "wasm32")]
mod stockage {
    use eyre::{eyre, Result};

    const CLE_CONFIG: &str = "calculatriceConfig";

    fn local_storage() -> Result<web_sys::Storage> {
        web_sys::window()
            .ok_or_else(|| eyre!("window() indisponible"))?
            .local_storage()
            .map_err(|e| eyre!("localStorage refusé: {e:?}"))?
            .ok_or_else(|| eyre!("localStorage indisponible"))
    }

    pub fn lire() -> Result<Option<String>> {
        local_storage()?
            .get_item(CLE_CONFIG)
            .map_err(|e| eyre!("lecture localStorage: {e:?}"))
    }

    pub fn ecrire(contenu: &str) -> Result<()> {
        local_storage()?
            .set_item(CLE_CONFIG, contenu)
            .map_err(|e| eyre!("écriture localStorage: {e:?}"))
    }
}
