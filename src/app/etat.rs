//! src/app/etat.rs
//!
//! État UI : la session de calcul + les préférences d’affichage.
//!
//! Rôle : recevoir les intentions de la vue (boutons, clavier) et les transmettre
//! à la session, sans logique de calcul ici.
//!
//! Contrats :
//! - Aucune évaluation ici (tout passe par `Session`).
//! - Bascule de thème : sauvée dans la config ; un échec de sauvegarde est journalisé, jamais bloquant.

use tracing::{info, warn};

use crate::config::{Config, Mode, Theme};
use crate::noyau::historique::StockageHistorique;
use crate::noyau::{FonctionSci, Historique, OpMemoire, Session};

/// Une intention utilisateur (bouton ou touche).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Intention {
    Saisir(&'static str),
    Evaluer,
    Effacer,
    RetourArriere,
    Scientifique(FonctionSci),
    Memoire(OpMemoire),
    Rejouer(usize),
    BasculerTheme,
    BasculerMode,
    BasculerHistorique,
}

#[derive(Debug)]
pub struct AppCalc {
    pub session: Session,
    pub config: Config,
    pub mode: Mode,
    pub historique_visible: bool,

    // thème effectivement posé sur le contexte egui (None = pas encore)
    pub visuels_poses: Option<Theme>,
}

impl AppCalc {
    /// Application complète : historique persistant selon la plateforme.
    pub fn new(config: Config) -> Self {
        let historique = Historique::new(ouvrir_stockage(&config), config.history_max);
        Self::avec_session(config, Session::new(historique))
    }

    pub fn avec_session(config: Config, session: Session) -> Self {
        Self {
            session,
            mode: config.mode,
            config,
            historique_visible: false,
            visuels_poses: None,
        }
    }

    pub fn dispatcher(&mut self, intention: Intention) {
        match intention {
            Intention::Saisir(t) => self.session.saisir(t),
            Intention::Evaluer => {
                // l’erreur est déjà à l’écran ("Error")
                let _ = self.session.evaluer();
            }
            Intention::Effacer => self.session.effacer(),
            Intention::RetourArriere => self.session.retour_arriere(),
            Intention::Scientifique(f) => {
                self.session.appliquer_scientifique(f);
            }
            Intention::Memoire(op) => {
                self.session.appliquer_memoire(op);
            }
            Intention::Rejouer(i) => {
                self.session.rejouer(i);
            }
            Intention::BasculerTheme => self.basculer_theme(),
            Intention::BasculerMode => self.mode = self.mode.basculer(),
            Intention::BasculerHistorique => self.historique_visible = !self.historique_visible,
        }
    }

    fn basculer_theme(&mut self) {
        self.config.theme = self.config.theme.basculer();
        info!(theme = ?self.config.theme, "thème");
        if let Err(e) = self.config.save() {
            warn!("thème non sauvé: {e:#}");
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn ouvrir_stockage(config: &Config) -> Box<dyn StockageHistorique> {
    use crate::config::chemin_historique;
    use crate::noyau::historique::{StockageFichier, StockageMemoire};

    match chemin_historique(config) {
        Ok(chemin) => {
            let stockage = StockageFichier::new(chemin);
            info!(chemin = ?stockage.chemin(), "historique");
            Box::new(stockage)
        }
        Err(e) => {
            warn!("historique non persistant: {e:#}");
            Box::<StockageMemoire>::default()
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn ouvrir_stockage(_config: &Config) -> Box<dyn StockageHistorique> {
    Box::<crate::noyau::historique::StockageLocal>::default()
}
