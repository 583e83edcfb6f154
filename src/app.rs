// src/app.rs
//
// Module App (racine)
// -------------------
// - Déclare les sous-modules (etat.rs + vue.rs)
// - Ré-exporte AppCalc (pour main.rs: use crate::app::AppCalc;)
// - Fournit l’impl eframe::App (compatible NATIF + WEB)
//
// Clavier (global, sans champ texte) :
// - caractère d’une touche du pavé : même effet que le bouton
// - Enter ou '=' : évaluer
// - Backspace : ⌫
// - Escape : C

pub mod etat;
pub mod vue;

// Ré-export pratique : `use crate::app::AppCalc;`
pub use etat::{AppCalc, Intention};

use eframe::egui;

use crate::config::Theme;

/// Caractère tapé -> texte saisi (comme le bouton correspondant).
const TOUCHES_CLAVIER: [(char, &str); 24] = [
    ('0', "0"),
    ('1', "1"),
    ('2', "2"),
    ('3', "3"),
    ('4', "4"),
    ('5', "5"),
    ('6', "6"),
    ('7', "7"),
    ('8', "8"),
    ('9', "9"),
    ('.', "."),
    ('+', "+"),
    ('-', "-"),
    ('*', "*"),
    ('/', "/"),
    ('^', "^"),
    ('(', "("),
    (')', ")"),
    ('!', "!"),
    ('π', "π"),
    ('e', "e"),
    ('√', "√"),
    ('²', "x²"),
    ('³', "x³"),
];

/// Intention associée à un caractère tapé (None = ignoré).
pub fn intention_clavier(c: char) -> Option<Intention> {
    if c == '=' {
        return Some(Intention::Evaluer);
    }
    TOUCHES_CLAVIER
        .iter()
        .find(|(k, _)| *k == c)
        .map(|&(_, t)| Intention::Saisir(t))
}

impl AppCalc {
    fn lire_clavier(&mut self, ctx: &egui::Context) {
        let evenements = ctx.input(|i| i.events.clone());
        for ev in evenements {
            match ev {
                egui::Event::Text(texte) => {
                    for c in texte.chars() {
                        if let Some(i) = intention_clavier(c) {
                            self.dispatcher(i);
                        }
                    }
                }
                egui::Event::Key {
                    key, pressed: true, ..
                } => match key {
                    egui::Key::Enter => self.dispatcher(Intention::Evaluer),
                    egui::Key::Backspace => self.dispatcher(Intention::RetourArriere),
                    egui::Key::Escape => self.dispatcher(Intention::Effacer),
                    _ => {}
                },
                _ => {}
            }
        }
    }

    fn poser_visuels(&mut self, ctx: &egui::Context) {
        if self.visuels_poses == Some(self.config.theme) {
            return;
        }
        ctx.set_visuals(match self.config.theme {
            Theme::Clair => egui::Visuals::light(),
            Theme::Sombre => egui::Visuals::dark(),
        });
        self.visuels_poses = Some(self.config.theme);
    }
}

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poser_visuels(ctx);
        self.lire_clavier(ctx);

        egui::TopBottomPanel::top("barre").show(ctx, |ui| {
            self.ui_barre(ui);
        });

        if self.historique_visible {
            egui::SidePanel::right("historique")
                .resizable(true)
                .default_width(220.0)
                .show(ctx, |ui| {
                    self.ui_historique(ui);
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui); // méthode publique (dans vue.rs)
        });
    }
}
