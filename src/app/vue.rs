// src/app/vue.rs
//
// Vue (UI egui) : natif + web
// ---------------------------
// - Barre haute : thème, mode Sci/Basic, panneau historique
// - Deux écrans : secondaire (expression / dernier calcul) + principal
// - Pavé de base, rangée mémoire, pavé scientifique (mode Sci)
// - Historique : clic = réinjecte le résultat
//
// La vue ne fait que produire des `Intention` ; tout l’état vit dans la session.

use eframe::egui;

use super::etat::{AppCalc, Intention};
use crate::config::Mode;
use crate::noyau::format::nombre_en_texte;
use crate::noyau::{FonctionSci, OpMemoire};

const TAILLE_TOUCHE: [f32; 2] = [56.0, 40.0];

/// Symboles insérés dans l’expression (pavé scientifique).
const SYMBOLES: [(&str, &str); 7] = [
    ("π", "π"),
    ("e", "e"),
    ("x²", "x²"),
    ("x³", "x³"),
    ("√", "√"),
    ("^", "^"),
    ("!", "!"),
];

impl AppCalc {
    pub fn ui_barre(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading(crate::TITRE_APP);

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .button(self.config.theme.icone())
                    .on_hover_text("Thème clair / sombre")
                    .clicked()
                {
                    self.dispatcher(Intention::BasculerTheme);
                }
                if ui
                    .button(self.mode.libelle_bouton())
                    .on_hover_text("Mode basique / scientifique")
                    .clicked()
                {
                    self.dispatcher(Intention::BasculerMode);
                }
                if ui
                    .selectable_label(self.historique_visible, "🕘")
                    .on_hover_text("Historique")
                    .clicked()
                {
                    self.dispatcher(Intention::BasculerHistorique);
                }
            });
        });
    }

    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        self.ui_ecrans(ui);

        ui.add_space(8.0);
        self.ui_memoire(ui);
        ui.add_space(8.0);

        ui.horizontal_top(|ui| {
            if self.mode == Mode::Scientifique {
                ui.vertical(|ui| self.ui_pave_scientifique(ui));
                ui.separator();
            }
            ui.vertical(|ui| self.ui_pave_base(ui));
        });
    }

    fn ui_ecrans(&mut self, ui: &mut egui::Ui) {
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.with_layout(egui::Layout::top_down(egui::Align::Max), |ui| {
                    let m = self.session.memoire();
                    if m != 0.0 {
                        ui.small(format!("M = {}", nombre_en_texte(m)));
                    }
                    ui.label(
                        egui::RichText::new(self.session.secondaire())
                            .monospace()
                            .weak(),
                    );
                    ui.label(
                        egui::RichText::new(self.session.affichage())
                            .monospace()
                            .size(32.0)
                            .strong(),
                    );
                });
            });
    }

    fn ui_memoire(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            for op in OpMemoire::TOUTES {
                let tip = match op {
                    OpMemoire::Ajouter => "Ajoute l’affichage à la mémoire",
                    OpMemoire::Soustraire => "Retire l’affichage de la mémoire",
                    OpMemoire::Rappeler => "Rappelle la mémoire",
                    OpMemoire::Effacer => "Remet la mémoire à 0",
                };
                self.touche(ui, &op.to_string(), tip, Intention::Memoire(op));
            }
        });
    }

    fn ui_pave_base(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_base")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.touche(ui, "C", "Tout effacer (sauf mémoire)", Intention::Effacer);
                self.touche(ui, "⌫", "Efface le dernier symbole", Intention::RetourArriere);
                self.insertion(ui, "(");
                self.insertion(ui, ")");
                ui.end_row();

                for rangee in [["7", "8", "9", "/"], ["4", "5", "6", "*"], ["1", "2", "3", "-"]] {
                    for t in rangee {
                        self.insertion(ui, t);
                    }
                    ui.end_row();
                }

                self.insertion(ui, "0");
                self.insertion(ui, ".");
                self.touche(ui, "=", "Évaluer", Intention::Evaluer);
                self.insertion(ui, "+");
                ui.end_row();
            });
    }

    fn ui_pave_scientifique(&mut self, ui: &mut egui::Ui) {
        ui.label("Fonctions (nombre affiché)");
        egui::Grid::new("pave_fonctions")
            .num_columns(3)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for (k, f) in FonctionSci::TOUTES.into_iter().enumerate() {
                    let tip = if f.prend_operande() {
                        "Appliquer au nombre affiché"
                    } else {
                        "Remplacer par la constante"
                    };
                    self.touche(ui, &f.to_string(), tip, Intention::Scientifique(f));
                    if k % 3 == 2 {
                        ui.end_row();
                    }
                }
            });

        ui.add_space(6.0);
        ui.label("Symboles (expression)");
        ui.horizontal_wrapped(|ui| {
            for (libelle, texte) in SYMBOLES {
                let resp = ui
                    .add_sized([44.0, 32.0], egui::Button::new(libelle))
                    .on_hover_text("Insérer dans l’expression");
                if resp.clicked() {
                    self.dispatcher(Intention::Saisir(texte));
                }
            }
        });
    }

    pub fn ui_historique(&mut self, ui: &mut egui::Ui) {
        ui.heading("Historique");
        ui.separator();

        if self.session.historique().is_empty() {
            ui.weak("Aucun calcul pour l’instant");
            return;
        }

        let mut choisi = None;
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for (i, e) in self.session.historique().entrees().iter().enumerate() {
                    let texte = egui::RichText::new(format!("{}\n{}", e.expression(), e.resultat()))
                        .monospace();
                    let resp = ui
                        .add(egui::Button::new(texte))
                        .on_hover_text("Réutiliser ce résultat");
                    if resp.clicked() {
                        choisi = Some(i);
                    }
                }
            });

        if let Some(i) = choisi {
            self.dispatcher(Intention::Rejouer(i));
        }
    }

    fn touche(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, intention: Intention) {
        let resp = ui
            .add_sized(TAILLE_TOUCHE, egui::Button::new(label))
            .on_hover_text(tip);
        if resp.clicked() {
            self.dispatcher(intention);
        }
    }

    fn insertion(&mut self, ui: &mut egui::Ui, texte: &'static str) {
        if ui.add_sized(TAILLE_TOUCHE, egui::Button::new(texte)).clicked() {
            self.dispatcher(Intention::Saisir(texte));
        }
    }
}
