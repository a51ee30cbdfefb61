// src/app/vue.rs
//
// Vue (UI egui): natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Clavier : Enter évalue (quand le champ est focus)
// - Tactile : pavé de fractions + pavé numérique, focus redonné après clic
// - Affichage : pieds-pouces (principal) + total en pouces (secondaire)

use eframe::egui;

use super::etat::AppCalc;

/// Pavé de fractions (le `"` est décoratif, retiré à l’insertion).
const PAVE_FRACTIONS: [[&str; 4]; 2] = [
    ["1/8\"", "1/4\"", "3/8\"", "1/2\""],
    ["5/8\"", "3/4\"", "7/8\"", "'ft"],
];

/// Pavé numérique : libellé affiché.
const PAVE_NUMERIQUE: [[&str; 4]; 5] = [
    ["C", "DEL", "%", "÷"],
    ["7", "8", "9", "×"],
    ["4", "5", "6", "-"],
    ["1", "2", "3", "+"],
    ["0", ".", "=", ""],
];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Toise");
                ui.add_space(6.0);

                self.ui_affichage(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_entree(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_pave_fractions(ui);
                ui.add_space(6.0);
                self.ui_pave_numerique(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_demarche(ui);
            });
    }

    fn ui_affichage(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            Self::champ_monospace(ui, "affichage_principal", self.affichage_principal(), 1);
            if let Some(total) = self.affichage_secondaire() {
                Self::champ_monospace(ui, "affichage_secondaire", total, 1);
            }
        });

        // Mémoire : dernière expression calculée
        if let Some(r) = &self.dernier {
            ui.add_space(4.0);
            ui.monospace(r.expression.as_str());
            ui.monospace("────────");
        }

        if self.erreur {
            ui.add_space(6.0);
            ui.colored_label(ui.visuals().error_fg_color, "Aucun résultat");
        }
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        ui.label("Expression :");

        // IMPORTANT : id stable + focus contrôlé
        let mut texte = self.expression.clone();
        let resp = ui.add(
            egui::TextEdit::singleline(&mut texte)
                .desired_width(ui.available_width())
                .hint_text("Ex: 5 1/2 + 3 1/4 - 2, 3' 2 - 1")
                .id_source("expression_edit")
                .code_editor(),
        );
        if resp.changed() {
            self.set_expression(&texte);
        }

        // Si on a cliqué un bouton (pavé / C / DEL / etc.), on redonne le focus
        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        // --- Clavier : Enter évalue (seulement si le champ est focus) ---
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if (resp.has_focus() || resp.lost_focus()) && enter {
            self.compute();
        }
    }

    fn ui_pave_fractions(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_fractions")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for ligne in PAVE_FRACTIONS {
                    for frac in ligne {
                        let resp = ui.add_sized([64.0, 30.0], egui::Button::new(frac));
                        if resp.clicked() {
                            if frac == "'ft" {
                                self.append_key("' ");
                            } else {
                                self.append_fraction(frac);
                            }
                        }
                    }
                    ui.end_row();
                }
            });
    }

    fn ui_pave_numerique(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_numerique")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for ligne in PAVE_NUMERIQUE {
                    for touche in ligne {
                        if touche.is_empty() {
                            ui.label("");
                            continue;
                        }
                        let resp = ui.add_sized([64.0, 36.0], egui::Button::new(touche));
                        if resp.clicked() {
                            self.touche(touche);
                        }
                    }
                    ui.end_row();
                }
            });
    }

    /// Aiguillage d’une touche du pavé numérique.
    fn touche(&mut self, touche: &str) {
        match touche {
            "=" => {
                self.compute();
            }
            "C" => self.clear(),
            "DEL" => self.backspace(),
            "÷" => self.append_operator("/"),
            "×" => self.append_operator("*"),
            "+" | "-" | "%" => self.append_operator(touche),
            _ => self.append_key(touche),
        }
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(false)
            .show(ui, |ui| {
                Self::champ_demarche(ui, "Jetons", "demarche_jetons", &self.demarche.jetons);
                Self::champ_demarche(
                    ui,
                    "Expression",
                    "demarche_expression",
                    &self.demarche.expression,
                );
                if !self.demarche.jetons.is_empty() {
                    ui.add_space(4.0);
                    ui.label(if self.demarche.mesure {
                        "Mode : mesure (pieds-pouces)"
                    } else {
                        "Mode : décimal"
                    });
                }
            });
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));
        Self::champ_monospace(ui, id, contenu, 2);
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        // Affichage lecture seule “stable”, sans TextEdit interactif.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_height(
                        rows as f32 * ui.text_style_height(&egui::TextStyle::Monospace),
                    );
                    ui.monospace(contenu);
                });
            });
    }
}
