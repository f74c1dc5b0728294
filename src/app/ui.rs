use super::{ReflowableApp, ServiceStatus};
use crate::upload::SelectedFile;
use crate::utils::format_size;
use egui::{Align, Color32, RichText};
use rfd::FileDialog;

const ACCENT: Color32 = Color32::from_rgb(37, 99, 235);

impl ReflowableApp {
    pub fn render(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let footer_height = 48.0;
            let content_height = ui.available_height() - footer_height;

            egui::ScrollArea::vertical()
                .max_height(content_height)
                .show(ui, |ui| {
                    ui.add_space(30.0);
                    ui.vertical_centered(|ui| {
                        ui.heading("Reflowable.me");
                        ui.add_space(5.0);
                        ui.label(
                            RichText::new("PDF to EPUB conversion")
                                .color(ui.visuals().text_color().gamma_multiply(0.7)),
                        );
                    });

                    ui.add_space(30.0);
                    self.render_selection(ui);
                    ui.add_space(20.0);
                    self.render_submit(ui);

                    if let Some(outcome) = &self.last_outcome {
                        ui.add_space(10.0);
                        ui.vertical_centered(|ui| {
                            ui.label(RichText::new(outcome).small());
                        });
                    }
                });

            ui.with_layout(egui::Layout::bottom_up(Align::Center), |ui| {
                ui.add_space(10.0);
                self.render_footer(ui);
            });
        });
    }

    fn render_selection(&mut self, ui: &mut egui::Ui) {
        let (in_flight, _) = self.transfer_state().snapshot();
        ui.group(|ui| {
            ui.horizontal(|ui| {
                let clicked = ui
                    .add_enabled(!in_flight, egui::Button::new("📄 Select PDF"))
                    .clicked();
                if clicked {
                    let picked = FileDialog::new()
                        .add_filter("PDF", &[self.config.source_extension()])
                        .pick_file()
                        .and_then(SelectedFile::from_path);
                    if let Some(file) = picked {
                        self.select_file(file);
                    }
                }

                match self.selected_file() {
                    Some(file) => {
                        let size = file.size.map(format_size).unwrap_or_default();
                        ui.label(format!("Selected: {}", file.name));
                        ui.label(RichText::new(size).weak());
                    }
                    None => {
                        ui.label(RichText::new("No file selected").weak());
                    }
                }
            });
        });
    }

    fn render_submit(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            let (in_flight, _) = self.transfer_state().snapshot();
            let can_submit = self.selected.is_some() && !in_flight;
            ui.add_enabled_ui(can_submit, |ui| {
                let button = egui::Button::new(self.state.button_label())
                    .min_size(egui::vec2(200.0, 40.0));
                if ui.add(button).clicked() {
                    self.submit();
                }
            });

            if in_flight {
                ui.add_space(10.0);
                let progress_bar = egui::ProgressBar::new(self.state.get_progress_fraction())
                    .show_percentage()
                    .animate(false)
                    .fill(ACCENT);
                ui.add(progress_bar);
            }
        });
    }

    fn render_footer(&self, ui: &mut egui::Ui) {
        let (text, color) = match &self.service {
            ServiceStatus::Checking => ("Checking service…".to_string(), Color32::GRAY),
            ServiceStatus::Online(message) if message.is_empty() => {
                ("Service online".to_string(), Color32::from_rgb(0, 160, 0))
            }
            ServiceStatus::Online(message) => (message.clone(), Color32::from_rgb(0, 160, 0)),
            ServiceStatus::Unreachable => (
                "Service unreachable".to_string(),
                Color32::from_rgb(220, 50, 50),
            ),
        };

        ui.label(
            RichText::new(self.config.convert_url().to_string())
                .small()
                .weak(),
        );
        ui.colored_label(color, text);
    }
}
