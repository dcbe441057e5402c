use egui::Ui;
use egui_material_icons::icons;
use prepdeck_models::FeedbackResponse;

pub struct ScoreCard;

impl ScoreCard {
    pub fn show(ui: &mut Ui, feedback: &FeedbackResponse) {
        egui::Frame::NONE
            .fill(ui.style().visuals.widgets.inactive.bg_fill)
            .corner_radius(8.0)
            .inner_margin(egui::Margin::same(12))
            .show(ui, |ui| {
                ui.vertical(|ui| {
                    ui.label(
                        egui::RichText::new(format!(
                            "{} Overall score: {}/10",
                            icons::ICON_STAR,
                            feedback.score
                        ))
                        .size(16.0)
                        .strong(),
                    );

                    ui.add_space(6.0);
                    ui.label(&feedback.feedback);

                    if let Some(rubric) = &feedback.rubric {
                        ui.add_space(8.0);
                        ui.separator();
                        for (name, value) in [
                            ("Clarity", rubric.clarity),
                            ("Structure", rubric.structure),
                            ("Relevance", rubric.relevance),
                            ("Conciseness", rubric.conciseness),
                        ] {
                            ui.horizontal(|ui| {
                                ui.label(name);
                                ui.add(
                                    egui::ProgressBar::new(f32::from(value) / 5.0)
                                        .desired_width(160.0)
                                        .text(format!("{}/5", value)),
                                );
                            });
                        }
                    }
                });
            });
    }
}
