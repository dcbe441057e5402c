use crate::state::{Speaker, TranscriptEntry};
use egui::Ui;
use egui_material_icons::icons;

pub struct ChatBubble;

impl ChatBubble {
    pub fn show(ui: &mut Ui, entry: &TranscriptEntry) {
        let is_candidate = entry.speaker == Speaker::Candidate;
        let layout = if is_candidate {
            egui::Layout::right_to_left(egui::Align::TOP)
        } else {
            egui::Layout::left_to_right(egui::Align::TOP)
        };

        ui.with_layout(layout, |ui| {
            let fill = if is_candidate {
                ui.style().visuals.widgets.inactive.bg_fill
            } else {
                ui.style().visuals.extreme_bg_color
            };

            egui::Frame::NONE
                .fill(fill)
                .corner_radius(8.0)
                .inner_margin(egui::Margin::same(10))
                .show(ui, |ui| {
                    ui.set_max_width(ui.available_width() * 0.8);
                    ui.vertical(|ui| {
                        ui.label(&entry.text);
                        if entry.voice.is_some() {
                            ui.label(
                                egui::RichText::new(format!("{} Voice", icons::ICON_VOLUME_UP))
                                    .size(11.0)
                                    .color(ui.style().visuals.weak_text_color()),
                            );
                        }
                    });
                });
        });
        ui.add_space(6.0);
    }
}
