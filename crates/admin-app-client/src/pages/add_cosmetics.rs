use glacier_shared::{
    cosmetics::CosmeticKind,
    req_args::{AddCosmeticsReqArgs, FileAttachment},
};
use strum::IntoEnumIterator as _;

use super::{
    data_state::{AwaitingType, DataState},
    private, save_outcome, DisplayablePage, SaveState,
};
use crate::{
    app::wake_fn,
    ui_helpers::{load_attachment, required_field, ui_labeled_edit},
    DataShared,
};

/// Uploads a new store item. Animated cosmetics take one texture file per
/// frame plus a frame delay; the rest take a single texture.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiAddCosmetics {
    is_open: bool,
    kind: CosmeticKind,
    name: String,
    category: String,
    price: u32,
    is_private: bool,
    is_animated: bool,
    /// Milliseconds between animation frames
    frame_delay: u32,
    texture_paths: Vec<String>,
    preview_path: String,
    shoulders_path: String,
    #[serde(skip)]
    save_status: DataState<()>,
}

impl Default for UiAddCosmetics {
    fn default() -> Self {
        Self {
            is_open: false,
            kind: Default::default(),
            name: Default::default(),
            category: Default::default(),
            price: 0,
            is_private: false,
            is_animated: false,
            frame_delay: 0,
            texture_paths: vec![String::new()],
            preview_path: Default::default(),
            shoulders_path: Default::default(),
            save_status: Default::default(),
        }
    }
}

impl UiAddCosmetics {
    fn try_into_req_args(&self) -> anyhow::Result<AddCosmeticsReqArgs> {
        let name = required_field(&self.name, "Name")?;
        let category = required_field(&self.category, "Category")?;

        let mut textures = Vec::new();
        for path in &self.texture_paths {
            // Blank rows are allowed, only filled ones count
            if path.trim().is_empty() {
                continue;
            }
            textures.push(load_attachment(path.trim())?);
        }
        if textures.is_empty() {
            anyhow::bail!("Texture is required");
        }
        let preview = load_attachment(&required_field(&self.preview_path, "Preview")?)?;
        let shoulders: Option<FileAttachment> = if self.shoulders_path.trim().is_empty() {
            None
        } else {
            Some(load_attachment(self.shoulders_path.trim())?)
        };

        Ok(AddCosmeticsReqArgs {
            kind: self.kind,
            name,
            category,
            price: self.price,
            is_private: self.is_private,
            is_animated: self.is_animated,
            frame_delay: if self.is_animated { self.frame_delay } else { 0 },
            textures,
            preview,
            shoulders,
        })
    }

    fn ui_texture_list(&mut self, ui: &mut egui::Ui) {
        ui.label("Texture file(s)");
        let mut to_remove = None;
        for (i, path) in self.texture_paths.iter_mut().enumerate() {
            ui.horizontal(|ui| {
                ui.add(egui::TextEdit::singleline(path).hint_text("Texture path"));
                if self.is_animated && ui.button("x").clicked() {
                    to_remove = Some(i);
                }
            });
        }
        if let Some(i) = to_remove {
            self.texture_paths.remove(i);
            if self.texture_paths.is_empty() {
                self.texture_paths.push(String::new());
            }
        }
        if self.is_animated && ui.button("Add frame").clicked() {
            self.texture_paths.push(String::new());
        }
    }
}

impl DisplayablePage for UiAddCosmetics {
    fn show(&mut self, ui: &mut egui::Ui, data_shared: &mut DataShared) {
        match save_outcome(&mut self.save_status) {
            None => {}
            Some(SaveState::Ongoing) => {
                ui.spinner();
            }
            Some(SaveState::Completed) => {
                data_shared.set_notice(format!("Cosmetics added: {}", self.name));
                self.save_status = DataState::None;
                self.is_open = false;
                return;
            }
            Some(SaveState::Failed(e)) => {
                ui.colored_label(ui.visuals().error_fg_color, e);
                if ui.button("Clear error status").clicked() {
                    self.save_status = DataState::None;
                }
                ui.separator();
            }
        }

        let busy = self.save_status.is_awaiting();
        ui.add_enabled_ui(!busy, |ui| {
            egui::ComboBox::from_label("Type")
                .selected_text(self.kind.as_str())
                .show_ui(ui, |ui| {
                    for kind in CosmeticKind::iter() {
                        ui.selectable_value(&mut self.kind, kind, kind.as_str());
                    }
                });
            ui_labeled_edit(ui, &mut self.name, "Name");
            ui_labeled_edit(ui, &mut self.category, "Category");
            ui.horizontal(|ui| {
                ui.label("Price");
                ui.add(egui::DragValue::new(&mut self.price));
            });
            ui.checkbox(&mut self.is_private, "Is private");
            ui.checkbox(&mut self.is_animated, "Is animated");
            if self.is_animated {
                ui.horizontal(|ui| {
                    ui.label("Frame delay (ms)");
                    ui.add(egui::DragValue::new(&mut self.frame_delay));
                });
            }

            self.ui_texture_list(ui);
            ui_labeled_edit(ui, &mut self.preview_path, "Preview path");
            ui_labeled_edit(ui, &mut self.shoulders_path, "Shoulders path (optional)");

            if ui.button("Add cosmetics").clicked() {
                match self.try_into_req_args() {
                    Ok(args) => {
                        self.save_status = DataState::AwaitingResponse(AwaitingType(
                            data_shared
                                .client
                                .add_cosmetics(args, wake_fn(ui.ctx().clone())),
                        ));
                    }
                    Err(e) => self.save_status = DataState::Failed(format!("{e:#}")),
                }
            }
        });
    }

    fn title_base() -> &'static str {
        "Add cosmetics"
    }

    fn is_page_open(&self) -> bool {
        self.is_open
    }

    fn internal_do_open_page(&mut self, _: private::Token) {
        self.is_open = true;
    }

    fn internal_do_close_page(&mut self, _: private::Token) {
        self.is_open = false;
        self.save_status = DataState::None;
    }

    fn adjust_window_settings<'open>(&self, window: egui::Window<'open>) -> egui::Window<'open> {
        window.default_width(420.0)
    }
}
