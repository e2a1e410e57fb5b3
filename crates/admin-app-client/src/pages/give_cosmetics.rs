use anyhow::Context as _;
use egui_extras::{Column, TableBuilder};
use glacier_shared::{
    cosmetics::{CosmeticKind, StoreItem},
    id::CosmeticId,
    req_args::GiveCosmeticReqArgs,
};
use strum::IntoEnumIterator as _;

use super::{
    data_state::{AwaitingType, DataState},
    private, save_outcome, DisplayablePage, SaveState,
};
use crate::{app::wake_fn, ui_helpers::required_field, DataShared};

/// Grants one published cosmetic to one player. The item picker works off
/// the live per-kind listing, fetched when the page opens and refetched
/// when the kind selection changes.
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiGiveCosmetics {
    is_open: bool,
    kind: CosmeticKind,
    username: String,
    #[serde(skip)]
    selected: Option<CosmeticId>,
    #[serde(skip)]
    items: DataState<Vec<StoreItem>>,
    #[serde(skip)]
    save_status: DataState<()>,
}

impl UiGiveCosmetics {
    fn try_into_req_args(&self) -> anyhow::Result<GiveCosmeticReqArgs> {
        let username = required_field(&self.username, "Username")?
            .try_into()
            .context("invalid username")?;
        let cosmetics_id = self.selected.context("no item selected")?;

        Ok(GiveCosmeticReqArgs {
            kind: self.kind,
            username,
            cosmetics_id,
        })
    }

    fn ui_kind_picker(&mut self, ui: &mut egui::Ui) {
        let before = self.kind;
        egui::ComboBox::from_label("Type")
            .selected_text(self.kind.as_str())
            .show_ui(ui, |ui| {
                for kind in CosmeticKind::iter() {
                    ui.selectable_value(&mut self.kind, kind, kind.as_str());
                }
            });
        if before != self.kind {
            // Different kind, different catalogue
            self.selected = None;
            self.items = DataState::None;
        }
    }

    fn ui_item_table(&mut self, ui: &mut egui::Ui, items: &[StoreItem]) {
        if items.is_empty() {
            ui.label("No items published for this type yet");
            return;
        }
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto())
            .column(Column::remainder())
            .column(Column::auto())
            .column(Column::auto())
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("Id");
                });
                header.col(|ui| {
                    ui.strong("Name");
                });
                header.col(|ui| {
                    ui.strong("Category");
                });
                header.col(|ui| {
                    ui.strong("Price");
                });
            })
            .body(|mut body| {
                for item in items {
                    body.row(18.0, |mut row| {
                        row.col(|ui| {
                            let is_selected = self.selected == Some(item.id);
                            if ui.selectable_label(is_selected, item.id.to_string()).clicked() {
                                self.selected = Some(item.id);
                            }
                        });
                        row.col(|ui| {
                            ui.label(&item.name);
                        });
                        row.col(|ui| {
                            ui.label(&item.category);
                        });
                        row.col(|ui| {
                            ui.label(item.price.to_string());
                        });
                    });
                }
            });
    }
}

impl DisplayablePage for UiGiveCosmetics {
    fn show(&mut self, ui: &mut egui::Ui, data_shared: &mut DataShared) {
        match save_outcome(&mut self.save_status) {
            None => {}
            Some(SaveState::Ongoing) => {
                ui.spinner();
            }
            Some(SaveState::Completed) => {
                data_shared.set_notice(format!("Cosmetic given to {}", self.username));
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
            self.ui_kind_picker(ui);
            ui.horizontal(|ui| {
                ui.label("Username");
                ui.add(egui::TextEdit::singleline(&mut self.username).hint_text("Username"));
            });

            if self.items.is_present() {
                let items = match &self.items {
                    DataState::Present(items) => items.clone(),
                    _ => unreachable!("just checked is_present"),
                };
                self.ui_item_table(ui, &items);
            } else {
                let client = data_shared.client.clone();
                let kind = self.kind;
                let ctx = ui.ctx().clone();
                self.items.get(Some(ui), Some("Retry loading items"), || {
                    AwaitingType(client.list_cosmetics(kind, wake_fn(ctx)))
                });
            }

            if ui.button("Give cosmetics").clicked() {
                match self.try_into_req_args() {
                    Ok(args) => {
                        self.save_status = DataState::AwaitingResponse(AwaitingType(
                            data_shared
                                .client
                                .give_cosmetic(args, wake_fn(ui.ctx().clone())),
                        ));
                    }
                    Err(e) => self.save_status = DataState::Failed(format!("{e:#}")),
                }
            }
        });
    }

    fn title_base() -> &'static str {
        "Give cosmetics"
    }

    fn is_page_open(&self) -> bool {
        self.is_open
    }

    fn internal_do_open_page(&mut self, _: private::Token) {
        self.is_open = true;
    }

    fn internal_do_close_page(&mut self, _: private::Token) {
        self.is_open = false;
        self.selected = None;
        self.items = DataState::None;
        self.save_status = DataState::None;
    }
}
