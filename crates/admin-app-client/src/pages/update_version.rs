use glacier_shared::{req_args::UpdateVersionReqArgs, updates::UpdateBranch};
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

/// Pushes a game-client build to one release branch
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiUpdateVersion {
    is_open: bool,
    branch: UpdateBranch,
    version: String,
    /// Optional release notes
    description: String,
    jar_path: String,
    #[serde(skip)]
    save_status: DataState<()>,
}

impl UiUpdateVersion {
    fn try_into_req_args(&self) -> anyhow::Result<UpdateVersionReqArgs> {
        let version = required_field(&self.version, "Version")?;
        let jar = load_attachment(&required_field(&self.jar_path, "Jar")?)?;

        Ok(UpdateVersionReqArgs {
            branch: self.branch,
            version,
            description: self.description.trim().to_string(),
            jar,
        })
    }
}

impl DisplayablePage for UiUpdateVersion {
    fn show(&mut self, ui: &mut egui::Ui, data_shared: &mut DataShared) {
        match save_outcome(&mut self.save_status) {
            None => {}
            Some(SaveState::Ongoing) => {
                ui.spinner();
            }
            Some(SaveState::Completed) => {
                data_shared.set_notice(format!(
                    "Version {} pushed to {}",
                    self.version, self.branch
                ));
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
            egui::ComboBox::from_label("Branch")
                .selected_text(self.branch.as_str())
                .show_ui(ui, |ui| {
                    for branch in UpdateBranch::iter() {
                        ui.selectable_value(&mut self.branch, branch, branch.as_str());
                    }
                });
            ui_labeled_edit(ui, &mut self.version, "Version");
            ui.label("Description");
            ui.add(egui::TextEdit::multiline(&mut self.description).hint_text("Description"));
            ui_labeled_edit(ui, &mut self.jar_path, "Jar path");

            if ui.button("Update version").clicked() {
                match self.try_into_req_args() {
                    Ok(args) => {
                        self.save_status = DataState::AwaitingResponse(AwaitingType(
                            data_shared
                                .client
                                .update_version(args, wake_fn(ui.ctx().clone())),
                        ));
                    }
                    Err(e) => self.save_status = DataState::Failed(format!("{e:#}")),
                }
            }
        });
    }

    fn title_base() -> &'static str {
        "Update version"
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
}
