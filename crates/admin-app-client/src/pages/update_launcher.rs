use glacier_shared::req_args::UpdateLauncherReqArgs;

use super::{
    data_state::{AwaitingType, DataState},
    private, save_outcome, DisplayablePage, SaveState,
};
use crate::{
    app::wake_fn,
    ui_helpers::{load_attachment, required_field, ui_labeled_edit},
    DataShared,
};

/// Pushes a launcher build. Launchers have no release branches.
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiUpdateLauncher {
    is_open: bool,
    version: String,
    /// Optional release notes
    description: String,
    exe_path: String,
    #[serde(skip)]
    save_status: DataState<()>,
}

impl UiUpdateLauncher {
    fn try_into_req_args(&self) -> anyhow::Result<UpdateLauncherReqArgs> {
        let version = required_field(&self.version, "Version")?;
        let exe = load_attachment(&required_field(&self.exe_path, "Exe")?)?;

        Ok(UpdateLauncherReqArgs {
            version,
            description: self.description.trim().to_string(),
            exe,
        })
    }
}

impl DisplayablePage for UiUpdateLauncher {
    fn show(&mut self, ui: &mut egui::Ui, data_shared: &mut DataShared) {
        match save_outcome(&mut self.save_status) {
            None => {}
            Some(SaveState::Ongoing) => {
                ui.spinner();
            }
            Some(SaveState::Completed) => {
                data_shared.set_notice(format!("Launcher {} published", self.version));
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
            ui_labeled_edit(ui, &mut self.version, "Version");
            ui.label("Description");
            ui.add(egui::TextEdit::multiline(&mut self.description).hint_text("Description"));
            ui_labeled_edit(ui, &mut self.exe_path, "Exe path");

            if ui.button("Update launcher").clicked() {
                match self.try_into_req_args() {
                    Ok(args) => {
                        self.save_status = DataState::AwaitingResponse(AwaitingType(
                            data_shared
                                .client
                                .update_launcher(args, wake_fn(ui.ctx().clone())),
                        ));
                    }
                    Err(e) => self.save_status = DataState::Failed(format!("{e:#}")),
                }
            }
        });
    }

    fn title_base() -> &'static str {
        "Update launcher"
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
