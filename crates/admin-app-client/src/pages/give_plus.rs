use anyhow::Context as _;
use glacier_shared::req_args::GivePlusReqArgs;

use super::{
    data_state::{AwaitingType, DataState},
    private, save_outcome, DisplayablePage, SaveState,
};
use crate::{
    app::wake_fn,
    ui_helpers::{required_field, ui_labeled_edit},
    DataShared,
};

/// Grants a Plus subscription entitlement to one player
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiGivePlus {
    is_open: bool,
    username: String,
    /// `YYYY-MM-DD`
    plus_expiration: String,
    #[serde(skip)]
    save_status: DataState<()>,
}

impl UiGivePlus {
    fn try_into_req_args(&self) -> anyhow::Result<GivePlusReqArgs> {
        let username = required_field(&self.username, "Username")?
            .try_into()
            .context("invalid username")?;
        let plus_expiration = required_field(&self.plus_expiration, "Plus expiration")?;

        Ok(GivePlusReqArgs {
            username,
            plus_expiration,
        })
    }
}

impl DisplayablePage for UiGivePlus {
    fn show(&mut self, ui: &mut egui::Ui, data_shared: &mut DataShared) {
        match save_outcome(&mut self.save_status) {
            None => {}
            Some(SaveState::Ongoing) => {
                ui.spinner();
            }
            Some(SaveState::Completed) => {
                data_shared.set_notice(format!("Plus given to {}", self.username));
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
            ui_labeled_edit(ui, &mut self.username, "Username");
            ui_labeled_edit(ui, &mut self.plus_expiration, "Plus expiration (YYYY-MM-DD)");

            if ui.button("Give plus").clicked() {
                match self.try_into_req_args() {
                    Ok(args) => {
                        self.save_status = DataState::AwaitingResponse(AwaitingType(
                            data_shared.client.give_plus(args, wake_fn(ui.ctx().clone())),
                        ));
                    }
                    Err(e) => self.save_status = DataState::Failed(format!("{e:#}")),
                }
            }
        });
    }

    fn title_base() -> &'static str {
        "Give plus"
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
