use glacier_shared::req_args::AddNewsReqArgs;

use super::{
    data_state::{AwaitingType, DataState},
    private, save_outcome, DisplayablePage, SaveState,
};
use crate::{
    app::wake_fn,
    ui_helpers::{load_attachment, required_field, ui_labeled_edit},
    DataShared,
};

/// Publishes a news post with a cover image
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiAddNews {
    is_open: bool,
    title: String,
    body: String,
    tags: String,
    cover_path: String,
    #[serde(skip)]
    save_status: DataState<()>,
}

impl UiAddNews {
    fn try_into_req_args(&self) -> anyhow::Result<AddNewsReqArgs> {
        let title = required_field(&self.title, "Title")?;
        let body = required_field(&self.body, "Body")?;
        let tags = required_field(&self.tags, "Tags")?;
        let cover = load_attachment(&required_field(&self.cover_path, "Cover")?)?;

        Ok(AddNewsReqArgs {
            title,
            body,
            tags,
            cover,
        })
    }
}

impl DisplayablePage for UiAddNews {
    fn show(&mut self, ui: &mut egui::Ui, data_shared: &mut DataShared) {
        match save_outcome(&mut self.save_status) {
            None => {}
            Some(SaveState::Ongoing) => {
                ui.spinner();
            }
            Some(SaveState::Completed) => {
                data_shared.set_notice(format!("News published: {}", self.title));
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
            ui_labeled_edit(ui, &mut self.title, "Title");
            ui.label("Body");
            ui.add(egui::TextEdit::multiline(&mut self.body).hint_text("Body"));
            ui_labeled_edit(ui, &mut self.tags, "Tags (comma separated)");
            ui_labeled_edit(ui, &mut self.cover_path, "Cover image path");

            if ui.button("Add news").clicked() {
                match self.try_into_req_args() {
                    Ok(args) => {
                        self.save_status = DataState::AwaitingResponse(AwaitingType(
                            data_shared.client.add_news(args, wake_fn(ui.ctx().clone())),
                        ));
                    }
                    Err(e) => self.save_status = DataState::Failed(format!("{e:#}")),
                }
            }
        });
    }

    fn title_base() -> &'static str {
        "Add news"
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
