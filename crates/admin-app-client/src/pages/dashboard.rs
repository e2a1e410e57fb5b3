use glacier_shared::stats::PlayerStats;

use super::{
    data_state::{AwaitingType, DataState},
    private, DisplayablePage,
};
use crate::{app::wake_fn, DataShared};

/// Landing page: greeting plus the live player counters
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiDashboard {
    is_open: bool,
    #[serde(skip)]
    stats: DataState<PlayerStats>,
}

impl DisplayablePage for UiDashboard {
    fn show(&mut self, ui: &mut egui::Ui, data_shared: &mut DataShared) {
        ui.heading("Hello, admin!");
        ui.separator();

        if self.stats.is_present() {
            if let DataState::Present(stats) = &self.stats {
                ui.label(format!("Registered players: {}", stats.players));
                ui.label(format!("Players online: {}", stats.players_online));
            }
            if ui.button("Refresh").clicked() {
                self.stats = DataState::None;
            }
        } else {
            let client = data_shared.client.clone();
            let ctx = ui.ctx().clone();
            self.stats.get(Some(ui), Some("Retry"), || {
                AwaitingType(client.player_stats(wake_fn(ctx)))
            });
        }
    }

    fn title_base() -> &'static str {
        "Dashboard"
    }

    fn is_page_open(&self) -> bool {
        self.is_open
    }

    fn internal_do_open_page(&mut self, _: private::Token) {
        self.is_open = true;
    }

    fn internal_do_close_page(&mut self, _: private::Token) {
        self.is_open = false;
        self.stats = DataState::None;
    }
}
