use futures::channel::oneshot;
use glacier_shared::{
    const_config::path::PATH_STATS,
    stats::{PlayerStats, StatsResponse},
};

use crate::{client::UiCallBack, Client};

pub mod admin;
pub mod updates;

impl Client {
    /// Live player counters for the dashboard. Public endpoint, no bearer
    /// token attached.
    #[tracing::instrument(skip(ui_notify))]
    pub fn player_stats<F: UiCallBack>(
        &self,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<PlayerStats>> {
        let (tx, rx) = oneshot::channel();
        let request = self.request(&PATH_STATS);
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async move {
            let msg = super::process_json_body::<StatsResponse>(resp)
                .await
                .map(|response| response.stats);
            super::send_or_log_drop(tx, msg);
            ui_notify();
        };
        reqwest_cross::fetch(request, on_done);
        rx
    }
}
