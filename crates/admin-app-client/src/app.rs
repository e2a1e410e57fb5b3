use futures::channel::oneshot;
use glacier_client_core::{AuthStatus, Client, UiCallBack};
use tracing::{debug, error, info, instrument, warn};

use crate::pages::{
    add_cosmetics::UiAddCosmetics, add_news::UiAddNews, dashboard::UiDashboard,
    give_cosmetics::UiGiveCosmetics, give_plus::UiGivePlus, update_launcher::UiUpdateLauncher,
    update_version::UiUpdateVersion, DisplayablePage, UiLogin, UiPage,
};

/// We derive Deserialize/Serialize so we can persist app state on shutdown.
#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct AdminApp {
    #[serde(skip)]
    login_page: Option<UiLogin>,
    data_shared: DataShared,
    active_pages: Vec<UiPage>,
    #[serde(skip)]
    auth_gate: AuthGate,
}

/// Session context handed to the route guard and every page controller
#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct DataShared {
    /// Kept across restarts so the login form comes prefilled
    pub email: String,

    #[serde(skip)]
    pub display_name: String,
    #[serde(skip)]
    pub client: Client,
    #[serde(skip)]
    notice: Option<String>,
}

/// Authorization decision per render, resolved **before** the first
/// protected page is shown. A stored session alone is never enough to
/// render protected pages; it has to pass validation first, which removes
/// the window where a soon-to-be-invalidated session briefly renders
/// protected content.
#[derive(Debug, Default)]
enum AuthGate {
    /// No proven session; the login page is shown
    #[default]
    Unauthorized,
    /// Validation of a stored session is in flight; an interstitial is
    /// shown, never a protected page
    Unknown(oneshot::Receiver<AuthStatus>),
    Authorized,
}

impl AuthGate {
    fn resolve(status: AuthStatus) -> Self {
        if status.is_valid() {
            AuthGate::Authorized
        } else {
            AuthGate::Unauthorized
        }
    }
}

impl DataShared {
    /// Doesn't do anything if there is no stored session
    #[instrument]
    pub(crate) fn mark_login_complete(&mut self) {
        if let Some(session) = self.client.current_session() {
            debug!("Updating email to {}", session.email);
            self.email = session.email;
            self.display_name = session.original_username;
        } else {
            warn!("No session found in client");
        }
    }

    pub fn set_notice(&mut self, notice: String) {
        info!(%notice);
        self.notice = Some(notice);
    }
}

impl eframe::App for AdminApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        info!("Saving with key: {}", eframe::APP_KEY);
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.top_panel(ctx);
        self.bottom_panel(ctx);
        self.show_pages(ctx);

        // Request repaint after 1 second
        ctx.request_repaint_after(std::time::Duration::from_secs(1));
    }
}

impl AdminApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, client: Client) -> Self {
        // Load previous app state (if any).
        // Note that you must enable the `persistence` feature for this to work.
        let mut app: AdminApp = if let Some(storage) = cc.storage {
            info!("Storage found. Loading...");
            match eframe::get_value(storage, eframe::APP_KEY) {
                Some(value) => {
                    info!("Load succeeded");
                    value
                }
                None => {
                    warn!("Load failed");
                    Default::default()
                }
            }
        } else {
            info!("No storage found");
            Default::default()
        };

        app.data_shared.client = client;

        // A stored session is only trusted after it survives validation,
        // so the gate starts Unknown, not Authorized
        app.auth_gate = if app.data_shared.client.current_session().is_some() {
            AuthGate::Unknown(
                app.data_shared
                    .client
                    .validate(wake_fn(cc.egui_ctx.clone())),
            )
        } else {
            AuthGate::Unauthorized
        };

        app
    }

    fn menu(&mut self, ui: &mut egui::Ui) {
        ui.style_mut().wrap_mode = Some(egui::TextWrapMode::Extend);
        ui.menu_button("Pages", |ui| {
            self.ui_menu_page_btn::<UiDashboard>(ui);
            ui.separator();
            self.ui_menu_page_btn::<UiAddCosmetics>(ui);
            self.ui_menu_page_btn::<UiGiveCosmetics>(ui);
            self.ui_menu_page_btn::<UiGivePlus>(ui);
            ui.separator();
            self.ui_menu_page_btn::<UiAddNews>(ui);
            ui.separator();
            self.ui_menu_page_btn::<UiUpdateVersion>(ui);
            self.ui_menu_page_btn::<UiUpdateLauncher>(ui);
        });
    }

    fn ui_menu_page_btn<T: DisplayablePage>(&mut self, ui: &mut egui::Ui) {
        let base_title = T::title_base();
        if ui.button(base_title).clicked() {
            if let Some(page) = self
                .active_pages
                .iter_mut()
                .find(|page| page.title_base() == base_title)
            {
                page.open_page();
            } else {
                self.active_pages.push(UiPage::new_page::<T>());
            }
            ui.close_menu();
        }
    }

    fn top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                egui::widgets::global_theme_preference_switch(ui);
                if matches!(self.auth_gate, AuthGate::Authorized) {
                    ui.separator();
                    self.menu(ui);
                }
            });
        });
    }

    fn bottom_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("bottom_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(notice) = self.data_shared.notice.clone() {
                    if ui.small_button("x").clicked() {
                        self.data_shared.notice = None;
                    }
                    ui.label(notice);
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    egui::warn_if_debug_build(ui);
                    if matches!(self.auth_gate, AuthGate::Authorized) {
                        if ui.button("Logout").clicked() {
                            self.logout();
                        }
                        ui.label(format!("Logged in as {}", self.data_shared.display_name));
                    }
                });
            });
        });
    }

    fn show_pages(&mut self, ctx: &egui::Context) {
        match &mut self.auth_gate {
            AuthGate::Unknown(rx) => match rx.try_recv() {
                Ok(None) => {
                    egui::CentralPanel::default().show(ctx, |ui| {
                        ui.vertical_centered(|ui| {
                            ui.spinner();
                            ui.label("Checking session...");
                        });
                    });
                }
                Ok(Some(status)) => {
                    info!(?status, "stored session validation resolved");
                    self.auth_gate = AuthGate::resolve(status);
                    if matches!(self.auth_gate, AuthGate::Authorized) {
                        self.on_authorized();
                    }
                    ctx.request_repaint(); // Repaint with new value
                }
                Err(e) => {
                    error!("Error receiving on channel. Canceled: {e:?}");
                    self.auth_gate = AuthGate::Unauthorized;
                }
            },
            AuthGate::Authorized => {
                if self.data_shared.client.current_session().is_none() {
                    // Session disappeared out from under us (cleared by a
                    // failed re-validation or an external logout)
                    self.auth_gate = AuthGate::Unauthorized;
                    return;
                }
                self.login_page = None; // Clear out login page once we are logged in
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.weak("Use the Pages menu to open a form");
                });
                // Pages closed by the operator get dropped; the menu can
                // bring them back with a fresh state
                self.active_pages.retain(|page| page.is_page_open());
                for page in self.active_pages.iter_mut() {
                    page.display_page(ctx, &mut self.data_shared);
                }
            }
            AuthGate::Unauthorized => {
                if self.data_shared.client.current_session().is_some() {
                    // The login page just persisted a privileged session
                    self.on_authorized();
                    ctx.request_repaint();
                    return;
                }
                self.login_page
                    .get_or_insert(Default::default())
                    .show(ctx, &mut self.data_shared);
            }
        }
    }

    fn on_authorized(&mut self) {
        self.auth_gate = AuthGate::Authorized;
        self.login_page = None;
        self.data_shared.mark_login_complete();
        self.ensure_dashboard();
    }

    /// The dashboard plays the role of the root page: it is what a fresh
    /// authorized shell shows
    fn ensure_dashboard(&mut self) {
        if self.active_pages.iter().any(|page| page.is_page_open()) {
            return;
        }
        if let Some(dashboard) = self
            .active_pages
            .iter_mut()
            .find(|page| page.title_base() == UiDashboard::title_base())
        {
            dashboard.open_page();
        } else {
            self.active_pages.push(UiPage::new_page::<UiDashboard>());
        }
    }

    #[instrument(skip(self))]
    fn logout(&mut self) {
        self.data_shared.client.logout();
        self.data_shared.display_name.clear();
        self.active_pages.clear();
        self.auth_gate = AuthGate::Unauthorized;
    }
}

#[inline]
pub fn wake_fn(ctx: egui::Context) -> impl UiCallBack {
    move || ctx.request_repaint()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_starts_unauthorized_so_nothing_protected_renders_by_default() {
        assert!(matches!(AuthGate::default(), AuthGate::Unauthorized));
    }

    #[test]
    fn gate_only_authorizes_on_a_valid_status() {
        assert!(matches!(
            AuthGate::resolve(AuthStatus::Valid),
            AuthGate::Authorized
        ));
        for status in [
            AuthStatus::NoSession,
            AuthStatus::Invalid,
            AuthStatus::InsufficientPrivilege,
        ] {
            assert!(matches!(AuthGate::resolve(status), AuthGate::Unauthorized));
        }
    }
}
