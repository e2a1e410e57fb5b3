use crate::DataShared;

pub mod add_cosmetics;
pub mod add_news;
pub mod dashboard;
pub mod data_state;
pub mod give_cosmetics;
pub mod give_plus;
pub mod login;
pub mod update_launcher;
pub mod update_version;

mod private {
    /// Used to make some trait methods private
    pub struct Token;
}

use add_cosmetics::UiAddCosmetics;
use add_news::UiAddNews;
use dashboard::UiDashboard;
use data_state::DataState;
use give_cosmetics::UiGiveCosmetics;
use give_plus::UiGivePlus;
pub use login::UiLogin;
use strum::{EnumIter, IntoEnumIterator};
use tracing::{error, info};
use update_launcher::UiUpdateLauncher;
use update_version::UiUpdateVersion;

#[derive(Debug, serde::Serialize, serde::Deserialize, EnumIter)]
pub enum UiPage {
    Dashboard(UiDashboard),
    AddCosmetics(UiAddCosmetics),
    GiveCosmetics(UiGiveCosmetics),
    GivePlus(UiGivePlus),
    AddNews(UiAddNews),
    UpdateVersion(UiUpdateVersion),
    UpdateLauncher(UiUpdateLauncher),
}

/// Trait for types that can be treated as pages to display
///
/// It uses Default and serde Traits as super traits to ensure all these
/// types implement these traits
pub trait DisplayablePage: Default + serde::Serialize + serde::de::DeserializeOwned {
    /// Displays the page
    fn show(&mut self, ui: &mut eframe::egui::Ui, data_shared: &mut DataShared);

    /// The page's title
    ///
    /// ASSUMPTION: THIS IS UNIQUE PER TYPE
    fn title_base() -> &'static str;

    /// Convenance function for working with instances inside of the enum
    fn title_base_from_instance(&self) -> &'static str {
        Self::title_base()
    }

    fn title(&self) -> String {
        Self::title_base().to_string()
    }

    fn is_page_open(&self) -> bool;

    fn open_page(&mut self) {
        info!("Open Page {}", self.title());
        self.internal_do_open_page(private::Token {});
    }

    fn close_page(&mut self) {
        info!("Close Page {}", self.title());
        self.internal_do_close_page(private::Token {});
    }

    fn internal_do_open_page(&mut self, _: private::Token);

    /// This usually clears any in-flight request state
    fn internal_do_close_page(&mut self, _: private::Token);

    /// Convenance method for chaining
    #[must_use]
    fn and_open_page(mut self) -> Self {
        self.open_page();
        self
    }

    /// Provides an opportunity for the page to change settings on the
    /// window before display
    fn adjust_window_settings<'open>(&self, window: egui::Window<'open>) -> egui::Window<'open> {
        // Provide identity default impl
        window
    }
}

macro_rules! do_on_ui_page {
    ($on:ident, $page:ident, $body:tt) => {
        match $on {
            UiPage::Dashboard($page) => $body,
            UiPage::AddCosmetics($page) => $body,
            UiPage::GiveCosmetics($page) => $body,
            UiPage::GivePlus($page) => $body,
            UiPage::AddNews($page) => $body,
            UiPage::UpdateVersion($page) => $body,
            UiPage::UpdateLauncher($page) => $body,
        }
    };
}

impl UiPage {
    #[tracing::instrument(ret)]
    pub fn new_page<T: DisplayablePage>() -> UiPage {
        for page in Self::iter() {
            if page.title_base() == T::title_base() {
                return match page {
                    UiPage::Dashboard(_) => Self::Dashboard(UiDashboard::default().and_open_page()),
                    UiPage::AddCosmetics(_) => {
                        Self::AddCosmetics(UiAddCosmetics::default().and_open_page())
                    }
                    UiPage::GiveCosmetics(_) => {
                        Self::GiveCosmetics(UiGiveCosmetics::default().and_open_page())
                    }
                    UiPage::GivePlus(_) => Self::GivePlus(UiGivePlus::default().and_open_page()),
                    UiPage::AddNews(_) => Self::AddNews(UiAddNews::default().and_open_page()),
                    UiPage::UpdateVersion(_) => {
                        Self::UpdateVersion(UiUpdateVersion::default().and_open_page())
                    }
                    UiPage::UpdateLauncher(_) => {
                        Self::UpdateLauncher(UiUpdateLauncher::default().and_open_page())
                    }
                };
            }
        }
        let msg = format!(
            "execution should never get here. All pages should be able to be found but {:?} not found",
            T::title_base()
        );
        error!("{msg}");
        unreachable!("{msg}");
    }

    pub fn display_page(&mut self, ctx: &egui::Context, data_shared: &mut DataShared) {
        do_on_ui_page!(self, page, { show_page(page, ctx, data_shared) })
    }

    pub fn title_base(&self) -> &'static str {
        do_on_ui_page!(self, page, { page.title_base_from_instance() })
    }

    pub fn is_page_open(&self) -> bool {
        do_on_ui_page!(self, page, { page.is_page_open() })
    }

    pub fn title(&self) -> String {
        do_on_ui_page!(self, page, { page.title() })
    }

    pub fn open_page(&mut self) {
        do_on_ui_page!(self, page, { page.open_page() })
    }

    pub fn close_page(&mut self) {
        do_on_ui_page!(self, page, { page.close_page() })
    }
}

fn show_page<P: DisplayablePage>(page: &mut P, ctx: &egui::Context, data_shared: &mut DataShared) {
    let mut is_open = page.is_page_open();
    if !is_open {
        return;
    }
    let mut window = egui::Window::new(page.title()).vscroll(true).hscroll(true);
    window = page.adjust_window_settings(window);
    window
        .open(&mut is_open)
        .show(ctx, |ui| page.show(ui, data_shared));
    if !is_open {
        page.close_page();
    }
}

/// Progress of one form submission as shown to the operator
#[derive(Debug)]
pub enum SaveState {
    Ongoing,
    Completed,
    Failed(String),
}

/// Polls an ongoing submission. Returns None if no save is ongoing.
///
/// A resolved request is reported on the following frame, which keeps this
/// callable from anywhere in a page's `show`.
pub(crate) fn save_outcome(save_status: &mut DataState<()>) -> Option<SaveState> {
    match save_status {
        DataState::None => {
            // No action no save ongoing
            None
        }
        DataState::AwaitingResponse(rx) => {
            if let Some(new_state) = DataState::await_data(None, rx) {
                *save_status = new_state;
            }
            Some(SaveState::Ongoing)
        }
        DataState::Present(_data) => Some(SaveState::Completed),
        DataState::Failed(e) => Some(SaveState::Failed(format!("Save failed. {e}"))),
    }
}
