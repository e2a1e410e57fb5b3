//! Stores settings that are not expected to need to change but grouped
//! together for discoverability and reuse. Each constant should be prefixed
//! by the module name to allow importing the constant only and still be
//! readable

pub mod client {
    /// Where the admin panel points unless overridden on the command line
    pub const CLIENT_DEFAULT_SERVER_URL: &str = "https://api.glacierclient.net";

    /// Fixed key the serialized session record is stored under. The web
    /// build uses it as the `localStorage` key, the native build as the
    /// file name stem.
    pub const CLIENT_SESSION_STORAGE_KEY: &str = "auth-data";
}

pub mod path {
    mod path_spec;
    pub use path_spec::PathSpec;

    pub const PATH_ACCOUNT: PathSpec = PathSpec::get("/account");
    pub const PATH_ADMIN_ADD_COSMETICS: PathSpec = PathSpec::post("/admin/add_cosmetics");
    pub const PATH_ADMIN_ADD_NEWS: PathSpec = PathSpec::post("/admin/add_news");
    pub const PATH_ADMIN_CAPES: PathSpec = PathSpec::get("/admin/capes");
    pub const PATH_ADMIN_GIVE_COSMETIC: PathSpec = PathSpec::post("/admin/give_cosmetic");
    pub const PATH_ADMIN_GIVE_PLUS: PathSpec = PathSpec::post("/admin/give_plus");
    pub const PATH_ADMIN_ICONS: PathSpec = PathSpec::get("/admin/icons");
    pub const PATH_ADMIN_WINGS: PathSpec = PathSpec::get("/admin/wings");
    pub const PATH_AUTH_LOGIN: PathSpec = PathSpec::post("/auth/login");
    pub const PATH_STATS: PathSpec = PathSpec::get("/stats");
    pub const PATH_UPDATES_UPDATE_LAUNCHER: PathSpec = PathSpec::post("/updates/update_launcher");
    pub const PATH_UPDATES_UPDATE_VERSION: PathSpec = PathSpec::post("/updates/update_version");

    use crate::cosmetics::CosmeticKind;

    /// Listing endpoint for one cosmetic kind
    pub const fn path_admin_cosmetics_list(kind: CosmeticKind) -> PathSpec {
        match kind {
            CosmeticKind::Capes => PATH_ADMIN_CAPES,
            CosmeticKind::Wings => PATH_ADMIN_WINGS,
            CosmeticKind::Icons => PATH_ADMIN_ICONS,
        }
    }
}
