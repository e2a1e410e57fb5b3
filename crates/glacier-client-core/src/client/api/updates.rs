use futures::channel::oneshot;
use glacier_shared::{
    const_config::path::{PATH_UPDATES_UPDATE_LAUNCHER, PATH_UPDATES_UPDATE_VERSION},
    req_args::{UpdateLauncherReqArgs, UpdateVersionReqArgs},
};
use reqwest::multipart;

use super::admin::attachment_part;
use crate::{client::UiCallBack, Client};

impl Client {
    /// Publishes a new game-client build to one release branch
    #[tracing::instrument(skip(args, ui_notify), fields(version = %args.version, branch = %args.branch))]
    pub fn update_version<F: UiCallBack>(
        &self,
        args: UpdateVersionReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<()>> {
        let form = multipart::Form::new()
            .part("jar", attachment_part(args.jar))
            .text("version", args.version)
            .text("branch", args.branch.as_str())
            .text("description", args.description);
        let request = self
            .authed_request(&PATH_UPDATES_UPDATE_VERSION)
            .multipart(form);
        self.send_request_expect_empty(request, ui_notify)
    }

    /// Publishes a new launcher build. Launchers have no branches.
    #[tracing::instrument(skip(args, ui_notify), fields(version = %args.version))]
    pub fn update_launcher<F: UiCallBack>(
        &self,
        args: UpdateLauncherReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<()>> {
        let form = multipart::Form::new()
            .part("exe", attachment_part(args.exe))
            .text("version", args.version)
            .text("description", args.description);
        let request = self
            .authed_request(&PATH_UPDATES_UPDATE_LAUNCHER)
            .multipart(form);
        self.send_request_expect_empty(request, ui_notify)
    }
}
