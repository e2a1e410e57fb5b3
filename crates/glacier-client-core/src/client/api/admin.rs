use futures::channel::oneshot;
use glacier_shared::{
    const_config::path::{
        path_admin_cosmetics_list, PATH_ADMIN_ADD_COSMETICS, PATH_ADMIN_ADD_NEWS,
        PATH_ADMIN_GIVE_COSMETIC, PATH_ADMIN_GIVE_PLUS,
    },
    cosmetics::{CosmeticKind, StoreItem, StoreItemsResponse},
    req_args::{AddCosmeticsReqArgs, AddNewsReqArgs, FileAttachment, GiveCosmeticReqArgs, GivePlusReqArgs},
};
use reqwest::multipart;

use crate::{client::UiCallBack, Client};

pub(crate) fn attachment_part(file: FileAttachment) -> multipart::Part {
    multipart::Part::bytes(file.bytes).file_name(file.file_name)
}

fn flag(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}

impl Client {
    /// Uploads a new store item. Field names and the price triplet follow
    /// the ingest endpoint: the entered price is transmitted as `price`,
    /// `normal_price` and `sale_price` alike.
    #[tracing::instrument(skip(args, ui_notify), fields(name = %args.name, kind = %args.kind))]
    pub fn add_cosmetics<F: UiCallBack>(
        &self,
        args: AddCosmeticsReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<()>> {
        let mut form = multipart::Form::new();
        for texture in args.textures {
            // One part per animation frame, all under the same name
            form = form.part("texture", attachment_part(texture));
        }
        form = form
            .part("preview", attachment_part(args.preview))
            .text("type", args.kind.as_str())
            .text("name", args.name)
            .text("price", args.price.to_string())
            .text("normal_price", args.price.to_string())
            .text("sale_price", args.price.to_string())
            .text("category", args.category)
            .text("is_private", flag(args.is_private))
            .text("is_animated", flag(args.is_animated))
            .text("frame_delay", args.frame_delay.to_string());
        if let Some(shoulders) = args.shoulders {
            form = form.part("shoulders", attachment_part(shoulders));
        }
        let request = self
            .authed_request(&PATH_ADMIN_ADD_COSMETICS)
            .multipart(form);
        self.send_request_expect_empty(request, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn give_cosmetic<F: UiCallBack>(
        &self,
        args: GiveCosmeticReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<()>> {
        let request = self.authed_request(&PATH_ADMIN_GIVE_COSMETIC).json(&args);
        self.send_request_expect_empty(request, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn give_plus<F: UiCallBack>(
        &self,
        args: GivePlusReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<()>> {
        let request = self.authed_request(&PATH_ADMIN_GIVE_PLUS).json(&args);
        self.send_request_expect_empty(request, ui_notify)
    }

    #[tracing::instrument(skip(args, ui_notify), fields(title = %args.title))]
    pub fn add_news<F: UiCallBack>(
        &self,
        args: AddNewsReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<()>> {
        let form = multipart::Form::new()
            .part("cover", attachment_part(args.cover))
            .text("title", args.title)
            .text("body", args.body)
            .text("tags", args.tags);
        let request = self.authed_request(&PATH_ADMIN_ADD_NEWS).multipart(form);
        self.send_request_expect_empty(request, ui_notify)
    }

    /// Published items of one kind, for the give-cosmetic item picker
    #[tracing::instrument(skip(ui_notify))]
    pub fn list_cosmetics<F: UiCallBack>(
        &self,
        kind: CosmeticKind,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Vec<StoreItem>>> {
        let (tx, rx) = oneshot::channel();
        let request = self.authed_request(&path_admin_cosmetics_list(kind));
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async move {
            let msg = crate::client::process_json_body::<StoreItemsResponse>(resp)
                .await
                .map(|response| response.into_items(kind));
            crate::client::send_or_log_drop(tx, msg);
            ui_notify();
        };
        reqwest_cross::fetch(request, on_done);
        rx
    }
}
