use std::fmt::Debug;

use futures::channel::oneshot;
use glacier_shared::{internal_error, req_args::LoginReqArgs, session::Session};
use secrecy::{ExposeSecret, SecretString};
use tracing::{error, info};

use crate::{app::wake_fn, ui_helpers::ui_password_edit, DataShared};

#[derive(Debug)]
pub struct UiLogin {
    password: SecretString,
    login_attempt_status: LoginAttemptStatus,
}

type AwaitingType = oneshot::Receiver<anyhow::Result<Session>>;

#[derive(Default)]
enum LoginAttemptStatus {
    #[default]
    NotAttempted,
    AwaitingResponse(AwaitingType),
    Failed(String),
    Success,
}

impl Debug for LoginAttemptStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAttempted => write!(f, "NotAttempted"),
            Self::AwaitingResponse(_) => write!(f, "AwaitingResponse"),
            Self::Failed(e) => f.debug_tuple("Failed").field(e).finish(),
            Self::Success => write!(f, "Success"),
        }
    }
}

impl LoginAttemptStatus {
    fn is_allowed_to_login(&self) -> bool {
        match self {
            LoginAttemptStatus::NotAttempted | LoginAttemptStatus::Failed(_) => true,
            LoginAttemptStatus::AwaitingResponse(_) | LoginAttemptStatus::Success => false,
        }
    }
}

impl UiLogin {
    fn is_password_set(&self) -> bool {
        !self.password.expose_secret().is_empty()
    }

    fn login_prompt(&mut self, ui: &mut egui::Ui, data_shared: &mut DataShared) {
        let email_widget = egui::TextEdit::singleline(&mut data_shared.email).hint_text("Email");
        let mut lost_focus = ui.add(email_widget).lost_focus();

        lost_focus =
            ui_password_edit(ui, &mut self.password, "Password").lost_focus() || lost_focus;

        if lost_focus
            && is_allowed_to_login(self, &data_shared.email)
            && ui.input(|i| i.key_pressed(egui::Key::Enter))
        {
            self.send_login_attempt(ui, data_shared)
        }
    }

    fn check_login_attempt_status(&mut self, ui: &mut egui::Ui, data_shared: &mut DataShared) {
        match &mut self.login_attempt_status {
            LoginAttemptStatus::NotAttempted => {
                // No special UI needed
            }
            LoginAttemptStatus::Success => {
                // The gate observes the persisted session; all that is left
                // here is making the profile available for display
                data_shared.mark_login_complete();
                ui.ctx().request_repaint(); // Repaint with new value
            }
            LoginAttemptStatus::AwaitingResponse(rx) => match rx.try_recv() {
                Ok(recv_opt) => match recv_opt {
                    Some(outcome_result) => match outcome_result {
                        Ok(session) => {
                            info!(username = %session.username, "login succeeded");
                            self.login_attempt_status = LoginAttemptStatus::Success;
                            // Repaint with new value
                            ui.ctx().request_repaint();
                        }
                        Err(e) => {
                            info!("rejection returned from client-core: {e:?}");
                            self.login_attempt_status = LoginAttemptStatus::Failed(e.to_string())
                        }
                    },
                    None => {
                        ui.spinner();
                    }
                },
                Err(e) => {
                    error!("Error receiving on channel. Canceled: {e:?}");
                    self.login_attempt_status = LoginAttemptStatus::Failed(internal_error!(e));
                }
            },
            LoginAttemptStatus::Failed(e) => {
                let err_msg = format!("Login attempt failed: {e}");
                ui.separator();
                ui.colored_label(ui.visuals().error_fg_color, err_msg);
                if ui.button("Clear error status").clicked() {
                    self.login_attempt_status = LoginAttemptStatus::NotAttempted;
                }
                ui.separator();
            }
        }
    }

    pub fn show(&mut self, ctx: &egui::Context, data_shared: &mut DataShared) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Login to Glacier Admin");

                self.login_prompt(ui, data_shared);

                self.check_login_attempt_status(ui, data_shared);

                self.login_button(ui, data_shared);
            });
        });
    }

    fn login_button(&mut self, ui: &mut egui::Ui, data_shared: &mut DataShared) {
        if ui
            .add_enabled(
                is_allowed_to_login(self, &data_shared.email),
                egui::Button::new("Login"),
            )
            .clicked()
        {
            self.send_login_attempt(ui, data_shared);
        }
    }

    fn send_login_attempt(&mut self, ui: &mut egui::Ui, data_shared: &mut DataShared) {
        let args = LoginReqArgs::new(data_shared.email.clone(), self.password.clone());

        let rx = data_shared.client.login(args, wake_fn(ui.ctx().clone()));
        self.login_attempt_status = LoginAttemptStatus::AwaitingResponse(rx);
    }
}

impl Default for UiLogin {
    fn default() -> Self {
        Self {
            password: SecretString::from(""),
            login_attempt_status: Default::default(),
        }
    }
}

fn is_allowed_to_login(data: &UiLogin, email: &str) -> bool {
    !email.is_empty() && data.is_password_set() && data.login_attempt_status.is_allowed_to_login()
}
