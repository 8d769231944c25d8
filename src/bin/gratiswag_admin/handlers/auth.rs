#![deny(clippy::all, clippy::pedantic)]

use std::path::Path;

use gratiswag_admin::{
    application::{
        forms::{
            ChangePasswordForm, ForgotPasswordForm, FormSyncView, LoginForm, ResetPasswordForm,
            VerifyOtpForm,
        },
        routes::AdminRoute,
    },
    infra::http::resources::ProfileApi,
};
use serde::Serialize;
use tracing::info;

use crate::args::{AuthCmd, OutputFormat};
use crate::client::{CliError, Ctx};
use crate::handlers::forms;
use crate::io::Input;
use crate::print::print_json;

#[derive(Serialize)]
struct Whoami<'a> {
    subject_id: &'a str,
    display_name: &'a str,
    role: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<&'a str>,
}

pub async fn handle(ctx: &Ctx, cmd: AuthCmd) -> Result<(), CliError> {
    match cmd {
        AuthCmd::Login {
            email,
            password_file,
            callback_url,
        } => {
            let password = Input::stdin()
                .secret(password_file.as_deref(), "Password")
                .await?;
            let signed_in = ctx
                .auth()
                .login(&LoginForm { email, password }, callback_url.as_deref())
                .await?;
            let session = &signed_in.session;
            match ctx.output {
                OutputFormat::Json => print_json(&Whoami {
                    subject_id: session.subject_id(),
                    display_name: session.display_name(),
                    role: session.role(),
                    location: Some(&signed_in.location),
                }),
                OutputFormat::Table => {
                    println!(
                        "Signed in as {} ({}). Continue at {}",
                        session.display_name(),
                        session.role(),
                        signed_in.location
                    );
                    Ok(())
                }
            }
        }
        AuthCmd::Logout => {
            ctx.sessions().try_clear()?;
            info!(target = "gratiswag_admin::auth", "signed out");
            println!("Signed out.");
            Ok(())
        }
        AuthCmd::Whoami => {
            let session = ctx.require_session(AdminRoute::Dashboard)?;
            match ctx.output {
                OutputFormat::Json => print_json(&Whoami {
                    subject_id: session.subject_id(),
                    display_name: session.display_name(),
                    role: session.role(),
                    location: None,
                }),
                OutputFormat::Table => {
                    println!("{} ({})", session.display_name(), session.role());
                    Ok(())
                }
            }
        }
        AuthCmd::ForgotPassword { email } => {
            let token = ctx
                .auth()
                .request_password_reset(&ForgotPasswordForm {
                    email: email.clone(),
                })
                .await?;
            ctx.sessions().set_reset_token(token);
            println!("A one-time code was sent to {email}. Continue with `auth verify-otp`.");
            Ok(())
        }
        AuthCmd::VerifyOtp { otp } => {
            let reset = ctx.sessions().reset_token().ok_or(CliError::ResetNotStarted)?;
            let token = ctx.auth().verify_otp(&reset, &VerifyOtpForm { otp }).await?;
            ctx.sessions().set_reset_token(token);
            println!("Code verified. Continue with `auth reset-password`.");
            Ok(())
        }
        AuthCmd::ResetPassword { password_file } => {
            let reset = ctx.sessions().reset_token().ok_or(CliError::ResetNotStarted)?;
            let (new_password, confirm_password) =
                new_password(&mut Input::stdin(), password_file.as_deref()).await?;
            ctx.auth()
                .reset_password(
                    &reset,
                    &ResetPasswordForm {
                        new_password,
                        confirm_password,
                    },
                )
                .await?;
            ctx.sessions().clear_reset_token();
            println!("Password updated. Sign in with `auth login`.");
            Ok(())
        }
        AuthCmd::ChangePassword {
            current_password_file,
            new_password_file,
        } => {
            ctx.require_session(AdminRoute::Settings)?;
            let mut input = Input::stdin();
            let current_password = input
                .secret(current_password_file.as_deref(), "Current password")
                .await?;
            let (new_password, confirm_password) =
                new_password(&mut input, new_password_file.as_deref()).await?;
            let form = ChangePasswordForm {
                current_password,
                new_password,
                confirm_password,
            };
            let target = ProfileApi::new(ctx.client()).change_password_target();
            let view = FormSyncView::new(form, ctx.max_image_bytes());
            forms::submit(ctx, view, None, &target).await
        }
    }
}

/// New password plus its confirmation; a file stands for both.
async fn new_password(
    input: &mut Input,
    file: Option<&Path>,
) -> Result<(String, String), CliError> {
    if file.is_some() {
        let password = input.secret(file, "New password").await?;
        return Ok((password.clone(), password));
    }
    let password = input.line("New password").await?;
    let confirm = input.line("Confirm password").await?;
    Ok((password, confirm))
}
