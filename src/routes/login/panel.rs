//! src/routes/login/panel.rs
//!
//! The login panel: form wrapper, alert banners, redirect field, the
//! credential field set and the footer with the submit button.

use crate::configuration::{DashboardSettings, WebSsoSettings};
use crate::csrf::{CsrfToken, CSRF_FIELD_NAME};
use crate::domain::{credential_fields, CredentialField, LoginContext};
use crate::error::DashResult;
use crate::utils::{HOME_PATH, LOGIN_PATH};
use actix_web::http::{header::ContentType, StatusCode};
use actix_web::HttpResponseBuilder;
use anyhow::Context;
use askama_actix::Template;

#[derive(Template)]
#[template(path = "auth/_login_form.html")]
pub struct LoginPanel {
    login_url: &'static str,
    csrf_field_name: &'static str,
    csrf_token: String,
    show_fake_fields: bool,
    show_sso_opts: bool,
    permission_denied_next: Option<String>,
    home_url: &'static str,
    logout_reason: Option<String>,
    logout_alert_class: &'static str,
    csrf_failure: Option<String>,
    redirect_field_name: String,
    next: Option<String>,
    fields: Vec<CredentialField>,
    form_errors: Vec<String>,
    forgot_password_url: String,
}

impl LoginPanel {
    pub fn new(
        context: &LoginContext,
        csrf_token: &CsrfToken,
        fields: Vec<CredentialField>,
        form_errors: Vec<String>,
        forgot_password_url: String,
    ) -> Self {
        Self {
            login_url: LOGIN_PATH,
            csrf_field_name: CSRF_FIELD_NAME,
            csrf_token: csrf_token.as_ref().to_string(),
            show_fake_fields: context.password_autocomplete.needs_fake_fields(),
            show_sso_opts: context.show_sso_opts,
            permission_denied_next: context.permission_denied_target().map(str::to_string),
            home_url: HOME_PATH,
            logout_reason: context.logout_reason.clone(),
            logout_alert_class: context.logout_status.alert_class(),
            csrf_failure: context.csrf_failure.clone(),
            redirect_field_name: context.redirect_field_name.clone(),
            next: context.redirect_target().map(str::to_string),
            fields,
            form_errors,
            forgot_password_url,
        }
    }

    /// Panel for `context` with the configured credential fields.
    pub fn from_settings(
        context: &LoginContext,
        csrf_token: &CsrfToken,
        form_errors: Vec<String>,
        dashboard: &DashboardSettings,
        websso: &WebSsoSettings,
    ) -> Self {
        let fields = credential_fields(dashboard, websso, context.password_autocomplete);
        Self::new(
            context,
            csrf_token,
            fields,
            form_errors,
            dashboard.forgot_password_url(),
        )
    }
}

/// Full page around the login panel.
#[derive(Template)]
#[template(path = "auth/login.html")]
pub struct LoginPage {
    panel: LoginPanel,
}

impl LoginPage {
    pub fn new(panel: LoginPanel) -> Self {
        Self { panel }
    }

    /// Render into `response`, which already carries status and cookies.
    pub fn respond(&self, mut response: HttpResponseBuilder) -> DashResult<actix_web::HttpResponse> {
        let html = self.render().context("Failed to render the login page.")?;
        Ok(response.content_type(ContentType::html()).body(html))
    }

    pub fn respond_with_status(&self, status: StatusCode) -> DashResult<actix_web::HttpResponse> {
        self.respond(HttpResponseBuilder::new(status))
    }
}
