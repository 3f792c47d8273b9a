//! src/routes/admin/settings.rs

use crate::configuration::{DashboardSettings, WebSsoSettings};
use crate::domain::AutocompleteSetting;
use actix_web::{web, Responder};
use askama_actix::Template;

#[derive(Template)]
#[template(path = "admin/settings.html")]
struct SettingsTemplate {
    password_autocomplete: &'static str,
    redirect_field_name: String,
    forgot_password_url: String,
    multidomain_support: bool,
    regions: Vec<String>,
    websso_enabled: bool,
}

/// Read-only view of the login panel configuration, admins only.
pub async fn admin_settings(
    dashboard: web::Data<DashboardSettings>,
    websso: web::Data<WebSsoSettings>,
) -> impl Responder {
    SettingsTemplate {
        password_autocomplete: AutocompleteSetting::parse(
            dashboard.password_autocomplete.as_deref(),
        )
        .attribute(),
        redirect_field_name: dashboard.redirect_field_name.clone(),
        forgot_password_url: dashboard.forgot_password_url(),
        multidomain_support: dashboard.multidomain_support,
        regions: dashboard.regions.iter().map(|r| r.name.clone()).collect(),
        websso_enabled: websso.enabled,
    }
}
