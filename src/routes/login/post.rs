//! src/routes/login/post.rs

use crate::authentication::{validate_credentials, Credentials, CredentialsError, UserDirectory};
use crate::configuration::{DashboardSettings, WebSsoSettings};
use crate::csrf::{verify_csrf_token, CsrfToken, CSRF_FAILURE_MESSAGE};
use crate::domain::{LoginContext, LogoutStatus, RedirectTarget, Username, ValidationError};
use crate::error::{DashResult, Error};
use crate::routes::{LoginPage, LoginPanel};
use crate::session_state::{SessionCheck, TypedSession};
use crate::startup::SessionTimeout;
use crate::utils::{
    login_path_with_next, logout_redirect, see_other, HOME_PATH, SESSION_TIMED_OUT,
};
use actix_web::http::StatusCode;
use actix_web::{error::InternalError, web, HttpRequest, HttpResponse};
use actix_web_flash_messages::FlashMessage;
use secrecy::Secret;
use std::collections::HashMap;

/// `auth_type` of a plain username/password login.
const CREDENTIALS_AUTH_TYPE: &str = "credentials";

#[derive(serde::Deserialize)]
pub struct LoginFormData {
    #[serde(rename = "csrfmiddlewaretoken", default)]
    pub csrf_token: Option<String>,
    #[serde(default)]
    pub username: String,
    pub password: Secret<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub auth_type: Option<String>,
    /// Holds the redirect field, whose name is configurable.
    #[serde(flatten)]
    pub extra: HashMap<String, String>,
}

#[tracing::instrument(
    skip(req, form, session, directory, dashboard, websso, timeout),
    fields(username=tracing::field::Empty, user_id=tracing::field::Empty)
)]
pub async fn login(
    req: HttpRequest,
    form: web::Form<LoginFormData>,
    session: TypedSession,
    directory: web::Data<UserDirectory>,
    dashboard: web::Data<DashboardSettings>,
    websso: web::Data<WebSsoSettings>,
    timeout: web::Data<SessionTimeout>,
) -> Result<HttpResponse, actix_web::Error> {
    let form = form.into_inner();
    let next = form
        .extra
        .get(&dashboard.redirect_field_name)
        .cloned()
        .filter(|n| !n.is_empty());
    let redirect = |e: Error| login_redirect(e, &dashboard.redirect_field_name, next.as_deref());

    if let Err(e) = verify_csrf_token(&session, form.csrf_token.as_deref()) {
        tracing::warn!(error.message = %e, "Rejected login form");
        return Ok(csrf_failure_page(
            &req,
            &session,
            next.clone(),
            &dashboard,
            &websso,
            timeout.0,
        )?);
    }

    if websso.enabled {
        if let Some(auth_type) = form
            .auth_type
            .as_deref()
            .filter(|t| *t != CREDENTIALS_AUTH_TYPE)
        {
            if !websso.is_known_choice(auth_type) {
                return Err(redirect(Error::UnknownAuthType(auth_type.to_string())));
            }
            tracing::info!(auth_type, "Handing login over to the identity provider");
            return Ok(see_other(&websso.redirect_url(auth_type)));
        }
    }

    let username = Username::parse(form.username).map_err(|e| redirect(e.into()))?;
    let domain = match form.domain {
        Some(domain) if dashboard.multidomain_support && !domain.trim().is_empty() => {
            domain.trim().to_string()
        }
        _ => dashboard.default_domain.clone(),
    };
    let region = match form.region.filter(|r| !r.is_empty()) {
        Some(region) if dashboard.regions.iter().any(|r| r.endpoint == region) => Some(region),
        Some(region) => return Err(redirect(ValidationError::UnknownRegion(region).into())),
        None => None,
    };
    tracing::Span::current().record("username", tracing::field::display(&username));

    let credentials = Credentials {
        username,
        domain,
        password: form.password,
    };
    match validate_credentials(credentials, &directory).await {
        Ok(mut user) => {
            tracing::Span::current().record("user_id", tracing::field::display(&user.user_id));
            user.region = region;
            session.renew();
            session.insert_user(&user).map_err(redirect)?;
            CsrfToken::rotate(&session).map_err(redirect)?;
            let location = next
                .clone()
                .and_then(|n| RedirectTarget::parse(n).ok())
                .map(|t| t.as_ref().to_string())
                .unwrap_or_else(|| HOME_PATH.to_string());
            Ok(see_other(&location))
        }
        Err(e) => {
            let e = match e {
                CredentialsError::UnexpectedError(_) => Error::UnexpectedError(e.into()),
                _ => Error::AuthError(e.into()),
            };
            Err(redirect(e))
        }
    }
}

/// Login page answering a form whose anti-forgery token did not check out.
fn csrf_failure_page(
    req: &HttpRequest,
    session: &TypedSession,
    next: Option<String>,
    dashboard: &DashboardSettings,
    websso: &WebSsoSettings,
    timeout_seconds: u64,
) -> DashResult<HttpResponse> {
    let is_authenticated = match session.check_user(timeout_seconds)? {
        SessionCheck::Active(_) => true,
        SessionCheck::Anonymous => false,
        SessionCheck::Expired => {
            return Ok(logout_redirect(SESSION_TIMED_OUT, LogoutStatus::Failure))
        }
    };
    let requested_next = web::Query::<HashMap<String, String>>::from_query(req.query_string())
        .ok()
        .and_then(|q| q.get(&dashboard.redirect_field_name).cloned());
    let context = LoginContext {
        is_authenticated,
        requested_next,
        next,
        csrf_failure: Some(CSRF_FAILURE_MESSAGE.to_string()),
        ..LoginContext::from_settings(dashboard, websso)
    };
    let csrf_token = CsrfToken::get_or_create(session)?;
    let panel = LoginPanel::from_settings(&context, &csrf_token, Vec::new(), dashboard, websso);
    LoginPage::new(panel).respond_with_status(StatusCode::FORBIDDEN)
}

fn login_redirect(e: Error, field_name: &str, next: Option<&str>) -> actix_web::Error {
    FlashMessage::error(e.to_string()).send();
    let response = see_other(&login_path_with_next(field_name, next));
    InternalError::from_response(e, response).into()
}
