//! src/utils.rs

use crate::domain::LogoutStatus;
use actix_web::cookie::Cookie;
use actix_web::{http::header::LOCATION, HttpRequest, HttpResponse};

pub const LOGIN_PATH: &str = "/auth/login/";
pub const HOME_PATH: &str = "/admin/dashboard";
pub const LOGOUT_REASON_COOKIE: &str = "logout_reason";
pub const LOGOUT_STATUS_COOKIE: &str = "logout_status";
pub const SESSION_TIMED_OUT: &str = "Session timed out.";

/// forward to other location
pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((LOCATION, location))
        .finish()
}

/// Login page url carrying `next` in the query under `field_name`.
pub fn login_path_with_next(field_name: &str, next: Option<&str>) -> String {
    match next {
        Some(next) if !next.is_empty() => format!(
            "{}?{}={}",
            LOGIN_PATH,
            urlencoding::encode(field_name),
            urlencoding::encode(next)
        ),
        _ => LOGIN_PATH.to_string(),
    }
}

/// Redirect to the login page and leave a logout reason for it to display.
pub fn logout_redirect(reason: &str, status: LogoutStatus) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((LOCATION, LOGIN_PATH))
        .cookie(logout_cookie(LOGOUT_REASON_COOKIE, reason))
        .cookie(logout_cookie(LOGOUT_STATUS_COOKIE, status.as_str()))
        .finish()
}

fn logout_cookie<'c>(name: &'c str, value: &str) -> Cookie<'c> {
    Cookie::build(name, urlencoding::encode(value).into_owned())
        .path("/")
        .http_only(true)
        .finish()
}

/// Cookie that makes the client drop a previously set logout cookie.
pub fn removal_cookie(name: &str) -> Cookie<'_> {
    let mut cookie = Cookie::build(name, "").path("/").finish();
    cookie.make_removal();
    cookie
}

/// Read a logout cookie; empty values count as absent.
/// `HttpRequest::cookie` has already percent-decoded the value.
pub fn read_logout_cookie(req: &HttpRequest, name: &str) -> Option<String> {
    req.cookie(name)
        .map(|cookie| cookie.value().to_string())
        .filter(|v| !v.is_empty())
}
