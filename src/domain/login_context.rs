//! src/domain/login_context.rs

use crate::configuration::{DashboardSettings, WebSsoSettings};

/// Browser password autocomplete as configured for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutocompleteSetting {
    On,
    Off,
}

impl AutocompleteSetting {
    /// Anything but the exact flag `on`, including a missing flag, is `Off`.
    pub fn parse(flag: Option<&str>) -> Self {
        match flag {
            Some("on") => Self::On,
            _ => Self::Off,
        }
    }

    /// Decoy inputs are only needed while autocomplete is unwanted.
    pub fn needs_fake_fields(&self) -> bool {
        *self == Self::Off
    }

    /// Value of the `autocomplete` attribute on credential inputs.
    pub fn attribute(&self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
        }
    }
}

/// Outcome of the logout that sent the user back to the login page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutStatus {
    Success,
    Failure,
}

impl LogoutStatus {
    pub fn parse(status: Option<&str>) -> Self {
        match status {
            Some("success") => Self::Success,
            _ => Self::Failure,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "error",
        }
    }

    pub fn alert_class(&self) -> &'static str {
        match self {
            Self::Success => "alert-success",
            Self::Failure => "alert-danger",
        }
    }
}

/// Everything the login panel reads while rendering. Built once per request.
#[derive(Debug, Clone)]
pub struct LoginContext {
    pub password_autocomplete: AutocompleteSetting,
    pub show_sso_opts: bool,
    pub is_authenticated: bool,
    /// `next` as found in the query string, kept even when empty.
    pub requested_next: Option<String>,
    pub logout_reason: Option<String>,
    pub logout_status: LogoutStatus,
    pub csrf_failure: Option<String>,
    /// Where to go after a successful login.
    pub next: Option<String>,
    pub redirect_field_name: String,
}

impl LoginContext {
    /// Context of an anonymous request without any alert to show.
    pub fn from_settings(dashboard: &DashboardSettings, websso: &WebSsoSettings) -> Self {
        Self {
            password_autocomplete: AutocompleteSetting::parse(
                dashboard.password_autocomplete.as_deref(),
            ),
            show_sso_opts: websso.enabled,
            is_authenticated: false,
            requested_next: None,
            logout_reason: None,
            logout_status: LogoutStatus::Failure,
            csrf_failure: None,
            next: None,
            redirect_field_name: dashboard.redirect_field_name.clone(),
        }
    }

    /// The user is logged in but was sent here from a resource they may not access.
    pub fn permission_denied_target(&self) -> Option<&str> {
        if self.is_authenticated {
            self.requested_next.as_deref()
        } else {
            None
        }
    }

    /// Redirect target for the hidden form field, if any.
    pub fn redirect_target(&self) -> Option<&str> {
        self.next.as_deref().filter(|n| !n.is_empty())
    }
}
