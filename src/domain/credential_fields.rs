//! src/domain/credential_fields.rs

use crate::configuration::{DashboardSettings, WebSsoSettings};
use crate::domain::AutocompleteSetting;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// One input of the credential field set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialField {
    pub name: &'static str,
    pub label: &'static str,
    /// `text` or `password`; ignored for selects.
    pub input_type: &'static str,
    pub options: Vec<SelectOption>,
    pub initial: String,
    pub autofocus: bool,
    pub autocomplete: &'static str,
}

impl CredentialField {
    fn input(
        name: &'static str,
        label: &'static str,
        input_type: &'static str,
        autocomplete: AutocompleteSetting,
    ) -> Self {
        Self {
            name,
            label,
            input_type,
            options: Vec::new(),
            initial: String::new(),
            autofocus: false,
            autocomplete: autocomplete.attribute(),
        }
    }

    fn select(
        name: &'static str,
        label: &'static str,
        options: Vec<SelectOption>,
        initial: String,
    ) -> Self {
        Self {
            name,
            label,
            input_type: "select",
            options,
            initial,
            autofocus: false,
            autocomplete: "off",
        }
    }

    pub fn is_select(&self) -> bool {
        self.input_type == "select"
    }
}

/// Fields of the login form in display order.
pub fn credential_fields(
    dashboard: &DashboardSettings,
    websso: &WebSsoSettings,
    autocomplete: AutocompleteSetting,
) -> Vec<CredentialField> {
    let mut fields = Vec::new();
    if websso.enabled {
        let options = websso
            .choices
            .iter()
            .map(|c| SelectOption {
                value: c.id.clone(),
                label: c.label.clone(),
            })
            .collect();
        fields.push(CredentialField::select(
            "auth_type",
            "Authenticate using",
            options,
            websso.initial_choice.clone(),
        ));
    }
    if dashboard.regions.len() > 1 {
        let options: Vec<SelectOption> = dashboard
            .regions
            .iter()
            .map(|r| SelectOption {
                value: r.endpoint.clone(),
                label: r.name.clone(),
            })
            .collect();
        let initial = options[0].value.clone();
        fields.push(CredentialField::select("region", "Region", options, initial));
    }
    if dashboard.multidomain_support {
        let mut domain = CredentialField::input("domain", "Domain", "text", autocomplete);
        domain.initial = dashboard.default_domain.clone();
        fields.push(domain);
    }
    let mut username = CredentialField::input("username", "User Name", "text", autocomplete);
    username.autofocus = true;
    fields.push(username);
    fields.push(CredentialField::input(
        "password",
        "Password",
        "password",
        autocomplete,
    ));
    fields
}
