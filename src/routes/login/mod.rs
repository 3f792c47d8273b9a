//! src/routes/login/mod.rs

mod get;
mod panel;
mod post;

pub use get::login_form;
pub use panel::{LoginPage, LoginPanel};
pub use post::{login, LoginFormData};
