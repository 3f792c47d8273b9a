//! src/routes/mod.rs

mod admin;
mod health_check;
mod home;
mod login;
mod logout;

pub use admin::*;
pub use health_check::health_check;
pub use home::home;
pub use login::*;
pub use logout::log_out;
