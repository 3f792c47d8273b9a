//! src/routes/admin/mod.rs

mod dashboard;
mod settings;

pub use dashboard::admin_dashboard;
pub use settings::admin_settings;
