//! src/routes/admin/dashboard.rs

use crate::session_state::SessionUser;
use actix_web::{web, Responder};
use askama_actix::Template;

#[derive(Template)]
#[template(path = "admin/dashboard.html")]
struct DashboardTemplate {
    username: String,
    domain: String,
    roles: Vec<String>,
}

pub async fn admin_dashboard(user: web::ReqData<SessionUser>) -> impl Responder {
    let user = user.into_inner();
    DashboardTemplate {
        username: user.username,
        domain: user.domain,
        roles: user.roles,
    }
}
