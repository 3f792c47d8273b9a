//! src/routes/home/mod.rs

use crate::error::DashResult;
use crate::session_state::TypedSession;
use crate::utils::{see_other, HOME_PATH, LOGIN_PATH};
use actix_web::HttpResponse;

pub async fn home(session: TypedSession) -> DashResult<HttpResponse> {
    match session.get_user()? {
        Some(_) => Ok(see_other(HOME_PATH)),
        None => Ok(see_other(LOGIN_PATH)),
    }
}
