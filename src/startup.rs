//! src/startup.rs

use crate::authentication::{
    reject_anonymous_users, reject_users_without_admin_role, UserDirectory,
};
use crate::configuration::Settings;
use crate::routes::{
    admin_dashboard, admin_settings, health_check, home, log_out, login, login_form,
};
use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::cookie::Key;
use actix_web::{dev::Server, web, web::Data, App, HttpServer};
use actix_web_flash_messages::{storage::CookieMessageStore, FlashMessagesFramework};
use actix_web_lab::middleware::from_fn;
use secrecy::{ExposeSecret, Secret};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

/// Maximum age of a login in seconds.
#[derive(Debug, Clone, Copy)]
pub struct SessionTimeout(pub u64);

impl Default for SessionTimeout {
    fn default() -> Self {
        Self(3600)
    }
}

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();
        let server = run(listener, configuration)?;
        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// A more expressive name that makes it clear that
    /// this function only returns when the application is stopped.
    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

fn session_key(secret: &Secret<String>) -> Result<Key, anyhow::Error> {
    let bytes = secret.expose_secret().as_bytes();
    if bytes.len() < 64 {
        anyhow::bail!("The session key must be at least 64 bytes long.");
    }
    Ok(Key::from(bytes))
}

fn run(listener: TcpListener, configuration: Settings) -> Result<Server, anyhow::Error> {
    let secret_key = session_key(&configuration.application.session_key)?;
    let secure_cookies = configuration.application.secure_cookies;
    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let directory = Data::new(UserDirectory::from_settings(
        &configuration.users,
        &configuration.dashboard.default_domain,
    )?);
    tracing::info!(users = directory.len(), "Loaded user directory");
    let dashboard = Data::new(configuration.dashboard);
    let websso = Data::new(configuration.websso);
    let timeout = Data::new(SessionTimeout(
        configuration.application.session_timeout_seconds,
    ));

    let server = HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_name("dashboard_session".to_string())
                    .cookie_secure(secure_cookies)
                    .build(),
            )
            .wrap(TracingLogger::default())
            .route("/", web::get().to(home))
            .route("/health_check", web::get().to(health_check))
            .service(
                web::scope("/auth")
                    .route("/login/", web::get().to(login_form))
                    .route("/login/", web::post().to(login))
                    .route("/logout/", web::get().to(log_out))
                    .route("/logout/", web::post().to(log_out)),
            )
            .service(
                web::scope("/admin")
                    .wrap(from_fn(reject_anonymous_users))
                    .route("/dashboard", web::get().to(admin_dashboard))
                    .service(
                        web::resource("/settings")
                            .wrap(from_fn(reject_users_without_admin_role))
                            .route(web::get().to(admin_settings)),
                    ),
            )
            .app_data(directory.clone())
            .app_data(dashboard.clone())
            .app_data(websso.clone())
            .app_data(timeout.clone())
    })
    .listen(listener)?
    .run();
    Ok(server)
}
