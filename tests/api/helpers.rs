//! tests/api/helpers.rs

use dashboard_auth::authentication::compute_password_hash;
use dashboard_auth::configuration::{get_configuration, Settings, UserSettings};
use dashboard_auth::startup::Application;
use dashboard_auth::telemetry::{get_subscriber, init_subscriber};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use secrecy::Secret;
use uuid::Uuid;

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();
    // The sink is part of the type returned by `get_subscriber`,
    // therefore both branches need their own call.
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub struct TestUser {
    pub username: String,
    pub password: String,
    pub domain: Option<String>,
    pub roles: Vec<String>,
}

impl TestUser {
    pub fn generate(roles: &[&str]) -> Self {
        Self {
            username: Uuid::new_v4().to_string(),
            password: Uuid::new_v4().to_string(),
            domain: None,
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    pub fn settings(&self) -> UserSettings {
        UserSettings {
            username: self.username.clone(),
            domain: self.domain.clone(),
            password_hash: compute_password_hash(Secret::new(self.password.clone())).unwrap(),
            roles: self.roles.clone(),
        }
    }

    pub async fn login(&self, app: &TestApp) -> reqwest::Response {
        let token = app.csrf_token().await;
        app.post_login(&serde_json::json!({
            "csrfmiddlewaretoken": token,
            "username": &self.username,
            "password": &self.password
        }))
        .await
    }
}

pub struct TestApp {
    pub address: String,
    pub test_user: TestUser,
    pub admin_user: TestUser,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// helper to get Response from url
    pub async fn get_response_from_url(&self, path: &str) -> reqwest::Response {
        self.api_client
            .get(&format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// helper to get the login page, `query` includes the leading `?`
    pub async fn get_login(&self, query: &str) -> reqwest::Response {
        self.get_response_from_url(&format!("/auth/login/{}", query))
            .await
    }

    /// helper to get login html
    pub async fn get_login_html(&self) -> String {
        self.get_login("").await.text().await.unwrap()
    }

    /// Anti-forgery token of the current session.
    ///
    /// Asks for the page with `next` set, which renders even for logged in users.
    pub async fn csrf_token(&self) -> String {
        let html = self
            .get_login("?next=%2Fadmin%2Fdashboard")
            .await
            .text()
            .await
            .unwrap();
        attr(&html, "input[name=csrfmiddlewaretoken]", "value")
            .expect("No anti-forgery token on the login page.")
    }

    /// helper for sending a POST /auth/login/ request
    pub async fn post_login<Body>(&self, body: &Body) -> reqwest::Response
    where
        Body: serde::Serialize,
    {
        self.api_client
            .post(&format!("{}/auth/login/", &self.address))
            // This 'reqwest' method makes sure that the body is URL-encoded
            // and the 'Content-Type' header is set accordingly.
            .form(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// helper to log out
    pub async fn post_logout(&self) -> reqwest::Response {
        self.api_client
            .post(&format!("{}/auth/logout/", self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// helper to get admin dashboard
    pub async fn get_admin_dashboard(&self) -> reqwest::Response {
        self.get_response_from_url("/admin/dashboard").await
    }

    /// helper to get admin dashboard html
    pub async fn get_admin_dashboard_html(&self) -> String {
        self.get_admin_dashboard().await.text().await.unwrap()
    }

    /// helper to get admin settings
    pub async fn get_admin_settings(&self) -> reqwest::Response {
        self.get_response_from_url("/admin/settings").await
    }
}

// Little helper function to assert redirected location
pub fn assert_is_redirect_to(response: &reqwest::Response, location: &str) {
    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(response.headers().get("Location").unwrap(), location);
}

/// Number of elements matching `selector`.
pub fn count(html: &str, selector: &str) -> usize {
    let document = Html::parse_document(html);
    let selector = Selector::parse(selector).unwrap();
    document.select(&selector).count()
}

/// Trimmed text of the first element matching `selector`.
pub fn text(html: &str, selector: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(selector).unwrap();
    document
        .select(&selector)
        .next()
        .map(|e| e.text().collect::<String>().trim().to_string())
}

/// Attribute `name` of the first element matching `selector`.
pub fn attr(html: &str, selector: &str, name: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(selector).unwrap();
    document
        .select(&selector)
        .next()
        .and_then(|e| e.value().attr(name).map(str::to_string))
}

/// Spin up an instance of our application
/// and returns its address (i.e. http://localhost:XXXX)
pub async fn spawn_app() -> TestApp {
    spawn_app_with(|_| {}).await
}

/// Like `spawn_app`, with a hook to adjust the configuration first.
pub async fn spawn_app_with(customize: impl FnOnce(&mut Settings)) -> TestApp {
    // The first time `initialize` is invoked the code in `TRACING` is executed.
    // All other invocations will instead skip execution.
    Lazy::force(&TRACING);

    let test_user = TestUser::generate(&["member"]);
    let admin_user = TestUser::generate(&["member", "admin"]);

    // Randomise configuration to ensure test isolation
    let configuration = {
        let mut c = get_configuration().expect("Failed to read configuration.");
        // use a random OS port
        c.application.port = 0;
        c.users = vec![test_user.settings(), admin_user.settings()];
        customize(&mut c);
        c
    };

    let application = Application::build(configuration)
        .await
        .expect("Failed to build application");
    let application_port = application.port();
    let _ = tokio::spawn(application.run_until_stopped());

    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .cookie_store(true)
        .build()
        .unwrap();

    TestApp {
        address: format!("http://127.0.0.1:{}", application_port),
        test_user,
        admin_user,
        api_client: client,
    }
}
