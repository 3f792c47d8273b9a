//! tests/api/logout.rs

use crate::helpers::{assert_is_redirect_to, attr, count, spawn_app, spawn_app_with, text};

#[tokio::test]
async fn logout_clears_session_state() {
    // Arrange
    let app = spawn_app().await;

    // Act - Part 1 - Login
    let response = app.test_user.login(&app).await;
    assert_is_redirect_to(&response, "/admin/dashboard");

    // Act - Part 2 - Logout
    let response = app.post_logout().await;
    assert_is_redirect_to(&response, "/auth/login/");

    // Act - Part 3 - Attempt to load admin panel
    let response = app.get_admin_dashboard().await;
    assert_is_redirect_to(&response, "/auth/login/?next=%2Fadmin%2Fdashboard");
}

#[tokio::test]
async fn the_logout_reason_is_shown_once_as_success() {
    // Arrange
    let app = spawn_app().await;
    app.test_user.login(&app).await;
    app.post_logout().await;

    // Act - Part 1 - Follow the redirect
    let html = app.get_login_html().await;
    assert_eq!(count(&html, "#logout_reason.alert-success"), 1);
    assert_eq!(count(&html, "#logout_reason.alert-danger"), 0);
    assert_eq!(
        text(&html, "#logout_reason").as_deref(),
        Some("You have been logged out.")
    );

    // Act - Part 2 - Reload the login page
    let html = app.get_login_html().await;
    assert_eq!(count(&html, "#logout_reason"), 0);
}

#[tokio::test]
async fn logging_out_works_with_a_plain_link_as_well() {
    // Arrange
    let app = spawn_app().await;
    app.test_user.login(&app).await;

    // Act
    let response = app.get_response_from_url("/auth/logout/").await;

    // Assert
    assert_is_redirect_to(&response, "/auth/login/");
    assert_is_redirect_to(
        &app.get_admin_dashboard().await,
        "/auth/login/?next=%2Fadmin%2Fdashboard",
    );
}

#[tokio::test]
async fn an_expired_session_is_logged_out_with_a_danger_alert() {
    // Arrange
    let app = spawn_app_with(|c| c.application.session_timeout_seconds = 0).await;
    let response = app.test_user.login(&app).await;
    assert_is_redirect_to(&response, "/admin/dashboard");

    // Act - Part 1 - The login has already expired
    let response = app.get_admin_dashboard().await;
    assert_is_redirect_to(&response, "/auth/login/");

    // Act - Part 2 - Follow the redirect
    let html = app.get_login_html().await;
    assert_eq!(
        text(&html, "#logout_reason.alert-danger").as_deref(),
        Some("Session timed out.")
    );
}

#[tokio::test]
async fn a_timed_out_user_can_log_in_again_from_the_login_page() {
    // Arrange
    let app = spawn_app_with(|c| c.application.session_timeout_seconds = 0).await;
    let response = app.test_user.login(&app).await;
    assert_is_redirect_to(&response, "/admin/dashboard");

    // Act - Part 1 - Open the login page directly with the stale session
    let response = app.get_login("").await;
    assert_is_redirect_to(&response, "/auth/login/");

    // Act - Part 2 - Follow the redirect
    let html = app.get_login_html().await;
    assert_eq!(
        text(&html, "#logout_reason.alert-danger").as_deref(),
        Some("Session timed out.")
    );

    // Act - Part 3 - Log in with the token rendered on that page
    let token = attr(&html, "input[name=csrfmiddlewaretoken]", "value").unwrap();
    let response = app
        .post_login(&serde_json::json!({
            "csrfmiddlewaretoken": token,
            "username": &app.test_user.username,
            "password": &app.test_user.password
        }))
        .await;
    assert_is_redirect_to(&response, "/admin/dashboard");
}
