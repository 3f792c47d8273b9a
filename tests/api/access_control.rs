//! tests/api/access_control.rs

use crate::helpers::{assert_is_redirect_to, attr, count, spawn_app, text};

#[tokio::test]
async fn you_must_be_logged_in_to_access_the_admin_dashboard() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app.get_admin_dashboard().await;

    // Assert
    assert_is_redirect_to(&response, "/auth/login/?next=%2Fadmin%2Fdashboard");
}

#[tokio::test]
async fn the_home_page_points_to_login_or_dashboard() {
    // Arrange
    let app = spawn_app().await;

    // Act - Part 1 - Anonymous
    assert_is_redirect_to(&app.get_response_from_url("/").await, "/auth/login/");

    // Act - Part 2 - Logged in
    app.test_user.login(&app).await;
    assert_is_redirect_to(&app.get_response_from_url("/").await, "/admin/dashboard");
}

#[tokio::test]
async fn users_without_the_admin_role_are_sent_back_with_a_permission_alert() {
    // Arrange
    let app = spawn_app().await;
    app.test_user.login(&app).await;

    // Act - Part 1 - Try the admin only page
    let response = app.get_admin_settings().await;
    assert_is_redirect_to(&response, "/auth/login/?next=%2Fadmin%2Fsettings");

    // Act - Part 2 - Follow the redirect
    let response = app.get_login("?next=%2Fadmin%2Fsettings").await;
    assert_eq!(response.status().as_u16(), 200);
    let html = response.text().await.unwrap();

    // Assert
    assert_eq!(count(&html, "#permission_denied.alert-danger"), 1);
    assert_eq!(
        text(&html, "#permission_denied b").as_deref(),
        Some("/admin/settings")
    );
    assert_eq!(
        attr(&html, "input[type=hidden][name=next]", "value").as_deref(),
        Some("/admin/settings")
    );
}

#[tokio::test]
async fn admins_may_view_the_panel_settings() {
    // Arrange
    let app = spawn_app().await;
    app.admin_user.login(&app).await;

    // Act
    let response = app.get_admin_settings().await;

    // Assert
    assert_eq!(response.status().as_u16(), 200);
    let html = response.text().await.unwrap();
    assert_eq!(
        text(&html, "#password_autocomplete").as_deref(),
        Some("off")
    );
    assert_eq!(text(&html, "#redirect_field_name").as_deref(), Some("next"));
}
