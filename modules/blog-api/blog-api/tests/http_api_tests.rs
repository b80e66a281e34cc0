//! End-to-end checks of the HTTP adapter against a mock Inkpost server.

use blog_api::{ApiClientConfig, HttpBlogApi};
use blog_api_sdk::{
    AdminApi, ApiError, AuthApi, BlogsApi, ContactApi, ContactMessage, Credentials,
    SiteSettingsApi, ThemeColors,
};
use httpmock::prelude::*;
use inkpost_security::Role;
use serde_json::json;

fn api_for(server: &MockServer) -> HttpBlogApi {
    HttpBlogApi::new(&ApiClientConfig::for_base_url(server.base_url())).unwrap()
}

fn palette_json(background: &str) -> serde_json::Value {
    json!({
        "primaryBackground": background,
        "secondaryBackground": "#eeeeee",
        "tertiaryBackground": "#dddddd",
        "primaryColor": "#111111",
        "secondaryColor": "#222222",
        "primaryBtn": "#3366ff",
        "secondaryBtn": "#cccccc",
        "tertiaryBtn": "#bbbbbb",
        "quaternaryBtn": "#aaaaaa",
        "backToHomeBtn": "#999999",
        "grayColor": "#888888"
    })
}

#[tokio::test]
async fn login_cookie_is_replayed_on_identity_check() {
    let server = MockServer::start();
    let login = server.mock(|when, then| {
        when.method(POST)
            .path("/api/auth/login")
            .json_body(json!({"email": "ada@example.com", "password": "hunter2"}));
        then.status(200)
            .header("set-cookie", "token=abc; Path=/")
            .json_body(json!({"message": "Logged in"}));
    });
    let me = server.mock(|when, then| {
        when.method(GET)
            .path("/api/auth/me")
            .header("cookie", "token=abc");
        then.status(200).json_body(json!({
            "user": {"_id": "u1", "username": "ada", "email": "ada@example.com", "role": "user"}
        }));
    });

    let api = api_for(&server);
    api.login(&Credentials {
        email: "ada@example.com".into(),
        password: "hunter2".into(),
    })
    .await
    .unwrap();
    let principal = api.current_user().await.unwrap();

    assert_eq!(principal.id, "u1");
    assert_eq!(principal.role, Role::User);
    login.assert();
    me.assert();
}

#[tokio::test]
async fn exported_session_cookie_works_in_a_new_client() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/auth/login");
        then.status(200)
            .header("set-cookie", "token=abc; Path=/; HttpOnly")
            .json_body(json!({"message": "Logged in"}));
    });
    let me = server.mock(|when, then| {
        when.method(GET)
            .path("/api/auth/me")
            .header("cookie", "token=abc");
        then.status(200).json_body(json!({
            "user": {"_id": "u1", "username": "ada", "email": "ada@example.com", "role": "user"}
        }));
    });

    let first = api_for(&server);
    first
        .login(&Credentials {
            email: "ada@example.com".into(),
            password: "hunter2".into(),
        })
        .await
        .unwrap();
    let saved = first.export_cookies();

    let second = api_for(&server);
    assert!(second.current_user().await.is_err());
    second.import_cookies(saved);
    assert_eq!(second.current_user().await.unwrap().id, "u1");

    second.clear_cookies();
    assert!(second.current_user().await.is_err());
    me.assert_calls(1);
}

#[tokio::test]
async fn identity_check_without_session_is_unauthorized() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/auth/me");
        then.status(401).json_body(json!({"message": "Not authenticated"}));
    });

    let err = api_for(&server).current_user().await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.user_message(), "Not authenticated");
}

#[tokio::test]
async fn banned_login_keeps_remaining_time() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/auth/login");
        then.status(403)
            .json_body(json!({"error": "Account is banned", "remainingTime": "2 hours"}));
    });

    let err = api_for(&server)
        .login(&Credentials {
            email: "x@example.com".into(),
            password: "pw".into(),
        })
        .await
        .unwrap_err();
    assert!(err.is_permission_denied());
    assert_eq!(err.user_message(), "Account is banned");
    assert_eq!(err.remaining_time(), Some("2 hours"));
}

#[tokio::test]
async fn save_colors_sends_both_palettes() {
    let server = MockServer::start();
    let save = server.mock(|when, then| {
        when.method(PUT)
            .path("/api/admin/website-colors")
            .json_body(json!({
                "light": palette_json("#ffffff"),
                "dark": palette_json("#000000")
            }));
        then.status(200).json_body(json!({"message": "Colors saved"}));
    });

    let colors: ThemeColors = serde_json::from_value(json!({
        "light": palette_json("#ffffff"),
        "dark": palette_json("#000000")
    }))
    .unwrap();
    let message = api_for(&server).save_colors(&colors).await.unwrap();

    assert_eq!(message.as_deref(), Some("Colors saved"));
    save.assert();
}

#[tokio::test]
async fn save_colors_tolerates_empty_body() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(PUT).path("/api/admin/website-colors");
        then.status(204);
    });

    let colors: ThemeColors = serde_json::from_value(json!({
        "light": palette_json("#ffffff"),
        "dark": palette_json("#000000")
    }))
    .unwrap();
    assert_eq!(api_for(&server).save_colors(&colors).await.unwrap(), None);
}

#[tokio::test]
async fn malformed_reset_body_is_reported() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/admin/reset-website-colors");
        then.status(200).json_body(json!({"light": {"primaryBackground": 5}}));
    });

    let err = api_for(&server).reset_colors().await.unwrap_err();
    assert!(matches!(err, ApiError::MalformedResponse { .. }));
}

#[tokio::test]
async fn settings_endpoint_keeps_server_spelling() {
    let server = MockServer::start();
    let fetch = server.mock(|when, then| {
        when.method(GET).path("/api/admin/webiste-settings");
        then.status(200).json_body(json!({
            "websiteName": "Inkpost",
            "canPublish": false,
            "canAdminUpdateWebSettings": true
        }));
    });

    let settings = api_for(&server).fetch_settings().await.unwrap();
    assert_eq!(settings.website_name, "Inkpost");
    assert!(settings.admin_permissions.can_admin_update_web_settings);
    fetch.assert();
}

#[tokio::test]
async fn paged_listings_send_query_parameters() {
    let server = MockServer::start();
    let users = server.mock(|when, then| {
        when.method(GET)
            .path("/api/admin/users")
            .query_param("page", "3");
        then.status(200).json_body(json!({
            "users": [{"_id": "u9", "username": "bo", "email": "bo@example.com", "role": "admin"}],
            "totalPages": 4
        }));
    });
    let own = server.mock(|when, then| {
        when.method(GET)
            .path("/api/blogs/user")
            .query_param("page", "1")
            .query_param("limit", "10");
        then.status(200).json_body(json!({"blogs": []}));
    });

    let api = api_for(&server);
    let page = api.list_users(3).await.unwrap();
    assert_eq!(page.total_pages, 4);
    assert_eq!(page.users[0].role, Role::Admin);

    let mine = api.own_blogs(1, 10).await.unwrap();
    assert!(mine.blogs.is_empty());
    assert_eq!(mine.total_pages, 1);

    users.assert();
    own.assert();
}

#[tokio::test]
async fn rejected_delete_uses_plain_text_body() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(DELETE).path("/api/users/delete-user/u2");
        then.status(500).body("database unavailable");
    });

    let err = api_for(&server).delete_user("u2").await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.user_message(), "database unavailable");
}

#[tokio::test]
async fn guest_contact_message_is_posted() {
    let server = MockServer::start();
    let send = server.mock(|when, then| {
        when.method(POST).path("/api/contact/send-msg").json_body(json!({
            "subject": "Hello",
            "message": "Nice site",
            "email": "guest@example.com",
            "isGuest": true
        }));
        then.status(200).json_body(json!({"message": "sent"}));
    });

    api_for(&server)
        .send_message(&ContactMessage {
            subject: "Hello".into(),
            message: "Nice site".into(),
            email: "guest@example.com".into(),
            username: None,
            is_guest: true,
            user_id: None,
        })
        .await
        .unwrap();
    send.assert();
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    let api = HttpBlogApi::new(&ApiClientConfig::for_base_url("http://127.0.0.1:9")).unwrap();
    let err = api.user_stats("u1").await.unwrap_err();
    assert!(matches!(err, ApiError::Network { .. }));
}
