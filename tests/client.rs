#![deny(clippy::all, clippy::pedantic)]

use std::{sync::Arc, time::Duration};

use gratiswag_admin::{
    application::{
        auth::{AuthError, AuthService},
        error::ApiError,
        forms::{ForgotPasswordForm, LoginForm, VerifyOtpForm},
        list_sync::ListSource,
        session::{MemorySessionStore, SessionStore},
    },
    domain::{
        pagination::PageRequest,
        session::{BearerToken, Session},
    },
    infra::http::{
        Auth, RestClient,
        resources::{AuthApi, BlogsApi, DashboardApi},
    },
};
use gratiswag_api_types::Blog;
use httpmock::MockServer;
use serde_json::json;
use url::Url;

fn client_with(server: &MockServer, sessions: Arc<dyn SessionStore>) -> RestClient {
    let base = Url::parse(&format!("{}/api/v1", server.base_url())).expect("base url");
    RestClient::new(&base, Duration::from_secs(5), sessions).expect("client")
}

fn signed_in_store() -> Arc<MemorySessionStore> {
    let session = Session::new(
        "admin-1",
        "Admin",
        "admin",
        BearerToken::new("live-token").expect("token"),
    )
    .expect("session");
    Arc::new(MemorySessionStore::with_session(session))
}

#[tokio::test]
async fn authenticated_calls_carry_the_bearer_token() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("GET")
            .path("/api/v1/blog/b1")
            .header("authorization", "Bearer live-token");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"status":true,"data":{"_id":"b1","blogTitle":"Launch"}}"#);
    });

    let client = client_with(&server, signed_in_store());
    let blog: Blog = client
        .get("blog/b1", &[], Auth::Session)
        .await
        .expect("blog");

    mock.assert();
    assert_eq!(blog.blog_title, "Launch");
}

#[tokio::test]
async fn missing_session_refuses_before_sending() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("GET").path("/api/v1/blog/b1");
        then.status(200);
    });

    let client = client_with(&server, Arc::new(MemorySessionStore::new()));
    let err = client
        .get::<Blog>("blog/b1", &[], Auth::Session)
        .await
        .expect_err("no session");

    mock.assert_calls(0);
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn statuses_map_to_error_kinds_with_server_messages() {
    let server = MockServer::start();
    for (id, status, message) in [
        ("gone", 404, "Blog not found"),
        ("expired", 401, "jwt expired"),
        ("dup", 409, "Duplicate title"),
        ("boom", 500, "Internal error"),
    ] {
        server.mock(|when, then| {
            when.method("GET").path(format!("/api/v1/blog/{id}"));
            then.status(status)
                .header("content-type", "application/json")
                .body(json!({ "success": false, "message": message }).to_string());
        });
    }

    let client = client_with(&server, signed_in_store());
    let fetch = |id: &'static str| {
        let client = client.clone();
        async move {
            client
                .get::<Blog>(&format!("blog/{id}"), &[], Auth::Session)
                .await
                .expect_err("error status")
        }
    };

    assert_eq!(
        fetch("gone").await,
        ApiError::NotFound {
            message: "Blog not found".into()
        }
    );
    assert!(fetch("expired").await.is_unauthorized());
    assert_eq!(fetch("dup").await.kind(), "validation");
    assert_eq!(
        fetch("boom").await,
        ApiError::Server {
            status: 500,
            message: "Internal error".into()
        }
    );
}

#[tokio::test]
async fn unexpected_success_bodies_are_malformed() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/api/v1/blog");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"status":true,"data":[{"_id":"b1","blogTitle":"x"}]}"#);
    });
    server.mock(|when, then| {
        when.method("GET").path("/api/v1/dashboard/admin-summary");
        then.status(200)
            .header("content-type", "text/html")
            .body("<html>maintenance</html>");
    });

    let client = client_with(&server, signed_in_store());
    let list = BlogsApi::new(client.clone());
    let request = PageRequest::new(1, 10).expect("request");
    let err = list
        .fetch_page(request)
        .await
        .expect_err("no pagination block");
    assert_eq!(err.kind(), "malformed_response");

    let err = DashboardApi::new(client)
        .summary()
        .await
        .expect_err("html body");
    assert_eq!(err.kind(), "malformed_response");
}

#[tokio::test]
async fn login_stores_the_session_and_honours_the_callback() {
    let server = MockServer::start();
    let login = server.mock(|when, then| {
        when.method("POST")
            .path("/api/v1/auth/login")
            .json_body(json!({ "email": "admin@gratiswag.test", "password": "hunter22" }));
        then.status(200)
            .header("content-type", "application/json")
            .body(
                json!({
                    "success": true,
                    "data": {
                        "accessToken": "issued-token",
                        "user": {
                            "_id": "u42",
                            "name": "Grace",
                            "email": "admin@gratiswag.test",
                            "role": "admin"
                        }
                    }
                })
                .to_string(),
            );
    });

    let store = Arc::new(MemorySessionStore::new());
    let sessions: Arc<dyn SessionStore> = store.clone();
    let auth = AuthService::new(AuthApi::new(client_with(&server, sessions.clone())), sessions);
    let form = LoginForm {
        email: "admin@gratiswag.test".into(),
        password: "hunter22".into(),
    };

    let signed_in = auth
        .login(&form, Some("/order-history"))
        .await
        .expect("signed in");

    login.assert();
    assert_eq!(signed_in.location, "/order-history");
    assert_eq!(signed_in.session.display_name(), "Grace");
    assert_eq!(
        store.token().map(|token| token.expose().to_string()),
        Some("issued-token".into())
    );

    auth.logout();
    assert!(!store.is_authenticated());
}

#[tokio::test]
async fn invalid_login_form_is_not_sent() {
    let server = MockServer::start();
    let login = server.mock(|when, then| {
        when.method("POST").path("/api/v1/auth/login");
        then.status(200);
    });

    let sessions: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());
    let auth = AuthService::new(AuthApi::new(client_with(&server, sessions.clone())), sessions);
    let err = auth
        .login(
            &LoginForm {
                email: "not-an-email".into(),
                password: String::new(),
            },
            None,
        )
        .await
        .expect_err("invalid");

    login.assert_calls(0);
    assert!(matches!(err, AuthError::Invalid(_)));
}

#[tokio::test]
async fn password_reset_passes_the_reset_token_along() {
    let server = MockServer::start();
    let forgot = server.mock(|when, then| {
        when.method("POST")
            .path("/api/v1/auth/forgot-password")
            .json_body(json!({ "email": "admin@gratiswag.test" }));
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"success":true,"data":{"accessToken":"reset-1"}}"#);
    });
    let verify = server.mock(|when, then| {
        when.method("POST")
            .path("/api/v1/auth/verify-token")
            .header("authorization", "Bearer reset-1")
            .json_body(json!({ "otp": "123456" }));
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"success":true,"data":{"accessToken":"reset-2"}}"#);
    });

    let sessions: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());
    let auth = AuthService::new(AuthApi::new(client_with(&server, sessions.clone())), sessions);

    let reset = auth
        .request_password_reset(&ForgotPasswordForm {
            email: "admin@gratiswag.test".into(),
        })
        .await
        .expect("reset requested");
    let verified = auth
        .verify_otp(&reset, &VerifyOtpForm { otp: "123456".into() })
        .await
        .expect("otp verified");

    forgot.assert();
    verify.assert();
    assert_eq!(verified.expose(), "reset-2");
    assert!(auth.current_session().is_none());
}
