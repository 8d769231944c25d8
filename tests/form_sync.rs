#![deny(clippy::all, clippy::pedantic)]

use std::{sync::Arc, time::Duration};

use gratiswag_admin::{
    application::{
        error::ApiError,
        forms::{BlogForm, FormError, FormState, FormSyncView, ProductForm},
        notify::{RecordingNotifier, ToastKind},
        routes::AdminRoute,
        session::{MemorySessionStore, SessionStore},
    },
    domain::{
        ids::RecordId,
        session::{BearerToken, Session},
    },
    infra::http::{
        RestClient,
        resources::{BlogsApi, ProductsApi},
    },
};
use httpmock::MockServer;
use serde_json::json;
use url::Url;

const PNG_HEADER: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

fn client(server: &MockServer) -> RestClient {
    let session = Session::new(
        "admin-1",
        "Admin",
        "admin",
        BearerToken::new("form-token").expect("token"),
    )
    .expect("session");
    let sessions: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::with_session(session));
    let base = Url::parse(&server.base_url()).expect("base url");
    RestClient::new(&base, Duration::from_secs(5), sessions).expect("client")
}

fn blog_form() -> BlogForm {
    BlogForm {
        blog_title: "Holiday swag".into(),
        blog_description: "A roundup of winter gifts for the team".into(),
    }
}

fn product_form() -> ProductForm {
    ProductForm {
        title: "Hoodie".into(),
        description: "Heavyweight cotton".into(),
        price: 45.5,
        quantity: 12,
        category: "c1".into(),
    }
}

#[tokio::test]
async fn blog_with_image_is_sent_as_one_multipart_request() {
    let server = MockServer::start();
    let create = server.mock(|when, then| {
        when.method("POST")
            .path("/blog/create")
            .header("authorization", "Bearer form-token")
            .body_includes("name=\"data\"")
            .body_includes("\"blogTitle\":\"Holiday swag\"")
            .body_includes("name=\"image\"; filename=\"cover.png\"");
        then.status(201)
            .header("content-type", "application/json")
            .body(r#"{"status":true,"data":{"_id":"b1"}}"#);
    });

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("cover.png");
    std::fs::write(&path, PNG_HEADER).expect("write image");

    let api = BlogsApi::new(client(&server));
    let notifier = RecordingNotifier::new();
    let mut view = FormSyncView::new(blog_form(), 1024);
    view.select_image(&path).await.expect("image selected");

    let outcome = view
        .submit(&api.create_target(), &notifier)
        .await
        .expect("submitted");

    create.assert_calls(1);
    assert_eq!(outcome.route, AdminRoute::Blogs);
    assert_eq!(outcome.response, json!({ "_id": "b1" }));
    assert_eq!(view.state(), &FormState::Succeeded);
    assert!(!view.image().has_local_preview());
    let toasts = notifier.drain();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].text, "Blog created successfully");
}

#[tokio::test]
async fn product_image_uses_its_own_part_name() {
    let server = MockServer::start();
    let create = server.mock(|when, then| {
        when.method("POST")
            .path("/product")
            .body_includes("name=\"productImage\"; filename=\"hoodie.png\"");
        then.status(201)
            .header("content-type", "application/json")
            .body(r#"{"success":true,"data":{"_id":"p9"}}"#);
    });

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("hoodie.png");
    std::fs::write(&path, PNG_HEADER).expect("write image");

    let api = ProductsApi::new(client(&server));
    let notifier = RecordingNotifier::new();
    let mut view = FormSyncView::new(product_form(), 1024);
    view.select_image(&path).await.expect("image selected");
    view.submit(&api.create_target(), &notifier)
        .await
        .expect("submitted");

    create.assert_calls(1);
}

#[tokio::test]
async fn edit_without_a_new_image_sends_json() {
    let server = MockServer::start();
    let update = server.mock(|when, then| {
        when.method("PUT").path("/product/p1").json_body(json!({
            "title": "Hoodie",
            "description": "Heavyweight cotton",
            "price": 45.5,
            "quantity": 12,
            "category": "c1"
        }));
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"success":true,"message":"Product updated"}"#);
    });

    let api = ProductsApi::new(client(&server));
    let notifier = RecordingNotifier::new();
    let mut view = FormSyncView::editing(
        product_form(),
        Some("https://cdn.gratiswag.test/hoodie.png".into()),
        1024,
    );
    let id = RecordId::new("p1").expect("id");
    let outcome = view
        .submit(&api.update_target(&id), &notifier)
        .await
        .expect("submitted");

    update.assert_calls(1);
    assert_eq!(outcome.route, AdminRoute::Products);
    assert_eq!(notifier.drain()[0].text, "Product updated successfully");
}

#[tokio::test]
async fn missing_required_field_never_reaches_the_server() {
    let server = MockServer::start();
    let create = server.mock(|when, then| {
        when.method("POST").path("/blog/create");
        then.status(201);
    });

    let api = BlogsApi::new(client(&server));
    let notifier = RecordingNotifier::new();
    let mut view = FormSyncView::new(
        BlogForm {
            blog_title: String::new(),
            ..blog_form()
        },
        1024,
    );

    let err = view
        .submit(&api.create_target(), &notifier)
        .await
        .expect_err("invalid form");

    create.assert_calls(0);
    assert!(matches!(err, FormError::Invalid(_)));
    assert!(view.field_errors().for_field("blogTitle").next().is_some());
    assert!(notifier.drain().is_empty());
}

#[tokio::test]
async fn rejected_submission_keeps_the_form_for_another_try() {
    let server = MockServer::start();
    let create = server.mock(|when, then| {
        when.method("POST").path("/blog/create");
        then.status(400)
            .header("content-type", "application/json")
            .body(r#"{"success":false,"message":"Blog title already exists"}"#);
    });

    let api = BlogsApi::new(client(&server));
    let notifier = RecordingNotifier::new();
    let mut view = FormSyncView::new(blog_form(), 1024);

    let err = view
        .submit(&api.create_target(), &notifier)
        .await
        .expect_err("rejected");

    create.assert_calls(1);
    assert!(matches!(err, FormError::Api(ApiError::Validation { .. })));
    assert_eq!(view.form(), &blog_form());
    assert!(matches!(view.state(), FormState::Failed(_)));
    let toasts = notifier.drain();
    assert_eq!(toasts[0].kind, ToastKind::Error);
    assert_eq!(
        toasts[0].text,
        "Failed to create blog: Blog title already exists"
    );
}

#[tokio::test]
async fn oversized_image_is_refused_before_upload() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("huge.png");
    std::fs::write(&path, vec![0_u8; 64]).expect("write image");

    let mut view = FormSyncView::new(blog_form(), 16);
    let err = view.select_image(&path).await.expect_err("too large");

    assert!(matches!(err, FormError::Image(_)));
    assert!(view.field_errors().has_field("image"));
    assert!(view.image().local().is_none());
}

#[tokio::test]
async fn submission_answered_by_a_non_api_page_is_not_a_success() {
    let server = MockServer::start();
    let create = server.mock(|when, then| {
        when.method("POST").path("/blog/create");
        then.status(200)
            .header("content-type", "text/html")
            .body("<html>proxy page</html>");
    });

    let api = BlogsApi::new(client(&server));
    let notifier = RecordingNotifier::new();
    let mut view = FormSyncView::new(blog_form(), 1024);

    let err = view
        .submit(&api.create_target(), &notifier)
        .await
        .expect_err("not an envelope");

    create.assert_calls(1);
    assert!(matches!(
        err,
        FormError::Api(ApiError::MalformedResponse { .. })
    ));
    assert!(matches!(view.state(), FormState::Failed(_)));
    assert_eq!(notifier.drain()[0].kind, ToastKind::Error);
}
