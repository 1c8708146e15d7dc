use chrono::{Duration as ChronoDuration, Utc};
use std::sync::Arc;

use harborcms_api::app::services::AppServices;
use harborcms_api::config::ApiConfig;
use harborcms_auth::{Resource, SessionClaims};
use harborcms_core::UserId;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::StatusCode;
use serde_json::json;

const JWT_SECRET: &str = "test-secret";

struct TestServer {
    base_url: String,
    services: Arc<AppServices>,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Build app (same router as prod), but bind to an ephemeral port.
        let config = ApiConfig::with_secret(JWT_SECRET);
        let services = Arc::new(AppServices::new());
        let app = harborcms_api::app::build_app_with_services(&config, services.clone());
        let listener = tokio::net::TcpListener::bind(config.bind_addr)
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            services,
            handle,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

struct Session {
    user_id: UserId,
    token: String,
}

fn mint_jwt(email: &str, role: Option<&str>) -> Session {
    let now = Utc::now();
    let claims = SessionClaims {
        sub: UserId::new(),
        email: email.to_string(),
        role: role.map(str::to_string),
        issued_at: now,
        expires_at: now + ChronoDuration::minutes(10),
    };

    let token = jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .expect("failed to encode jwt");

    Session {
        user_id: claims.sub,
        token,
    }
}

async fn create_post(client: &reqwest::Client, srv: &TestServer, token: &str) -> String {
    let res = client
        .post(srv.url("/content/blog-posts"))
        .bearer_auth(token)
        .json(&json!({ "fields": { "title": "Annual report" } }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: serde_json::Value = res.json().await.unwrap();
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(srv.url("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn missing_token_is_unauthorized_even_for_reads() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    for path in ["/whoami", "/content/programs", "/users", "/dashboard"] {
        let res = client.get(srv.url(path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "{path}");
    }
}

#[tokio::test]
async fn anonymous_caller_gets_401_before_resource_validation() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client.get(srv.url("/content/donors")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let viewer = mint_jwt("viewer@example.org", Some("VIEWER"));
    let res = client
        .get(srv.url("/content/donors"))
        .bearer_auth(&viewer.token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn no_role_may_create_contact_submissions() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    assert!(
        harborcms_auth::Role::ALL.into_iter().all(|r| !harborcms_auth::has_permission(
            Some(r),
            Resource::ContactSubmissions,
            harborcms_auth::Action::Create
        ))
    );

    let res = client
        .post(srv.url("/contact"))
        .json(&json!({ "fields": { "x": "y" } }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .post(srv.url("/content/contact-submissions"))
        .json(&json!({ "fields": { "x": "y" } }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let root = mint_jwt("root@example.org", Some("SUPER_ADMIN"));
    let res = client
        .post(srv.url("/content/contact-submissions"))
        .bearer_auth(&root.token)
        .json(&json!({ "fields": { "x": "y" } }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert_eq!(srv.services.content.count(Resource::ContactSubmissions), 0);
}

#[tokio::test]
async fn oversized_bodies_are_rejected() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let admin = mint_jwt("content@example.org", Some("CONTENT_ADMIN"));

    let body = "x".repeat(harborcms_api::app::MAX_BODY_BYTES + 1);
    let res = client
        .post(srv.url("/content/blog-posts"))
        .bearer_auth(&admin.token)
        .json(&json!({ "fields": { "body": body } }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(srv.services.content.count(Resource::BlogPosts), 0);
}

#[tokio::test]
async fn invalid_token_is_treated_as_anonymous() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let res = client
        .get(srv.url("/content/programs"))
        .bearer_auth("not-a-jwt")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn whoami_reflects_parsed_role() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let editor = mint_jwt("editor@example.org", Some("editor"));
    let body: serde_json::Value = client
        .get(srv.url("/whoami"))
        .bearer_auth(&editor.token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["role"], "EDITOR");
    assert_eq!(body["id"], editor.user_id.to_string());

    let unknown = mint_jwt("who@example.org", Some("OWNER"));
    let body: serde_json::Value = client
        .get(srv.url("/whoami"))
        .bearer_auth(&unknown.token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(body["role"].is_null());
}

#[tokio::test]
async fn editor_cannot_delete_blog_posts() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let editor = mint_jwt("editor@example.org", Some("EDITOR"));

    let id = create_post(&client, &srv, &editor.token).await;

    let res = client
        .delete(srv.url(&format!("/content/blog-posts/{id}")))
        .bearer_auth(&editor.token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "forbidden");
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("delete blog posts"));
    assert!(!message.contains("editor@example.org"));
    assert!(!message.contains(&editor.user_id.to_string()));

    // Still there.
    let res = client
        .get(srv.url(&format!("/content/blog-posts/{id}")))
        .bearer_auth(&editor.token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn content_admin_deletes_gallery_items() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let admin = mint_jwt("content@example.org", Some("CONTENT_ADMIN"));

    let res = client
        .post(srv.url("/content/gallery"))
        .bearer_auth(&admin.token)
        .json(&json!({ "fields": { "caption": "Volunteers day" } }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: serde_json::Value = res.json().await.unwrap();
    let id = created["id"].as_str().unwrap();

    let res = client
        .delete(srv.url(&format!("/content/gallery/{id}")))
        .bearer_auth(&admin.token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .get(srv.url(&format!("/content/gallery/{id}")))
        .bearer_auth(&admin.token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn viewer_reads_contact_submissions_but_cannot_delete() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    // Submissions arrive from the public site, outside the admin API.
    let fields = json!({ "name": "Ada", "message": "How can I volunteer?" });
    let submitted = srv
        .services
        .content
        .create(Resource::ContactSubmissions, fields.as_object().cloned().unwrap(), None)
        .unwrap();
    let id = submitted.id.to_string();

    let viewer = mint_jwt("viewer@example.org", Some("VIEWER"));
    let res = client
        .get(srv.url("/content/contact-submissions"))
        .bearer_auth(&viewer.token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["items"].as_array().unwrap().len(), 1);

    let res = client
        .delete(srv.url(&format!("/content/contact-submissions/{id}")))
        .bearer_auth(&viewer.token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn only_super_admin_manages_roles() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let root = mint_jwt("root@example.org", Some("SUPER_ADMIN"));
    let content_admin = mint_jwt("content@example.org", Some("CONTENT_ADMIN"));
    let editor = mint_jwt("editor@example.org", Some("EDITOR"));

    // Register the editor in the directory by using the session once.
    let res = client
        .get(srv.url("/whoami"))
        .bearer_auth(&editor.token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .put(srv.url(&format!("/users/{}/role", editor.user_id)))
        .bearer_auth(&content_admin.token)
        .json(&json!({ "role": "VIEWER" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client
        .put(srv.url(&format!("/users/{}/role", editor.user_id)))
        .bearer_auth(&root.token)
        .json(&json!({ "role": "VIEWER" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // The demoted editor can no longer create content.
    let res = client
        .post(srv.url("/content/programs"))
        .bearer_auth(&editor.token)
        .json(&json!({ "fields": { "name": "Literacy" } }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn super_admin_cannot_change_own_role() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let root = mint_jwt("root@example.org", Some("SUPER_ADMIN"));

    let res = client
        .put(srv.url(&format!("/users/{}/role", root.user_id)))
        .bearer_auth(&root.token)
        .json(&json!({ "role": "VIEWER" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn capabilities_mirror_the_matrix() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let anonymous: serde_json::Value = client
        .get(srv.url("/capabilities"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(anonymous["session"]["status"], "anonymous");
    assert!(
        anonymous["resources"]
            .as_array()
            .unwrap()
            .iter()
            .all(|row| row["canView"] == false)
    );

    let editor = mint_jwt("editor@example.org", Some("EDITOR"));
    let caps: serde_json::Value = client
        .get(srv.url("/capabilities"))
        .bearer_auth(&editor.token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let blog = caps["resources"]
        .as_array()
        .unwrap()
        .iter()
        .find(|row| row["resource"] == "BLOG_POSTS")
        .unwrap();
    assert_eq!(blog["canCreate"], true);
    assert_eq!(blog["canDelete"], false);
}

#[tokio::test]
async fn explain_endpoint_reports_denial() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let editor = mint_jwt("editor@example.org", Some("EDITOR"));

    let body: serde_json::Value = client
        .get(srv.url("/rbac/explain?resource=BLOG_POSTS&action=DELETE"))
        .bearer_auth(&editor.token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["explanation"]["granted"], false);
    assert_eq!(body["explanation"]["denial"], "action_not_granted");
    assert_eq!(body["explanation"]["description"], "delete blog posts");

    let res = client
        .get(srv.url("/rbac/explain?resource=DONORS&action=DELETE"))
        .bearer_auth(&editor.token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn dashboard_counts_only_viewable_resources() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let admin = mint_jwt("content@example.org", Some("CONTENT_ADMIN"));

    create_post(&client, &srv, &admin.token).await;

    let body: serde_json::Value = client
        .get(srv.url("/dashboard"))
        .bearer_auth(&admin.token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["counts"]["BLOG_POSTS"], 1);
    assert_eq!(body["counts"]["GALLERY"], 0);
}
