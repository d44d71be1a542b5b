#![allow(unused_imports)]

use std::time::Duration;

use anyhow::Result;
use gumroad_sdk::{Error, ErrorKind, LinkParams, Request as ApiRequest, Validation};
#[cfg(feature = "blocking")]
use gumroad_sdk::BlockingClient;
#[cfg(feature = "async")]
use gumroad_sdk::Client;
use http::{Method, StatusCode};
use serde_json::json;
#[cfg(feature = "blocking")]
use tokio::task;
use wiremock::{
    Match, Mock, MockServer, Request, ResponseTemplate,
    matchers::{body_string, body_string_contains, header, method, path, query_param},
};

const EMAIL: &str = "seller@example.com";
const PASSWORD: &str = "hunter2";

/// Matches requests that carry no `token` anywhere (query or body).
#[derive(Clone, Copy)]
struct NoToken;

impl Match for NoToken {
    fn matches(&self, request: &Request) -> bool {
        let in_query = request.url.query_pairs().any(|(k, _)| k == "token");
        let in_body = String::from_utf8_lossy(&request.body).contains("token=");
        !in_query && !in_body
    }
}

/// Matches requests without a body.
#[derive(Clone, Copy)]
struct EmptyBody;

impl Match for EmptyBody {
    fn matches(&self, request: &Request) -> bool {
        request.body.is_empty()
    }
}

fn base_url(server: &MockServer) -> String {
    format!("{}/api/v1", server.uri())
}

async fn mock_login(server: &MockServer, token: &str, expected: u64) {
    Mock::given(method("POST"))
        .and(path("/api/v1/sessions"))
        .and(body_string_contains("email=seller%40example.com"))
        .and(body_string_contains("password=hunter2"))
        .and(NoToken)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "token": token
        })))
        .expect(expected)
        .up_to_n_times(expected)
        .mount(server)
        .await;
}

async fn mock_logout(server: &MockServer, token: &str, response: ResponseTemplate, expected: u64) {
    Mock::given(method("DELETE"))
        .and(path("/api/v1/sessions"))
        .and(body_string(format!("token={token}")))
        .respond_with(response)
        .expect(expected)
        .mount(server)
        .await;
}

fn ok_body(extra: serde_json::Value) -> ResponseTemplate {
    let mut body = json!({ "success": true });
    if let (Some(body), Some(extra)) = (body.as_object_mut(), extra.as_object()) {
        body.extend(extra.clone());
    }
    ResponseTemplate::new(200).set_body_json(body)
}

#[cfg(feature = "blocking")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn blocking_create_link_sends_form_body_with_token() -> Result<()> {
    let server = MockServer::start().await;

    mock_login(&server, "tok-1", 1).await;

    Mock::given(method("POST"))
        .and(path("/api/v1/links"))
        .and(body_string("name=Widget&price=500&token=tok-1"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .respond_with(ok_body(json!({
            "link": { "id": "abc", "name": "Widget", "price": 500 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let base = base_url(&server);
    task::spawn_blocking(move || -> Result<()> {
        let client = BlockingClient::builder().base_url(base).build()?;

        let login = client.authenticate(EMAIL, PASSWORD)?;
        assert_eq!(login.token(), Some("tok-1"));
        assert_eq!(
            client.token().as_ref().map(|t| t.expose().to_owned()),
            Some("tok-1".to_owned())
        );

        let created = client
            .links()
            .create(LinkParams::new().name("Widget").price(500))?;
        let link = created.link()?.expect("link payload");
        assert_eq!(link.id.as_ref().map(|id| id.as_str()), Some("abc"));
        assert_eq!(link.price, Some(500));
        Ok(())
    })
    .await??;

    server.verify().await;
    Ok(())
}

#[cfg(feature = "blocking")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn blocking_get_requests_carry_params_in_query() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/links"))
        .and(query_param("token", "saved-token"))
        .and(EmptyBody)
        .respond_with(ok_body(json!({ "links": [{ "id": "a" }, { "id": "b" }] })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/links/a%20b"))
        .and(query_param("token", "saved-token"))
        .respond_with(ok_body(json!({ "link": { "id": "a b" } })))
        .expect(1)
        .mount(&server)
        .await;

    let base = base_url(&server);
    task::spawn_blocking(move || -> Result<()> {
        let client = BlockingClient::builder().base_url(base).build()?;
        client.set_token("saved-token");

        let links = client.links().list()?.links()?;
        assert_eq!(links.len(), 2);

        let single = client.links().get("a b")?;
        assert_eq!(single.status(), StatusCode::OK);
        Ok(())
    })
    .await??;

    server.verify().await;
    Ok(())
}

#[cfg(feature = "blocking")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn blocking_requests_without_session_omit_token() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/links"))
        .and(NoToken)
        .respond_with(ok_body(json!({ "links": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let base = base_url(&server);
    task::spawn_blocking(move || -> Result<()> {
        let client = BlockingClient::builder().base_url(base).build()?;
        assert!(!client.is_authenticated());
        client.links().list()?;
        Ok(())
    })
    .await??;

    server.verify().await;
    Ok(())
}

#[cfg(feature = "blocking")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn blocking_link_verbs_map_to_paths_and_bodies() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/links/abc"))
        .and(body_string("name=Renamed&token=tok"))
        .respond_with(ok_body(json!({ "link": { "id": "abc", "name": "Renamed" } })))
        .expect(1)
        .mount(&server)
        .await;

    for action in ["enable", "disable"] {
        Mock::given(method("PUT"))
            .and(path(format!("/api/v1/links/abc/{action}")))
            .and(body_string("token=tok"))
            .respond_with(ok_body(json!({ "link": { "id": "abc" } })))
            .expect(1)
            .mount(&server)
            .await;
    }

    Mock::given(method("DELETE"))
        .and(path("/api/v1/links/abc"))
        .and(body_string("token=tok"))
        .respond_with(ok_body(json!({ "message": "The link was deleted successfully." })))
        .expect(1)
        .mount(&server)
        .await;

    let base = base_url(&server);
    task::spawn_blocking(move || -> Result<()> {
        let client = BlockingClient::builder().base_url(base).build()?;
        client.set_token("tok");

        let links = client.links();
        let updated = links.update("abc", [("name", "Renamed")])?;
        assert_eq!(updated.link()?.and_then(|l| l.name).as_deref(), Some("Renamed"));
        links.enable("abc")?;
        links.disable("abc")?;
        let deleted = links.delete("abc")?;
        assert_eq!(deleted.message(), Some("The link was deleted successfully."));
        Ok(())
    })
    .await??;

    server.verify().await;
    Ok(())
}

#[cfg(feature = "blocking")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn blocking_head_request_sends_no_body() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/api/v1/links"))
        .and(query_param("token", "tok"))
        .and(EmptyBody)
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let base = base_url(&server);
    task::spawn_blocking(move || -> Result<()> {
        let client = BlockingClient::builder().base_url(base).build()?;
        client.set_token("tok");

        let resp = client.request(&ApiRequest::head(["links"]))?;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.data().is_empty());
        Ok(())
    })
    .await??;

    server.verify().await;
    Ok(())
}

#[cfg(feature = "blocking")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn blocking_strict_mode_raises_http_and_api_errors() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/links/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "success": false,
            "message": "The link was not found."
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/links"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": { "message": "X" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let base = base_url(&server);
    task::spawn_blocking(move || -> Result<()> {
        let client = BlockingClient::builder().base_url(base).build()?;
        assert_eq!(client.validation(), Validation::Strict);

        let err = client.links().get("missing").expect_err("expected HTTP error");
        match &err {
            Error::Http(http) => {
                assert_eq!(http.status, StatusCode::NOT_FOUND);
                assert_eq!(http.message.as_deref(), Some("The link was not found."));
                assert_eq!(http.path(), "/api/v1/links/missing");
            }
            other => panic!("unexpected error variant: {other:?}"),
        }
        assert!(err.is_not_found());

        let err = client
            .links()
            .create([("name", "Widget")])
            .expect_err("expected API error");
        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.message(), Some("X"));
        Ok(())
    })
    .await??;

    server.verify().await;
    Ok(())
}

#[cfg(feature = "blocking")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn blocking_failed_login_leaves_token_unset() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/sessions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": { "message": "The email or password was incorrect." }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let base = base_url(&server);
    task::spawn_blocking(move || -> Result<()> {
        let client = BlockingClient::builder().base_url(base).build()?;

        let err = client
            .authenticate(EMAIL, "wrong")
            .expect_err("expected API error");
        assert_eq!(err.message(), Some("The email or password was incorrect."));
        assert!(!client.is_authenticated());
        Ok(())
    })
    .await??;

    server.verify().await;
    Ok(())
}

#[cfg(feature = "blocking")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn blocking_strict_logout_failure_keeps_token() -> Result<()> {
    let server = MockServer::start().await;

    mock_logout(
        &server,
        "tok",
        ResponseTemplate::new(500).set_body_json(json!({ "success": false })),
        1,
    )
    .await;

    let base = base_url(&server);
    task::spawn_blocking(move || -> Result<()> {
        let client = BlockingClient::builder().base_url(base).build()?;
        client.set_token("tok");

        let err = client.deauthenticate().expect_err("expected HTTP error");
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(client.is_authenticated());
        Ok(())
    })
    .await??;

    server.verify().await;
    Ok(())
}

#[cfg(feature = "blocking")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn blocking_permissive_mode_returns_failures_with_status() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/links/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "success": false,
            "error": { "message": "X" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    mock_logout(
        &server,
        "tok",
        ResponseTemplate::new(500).set_body_json(json!({ "success": false })),
        1,
    )
    .await;

    let base = base_url(&server);
    task::spawn_blocking(move || -> Result<()> {
        let client = BlockingClient::builder()
            .base_url(base)
            .validation(Validation::Permissive)
            .build()?;
        client.set_token("tok");

        let resp = client.links().get("missing")?;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(resp.success(), Some(false));
        assert_eq!(resp.get("http_code"), Some(&json!(404)));
        assert_eq!(resp.message(), Some("X"));

        let logout = client.deauthenticate()?;
        assert_eq!(logout.get("http_code"), Some(&json!(500)));
        assert!(!client.is_authenticated());
        Ok(())
    })
    .await??;

    server.verify().await;
    Ok(())
}

#[cfg(feature = "blocking")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn blocking_session_guard_logs_out_once_on_drop() -> Result<()> {
    let server = MockServer::start().await;

    mock_login(&server, "tok-1", 1).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/links"))
        .and(query_param("token", "tok-1"))
        .respond_with(ok_body(json!({ "links": [] })))
        .expect(1)
        .mount(&server)
        .await;

    mock_logout(&server, "tok-1", ok_body(json!({})), 1).await;

    let base = base_url(&server);
    task::spawn_blocking(move || -> Result<()> {
        let client = BlockingClient::builder().base_url(base).build()?;
        {
            let session = client.session(EMAIL, PASSWORD)?;
            session.links().list()?;
            assert!(session.is_authenticated());
        }
        assert!(!client.is_authenticated());
        Ok(())
    })
    .await??;

    server.verify().await;
    Ok(())
}

#[cfg(feature = "blocking")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn blocking_session_guard_skips_logout_without_token() -> Result<()> {
    let server = MockServer::start().await;

    mock_login(&server, "tok-1", 2).await;
    mock_logout(&server, "tok-1", ok_body(json!({})), 1).await;

    let base = base_url(&server);
    task::spawn_blocking(move || -> Result<()> {
        let client = BlockingClient::builder().base_url(base).build()?;

        {
            let session = client.session(EMAIL, PASSWORD)?;
            session.deauthenticate()?;
        }

        let session = client.session(EMAIL, PASSWORD)?;
        client.clear_token();
        assert!(session.end()?.is_none());
        Ok(())
    })
    .await??;

    server.verify().await;
    Ok(())
}

#[cfg(feature = "blocking")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn blocking_with_session_releases_after_error() -> Result<()> {
    let server = MockServer::start().await;

    mock_login(&server, "tok-1", 1).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/links/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "success": false })))
        .expect(1)
        .mount(&server)
        .await;

    mock_logout(&server, "tok-1", ok_body(json!({})), 1).await;

    let base = base_url(&server);
    task::spawn_blocking(move || -> Result<()> {
        let client = BlockingClient::builder().base_url(base).build()?;

        let result: std::result::Result<(), Error> =
            client.with_session(EMAIL, PASSWORD, |client| {
                client.links().get("gone")?;
                Ok(())
            });

        assert!(result.expect_err("expected HTTP error").is_not_found());
        assert!(!client.is_authenticated());
        Ok(())
    })
    .await??;

    server.verify().await;
    Ok(())
}

#[cfg(feature = "blocking")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn blocking_request_hook_can_add_headers() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/links"))
        .and(header("x-trace", "abc"))
        .respond_with(ok_body(json!({ "links": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let base = base_url(&server);
    task::spawn_blocking(move || -> Result<()> {
        let client = BlockingClient::builder()
            .base_url(base)
            .request_hook(|mut ctx| {
                assert!(ctx.in_query);
                assert!(ctx.has_token());
                assert_eq!(ctx.param("token"), Some("tok"));
                ctx.headers
                    .insert("x-trace", http::HeaderValue::from_static("abc"));
                Ok(())
            })
            .build()?;
        client.set_token("tok");
        client.links().list()?;
        Ok(())
    })
    .await??;

    server.verify().await;
    Ok(())
}

#[cfg(feature = "blocking")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn blocking_timeout_surfaces_as_transport_error() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/links"))
        .respond_with(ok_body(json!({ "links": [] })).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let base = base_url(&server);
    task::spawn_blocking(move || -> Result<()> {
        let client = BlockingClient::builder()
            .base_url(base)
            .timeout_ms(50)
            .build()?;
        assert_eq!(client.timeout(), Duration::from_millis(50));

        let err = client.links().list().expect_err("expected timeout");
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(err.status(), None);
        Ok(())
    })
    .await??;

    Ok(())
}

#[cfg(feature = "blocking")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn blocking_error_snippet_redacts_token() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/links"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid token secret-tok"))
        .expect(1)
        .mount(&server)
        .await;

    let base = base_url(&server);
    task::spawn_blocking(move || -> Result<()> {
        let client = BlockingClient::builder().base_url(base).build()?;
        client.set_token("secret-tok");

        let err = client.links().list().expect_err("expected HTTP error");
        assert!(err.is_auth_error());
        match err {
            Error::Http(http) => {
                let snippet = http.body_snippet.as_deref().unwrap_or_default();
                assert!(snippet.contains("<redacted>"));
                assert!(!snippet.contains("secret-tok"));
            }
            other => panic!("unexpected error variant: {other:?}"),
        }
        Ok(())
    })
    .await??;

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_login_crud_logout_flow() -> Result<()> {
    let server = MockServer::start().await;

    mock_login(&server, "tok-9", 1).await;

    Mock::given(method("POST"))
        .and(path("/api/v1/links"))
        .and(body_string("name=Widget&price=500&token=tok-9"))
        .respond_with(ok_body(json!({ "link": { "id": "abc", "name": "Widget" } })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/links/abc"))
        .and(query_param("token", "tok-9"))
        .respond_with(ok_body(json!({ "link": { "id": "abc", "name": "Widget" } })))
        .expect(1)
        .mount(&server)
        .await;

    mock_logout(&server, "tok-9", ok_body(json!({})), 1).await;

    let client = Client::builder().base_url(base_url(&server)).build()?;

    client.authenticate(EMAIL, PASSWORD).await?;
    assert!(client.is_authenticated());

    client
        .links()
        .create([("name", "Widget"), ("price", "500")])
        .await?;
    let fetched = client.links().get("abc").await?;
    assert_eq!(fetched.link()?.and_then(|l| l.name).as_deref(), Some("Widget"));

    client.deauthenticate().await?;
    assert!(!client.is_authenticated());

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_strict_mode_maps_status_to_http_error() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/links"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Not found"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::builder().base_url(base_url(&server)).build()?;

    let err = client.links().list().await.expect_err("expected HTTP error");
    match err {
        Error::Http(http) => {
            assert_eq!(http.status, StatusCode::NOT_FOUND);
            assert_eq!(http.message.as_deref(), Some("Not found"));
        }
        other => panic!("unexpected error variant: {other:?}"),
    }

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_with_session_releases_once() -> Result<()> {
    let server = MockServer::start().await;

    mock_login(&server, "tok-2", 1).await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/links/abc/enable"))
        .and(body_string("token=tok-2"))
        .respond_with(ok_body(json!({ "link": { "id": "abc" } })))
        .expect(1)
        .mount(&server)
        .await;

    mock_logout(&server, "tok-2", ok_body(json!({})), 1).await;

    let client = Client::builder().base_url(base_url(&server)).build()?;

    let status = client
        .with_session(EMAIL, PASSWORD, |client| async move {
            let resp = client.links().enable("abc").await?;
            Ok::<_, Error>(resp.status())
        })
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert!(!client.is_authenticated());

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_custom_verb_sends_params_in_body() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("PURGE"))
        .and(path("/api/v1/links/abc"))
        .and(body_string("scope=all&token=tok"))
        .respond_with(ok_body(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::builder().base_url(base_url(&server)).build()?;
    client.set_token("tok");

    let req = ApiRequest::new(Method::from_bytes(b"PURGE")?, ["links", "abc"]).param("scope", "all");
    let resp = client.request(&req).await?;
    assert_eq!(resp.success(), Some(true));

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_connection_failure_is_transport_error() -> Result<()> {
    let client = Client::builder()
        .base_url("http://127.0.0.1:9/api/v1")
        .timeout_ms(500)
        .build()?;

    let err = client.links().list().await.expect_err("expected transport error");
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(!client.is_authenticated());
    Ok(())
}

async fn mock_redirect(server: &MockServer, verb: &str, from: &str) {
    Mock::given(method(verb))
        .and(path(from))
        .respond_with(
            ResponseTemplate::new(302).insert_header("location", format!("{}/elsewhere", server.uri())),
        )
        .expect(1)
        .mount(server)
        .await;

    Mock::given(path("/elsewhere"))
        .respond_with(ok_body(json!({})))
        .expect(0)
        .mount(server)
        .await;
}

fn assert_token_absent(err: &Error, token: &str) {
    let mut current: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(e) = current {
        assert!(!e.to_string().contains(token), "token leaked into: {e}");
        current = e.source();
    }
}

#[cfg(feature = "blocking")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn blocking_redirect_is_not_followed() -> Result<()> {
    let server = MockServer::start().await;
    mock_redirect(&server, "GET", "/api/v1/links").await;

    let base = base_url(&server);
    task::spawn_blocking(move || -> Result<()> {
        let client = BlockingClient::builder().base_url(base).build()?;
        client.set_token("tok");

        let err = client.links().list().expect_err("expected HTTP error");
        assert_eq!(err.kind(), ErrorKind::Http);
        assert_eq!(err.status(), Some(StatusCode::FOUND));
        Ok(())
    })
    .await??;

    server.verify().await;
    Ok(())
}

#[cfg(feature = "blocking")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn blocking_transport_error_hides_token() -> Result<()> {
    let base = "http://127.0.0.1:9/api/v1".to_owned();
    task::spawn_blocking(move || -> Result<()> {
        let client = BlockingClient::builder().base_url(base).timeout_ms(500).build()?;
        client.set_token("tok-secret");

        let err = client.links().list().expect_err("expected transport error");
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_token_absent(&err, "tok-secret");
        Ok(())
    })
    .await??;
    Ok(())
}

#[cfg(feature = "blocking")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn blocking_permissive_logout_clears_token_on_error_page() -> Result<()> {
    let server = MockServer::start().await;

    mock_logout(
        &server,
        "tok",
        ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"),
        1,
    )
    .await;

    let base = base_url(&server);
    task::spawn_blocking(move || -> Result<()> {
        let client = BlockingClient::builder()
            .base_url(base)
            .validation(Validation::Permissive)
            .build()?;
        client.set_token("tok");

        let resp = client.deauthenticate()?;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(resp.get("http_code"), Some(&json!(502)));
        assert!(!client.is_authenticated());
        Ok(())
    })
    .await??;

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_redirect_is_not_followed() -> Result<()> {
    let server = MockServer::start().await;
    mock_redirect(&server, "POST", "/api/v1/links").await;

    let client = Client::builder().base_url(base_url(&server)).build()?;
    client.set_token("tok");

    let err = client
        .links()
        .create(LinkParams::new().name("Widget"))
        .await
        .expect_err("expected HTTP error");
    match err {
        Error::Http(http) => assert_eq!(http.status, StatusCode::FOUND),
        other => panic!("unexpected error variant: {other:?}"),
    }

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_transport_error_hides_token() -> Result<()> {
    let client = Client::builder()
        .base_url("http://127.0.0.1:9/api/v1")
        .timeout_ms(500)
        .build()?;
    client.set_token("tok-secret");

    let err = client.links().list().await.expect_err("expected transport error");
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_token_absent(&err, "tok-secret");
    assert!(!format!("{err:?}").contains("tok-secret"));
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_permissive_logout_clears_token_on_error_page() -> Result<()> {
    let server = MockServer::start().await;

    mock_logout(
        &server,
        "tok",
        ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"),
        1,
    )
    .await;

    let client = Client::builder()
        .base_url(base_url(&server))
        .validation(Validation::Permissive)
        .build()?;
    client.set_token("tok");

    let resp = client.deauthenticate().await?;
    assert_eq!(resp.get("http_code"), Some(&json!(502)));
    assert!(!client.is_authenticated());

    server.verify().await;
    Ok(())
}
