//! Test helpers for inbound HTTP components.

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{header, StatusCode};
use actix_web::test;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::inbound::http::state::HttpState;
use crate::server;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Fresh in-process state with empty stores.
pub fn memory_state() -> HttpState {
    server::build_state()
}

/// Create the account if needed and sign in, returning the session cookie.
pub async fn sign_in<S, B>(app: &S, username: &str, password: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let sign_up = test::TestRequest::post()
        .uri("/users/sign-up")
        .set_json(serde_json::json!({ "username": username, "password": password }))
        .to_request();
    let response = test::call_service(app, sign_up).await;
    assert!(
        response.status() == StatusCode::CREATED || response.status() == StatusCode::CONFLICT,
        "sign-up failed: {}",
        response.status()
    );

    let token = STANDARD.encode(format!("{username}:{password}"));
    let login = test::TestRequest::get()
        .uri("/users/login")
        .insert_header((header::AUTHORIZATION, format!("Basic {token}")))
        .to_request();
    let response = test::call_service(app, login).await;
    assert!(response.status().is_success(), "login failed");
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}
