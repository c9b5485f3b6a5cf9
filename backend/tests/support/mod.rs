//! Shared helpers for the HTTP integration tests.
//!
//! Builds an app from the same composition the binary uses (`server`
//! module wiring plus the inbound endpoint registration) with a fresh
//! in-process store per app.

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use artseen_backend::inbound::http;
use artseen_backend::server;

/// Build an application over empty stores.
pub fn test_app() -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build();

    App::new()
        .app_data(web::Data::new(server::build_state()))
        .wrap(session)
        .configure(http::endpoints)
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
