//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_session::{
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
    SessionMiddleware,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpServer};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::{
    AuthService, DirectoryService, DiscussionService, FeedService, TagSearchService,
};
use crate::domain::ports::DiscussionStore;
use crate::inbound::http;
use crate::inbound::http::health::{live, ready, HealthState};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::{MemoryCommentLog, MemoryDiscussionRepository, MemoryUserRepository};
use crate::outbound::{Sha256PasswordHasher, SystemClock};

/// Wire the default in-process adapters into an HTTP state bundle.
///
/// The binary and the integration tests both build their apps from this
/// composition so they exercise the same wiring.
pub fn build_state() -> HttpState {
    let users = Arc::new(MemoryUserRepository::new());
    let discussion_repo = Arc::new(MemoryDiscussionRepository::new());
    let comment_log = Arc::new(MemoryCommentLog::new());
    let hasher = Arc::new(Sha256PasswordHasher);
    let clock = Arc::new(SystemClock);

    let auth = AuthService::new(Arc::clone(&users), Arc::clone(&hasher));
    let directory = DirectoryService::new(Arc::clone(&users), Arc::clone(&hasher));
    let discussions: Arc<dyn DiscussionStore> = Arc::new(DiscussionService::new(
        discussion_repo,
        Arc::clone(&comment_log),
        Arc::clone(&users),
        clock,
    ));
    let feed = FeedService::new(comment_log, users);
    let search = TagSearchService::new(Arc::clone(&discussions));

    HttpState::new(
        Arc::new(auth),
        Arc::new(directory),
        discussions,
        Arc::new(feed),
        Arc::new(search),
    )
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
    session_ttl: actix_web::cookie::time::Duration,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
        session_ttl,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(PersistentSession::default().session_ttl(session_ttl))
        .build();

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(session)
        .configure(http::endpoints)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(build_state());
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        session_ttl,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
            session_ttl,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
