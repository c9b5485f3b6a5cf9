//! HTTP inbound adapter exposing the REST endpoints.

pub mod auth;
pub mod discussions;
pub mod error;
pub mod health;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;

use actix_web::web;

/// Register every API endpoint on a service config.
///
/// The literal `/users/...` routes are registered before the
/// `/users/{username}` capture so they win route matching.
pub fn endpoints(cfg: &mut web::ServiceConfig) {
    cfg.service(users::login)
        .service(users::logout)
        .service(users::current_user)
        .service(users::sign_up)
        .service(users::update_profile)
        .service(users::add_favorite)
        .service(users::remove_favorite)
        .service(users::delete_account)
        .service(users::community_feed)
        .service(discussions::list_discussions)
        .service(discussions::search_discussions)
        .service(discussions::single_discussion)
        .service(discussions::create_discussion)
        .service(discussions::append_comment)
        .service(users::user_profile);
}
