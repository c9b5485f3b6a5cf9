//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification for
//! the REST API: every endpoint from the inbound layer, the shared error
//! payload, and the session cookie security scheme. The generated document
//! backs Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    CommentLogEntry, Discussion, DiscussionComment, DiscussionRef, Error, ErrorCode,
    PublicProfile, Venue,
};
use crate::inbound::http::discussions::{CommentBody, NewDiscussionBody, VenueBody};
use crate::inbound::http::users::{FavoriteBody, ProfileUpdateBody, SignUpBody};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by GET /users/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Artseen backend API",
        description = "Session-authenticated discussions, comment feeds, and account management."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::sign_up,
        crate::inbound::http::users::update_profile,
        crate::inbound::http::users::add_favorite,
        crate::inbound::http::users::remove_favorite,
        crate::inbound::http::users::delete_account,
        crate::inbound::http::users::community_feed,
        crate::inbound::http::users::user_profile,
        crate::inbound::http::discussions::list_discussions,
        crate::inbound::http::discussions::search_discussions,
        crate::inbound::http::discussions::single_discussion,
        crate::inbound::http::discussions::create_discussion,
        crate::inbound::http::discussions::append_comment,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        PublicProfile,
        Discussion,
        DiscussionComment,
        Venue,
        CommentLogEntry,
        DiscussionRef,
        SignUpBody,
        ProfileUpdateBody,
        FavoriteBody,
        NewDiscussionBody,
        VenueBody,
        CommentBody,
    )),
    tags(
        (name = "users", description = "Accounts, sessions, favorites, and feeds"),
        (name = "discussions", description = "Discussions, comments, and tag search"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI path and schema registration.

    use super::*;

    #[test]
    fn every_endpoint_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/users/login",
            "/users/logout",
            "/users/me",
            "/users/sign-up",
            "/users/me/favorites",
            "/users/me/community",
            "/users/{username}",
            "/discussions",
            "/discussion/{tags}",
            "/single-discussion/{id}",
            "/discussions/comment",
            "/health/ready",
            "/health/live",
        ] {
            assert!(
                doc.paths.paths.contains_key(path),
                "missing OpenAPI path: {path}"
            );
        }
    }

    #[test]
    fn the_error_schema_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.as_ref().expect("components present");
        assert!(components.schemas.contains_key("Error"));
        assert!(components.schemas.contains_key("PublicProfile"));
        assert!(components.schemas.contains_key("Discussion"));
    }
}
