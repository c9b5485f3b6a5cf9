//! Account and feed API handlers.
//!
//! ```text
//! GET  /users/login      (Basic credentials -> session cookie)
//! POST /users/sign-up    {"username":"alice","password":"secret1"}
//! GET  /users/me/community?skip=0&limit=10
//! ```

use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::ports::SignUpRequest;
use crate::domain::{
    CommentLogEntry, Credentials, Error, Page, PageQuery, ProfileChanges, PublicProfile, Username,
};
use crate::inbound::http::auth::{basic_credentials, require_identity};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{require_text, FieldName};
use crate::inbound::http::ApiResult;

/// Sign-up request body for `POST /users/sign-up`.
///
/// Example JSON:
/// `{"username":"alice","password":"secret1","location":"Brooklyn"}`
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignUpBody {
    pub username: Option<String>,
    pub password: Option<String>,
    pub location: Option<String>,
    pub about: Option<String>,
    pub profile_pic_url: Option<String>,
}

/// Profile edit body for `PUT /users/me`; unset fields stay unchanged.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateBody {
    pub location: Option<String>,
    pub about: Option<String>,
    pub profile_pic_url: Option<String>,
}

/// Favorite add/remove body naming the target account.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteBody {
    pub username: Option<String>,
}

/// Authenticate with Basic credentials and establish a session.
#[utoipa::path(
    get,
    path = "/users/login",
    responses(
        (status = 200, description = "Sign in success", body = PublicProfile,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 503, description = "Account store unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[get("/users/login")]
pub async fn login(
    req: HttpRequest,
    session: SessionContext,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<PublicProfile>> {
    let credentials = basic_credentials(&req)?;
    let authenticated = state.auth.authenticate(&credentials).await?;
    session.persist_user(authenticated.identity.id())?;
    Ok(web::Json(authenticated.profile))
}

/// End the current session. Idempotent.
#[utoipa::path(
    get,
    path = "/users/logout",
    responses((status = 200, description = "Session ended")),
    tags = ["users"],
    operation_id = "logout",
    security([])
)]
#[get("/users/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.end_session();
    HttpResponse::Ok().json(json!({ "message": "logged out" }))
}

/// Current identity's public profile.
#[utoipa::path(
    get,
    path = "/users/me",
    responses(
        (status = 200, description = "Profile", body = PublicProfile),
        (status = 401, description = "Not signed in", body = Error)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/users/me")]
pub async fn current_user(
    session: SessionContext,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<PublicProfile>> {
    let identity = require_identity(&session, state.directory.as_ref()).await?;
    let profile = state.directory.profile_of(identity.username()).await?;
    Ok(web::Json(profile))
}

/// Create an account.
#[utoipa::path(
    post,
    path = "/users/sign-up",
    request_body = SignUpBody,
    responses(
        (status = 201, description = "Account created", body = PublicProfile),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Username already taken", body = Error)
    ),
    tags = ["users"],
    operation_id = "signUp",
    security([])
)]
#[post("/users/sign-up")]
pub async fn sign_up(
    payload: web::Json<SignUpBody>,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    let SignUpBody {
        username,
        password,
        location,
        about,
        profile_pic_url,
    } = payload.into_inner();

    let username = require_text(username, FieldName::new("username"))?;
    let password = require_text(password, FieldName::new("password"))?;
    let credentials = Credentials::try_from_parts(&username, &password)
        .map_err(|err| Error::invalid_request(err.to_string()))?;

    let profile = state
        .directory
        .sign_up(SignUpRequest {
            credentials,
            profile: ProfileChanges {
                location,
                about,
                profile_pic_url,
            },
        })
        .await?;
    Ok(HttpResponse::Created().json(profile))
}

/// Edit the current identity's profile; unset fields stay unchanged.
#[utoipa::path(
    put,
    path = "/users/me",
    request_body = ProfileUpdateBody,
    responses(
        (status = 200, description = "Updated profile", body = PublicProfile),
        (status = 401, description = "Not signed in", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateProfile"
)]
#[put("/users/me")]
pub async fn update_profile(
    payload: web::Json<ProfileUpdateBody>,
    session: SessionContext,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<PublicProfile>> {
    let identity = require_identity(&session, state.directory.as_ref()).await?;
    let ProfileUpdateBody {
        location,
        about,
        profile_pic_url,
    } = payload.into_inner();
    let profile = state
        .directory
        .update_profile(
            &identity,
            ProfileChanges {
                location,
                about,
                profile_pic_url,
            },
        )
        .await?;
    Ok(web::Json(profile))
}

/// Follow a user. Idempotent; the target is not required to exist.
#[utoipa::path(
    post,
    path = "/users/me/favorites",
    request_body = FavoriteBody,
    responses(
        (status = 200, description = "Updated profile", body = PublicProfile),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Not signed in", body = Error)
    ),
    tags = ["users"],
    operation_id = "addFavorite"
)]
#[post("/users/me/favorites")]
pub async fn add_favorite(
    payload: web::Json<FavoriteBody>,
    session: SessionContext,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<PublicProfile>> {
    let identity = require_identity(&session, state.directory.as_ref()).await?;
    let favorite = favorite_username(payload.into_inner())?;
    let profile = state.directory.add_favorite(&identity, &favorite).await?;
    Ok(web::Json(profile))
}

/// Unfollow a user. Idempotent; takes effect on the next feed query.
#[utoipa::path(
    delete,
    path = "/users/me/favorites",
    request_body = FavoriteBody,
    responses(
        (status = 200, description = "Updated profile", body = PublicProfile),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Not signed in", body = Error)
    ),
    tags = ["users"],
    operation_id = "removeFavorite"
)]
#[delete("/users/me/favorites")]
pub async fn remove_favorite(
    payload: web::Json<FavoriteBody>,
    session: SessionContext,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<PublicProfile>> {
    let identity = require_identity(&session, state.directory.as_ref()).await?;
    let favorite = favorite_username(payload.into_inner())?;
    let profile = state
        .directory
        .remove_favorite(&identity, &favorite)
        .await?;
    Ok(web::Json(profile))
}

fn favorite_username(payload: FavoriteBody) -> Result<Username, Error> {
    let raw = require_text(payload.username, FieldName::new("username"))?;
    Username::new(raw).map_err(|err| Error::invalid_request(err.to_string()))
}

/// Delete the current identity's account and end the session.
///
/// Authored comments and discussions stay attributed to the username
/// string.
#[utoipa::path(
    delete,
    path = "/users/me",
    responses(
        (status = 204, description = "Account deleted"),
        (status = 401, description = "Not signed in", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteAccount"
)]
#[delete("/users/me")]
pub async fn delete_account(
    session: SessionContext,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    let identity = require_identity(&session, state.directory.as_ref()).await?;
    state.directory.delete_account(&identity).await?;
    session.end_session();
    Ok(HttpResponse::NoContent().finish())
}

/// Paginated feed of comments by the identity's favorites plus themself.
#[utoipa::path(
    get,
    path = "/users/me/community",
    params(PageQuery),
    responses(
        (status = 200, description = "Feed entries, newest first", body = [CommentLogEntry]),
        (status = 401, description = "Not signed in", body = Error)
    ),
    tags = ["users"],
    operation_id = "communityFeed"
)]
#[get("/users/me/community")]
pub async fn community_feed(
    query: web::Query<PageQuery>,
    session: SessionContext,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<CommentLogEntry>>> {
    let identity = require_identity(&session, state.directory.as_ref()).await?;
    let feed = state
        .feed
        .community_feed(&identity, Page::from(query.into_inner()))
        .await?;
    Ok(web::Json(feed))
}

/// Another user's public profile.
#[utoipa::path(
    get,
    path = "/users/{username}",
    params(("username" = String, Path, description = "Exact username")),
    responses(
        (status = 200, description = "Profile", body = PublicProfile),
        (status = 401, description = "Not signed in", body = Error),
        (status = 404, description = "No such user", body = Error)
    ),
    tags = ["users"],
    operation_id = "userProfile"
)]
#[get("/users/{username}")]
pub async fn user_profile(
    path: web::Path<String>,
    session: SessionContext,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<PublicProfile>> {
    require_identity(&session, state.directory.as_ref()).await?;
    let username = Username::new(path.into_inner())
        .map_err(|err| Error::invalid_request(err.to_string()))?;
    let profile = state.directory.profile_of(&username).await?;
    Ok(web::Json(profile))
}
