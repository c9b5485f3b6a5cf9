//! Discussion API handlers.
//!
//! ```text
//! POST /discussions          (idempotent creation keyed by external id)
//! POST /discussions/comment  {"discussionId":"d1","discussionName":"...","text":"hi"}
//! GET  /discussion/picasso+matisse
//! ```

use actix_web::{get, post, web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::page::DEFAULT_LIMIT;
use crate::domain::ports::AppendCommentRequest;
use crate::domain::{
    Discussion, DiscussionId, Error, NewDiscussion, Page, PageQuery, Venue,
};
use crate::inbound::http::auth::require_identity;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{require, require_text, FieldName};
use crate::inbound::http::ApiResult;

/// Venue fields of a creation request; missing subfields default to empty.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VenueBody {
    pub name: Option<String>,
    pub address: Option<String>,
    pub area: Option<String>,
}

impl From<VenueBody> for Venue {
    fn from(body: VenueBody) -> Self {
        Self {
            name: body.name.unwrap_or_default(),
            address: body.address.unwrap_or_default(),
            area: body.area.unwrap_or_default(),
        }
    }
}

/// Discussion creation body; every listed field is required.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewDiscussionBody {
    pub id: Option<String>,
    pub href: Option<String>,
    pub name: Option<String>,
    pub venue: Option<VenueBody>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub date_start: Option<DateTime<Utc>>,
    pub date_end: Option<DateTime<Utc>>,
    pub search_terms: Option<Vec<String>>,
}

/// Comment creation body.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentBody {
    pub discussion_id: Option<String>,
    pub discussion_name: Option<String>,
    pub text: Option<String>,
}

/// Commented discussions, most recently active first.
#[utoipa::path(
    get,
    path = "/discussions",
    params(PageQuery),
    responses(
        (status = 200, description = "Discussions, newest activity first", body = [Discussion]),
        (status = 401, description = "Not signed in", body = Error)
    ),
    tags = ["discussions"],
    operation_id = "listDiscussions"
)]
#[get("/discussions")]
pub async fn list_discussions(
    query: web::Query<PageQuery>,
    session: SessionContext,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<Discussion>>> {
    require_identity(&session, state.directory.as_ref()).await?;
    let discussions = state
        .discussions
        .list_recent(Page::from(query.into_inner()))
        .await?;
    Ok(web::Json(discussions))
}

/// Tag search; `+`-separated tags, matched verbatim, oldest activity first.
#[utoipa::path(
    get,
    path = "/discussion/{tags}",
    params(("tags" = String, Path, description = "`+`-separated search tags")),
    responses(
        (status = 200, description = "Matching discussions, oldest activity first", body = [Discussion]),
        (status = 400, description = "No usable tags", body = Error),
        (status = 401, description = "Not signed in", body = Error)
    ),
    tags = ["discussions"],
    operation_id = "searchDiscussions"
)]
#[get("/discussion/{tags}")]
pub async fn search_discussions(
    path: web::Path<String>,
    session: SessionContext,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<Discussion>>> {
    require_identity(&session, state.directory.as_ref()).await?;
    let tags: Vec<String> = path
        .into_inner()
        .split('+')
        .filter(|tag| !tag.is_empty())
        .map(ToOwned::to_owned)
        .collect();
    if tags.is_empty() {
        return Err(Error::invalid_request("at least one search tag is required"));
    }
    let discussions = state.search.by_any_tag(&tags, DEFAULT_LIMIT).await?;
    Ok(web::Json(discussions))
}

/// One discussion with comment pictures resolved against live profiles.
#[utoipa::path(
    get,
    path = "/single-discussion/{id}",
    params(("id" = String, Path, description = "External discussion identifier")),
    responses(
        (status = 200, description = "Discussion", body = Discussion),
        (status = 401, description = "Not signed in", body = Error),
        (status = 404, description = "No such discussion", body = Error)
    ),
    tags = ["discussions"],
    operation_id = "singleDiscussion"
)]
#[get("/single-discussion/{id}")]
pub async fn single_discussion(
    path: web::Path<String>,
    session: SessionContext,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Discussion>> {
    require_identity(&session, state.directory.as_ref()).await?;
    let id = DiscussionId::new(path.into_inner())
        .map_err(|err| Error::invalid_request(err.to_string()))?;
    let discussion = state.discussions.get_enriched(&id).await?;
    Ok(web::Json(discussion))
}

/// Idempotent discussion creation keyed by the external identifier.
///
/// Replays return the stored record unchanged with `200 OK`; only the
/// first call answers `201 Created`.
#[utoipa::path(
    post,
    path = "/discussions",
    request_body = NewDiscussionBody,
    responses(
        (status = 201, description = "Discussion created", body = Discussion),
        (status = 200, description = "Discussion already existed", body = Discussion),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Not signed in", body = Error)
    ),
    tags = ["discussions"],
    operation_id = "createDiscussion"
)]
#[post("/discussions")]
pub async fn create_discussion(
    payload: web::Json<NewDiscussionBody>,
    session: SessionContext,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    require_identity(&session, state.directory.as_ref()).await?;
    let body = payload.into_inner();

    // Validation order mirrors the documented required-field list; the
    // first missing field is the one reported.
    let id = require_text(body.id, FieldName::new("id"))?;
    let href = require(body.href, FieldName::new("href"))?;
    let name = require(body.name, FieldName::new("name"))?;
    let venue = require(body.venue, FieldName::new("venue"))?;
    let description = require(body.description, FieldName::new("description"))?;
    let image = require(body.image, FieldName::new("image"))?;
    let date_start = require(body.date_start, FieldName::new("dateStart"))?;
    let date_end = require(body.date_end, FieldName::new("dateEnd"))?;
    let search_terms = require(body.search_terms, FieldName::new("searchTerms"))?;

    let id = DiscussionId::new(id).map_err(|err| Error::invalid_request(err.to_string()))?;
    let (discussion, was_created) = state
        .discussions
        .create_or_get(NewDiscussion {
            id,
            href,
            name,
            venue: venue.into(),
            description,
            image,
            date_start,
            date_end,
            search_terms,
        })
        .await?;

    let mut response = if was_created {
        HttpResponse::Created()
    } else {
        HttpResponse::Ok()
    };
    Ok(response.json(discussion))
}

/// Append a comment to a discussion as the signed-in identity.
#[utoipa::path(
    post,
    path = "/discussions/comment",
    request_body = CommentBody,
    responses(
        (status = 201, description = "Updated discussion", body = Discussion),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Not signed in", body = Error),
        (status = 404, description = "No such discussion", body = Error)
    ),
    tags = ["discussions"],
    operation_id = "appendComment"
)]
#[post("/discussions/comment")]
pub async fn append_comment(
    payload: web::Json<CommentBody>,
    session: SessionContext,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    let identity = require_identity(&session, state.directory.as_ref()).await?;
    let body = payload.into_inner();

    let discussion_id = require_text(body.discussion_id, FieldName::new("discussionId"))?;
    let discussion_name = require_text(body.discussion_name, FieldName::new("discussionName"))?;
    let text = require_text(body.text, FieldName::new("text"))?;

    let discussion_id =
        DiscussionId::new(discussion_id).map_err(|err| Error::invalid_request(err.to_string()))?;
    let discussion = state
        .discussions
        .append_comment(
            &identity,
            AppendCommentRequest {
                discussion_id,
                discussion_name,
                text,
            },
        )
        .await?;
    Ok(HttpResponse::Created().json(discussion))
}
