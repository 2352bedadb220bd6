//! Person routes
//!
//! Each route forwards to [`PersonHandler`](crate::PersonHandler) and maps
//! the resulting [`Outcome`] onto an HTTP response.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};

use crate::models::{CreateRequest, PersonList, SearchRequest};
use crate::{ApiResult, AppState, Outcome};

/// Location of the person listing
pub const LIST_PATH: &str = "/person";

impl IntoResponse for Outcome {
    fn into_response(self) -> Response {
        match self {
            Outcome::DisplayList(persons) => Json(PersonList {
                partial: false,
                persons,
            })
            .into_response(),
            Outcome::PartialList(persons) => Json(PersonList {
                partial: true,
                persons,
            })
            .into_response(),
            Outcome::CreateForm(form) => {
                let status = if form.has_errors() {
                    StatusCode::UNPROCESSABLE_ENTITY
                } else {
                    StatusCode::OK
                };
                (status, Json(form)).into_response()
            }
            Outcome::RedirectToList => Redirect::to(LIST_PATH).into_response(),
            Outcome::Message(message) => message.into_response(),
        }
    }
}

/// GET /
pub async fn redirect_to_list() -> Redirect {
    Redirect::to(LIST_PATH)
}

/// GET /person
///
/// Lists every person with their group.
pub async fn list_persons(State(state): State<AppState>) -> ApiResult<Outcome> {
    state.handler.list().await
}

/// GET /person/create
///
/// Empty create form with group options.
pub async fn show_create_form(State(state): State<AppState>) -> ApiResult<Outcome> {
    state.handler.show_create_form().await
}

/// POST /person/create
///
/// **Request:** form fields `personName`, `dateAdded`, `selectedGroupId`
/// **Response:** 303 to the listing, or 422 with the form re-populated
pub async fn submit_create(
    State(state): State<AppState>,
    Form(request): Form<CreateRequest>,
) -> ApiResult<Outcome> {
    state.handler.submit_create(request).await
}

/// POST /person/search
///
/// **Request:** form fields `searchName`, `searchGroup`
/// **Response:** plain text prompt when both are blank, otherwise a partial listing
pub async fn search_persons(
    State(state): State<AppState>,
    Form(request): Form<SearchRequest>,
) -> ApiResult<Outcome> {
    let name = request.search_name.unwrap_or_default();
    let group = request.search_group.unwrap_or_default();
    state.handler.search(&name, &group).await
}
