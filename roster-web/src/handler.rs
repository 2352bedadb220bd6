//! Request handling for person operations
//!
//! `PersonHandler` turns a request into an [`Outcome`] descriptor. Form
//! validation problems are an outcome (the form is shown again); storage
//! faults are logged through the injected [`FailureLog`] and returned as
//! [`ApiError`].

use std::sync::Arc;

use roster_common::db::NewPerson;
use roster_common::Error;

use crate::error::{ApiError, ApiResult};
use crate::logging::FailureLog;
use crate::models::{CreateForm, CreateRequest, PersonView, SelectOption, ValidationErrors};
use crate::repository::PersonRepository;

/// Prompt returned when a search names neither a person nor a group
pub const SEARCH_PROMPT: &str = "Please enter person name or group";

/// What a request produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Full person listing
    DisplayList(Vec<PersonView>),
    /// Create form, empty or re-populated with validation errors
    CreateForm(CreateForm),
    /// Person created; go back to the listing
    RedirectToList,
    /// Plain text message
    Message(String),
    /// Listing fragment for an in-place search update
    PartialList(Vec<PersonView>),
}

/// Stateless handler shared by all requests
#[derive(Clone)]
pub struct PersonHandler {
    repository: Arc<dyn PersonRepository>,
    log: Arc<dyn FailureLog>,
}

impl PersonHandler {
    pub fn new(repository: Arc<dyn PersonRepository>, log: Arc<dyn FailureLog>) -> Self {
        Self { repository, log }
    }

    /// List every person
    pub async fn list(&self) -> ApiResult<Outcome> {
        let persons = self
            .repository
            .list_all_persons()
            .await
            .map_err(|e| self.storage_failure("list", "displaying all persons".to_string(), e))?;

        Ok(Outcome::DisplayList(
            persons.into_iter().map(PersonView::from).collect(),
        ))
    }

    /// Empty create form with the current group options
    pub async fn show_create_form(&self) -> ApiResult<Outcome> {
        let groups = self
            .group_options("show_create_form", "loading add person page".to_string())
            .await?;

        Ok(Outcome::CreateForm(CreateForm::empty(groups)))
    }

    /// Validate and persist a submitted create form
    ///
    /// Any rejected submission is redisplayed with group options loaded
    /// again from storage.
    pub async fn submit_create(&self, request: CreateRequest) -> ApiResult<Outcome> {
        let context = format!(
            "creating person {}",
            request.person_name.as_deref().unwrap_or_default()
        );

        let valid = match request.validate() {
            Ok(valid) => valid,
            Err(errors) => return self.redisplay(request, errors, context).await,
        };

        let group_id = match valid.selected_group_id.parse() {
            Ok(id) => id,
            Err(_) => {
                let mut errors = ValidationErrors::default();
                errors.add(
                    "selectedGroupId",
                    format!("The value '{}' is not a valid group.", valid.selected_group_id),
                );
                return self.redisplay(request, errors, context).await;
            }
        };

        let person = NewPerson {
            name: valid.person_name,
            date_added: valid.date_added,
            group_id,
        };

        self.repository
            .add_person(person)
            .await
            .map_err(|e| self.storage_failure("submit_create", context, e))?;

        Ok(Outcome::RedirectToList)
    }

    /// Search by person name and/or group name
    ///
    /// Blank input on both sides yields the prompt. Otherwise the filters are
    /// passed through as submitted, so surrounding spaces are part of the
    /// substring being matched.
    pub async fn search(&self, name_query: &str, group_query: &str) -> ApiResult<Outcome> {
        if name_query.trim().is_empty() && group_query.trim().is_empty() {
            return Ok(Outcome::Message(SEARCH_PROMPT.to_string()));
        }

        let persons = self
            .repository
            .search(name_query, group_query)
            .await
            .map_err(|e| {
                self.storage_failure(
                    "search",
                    format!("search name {:?}, search group {:?}", name_query, group_query),
                    e,
                )
            })?;

        Ok(Outcome::PartialList(
            persons.into_iter().map(PersonView::from).collect(),
        ))
    }

    async fn redisplay(
        &self,
        request: CreateRequest,
        errors: ValidationErrors,
        context: String,
    ) -> ApiResult<Outcome> {
        let groups = self.group_options("submit_create", context).await?;
        Ok(Outcome::CreateForm(CreateForm::resubmit(request, groups, errors)))
    }

    async fn group_options(
        &self,
        operation: &'static str,
        context: String,
    ) -> ApiResult<Vec<SelectOption>> {
        let groups = self
            .repository
            .list_groups()
            .await
            .map_err(|e| self.storage_failure(operation, context, e))?;

        Ok(groups.into_iter().map(SelectOption::from).collect())
    }

    fn storage_failure(&self, operation: &'static str, context: String, source: Error) -> ApiError {
        self.log.storage_failure(operation, &context, &source);
        ApiError::Storage {
            operation,
            context,
            source,
        }
    }
}
