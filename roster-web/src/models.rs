//! Transfer shapes exchanged with HTTP clients
//!
//! These are deliberately separate from the entity models in
//! `roster_common::db`: the create form carries raw submitted strings and
//! the group options, list views carry a nested group.

use chrono::NaiveDate;
use roster_common::db::{Group, GroupId, PersonId, PersonWithGroup};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Maximum length of a person name, in characters
pub const PERSON_NAME_MAX_LEN: usize = 50;

/// Accepted `dateAdded` formats: HTML date input first, then day/month/year
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];

/// Submitted create-person form
///
/// Every field is optional at the wire level so that a missing field is a
/// validation failure rather than a rejected request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequest {
    #[serde(default)]
    pub person_name: Option<String>,
    #[serde(default)]
    pub date_added: Option<String>,
    #[serde(default)]
    pub selected_group_id: Option<String>,
}

/// Create form fields that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCreate {
    pub person_name: String,
    pub date_added: NaiveDate,
    /// Still unparsed; converting it to a group id is a separate step
    pub selected_group_id: String,
}

impl CreateRequest {
    /// Check required fields, name length and date format
    pub fn validate(&self) -> Result<ValidatedCreate, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let person_name = non_blank(&self.person_name);
        match person_name {
            None => errors.add("personName", "The Person Name field is required."),
            Some(name) if name.chars().count() > PERSON_NAME_MAX_LEN => errors.add(
                "personName",
                format!(
                    "The field Person Name must be a string with a maximum length of {}.",
                    PERSON_NAME_MAX_LEN
                ),
            ),
            Some(_) => {}
        }

        let date_added = match non_blank(&self.date_added) {
            None => {
                errors.add("dateAdded", "The Date Added field is required.");
                None
            }
            Some(raw) => {
                let parsed = parse_date(raw);
                if parsed.is_none() {
                    errors.add("dateAdded", format!("The value '{}' is not a valid date.", raw));
                }
                parsed
            }
        };

        let selected_group_id = non_blank(&self.selected_group_id);
        if selected_group_id.is_none() {
            errors.add("selectedGroupId", "The Group field is required.");
        }

        match (person_name, date_added, selected_group_id) {
            (Some(name), Some(date_added), Some(group_id)) if errors.is_empty() => {
                Ok(ValidatedCreate {
                    person_name: name.to_string(),
                    date_added,
                    selected_group_id: group_id.to_string(),
                })
            }
            _ => Err(errors),
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}

/// Field name to message, keyed by the wire field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.insert(field.to_string(), message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }
}

/// One entry of the group choice list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    /// Group id as a string
    pub value: String,
    /// Group name
    pub label: String,
}

impl From<Group> for SelectOption {
    fn from(group: Group) -> Self {
        Self {
            value: group.id.to_string(),
            label: group.name,
        }
    }
}

/// Create form as displayed, empty or re-populated after a failed submit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateForm {
    pub person_name: String,
    pub date_added: String,
    pub selected_group_id: String,
    pub groups: Vec<SelectOption>,
    pub errors: ValidationErrors,
}

impl CreateForm {
    /// Empty form offering `groups`
    pub fn empty(groups: Vec<SelectOption>) -> Self {
        Self {
            groups,
            ..Self::default()
        }
    }

    /// Form re-populated with the values of a rejected submission
    pub fn resubmit(
        request: CreateRequest,
        groups: Vec<SelectOption>,
        errors: ValidationErrors,
    ) -> Self {
        Self {
            person_name: request.person_name.unwrap_or_default(),
            date_added: request.date_added.unwrap_or_default(),
            selected_group_id: request.selected_group_id.unwrap_or_default(),
            groups,
            errors,
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Submitted search form
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(default)]
    pub search_name: Option<String>,
    #[serde(default)]
    pub search_group: Option<String>,
}

/// Group as shown inside a person listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupView {
    pub id: GroupId,
    pub name: String,
}

/// Person row of a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonView {
    pub id: PersonId,
    pub name: String,
    pub group: GroupView,
    pub date_added: NaiveDate,
}

impl From<PersonWithGroup> for PersonView {
    fn from(person: PersonWithGroup) -> Self {
        Self {
            id: person.id,
            name: person.name,
            group: GroupView {
                id: person.group.id,
                name: person.group.name,
            },
            date_added: person.date_added,
        }
    }
}

/// Person listing; `partial` marks an in-place search update
#[derive(Debug, Clone, Serialize)]
pub struct PersonList {
    pub partial: bool,
    pub persons: Vec<PersonView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, date: &str, group: &str) -> CreateRequest {
        CreateRequest {
            person_name: Some(name.to_string()),
            date_added: Some(date.to_string()),
            selected_group_id: Some(group.to_string()),
        }
    }

    #[test]
    fn test_valid_request() {
        let valid = request("  Jane Smith ", "2024-03-01", "2").validate().unwrap();

        assert_eq!(valid.person_name, "Jane Smith");
        assert_eq!(valid.date_added, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(valid.selected_group_id, "2");
    }

    #[test]
    fn test_day_month_year_date_accepted() {
        let valid = request("Jane", "15/06/2023", "1").validate().unwrap();
        assert_eq!(valid.date_added, NaiveDate::from_ymd_opt(2023, 6, 15).unwrap());
    }

    #[test]
    fn test_missing_fields_reported() {
        let errors = CreateRequest::default().validate().unwrap_err();

        assert_eq!(errors.len(), 3);
        assert!(errors.get("personName").is_some());
        assert!(errors.get("dateAdded").is_some());
        assert!(errors.get("selectedGroupId").is_some());
    }

    #[test]
    fn test_blank_name_is_missing() {
        let errors = request("   ", "2024-03-01", "1").validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.get("personName").is_some());
    }

    #[test]
    fn test_name_length_limit() {
        let fifty = "a".repeat(PERSON_NAME_MAX_LEN);
        assert!(request(&fifty, "2024-03-01", "1").validate().is_ok());

        let fifty_one = "a".repeat(PERSON_NAME_MAX_LEN + 1);
        let errors = request(&fifty_one, "2024-03-01", "1").validate().unwrap_err();
        assert!(errors.get("personName").unwrap().contains("maximum length"));
    }

    #[test]
    fn test_invalid_date_reported() {
        let errors = request("Jane", "yesterday", "1").validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.get("dateAdded").unwrap().contains("yesterday"));
    }

    #[test]
    fn test_non_numeric_group_id_passes_field_validation() {
        let valid = request("Jane", "2024-03-01", "r").validate().unwrap();
        assert_eq!(valid.selected_group_id, "r");
    }

    #[test]
    fn test_resubmit_keeps_submitted_values() {
        let submitted = request("Jane", "not-a-date", "1");
        let errors = submitted.validate().unwrap_err();
        let form = CreateForm::resubmit(submitted, Vec::new(), errors);

        assert_eq!(form.person_name, "Jane");
        assert_eq!(form.date_added, "not-a-date");
        assert_eq!(form.selected_group_id, "1");
        assert!(form.has_errors());
    }

    #[test]
    fn test_person_view_serializes_camel_case() {
        let view = PersonView::from(PersonWithGroup {
            id: 3,
            name: "John".to_string(),
            date_added: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            group: Group {
                id: 1,
                name: "Group A".to_string(),
            },
        });

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["dateAdded"], "2024-01-02");
        assert_eq!(json["group"]["id"], 1);
        assert_eq!(json["group"]["name"], "Group A");
    }
}
