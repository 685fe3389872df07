//! Observation input validation.
//!
//! Inbound data arrives as an [`ObservationForm`] in which every field is an
//! optional string, exactly as decoded from the wire. [`validate_create`]
//! and [`validate_update`] turn it into a typed [`ObservationPayload`] or a
//! list of [`FieldError`]s covering every rejected field.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::{CoreError, FieldError};
use crate::location::Location;
use crate::types::DbId;

/// Form fields in declaration order; field errors are reported in this order.
const FIELD_ORDER: &[&str] = &[
    "id",
    "location",
    "species",
    "adult_count",
    "chick_count",
    "notes",
];

/// Untyped observation input as submitted by a client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ObservationForm {
    pub location: Option<String>,
    pub species: Option<String>,
    pub adult_count: Option<String>,
    pub chick_count: Option<String>,
    pub notes: Option<String>,
}

/// A validated observation, ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObservationPayload {
    pub location: Location,
    pub species: String,
    pub adult_count: i32,
    pub chick_count: i32,
    pub notes: String,
}

/// Declarative rules applied after the counts have been parsed.
#[derive(Debug, Validate)]
struct ObservationDraft {
    #[validate(custom(function = "validate_location"))]
    location: String,
    #[validate(length(min = 1, message = "Species is required"))]
    species: String,
    #[validate(range(min = 0, message = "Adult count must be 0 or greater"))]
    adult_count: i32,
    #[validate(range(min = 0, message = "Chick count must be 0 or greater"))]
    chick_count: i32,
    #[validate(length(min = 1, message = "Notes are required"))]
    notes: String,
}

fn validate_location(location: &str) -> Result<(), ValidationError> {
    if location.parse::<Location>().is_ok() {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_location")
            .with_message(Cow::Borrowed("Please select a valid location")))
    }
}

/// Validate the payload of a create request.
pub fn validate_create(form: &ObservationForm) -> Result<ObservationPayload, CoreError> {
    let mut errors = Vec::new();
    let payload = check_form(form, &mut errors);
    finish(payload, errors)
}

/// Validate the payload of a full-record update. The target `id` must be
/// positive in addition to the create rules.
pub fn validate_update(id: DbId, form: &ObservationForm) -> Result<ObservationPayload, CoreError> {
    let mut errors = Vec::new();
    if id <= 0 {
        errors.push(FieldError::new(
            "id",
            "invalid_id",
            "Observation id must be a positive integer",
        ));
    }
    let payload = check_form(form, &mut errors);
    finish(payload, errors)
}

fn finish(
    payload: Option<ObservationPayload>,
    mut errors: Vec<FieldError>,
) -> Result<ObservationPayload, CoreError> {
    match payload {
        Some(payload) if errors.is_empty() => Ok(payload),
        _ => {
            errors.sort_by_key(|e| field_rank(&e.field));
            Err(CoreError::InvalidFields(errors))
        }
    }
}

fn check_form(form: &ObservationForm, errors: &mut Vec<FieldError>) -> Option<ObservationPayload> {
    let adult_count = parse_count(form.adult_count.as_deref(), "adult_count", "Adult", errors);
    let chick_count = parse_count(form.chick_count.as_deref(), "chick_count", "Chick", errors);

    // Unparseable counts are already reported; 0 keeps them out of the range check.
    let draft = ObservationDraft {
        location: form.location.clone().unwrap_or_default(),
        species: form.species.clone().unwrap_or_default(),
        adult_count: adult_count.unwrap_or(0),
        chick_count: chick_count.unwrap_or(0),
        notes: form.notes.clone().unwrap_or_default(),
    };

    if let Err(e) = draft.validate() {
        errors.extend(flatten(e));
    }

    let location = draft.location.parse::<Location>().ok()?;
    Some(ObservationPayload {
        location,
        species: draft.species,
        adult_count: adult_count?,
        chick_count: chick_count?,
        notes: draft.notes,
    })
}

fn parse_count(
    raw: Option<&str>,
    field: &str,
    label: &str,
    errors: &mut Vec<FieldError>,
) -> Option<i32> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        errors.push(FieldError::new(field, "required", format!("{label} count is required")));
        return None;
    };
    match raw.parse::<i32>() {
        Ok(n) => Some(n),
        Err(_) => {
            errors.push(FieldError::new(
                field,
                "invalid_type",
                format!("{label} count must be a whole number"),
            ));
            None
        }
    }
}

fn flatten(errors: ValidationErrors) -> Vec<FieldError> {
    errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, list)| {
            let field = field.to_string();
            list.iter().map(move |e| FieldError {
                field: field.clone(),
                code: e.code.to_string(),
                message: e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {field}")),
            })
        })
        .collect()
}

fn field_rank(field: &str) -> usize {
    FIELD_ORDER
        .iter()
        .position(|f| *f == field)
        .unwrap_or(FIELD_ORDER.len())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn form(location: &str, adults: &str, chicks: &str) -> ObservationForm {
        ObservationForm {
            location: Some(location.into()),
            species: Some("Gentoo Penguin".into()),
            adult_count: Some(adults.into()),
            chick_count: Some(chicks.into()),
            notes: Some("Nesting on the north slope".into()),
        }
    }

    fn field_errors(err: CoreError) -> Vec<FieldError> {
        match err {
            CoreError::InvalidFields(errors) => errors,
            other => panic!("expected InvalidFields, got {other:?}"),
        }
    }

    #[test]
    fn valid_form_produces_typed_payload() {
        let payload = validate_create(&form("Port Lockroy", "5", "2")).unwrap();
        assert_eq!(payload.location, Location::PortLockroy);
        assert_eq!(payload.species, "Gentoo Penguin");
        assert_eq!(payload.adult_count, 5);
        assert_eq!(payload.chick_count, 2);
    }

    #[test]
    fn counts_tolerate_surrounding_whitespace() {
        let payload = validate_create(&form("Brown Bluff", " 12 ", "0")).unwrap();
        assert_eq!(payload.adult_count, 12);
        assert_eq!(payload.chick_count, 0);
    }

    #[test]
    fn negative_count_is_rejected() {
        let errors = field_errors(validate_create(&form("Port Lockroy", "-1", "0")).unwrap_err());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "adult_count");
        assert_eq!(errors[0].message, "Adult count must be 0 or greater");
    }

    #[test]
    fn non_numeric_count_is_rejected() {
        let errors = field_errors(validate_create(&form("Port Lockroy", "3", "lots")).unwrap_err());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "chick_count");
        assert_eq!(errors[0].code, "invalid_type");
    }

    #[test]
    fn unknown_location_is_rejected() {
        let errors = field_errors(validate_create(&form("Nowhere", "1", "1")).unwrap_err());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "location");
        assert_eq!(errors[0].code, "invalid_location");
        assert_eq!(errors[0].message, "Please select a valid location");
    }

    #[test]
    fn empty_form_reports_every_field_in_order() {
        let errors = field_errors(validate_create(&ObservationForm::default()).unwrap_err());
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            ["location", "species", "adult_count", "chick_count", "notes"]
        );
    }

    #[test]
    fn empty_species_and_notes_are_rejected() {
        let mut input = form("Neko Harbor", "1", "0");
        input.species = Some(String::new());
        input.notes = Some(String::new());
        let errors = field_errors(validate_create(&input).unwrap_err());
        assert_eq!(errors[0].message, "Species is required");
        assert_eq!(errors[1].message, "Notes are required");
    }

    #[test]
    fn update_requires_positive_id() {
        let err = validate_update(0, &form("Port Lockroy", "1", "1")).unwrap_err();
        let errors = field_errors(err);
        assert_eq!(errors[0].field, "id");
    }

    #[test]
    fn update_with_positive_id_passes() {
        assert_matches!(validate_update(7, &form("Booth Island", "4", "4")), Ok(_));
    }

    #[test]
    fn count_overflowing_the_column_is_rejected() {
        let err = validate_create(&form("Port Lockroy", "99999999999", "0")).unwrap_err();
        assert_matches!(err, CoreError::InvalidFields(ref e) if e[0].field == "adult_count");
    }
}
