use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidateUrl};

use crate::models::{Competition, Difficulty};

/// Request payload for creating a competition; also the admin edit form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCompetitionRequest {
    #[validate(length(min = 5, message = "Title must be at least 5 characters"))]
    pub title: String,

    #[validate(url(message = "Please enter a valid URL"))]
    pub image_url: String,

    #[validate(length(min = 1, message = "Please select a category"))]
    pub category: String,

    #[validate(length(min = 1, message = "Please enter a deadline"))]
    pub deadline: String,

    #[validate(length(min = 1, message = "Please enter a prize value"))]
    pub prize_value: String,

    #[validate(custom(function = "validate_difficulty"))]
    #[serde(default = "default_difficulty")]
    pub difficulty: String,

    #[validate(length(min = 10, message = "Requirements must be at least 10 characters"))]
    pub requirements: String,

    #[validate(length(min = 10, message = "Rules must be at least 10 characters"))]
    pub rules: String,

    #[validate(custom(function = "validate_optional_url"))]
    #[serde(default)]
    pub external_url: Option<String>,

    #[serde(default)]
    pub is_custom_game: bool,
}

/// Request payload for updating a competition; absent fields keep their value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateCompetitionRequest {
    #[validate(length(min = 5, message = "Title must be at least 5 characters"))]
    pub title: Option<String>,

    #[validate(url(message = "Please enter a valid URL"))]
    pub image_url: Option<String>,

    #[validate(length(min = 1, message = "Please select a category"))]
    pub category: Option<String>,

    #[validate(length(min = 1, message = "Please enter a deadline"))]
    pub deadline: Option<String>,

    #[validate(length(min = 1, message = "Please enter a prize value"))]
    pub prize_value: Option<String>,

    #[validate(custom(function = "validate_difficulty"))]
    pub difficulty: Option<String>,

    #[validate(length(min = 10, message = "Requirements must be at least 10 characters"))]
    pub requirements: Option<String>,

    #[validate(length(min = 10, message = "Rules must be at least 10 characters"))]
    pub rules: Option<String>,

    #[validate(custom(function = "validate_optional_url"))]
    pub external_url: Option<String>,

    pub is_custom_game: Option<bool>,
}

/// Request payload for moving a competition in or out of the archive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ArchiveRequest {
    pub archived: bool,
}

fn default_difficulty() -> String {
    Difficulty::default().as_str().to_string()
}

fn validate_difficulty(difficulty: &str) -> Result<(), validator::ValidationError> {
    if difficulty.parse::<Difficulty>().is_ok() {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_difficulty")
            .with_message("Please select a difficulty level".into()))
    }
}

fn validate_optional_url(url: &str) -> Result<(), validator::ValidationError> {
    if url.is_empty() || url.validate_url() {
        Ok(())
    } else {
        Err(validator::ValidationError::new("url").with_message("Please enter a valid URL".into()))
    }
}

impl Default for CreateCompetitionRequest {
    fn default() -> Self {
        Self {
            title: String::new(),
            image_url: String::new(),
            category: String::new(),
            deadline: String::new(),
            prize_value: String::new(),
            difficulty: default_difficulty(),
            requirements: String::new(),
            rules: String::new(),
            external_url: None,
            is_custom_game: false,
        }
    }
}

impl CreateCompetitionRequest {
    /// Difficulty after validation; falls back to the default for unvalidated input
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty.parse().unwrap_or_default()
    }

    /// `external_url` with the empty string treated as absent
    pub fn external_url(&self) -> Option<&str> {
        self.external_url.as_deref().filter(|url| !url.is_empty())
    }
}

/// Pre-fill the edit form from a stored record
impl From<&Competition> for CreateCompetitionRequest {
    fn from(comp: &Competition) -> Self {
        Self {
            title: comp.title.clone(),
            image_url: comp.image_url.clone(),
            category: comp.category.clone(),
            deadline: comp.deadline.clone(),
            prize_value: comp.prize_value.clone(),
            difficulty: comp.difficulty.as_str().to_string(),
            requirements: comp.requirements.clone(),
            rules: comp.rules.clone(),
            external_url: comp.external_url.clone(),
            is_custom_game: comp.is_custom_game,
        }
    }
}

/// A submitted edit form replaces every editable field
impl From<CreateCompetitionRequest> for UpdateCompetitionRequest {
    fn from(form: CreateCompetitionRequest) -> Self {
        Self {
            title: Some(form.title),
            image_url: Some(form.image_url),
            category: Some(form.category),
            deadline: Some(form.deadline),
            prize_value: Some(form.prize_value),
            difficulty: Some(form.difficulty),
            requirements: Some(form.requirements),
            rules: Some(form.rules),
            external_url: Some(form.external_url.unwrap_or_default()),
            is_custom_game: Some(form.is_custom_game),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateCompetitionRequest {
        CreateCompetitionRequest {
            title: "Winter Photo Walk".to_string(),
            image_url: "https://images.example.com/winter.jpg".to_string(),
            category: "Photography".to_string(),
            deadline: "2025-01-31".to_string(),
            prize_value: "$1,200".to_string(),
            difficulty: "easy".to_string(),
            requirements: "Submit two winter landscape shots.".to_string(),
            rules: "Original work only, no heavy editing.".to_string(),
            external_url: Some(String::new()),
            is_custom_game: false,
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_short_title_is_rejected() {
        let req = CreateCompetitionRequest {
            title: "Art".to_string(),
            ..valid_request()
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
    }

    #[test]
    fn test_invalid_urls_are_rejected() {
        let req = CreateCompetitionRequest {
            image_url: "not a url".to_string(),
            external_url: Some("also not a url".to_string()),
            ..valid_request()
        };
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("image_url"));
        assert!(fields.contains_key("external_url"));
    }

    #[test]
    fn test_unknown_difficulty_is_rejected() {
        let req = CreateCompetitionRequest {
            difficulty: "extreme".to_string(),
            ..valid_request()
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("difficulty"));
    }

    #[test]
    fn test_default_form_uses_medium_difficulty() {
        let form = CreateCompetitionRequest::default();
        assert_eq!(form.difficulty(), Difficulty::Medium);
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_update_from_form_sets_every_field() {
        let update = UpdateCompetitionRequest::from(valid_request());
        assert_eq!(update.title.as_deref(), Some("Winter Photo Walk"));
        assert_eq!(update.external_url.as_deref(), Some(""));
        assert_eq!(update.is_custom_game, Some(false));
        assert!(update.validate().is_ok());
    }

    #[test]
    fn test_empty_update_is_valid() {
        assert!(UpdateCompetitionRequest::default().validate().is_ok());
    }
}
