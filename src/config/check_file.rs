use crate::config::toml_config::substitute_env_vars;
use crate::core::AccessCheck;
use crate::utils::error::{AccessError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// List of checks for batch mode, one `[[checks]]` table each.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckFile {
    pub checks: Vec<AccessCheck>,
}

impl CheckFile {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AccessError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AccessError::ConfigValidationError {
            field: "checks".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }
}

impl Validate for CheckFile {
    fn validate(&self) -> Result<()> {
        if self.checks.is_empty() {
            return Err(AccessError::ConfigValidationError {
                field: "checks".to_string(),
                message: "at least one check is required".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_checks() {
        let content = r#"
[[checks]]
kind = "classroom_page"
classroom_url_fragment = "math"

[[checks]]
kind = "manage_own_account"

[[checks]]
kind = "exploration_player_page"
exploration_id = "exp1"
version = 2

[[checks]]
kind = "practice_session_page"
classroom_url_fragment = "math"
topic_url_fragment = "fractions"
selected_subtopic_ids = "[1,2]"
"#;

        let file = CheckFile::from_toml_str(content).unwrap();
        assert!(file.validate().is_ok());
        assert_eq!(file.checks.len(), 4);
        assert_eq!(file.checks[1], AccessCheck::ManageOwnAccount);
        assert_eq!(
            file.checks[2],
            AccessCheck::ExplorationPlayerPage {
                exploration_id: "exp1".to_string(),
                version: Some(2),
            }
        );
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let content = r#"
[[checks]]
kind = "can_do_anything"
"#;
        assert!(CheckFile::from_toml_str(content).is_err());
    }

    #[test]
    fn test_empty_list_fails_validation() {
        let file = CheckFile::from_toml_str("checks = []").unwrap();
        assert!(file.validate().is_err());
    }
}
