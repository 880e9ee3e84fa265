use std::collections::HashSet;

use crate::domain::{command::CommandRequest, error::DomainError, question::Question};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across services.
pub struct DomainValidator;

impl DomainValidator {
    /// Check every question and that keys are unique across the batch.
    pub fn validate_questions(questions: &[Question]) -> Result<(), DomainError> {
        let mut seen = HashSet::new();
        for question in questions {
            question.validate()?;
            if !seen.insert(question.key()) {
                return Err(DomainError::DuplicateKey {
                    key: question.key().to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn validate_request(request: &CommandRequest) -> Result<(), DomainError> {
        request.validate()
    }
}
