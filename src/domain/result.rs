//! Result type alias for pgx-fhir

use super::errors::PgxFhirError;

/// Result type alias for pgx-fhir operations
///
/// # Examples
///
/// ```
/// use pgx_fhir::domain::result::Result;
/// use pgx_fhir::domain::errors::PgxFhirError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(PgxFhirError::Other("boom".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, PgxFhirError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::ValidationError;

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }

    #[test]
    fn test_validation_error_propagates() {
        fn inner() -> Result<()> {
            Err(ValidationError::InvalidRecord("empty".to_string()))?
        }

        assert!(inner().is_err());
    }
}
