use thiserror::Error;

/// Centralized error types for the application
///
/// Every registry, settings and billing operation returns this enum. The
/// Telegram layer turns it into a short reply via [`AppError::user_message`].
///
/// # Example
///
/// ```no_run
/// use splitcore::core::error::AppError;
///
/// fn handle_error(err: AppError) {
///     eprintln!("Error: {}", err);
/// }
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// Caller is not in the admin allow-list
    #[error("Permission denied")]
    PermissionDenied,

    /// Malformed numeric or text argument
    #[error("Validation error: {0}")]
    Validation(String),

    /// Price is zero or payment link is empty
    #[error("Price and payment link must be configured before distribution")]
    ConfigurationIncomplete,

    /// Nobody to bill
    #[error("Subscriber list is empty")]
    NoSubscribers,

    /// Sum of all subscription counts is zero
    #[error("Total subscription count is zero")]
    DegenerateTotal,

    /// IO errors (data file unreadable or unwritable)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Data file exists but does not hold a valid registry
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Short human-readable reply for the user who triggered the error.
    pub fn user_message(&self) -> String {
        match self {
            AppError::PermissionDenied => "Нет прав.".to_string(),
            AppError::Validation(reason) => format!("Некорректные данные: {}", reason),
            AppError::ConfigurationIncomplete => "Сначала установи /set_price (общая сумма) и /set_link".to_string(),
            AppError::NoSubscribers => "Список подписчиков пуст.".to_string(),
            AppError::DegenerateTotal => "Общее количество подписок = 0. Проверь данные.".to_string(),
            AppError::Io(_) | AppError::Serialization(_) => {
                "⚠️ Не удалось сохранить данные. Попробуй позже.".to_string()
            }
        }
    }

    /// Storage failures need operator attention; everything else is a user mistake.
    pub fn is_storage_failure(&self) -> bool {
        matches!(self, AppError::Io(_) | AppError::Serialization(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_failures_are_flagged() {
        let io = AppError::from(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"));
        assert!(io.is_storage_failure());
        assert!(!AppError::PermissionDenied.is_storage_failure());
        assert!(!AppError::DegenerateTotal.is_storage_failure());
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(AppError::PermissionDenied.user_message(), "Нет прав.");
        assert!(AppError::ConfigurationIncomplete.user_message().contains("/set_price"));
        assert!(AppError::Validation("нужно число".into())
            .user_message()
            .contains("нужно число"));
    }
}
