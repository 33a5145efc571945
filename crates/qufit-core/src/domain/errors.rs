use std::error::Error;
use std::fmt::{Display, Formatter};

pub type QuFitResult<T> = Result<T, QuFitError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuFitErrorCategory {
    InputValidationError,
    ConfigurationError,
    ComputationError,
}

impl QuFitErrorCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InputValidationError => "InputValidationError",
            Self::ConfigurationError => "ConfigurationError",
            Self::ComputationError => "ComputationError",
        }
    }

    /// Errors the caller can fix by changing what it passes in, as opposed
    /// to a broken model definition.
    pub const fn is_caller_error(self) -> bool {
        matches!(self, Self::InputValidationError | Self::ComputationError)
    }
}

impl Display for QuFitErrorCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuFitError {
    category: QuFitErrorCategory,
    placeholder: &'static str,
    message: String,
}

impl QuFitError {
    pub fn new(
        category: QuFitErrorCategory,
        placeholder: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            placeholder,
            message: message.into(),
        }
    }

    pub fn input_validation(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(
            QuFitErrorCategory::InputValidationError,
            placeholder,
            message,
        )
    }

    pub fn configuration(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(QuFitErrorCategory::ConfigurationError, placeholder, message)
    }

    pub fn computation(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(QuFitErrorCategory::ComputationError, placeholder, message)
    }

    pub const fn category(&self) -> QuFitErrorCategory {
        self.category
    }

    pub const fn placeholder(&self) -> &'static str {
        self.placeholder
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn diagnostic_line(&self) -> String {
        format!("ERROR: [{}] {}", self.placeholder, self.message)
    }
}

impl Display for QuFitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            self.category.as_str(),
            self.placeholder,
            self.message
        )
    }
}

impl Error for QuFitError {}
