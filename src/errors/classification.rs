use super::types::ReportError;

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub error_type: &'static str,
    pub exit_code: i32,
}

impl ReportError {
    /// Classify this error to determine its type and the process exit status it maps to.
    pub fn classify(&self) -> ErrorClassification {
        match self {
            ReportError::Config(_) | ReportError::Yaml(_) => ErrorClassification {
                error_type: "ConfigError",
                exit_code: 2,
            },
            ReportError::MissingInput(_) => ErrorClassification {
                error_type: "MissingInputError",
                exit_code: 3,
            },
            ReportError::InvalidInput(_) | ReportError::Json(_) => ErrorClassification {
                error_type: "InvalidInputError",
                exit_code: 4,
            },
            ReportError::Chart(_) | ReportError::Image(_) => ErrorClassification {
                error_type: "ChartError",
                exit_code: 1,
            },
            ReportError::Io(_) => ErrorClassification {
                error_type: "IoError",
                exit_code: 1,
            },
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.classify().exit_code
    }
}
