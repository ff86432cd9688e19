//! Error taxonomy shared by the engine, generators and scheduler.

/// Errors raised while activating the clock or scheduling sound events.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// The platform refused to start audio output.
    ///
    /// Fatal to the current dispatch only; the caller may prompt and retry.
    ClockActivationFailed { reason: String },
    /// A generator received a parameter outside its valid range.
    InvalidParameter { name: &'static str, value: f64 },
    /// No room left for another signal source.
    ResourceExhausted { resource: &'static str },
    /// The requested demo category is not part of the pattern library.
    UnknownDemo { category: String },
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::ClockActivationFailed { reason } => {
                write!(f, "Audio clock activation failed: {}", reason)
            }
            EngineError::InvalidParameter { name, value } => {
                write!(f, "Invalid parameter: {} = {}", name, value)
            }
            EngineError::ResourceExhausted { resource } => {
                write!(f, "Resource exhausted: no free {}", resource)
            }
            EngineError::UnknownDemo { category } => {
                write!(f, "Unknown demo category '{}'", category)
            }
        }
    }
}

impl std::error::Error for EngineError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_parameter() {
        let err = EngineError::InvalidParameter {
            name: "frequency_hz",
            value: -1.0,
        };
        assert_eq!(err.to_string(), "Invalid parameter: frequency_hz = -1");
    }

    #[test]
    fn activation_failure_carries_reason() {
        let err = EngineError::ClockActivationFailed {
            reason: "no output device".into(),
        };
        assert!(err.to_string().contains("no output device"));
    }
}
