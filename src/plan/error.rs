//! Scheduling errors

/// Errors raised while resolving a training day
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// The plan has no days to cycle through
    #[error("training plan has no days")]
    EmptyPlan,

    /// A weather tag that is not one of the known conditions
    #[error("unrecognized weather condition '{0}'")]
    UnknownWeather(String),
}
