/// Errors raised while constructing or configuring a counter.
///
/// The counter operations themselves never fail; degenerate inputs surface as
/// floating-point special values instead.
#[derive(Debug, thiserror::Error)]
pub enum ActivityError {
    #[error("characteristic time must be greater than zero, given {given:?}")]
    NonPositiveCharacteristicTime { given: std::time::Duration },

    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

pub type ActivityResult<T> = Result<T, ActivityError>;
