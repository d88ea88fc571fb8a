//! Conversions between `EnvError` and the aggregator's error type.

use figment::Error as FigmentError;

use super::EnvError;

impl From<EnvError> for FigmentError {
    /// Surface read failures to a layered `Figment` with their message.
    fn from(e: EnvError) -> Self {
        Self::from(e.to_string())
    }
}
