//! Renderer errors

use paperdoro_hal::{StorageError, SurfaceError};

/// Rendering errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// The drawing surface rejected a call
    Surface(SurfaceError),
    /// The lock image could not be drawn
    Storage(StorageError),
}

impl From<SurfaceError> for DisplayError {
    fn from(err: SurfaceError) -> Self {
        DisplayError::Surface(err)
    }
}

impl From<StorageError> for DisplayError {
    fn from(err: StorageError) -> Self {
        DisplayError::Storage(err)
    }
}
