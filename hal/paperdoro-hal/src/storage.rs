//! Image storage abstraction
//!
//! The timer keeps no persistent state; storage is only consulted for the
//! lock-screen image shown before suspend.

use crate::surface::DrawSurface;
use crate::types::Point;

/// Errors from image storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// File does not exist
    NotFound,
    /// File exists but could not be decoded
    Decode,
    /// Drawing the decoded image failed
    Surface,
}

/// Read-only image store (e.g. an SD card)
pub trait ImageStore {
    /// Check if a file exists
    ///
    /// Returns `false` when the store itself is unavailable.
    fn exists(&mut self, path: &str) -> bool;

    /// Decode an image file and draw it with its top-left corner at `origin`
    fn draw_image_file<S: DrawSurface>(
        &mut self,
        path: &str,
        origin: Point,
        surface: &mut S,
    ) -> Result<(), StorageError>;
}
