//! Result type alias for Artex

use super::errors::ArtexError;

/// Result type alias for Artex operations
///
/// # Examples
///
/// ```
/// use artex::domain::result::Result;
/// use artex::domain::errors::ArtexError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(ArtexError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, ArtexError>;
