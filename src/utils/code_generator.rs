//! Short code generation.
//!
//! Codes are drawn from the operating system CSPRNG and hex-encoded, so the
//! alphabet is `0-9a-f`. Uniqueness relies on the size of the code space; the
//! store still has the final word through its insert-if-absent primitive.

use crate::error::AppError;

/// Characters a generated code may contain.
pub const CODE_ALPHABET: &str = "0123456789abcdef";

/// Length of codes produced when no length is configured.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Source of candidate short codes.
///
/// [`HexCodeGenerator`] is the production implementation; tests substitute
/// deterministic sequences to force collisions.
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    /// Produces a candidate code of exactly `length` characters.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the entropy source is unavailable.
    fn generate(&self, length: usize) -> Result<String, AppError>;
}

/// Generates codes from the system random number generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct HexCodeGenerator;

impl CodeGenerator for HexCodeGenerator {
    fn generate(&self, length: usize) -> Result<String, AppError> {
        generate_code(length)
    }
}

/// Generates a cryptographically secure random hex code of `length` characters.
///
/// Fills `ceil(length / 2)` bytes via `getrandom`, hex-encodes them and
/// truncates to the requested length.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(6)?;
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
pub fn generate_code(length: usize) -> Result<String, AppError> {
    let mut buffer = vec![0u8; length.div_ceil(2)];

    getrandom::fill(&mut buffer)?;

    let mut code = hex::encode(buffer);
    code.truncate(length);
    Ok(code)
}

/// Returns true if `code` has the given length and only alphabet characters.
pub fn is_well_formed(code: &str, length: usize) -> bool {
    code.len() == length && code.chars().all(|c| CODE_ALPHABET.contains(c))
}
