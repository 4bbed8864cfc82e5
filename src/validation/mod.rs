/*!
 * Validation for extracted bilingual content.
 *
 * - `purity`: per-line language-purity rules over aligned line arrays
 * - `alignment`: reconciliation of parallel arrays whose lengths drift
 */

pub mod alignment;
pub mod purity;

// Re-export main types
pub use purity::{validate_purity, PurityRule, PurityViolation};
