//! Cross-cutting helpers shared by the library modules.
//!
//! Currently this is the conditional parallel-iteration layer used by batch operations.

pub mod parallel;
