//! Proxy program that owns the Scaled UI Amount multiplier authority of a
//! Token-2022 mint on behalf of a rotatable authority.
//!
//! Token-2022 has no way to hand the multiplier authority to someone else once
//! it is set, so the mint is configured with this program's authority PDA and
//! the program keeps track of who may drive it.

#[cfg(not(feature = "no-entrypoint"))]
mod entrypoint;

pub mod cpi;
pub mod error;
pub mod instruction;
pub mod pda;
pub mod processor;
pub mod state;
pub mod token_2022_helpers;
pub mod validation;

// Export current SDK types for downstream users building with a different SDK version
pub use solana_program;

solana_program::declare_id!("GPidDjjAnwuuupjY8gj3WjMp6pP1cBwZWJtfPHW4SjPd");
