use solana_program::program_error::ProgramError;
use thiserror::Error;

/// Errors returned by the proxy. The discriminant is the custom error code.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ProxyError {
    #[error("Proxy not initialized")]
    NotInitialized,

    #[error("Proxy already initialized")]
    AlreadyInitialized,

    #[error("Signer is not the proxy authority, or the new authority is empty")]
    InvalidAuthority,

    #[error("Invalid multiplier: must be a positive, normal number")]
    InvalidMultiplier,

    #[error("Mint does not match the mint recorded at initialization")]
    InvalidMint,

    #[error("Invalid state account")]
    InvalidStateAccount,

    #[error("Invalid PDA derivation")]
    InvalidPDA,

    #[error("Unknown instruction discriminant")]
    UnknownInstruction,
}

impl From<ProxyError> for ProgramError {
    fn from(e: ProxyError) -> Self {
        ProgramError::Custom(e as u32)
    }
}
