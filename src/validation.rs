use crate::error::ProxyError;
use solana_program::{entrypoint::ProgramResult, pubkey::Pubkey};

/// Accepts only positive, normal multipliers. Rejects NaN, both infinities,
/// zero, negatives and subnormals.
pub fn validate_multiplier(multiplier: f64) -> ProgramResult {
    if multiplier.is_sign_positive() && multiplier.is_normal() {
        Ok(())
    } else {
        Err(ProxyError::InvalidMultiplier.into())
    }
}

pub fn validate_authority_match(caller: &Pubkey, stored: &Pubkey) -> ProgramResult {
    if caller == stored {
        Ok(())
    } else {
        Err(ProxyError::InvalidAuthority.into())
    }
}

pub fn validate_nonzero_identity(identity: &Pubkey) -> ProgramResult {
    if *identity == Pubkey::default() {
        Err(ProxyError::InvalidAuthority.into())
    } else {
        Ok(())
    }
}
