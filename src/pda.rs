//! Program-derived addresses used by the proxy.
//!
//! Both addresses come from a single fixed seed and the program id, so anyone
//! can recompute them. Addresses passed in by a caller are never trusted
//! without recomputation.

use crate::{error::ProxyError, state::ProxyState};
use solana_program::{program_error::ProgramError, pubkey::Pubkey};

/// Finds the address and bump for `seed` under `program_id`.
pub fn derive(seed: &[u8], program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[seed], program_id)
}

/// Recomputes the address for `seed` and `bump` and compares it to `claimed`.
pub fn verify(claimed: &Pubkey, seed: &[u8], bump: u8, program_id: &Pubkey) -> bool {
    Pubkey::create_program_address(&[seed, &[bump]], program_id)
        .map_or(false, |address| address == *claimed)
}

pub fn find_state_address(program_id: &Pubkey) -> (Pubkey, u8) {
    derive(ProxyState::STATE_SEED, program_id)
}

pub fn find_authority_address(program_id: &Pubkey) -> (Pubkey, u8) {
    derive(ProxyState::AUTHORITY_SEED, program_id)
}

/// The proxy acting as the mint's multiplier authority.
///
/// Holds no key material: the signature Token-2022 sees is produced by the
/// runtime from these seeds when the proxy calls `invoke_signed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthoritySigner {
    bump: [u8; 1],
}

impl AuthoritySigner {
    pub fn new(bump: u8) -> Self {
        Self { bump: [bump] }
    }

    pub fn bump(&self) -> u8 {
        self.bump[0]
    }

    /// Fails with `InvalidPDA` unless `claimed` is this signer's address.
    pub fn check(&self, claimed: &Pubkey, program_id: &Pubkey) -> Result<(), ProgramError> {
        if verify(claimed, ProxyState::AUTHORITY_SEED, self.bump(), program_id) {
            Ok(())
        } else {
            Err(ProxyError::InvalidPDA.into())
        }
    }

    /// Signer seeds for `invoke_signed`.
    pub fn seeds(&self) -> [&[u8]; 2] {
        [ProxyState::AUTHORITY_SEED, &self.bump]
    }
}
