use crate::{error::ProxyError, pda};
use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{
    account_info::AccountInfo, entrypoint::ProgramResult, program_error::ProgramError,
    pubkey::Pubkey,
};

/// Proxy configuration, stored in the state PDA
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub struct ProxyState {
    /// Set once by `Initialize`, never cleared
    pub initialized: bool,
    /// Signer allowed to update the multiplier and rotate authority
    pub authority: Pubkey,
    /// The Token-2022 mint this proxy controls
    pub token_mint: Pubkey,
    /// Bump of the authority PDA
    pub bump: u8,
}

impl ProxyState {
    pub const LEN: usize = 1 + 32 + 32 + 1; // bool + 2 Pubkeys + u8

    /// Authority PDA seed. The mint's multiplier authority is set to this address.
    pub const AUTHORITY_SEED: &'static [u8] = b"proxy_authority";

    /// State PDA seed
    pub const STATE_SEED: &'static [u8] = b"state";

    /// Loads an initialized record from the state PDA.
    pub fn load(program_id: &Pubkey, state_info: &AccountInfo) -> Result<Self, ProgramError> {
        let (state_address, _) = pda::find_state_address(program_id);
        if state_address != *state_info.key {
            return Err(ProxyError::InvalidStateAccount.into());
        }
        if state_info.data_is_empty() {
            return Err(ProxyError::NotInitialized.into());
        }
        if state_info.owner != program_id {
            return Err(ProxyError::InvalidStateAccount.into());
        }

        let state = Self::unpack(&state_info.data.borrow())?;
        if !state.initialized {
            return Err(ProxyError::NotInitialized.into());
        }
        Ok(state)
    }

    /// Whether the account already holds an initialized record. An account
    /// that was never allocated counts as uninitialized.
    pub fn is_initialized_account(state_info: &AccountInfo) -> Result<bool, ProgramError> {
        if state_info.data_is_empty() {
            return Ok(false);
        }
        Ok(Self::unpack(&state_info.data.borrow())?.initialized)
    }

    pub fn save(&self, state_info: &AccountInfo) -> ProgramResult {
        if state_info.data_len() != Self::LEN {
            return Err(ProxyError::InvalidStateAccount.into());
        }
        self.serialize(&mut &mut state_info.data.borrow_mut()[..])?;
        Ok(())
    }

    fn unpack(data: &[u8]) -> Result<Self, ProgramError> {
        if data.len() != Self::LEN {
            return Err(ProxyError::InvalidStateAccount.into());
        }
        Self::try_from_slice(data).map_err(|_| ProxyError::InvalidStateAccount.into())
    }
}
