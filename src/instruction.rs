use crate::{error::ProxyError, pda, token_2022_helpers::TOKEN_2022_PROGRAM_ID};
use solana_program::{
    instruction::{AccountMeta, Instruction},
    program_error::ProgramError,
    pubkey::Pubkey,
    system_program,
};

/// Instructions supported by the proxy.
///
/// Wire format is a one-byte discriminant followed by a fixed-size,
/// little-endian payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProxyInstruction {
    /// Initialize the proxy
    ///
    /// Accounts:
    /// 0. `[writable, signer]` Payer
    /// 1. `[writable]` State account (PDA)
    /// 2. `[]` Authority PDA
    /// 3. `[]` Token mint
    /// 4. `[]` System program
    Initialize {
        /// Initial authority for the proxy
        authority: Pubkey,
    },

    /// Update the mint's multiplier via CPI to Token-2022
    ///
    /// Accounts:
    /// 0. `[signer]` Current authority
    /// 1. `[writable]` State account (PDA)
    /// 2. `[]` Authority PDA
    /// 3. `[writable]` Token mint
    /// 4. `[]` Token-2022 program
    UpdateMultiplier {
        /// New multiplier, positive and normal
        new_multiplier: f64,
        /// Unix timestamp when the new multiplier takes effect
        effective_timestamp: i64,
    },

    /// Replace the proxy authority. Takes effect immediately.
    ///
    /// Accounts:
    /// 0. `[signer]` Current authority
    /// 1. `[writable]` State account (PDA)
    UpdateAuthority {
        new_authority: Pubkey,
    },
}

impl ProxyInstruction {
    pub fn unpack(input: &[u8]) -> Result<Self, ProgramError> {
        let (&tag, mut rest) = input
            .split_first()
            .ok_or(ProgramError::InvalidInstructionData)?;

        let instruction = match tag {
            0 => Self::Initialize {
                authority: read_pubkey(&mut rest)?,
            },
            1 => Self::UpdateMultiplier {
                new_multiplier: f64::from_le_bytes(read_array(&mut rest)?),
                effective_timestamp: i64::from_le_bytes(read_array(&mut rest)?),
            },
            2 => Self::UpdateAuthority {
                new_authority: read_pubkey(&mut rest)?,
            },
            _ => return Err(ProxyError::UnknownInstruction.into()),
        };

        if !rest.is_empty() {
            return Err(ProgramError::InvalidInstructionData);
        }
        Ok(instruction)
    }

    pub fn pack(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(33);
        match self {
            Self::Initialize { authority } => {
                buf.push(0);
                buf.extend_from_slice(authority.as_ref());
            }
            Self::UpdateMultiplier {
                new_multiplier,
                effective_timestamp,
            } => {
                buf.push(1);
                buf.extend_from_slice(&new_multiplier.to_le_bytes());
                buf.extend_from_slice(&effective_timestamp.to_le_bytes());
            }
            Self::UpdateAuthority { new_authority } => {
                buf.push(2);
                buf.extend_from_slice(new_authority.as_ref());
            }
        }
        buf
    }
}

fn read_array<const N: usize>(input: &mut &[u8]) -> Result<[u8; N], ProgramError> {
    if input.len() < N {
        return Err(ProgramError::InvalidInstructionData);
    }
    let (bytes, rest) = input.split_at(N);
    *input = rest;
    bytes
        .try_into()
        .map_err(|_| ProgramError::InvalidInstructionData)
}

fn read_pubkey(input: &mut &[u8]) -> Result<Pubkey, ProgramError> {
    read_array::<32>(input).map(Pubkey::new_from_array)
}

/// Creates an `Initialize` instruction.
pub fn initialize(
    program_id: &Pubkey,
    payer: &Pubkey,
    token_mint: &Pubkey,
    authority: &Pubkey,
) -> Instruction {
    let (state, _) = pda::find_state_address(program_id);
    let (authority_pda, _) = pda::find_authority_address(program_id);
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*payer, true),
            AccountMeta::new(state, false),
            AccountMeta::new_readonly(authority_pda, false),
            AccountMeta::new_readonly(*token_mint, false),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
        data: ProxyInstruction::Initialize {
            authority: *authority,
        }
        .pack(),
    }
}

/// Creates an `UpdateMultiplier` instruction.
pub fn update_multiplier(
    program_id: &Pubkey,
    authority: &Pubkey,
    token_mint: &Pubkey,
    new_multiplier: f64,
    effective_timestamp: i64,
) -> Instruction {
    let (state, _) = pda::find_state_address(program_id);
    let (authority_pda, _) = pda::find_authority_address(program_id);
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*authority, true),
            AccountMeta::new(state, false),
            AccountMeta::new_readonly(authority_pda, false),
            AccountMeta::new(*token_mint, false),
            AccountMeta::new_readonly(TOKEN_2022_PROGRAM_ID, false),
        ],
        data: ProxyInstruction::UpdateMultiplier {
            new_multiplier,
            effective_timestamp,
        }
        .pack(),
    }
}

/// Creates an `UpdateAuthority` instruction.
pub fn update_authority(
    program_id: &Pubkey,
    authority: &Pubkey,
    new_authority: &Pubkey,
) -> Instruction {
    let (state, _) = pda::find_state_address(program_id);
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*authority, true),
            AccountMeta::new(state, false),
        ],
        data: ProxyInstruction::UpdateAuthority {
            new_authority: *new_authority,
        }
        .pack(),
    }
}
