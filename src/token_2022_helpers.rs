use solana_program::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};

/// Token-2022 Program ID
pub const TOKEN_2022_PROGRAM_ID: Pubkey = spl_token_2022::ID;

/// Top-level Token-2022 instruction tag of the Scaled UI Amount extension
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum TokenInstruction {
    ScaledUiAmountExtension = 43,
}

/// Scaled UI Amount extension sub-instructions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ScaledUiAmountMintInstruction {
    UpdateMultiplier = 1,
}

/// Length of the UpdateMultiplier payload: two tags, f64 multiplier, i64 timestamp.
pub const UPDATE_MULTIPLIER_DATA_LEN: usize = 2 + 8 + 8;

/// Builds the Token-2022 `ScaledUiAmountExtension::UpdateMultiplier` instruction.
///
/// Accounts:
/// 0. `[writable]` Mint
/// 1. `[signer]` Multiplier authority
pub fn update_multiplier(
    mint: &Pubkey,
    authority: &Pubkey,
    multiplier: f64,
    effective_timestamp: i64,
) -> Instruction {
    let accounts = vec![
        AccountMeta::new(*mint, false),
        AccountMeta::new_readonly(*authority, true),
    ];

    let mut data = Vec::with_capacity(UPDATE_MULTIPLIER_DATA_LEN);
    data.push(TokenInstruction::ScaledUiAmountExtension as u8);
    data.push(ScaledUiAmountMintInstruction::UpdateMultiplier as u8);
    data.extend_from_slice(&multiplier.to_le_bytes());
    data.extend_from_slice(&effective_timestamp.to_le_bytes());

    Instruction {
        program_id: TOKEN_2022_PROGRAM_ID,
        accounts,
        data,
    }
}
