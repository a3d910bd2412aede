//! Outbound calls: System program allocation and the forwarded Token-2022
//! multiplier update.

use crate::{pda::AuthoritySigner, state::ProxyState, token_2022_helpers};
use solana_program::{
    account_info::AccountInfo, entrypoint::ProgramResult, instruction::Instruction, msg,
    program, program_error::ProgramError, pubkey::Pubkey, rent::Rent, system_instruction,
    sysvar::Sysvar,
};

/// Services the processor needs from the host runtime.
pub trait Runtime {
    /// Rent-exempt balance for an account of `data_len` bytes.
    fn minimum_balance(&self, data_len: usize) -> Result<u64, ProgramError>;

    /// Issues a cross-program call signed with the given PDA seeds.
    fn invoke_signed(
        &self,
        instruction: &Instruction,
        account_infos: &[AccountInfo],
        signers_seeds: &[&[&[u8]]],
    ) -> ProgramResult;
}

/// The live Solana runtime.
pub struct SolanaRuntime;

impl Runtime for SolanaRuntime {
    fn minimum_balance(&self, data_len: usize) -> Result<u64, ProgramError> {
        Ok(Rent::get()?.minimum_balance(data_len))
    }

    fn invoke_signed(
        &self,
        instruction: &Instruction,
        account_infos: &[AccountInfo],
        signers_seeds: &[&[&[u8]]],
    ) -> ProgramResult {
        program::invoke_signed(instruction, account_infos, signers_seeds)
    }
}

/// Allocates the state PDA, owned by `program_id` and sized for `ProxyState`.
///
/// Anyone can send lamports to the PDA before initialization, and
/// `create_account` refuses a funded destination. A funded address is topped
/// up to rent exemption and then allocated and assigned in place.
pub fn create_state_account<'a, R: Runtime>(
    runtime: &R,
    program_id: &Pubkey,
    payer_info: &AccountInfo<'a>,
    state_info: &AccountInfo<'a>,
    system_program_info: &AccountInfo<'a>,
    state_bump: u8,
) -> ProgramResult {
    let space = ProxyState::LEN;
    let required_lamports = runtime.minimum_balance(space)?;
    let bump = [state_bump];
    let state_seeds: &[&[u8]] = &[ProxyState::STATE_SEED, &bump];

    let current_lamports = state_info.lamports();
    if current_lamports == 0 {
        let create_account_ix = system_instruction::create_account(
            payer_info.key,
            state_info.key,
            required_lamports,
            space as u64,
            program_id,
        );
        return runtime.invoke_signed(
            &create_account_ix,
            &[
                payer_info.clone(),
                state_info.clone(),
                system_program_info.clone(),
            ],
            &[state_seeds],
        );
    }

    let top_up = required_lamports.saturating_sub(current_lamports);
    if top_up > 0 {
        runtime.invoke_signed(
            &system_instruction::transfer(payer_info.key, state_info.key, top_up),
            &[
                payer_info.clone(),
                state_info.clone(),
                system_program_info.clone(),
            ],
            &[],
        )?;
    }

    runtime.invoke_signed(
        &system_instruction::allocate(state_info.key, space as u64),
        &[state_info.clone(), system_program_info.clone()],
        &[state_seeds],
    )?;
    runtime.invoke_signed(
        &system_instruction::assign(state_info.key, program_id),
        &[state_info.clone(), system_program_info.clone()],
        &[state_seeds],
    )
}

/// Forwards a multiplier update to Token-2022 with the authority PDA as signer.
///
/// Whatever Token-2022 returns is passed back untouched.
pub fn forward_update_multiplier<'a, R: Runtime>(
    runtime: &R,
    signer: &AuthoritySigner,
    token_mint_info: &AccountInfo<'a>,
    authority_pda_info: &AccountInfo<'a>,
    token_program_info: &AccountInfo<'a>,
    multiplier: f64,
    effective_timestamp: i64,
) -> ProgramResult {
    let update_ix = token_2022_helpers::update_multiplier(
        token_mint_info.key,
        authority_pda_info.key,
        multiplier,
        effective_timestamp,
    );

    msg!("Forwarding multiplier update to {}", update_ix.program_id);

    let seeds = signer.seeds();
    runtime.invoke_signed(
        &update_ix,
        &[
            token_mint_info.clone(),
            authority_pda_info.clone(),
            token_program_info.clone(),
        ],
        &[&seeds[..]],
    )
}
