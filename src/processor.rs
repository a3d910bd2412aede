use crate::{
    cpi::{self, Runtime, SolanaRuntime},
    error::ProxyError,
    instruction::ProxyInstruction,
    pda::{self, AuthoritySigner},
    state::ProxyState,
    token_2022_helpers::TOKEN_2022_PROGRAM_ID,
    validation::{validate_authority_match, validate_multiplier, validate_nonzero_identity},
};
use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    msg,
    program_error::ProgramError,
    pubkey::Pubkey,
};

pub struct Processor;

impl Processor {
    pub fn process(
        program_id: &Pubkey,
        accounts: &[AccountInfo],
        instruction_data: &[u8],
    ) -> ProgramResult {
        Self::process_with(program_id, accounts, instruction_data, &SolanaRuntime)
    }

    /// Same as `process`, with the runtime services supplied by the caller.
    pub fn process_with<R: Runtime>(
        program_id: &Pubkey,
        accounts: &[AccountInfo],
        instruction_data: &[u8],
        runtime: &R,
    ) -> ProgramResult {
        match ProxyInstruction::unpack(instruction_data)? {
            ProxyInstruction::Initialize { authority } => {
                msg!("Instruction: Initialize");
                Self::process_initialize(program_id, accounts, authority, runtime)
            }
            ProxyInstruction::UpdateMultiplier {
                new_multiplier,
                effective_timestamp,
            } => {
                msg!("Instruction: UpdateMultiplier");
                Self::process_update_multiplier(
                    program_id,
                    accounts,
                    new_multiplier,
                    effective_timestamp,
                    runtime,
                )
            }
            ProxyInstruction::UpdateAuthority { new_authority } => {
                msg!("Instruction: UpdateAuthority");
                Self::process_update_authority(program_id, accounts, new_authority)
            }
        }
    }

    fn process_initialize<R: Runtime>(
        program_id: &Pubkey,
        accounts: &[AccountInfo],
        authority: Pubkey,
        runtime: &R,
    ) -> ProgramResult {
        let account_info_iter = &mut accounts.iter();
        let payer_info = next_account_info(account_info_iter)?;
        let state_info = next_account_info(account_info_iter)?;
        let authority_pda_info = next_account_info(account_info_iter)?;
        let token_mint_info = next_account_info(account_info_iter)?;
        let system_program_info = next_account_info(account_info_iter)?;

        if !payer_info.is_signer {
            return Err(ProgramError::MissingRequiredSignature);
        }

        let (state_address, state_bump) = pda::find_state_address(program_id);
        if state_address != *state_info.key {
            return Err(ProxyError::InvalidStateAccount.into());
        }

        let (authority_pda, authority_bump) = pda::find_authority_address(program_id);
        if authority_pda != *authority_pda_info.key {
            return Err(ProxyError::InvalidPDA.into());
        }

        if ProxyState::is_initialized_account(state_info)? {
            return Err(ProxyError::AlreadyInitialized.into());
        }

        validate_nonzero_identity(&authority)?;

        cpi::create_state_account(
            runtime,
            program_id,
            payer_info,
            state_info,
            system_program_info,
            state_bump,
        )?;

        let state = ProxyState {
            initialized: true,
            authority,
            token_mint: *token_mint_info.key,
            bump: authority_bump,
        };
        state.save(state_info)?;

        msg!("Proxy initialized with authority: {}", authority);
        msg!("Authority PDA: {}", authority_pda);
        msg!("Token mint: {}", token_mint_info.key);

        Ok(())
    }

    fn process_update_multiplier<R: Runtime>(
        program_id: &Pubkey,
        accounts: &[AccountInfo],
        new_multiplier: f64,
        effective_timestamp: i64,
        runtime: &R,
    ) -> ProgramResult {
        let account_info_iter = &mut accounts.iter();
        let authority_info = next_account_info(account_info_iter)?;
        let state_info = next_account_info(account_info_iter)?;
        let authority_pda_info = next_account_info(account_info_iter)?;
        let token_mint_info = next_account_info(account_info_iter)?;
        let token_program_info = next_account_info(account_info_iter)?;

        if !authority_info.is_signer {
            return Err(ProgramError::MissingRequiredSignature);
        }

        let state = ProxyState::load(program_id, state_info)?;
        validate_authority_match(authority_info.key, &state.authority)?;

        if state.token_mint != *token_mint_info.key {
            return Err(ProxyError::InvalidMint.into());
        }

        validate_multiplier(new_multiplier)?;

        if *token_program_info.key != TOKEN_2022_PROGRAM_ID {
            return Err(ProgramError::IncorrectProgramId);
        }

        let signer = AuthoritySigner::new(state.bump);
        signer.check(authority_pda_info.key, program_id)?;

        cpi::forward_update_multiplier(
            runtime,
            &signer,
            token_mint_info,
            authority_pda_info,
            token_program_info,
            new_multiplier,
            effective_timestamp,
        )?;

        msg!(
            "Updated multiplier to {} effective at timestamp {}",
            new_multiplier,
            effective_timestamp
        );

        Ok(())
    }

    fn process_update_authority(
        program_id: &Pubkey,
        accounts: &[AccountInfo],
        new_authority: Pubkey,
    ) -> ProgramResult {
        let account_info_iter = &mut accounts.iter();
        let authority_info = next_account_info(account_info_iter)?;
        let state_info = next_account_info(account_info_iter)?;

        if !authority_info.is_signer {
            return Err(ProgramError::MissingRequiredSignature);
        }

        let mut state = ProxyState::load(program_id, state_info)?;
        validate_authority_match(authority_info.key, &state.authority)?;
        validate_nonzero_identity(&new_authority)?;

        // Single-step handover: the old authority loses control on commit.
        state.authority = new_authority;
        state.save(state_info)?;

        msg!(
            "Authority updated from {} to {}",
            authority_info.key,
            new_authority
        );

        Ok(())
    }
}
