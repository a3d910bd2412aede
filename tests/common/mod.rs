#![allow(dead_code)]

use borsh::BorshDeserialize;
use litesvm::LiteSVM;
use scaled_ui_multiplier_proxy::{
    error::ProxyError, instruction, pda, state::ProxyState,
    token_2022_helpers::{TokenInstruction, TOKEN_2022_PROGRAM_ID},
};
use solana_sdk::{
    account::Account,
    instruction::{AccountMeta, Instruction, InstructionError},
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    system_instruction,
    transaction::{Transaction, TransactionError},
};
use std::path::PathBuf;

pub const PAYER_LAMPORTS: u64 = 10_000_000_000;
pub const INITIAL_MULTIPLIER: f64 = 1.0;

// Mint base (165) + account type (1) + TLV header (4) + ScaledUiAmountConfig (56)
const SCALED_MINT_LEN: usize = 226;
const SCALED_CONFIG_OFFSET: usize = 170;

/// Scaled UI Amount config as stored in the mint's extension data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledUiAmountConfig {
    pub authority: Pubkey,
    pub multiplier: f64,
    pub new_multiplier_effective_timestamp: i64,
    pub new_multiplier: f64,
}

fn program_so() -> PathBuf {
    let out_dir = std::env::var("SBF_OUT_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("target/deploy"));
    out_dir.join("scaled_ui_multiplier_proxy.so")
}

pub fn proxy_error(error: ProxyError) -> TransactionError {
    TransactionError::InstructionError(0, InstructionError::Custom(error as u32))
}

pub fn instruction_error(error: InstructionError) -> TransactionError {
    TransactionError::InstructionError(0, error)
}

/// One deployed proxy inside a fresh `LiteSVM`.
pub struct ProxyTest {
    pub svm: LiteSVM,
    pub program_id: Pubkey,
    pub payer: Keypair,
    pub mint: Pubkey,
}

impl ProxyTest {
    /// Deploys the proxy. The mint is only an address; nothing is created for it.
    pub fn new() -> Self {
        let mut svm = LiteSVM::new();
        let program_id = scaled_ui_multiplier_proxy::id();
        let path = program_so();
        svm.add_program_from_file(program_id, &path)
            .unwrap_or_else(|e| panic!("{}: {e} (run `cargo build-sbf` first)", path.display()));

        let payer = Keypair::new();
        svm.airdrop(&payer.pubkey(), PAYER_LAMPORTS).unwrap();

        Self {
            svm,
            program_id,
            payer,
            mint: Pubkey::new_unique(),
        }
    }

    /// Deploys the proxy next to a Token-2022 mint whose multiplier authority
    /// is the proxy's authority PDA.
    pub fn with_scaled_mint() -> Self {
        let mut test = Self::new();
        let (authority_pda, _) = test.authority_pda();
        test.create_scaled_mint(&authority_pda);
        test
    }

    /// Same as `with_scaled_mint`, then initialized with a fresh authority.
    pub fn initialized() -> (Self, Keypair) {
        let mut test = Self::with_scaled_mint();
        let authority = Keypair::new();
        test.initialize(&authority.pubkey()).unwrap();
        (test, authority)
    }

    /// Replaces the mint with a new Token-2022 mint whose multiplier
    /// authority is `multiplier_authority`.
    pub fn create_scaled_mint(&mut self, multiplier_authority: &Pubkey) {
        let mint = Keypair::new();
        let rent = self.svm.minimum_balance_for_rent_exemption(SCALED_MINT_LEN);

        // ScaledUiAmountExtension::Initialize { authority, multiplier }
        let mut init_data = vec![TokenInstruction::ScaledUiAmountExtension as u8, 0];
        init_data.extend_from_slice(multiplier_authority.as_ref());
        init_data.extend_from_slice(&INITIAL_MULTIPLIER.to_le_bytes());

        let instructions = [
            system_instruction::create_account(
                &self.payer.pubkey(),
                &mint.pubkey(),
                rent,
                SCALED_MINT_LEN as u64,
                &TOKEN_2022_PROGRAM_ID,
            ),
            Instruction {
                program_id: TOKEN_2022_PROGRAM_ID,
                accounts: vec![AccountMeta::new(mint.pubkey(), false)],
                data: init_data,
            },
            spl_token_2022::instruction::initialize_mint2(
                &TOKEN_2022_PROGRAM_ID,
                &mint.pubkey(),
                &self.payer.pubkey(),
                None,
                6,
            )
            .unwrap(),
        ];
        let tx = Transaction::new_signed_with_payer(
            &instructions,
            Some(&self.payer.pubkey()),
            &[&self.payer, &mint],
            self.svm.latest_blockhash(),
        );
        self.svm.send_transaction(tx).unwrap();
        self.mint = mint.pubkey();
    }

    /// Sends `instruction` paid by the payer and signed by `signers`.
    pub fn send(&mut self, instruction: Instruction, signers: &[&Keypair]) -> Result<(), TransactionError> {
        self.svm.expire_blockhash();

        let mut all_signers = vec![&self.payer];
        for signer in signers {
            if signer.pubkey() != self.payer.pubkey() {
                all_signers.push(*signer);
            }
        }
        let tx = Transaction::new_signed_with_payer(
            &[instruction],
            Some(&self.payer.pubkey()),
            &all_signers,
            self.svm.latest_blockhash(),
        );
        self.svm
            .send_transaction(tx)
            .map(|_| ())
            .map_err(|failed| failed.err)
    }

    pub fn initialize(&mut self, authority: &Pubkey) -> Result<(), TransactionError> {
        let ix = instruction::initialize(
            &self.program_id,
            &self.payer.pubkey(),
            &self.mint,
            authority,
        );
        self.send(ix, &[])
    }

    pub fn update_multiplier(
        &mut self,
        caller: &Keypair,
        multiplier: f64,
        effective_timestamp: i64,
    ) -> Result<(), TransactionError> {
        let ix = instruction::update_multiplier(
            &self.program_id,
            &caller.pubkey(),
            &self.mint,
            multiplier,
            effective_timestamp,
        );
        self.send(ix, &[caller])
    }

    pub fn update_authority(
        &mut self,
        caller: &Keypair,
        new_authority: &Pubkey,
    ) -> Result<(), TransactionError> {
        let ix = instruction::update_authority(&self.program_id, &caller.pubkey(), new_authority);
        self.send(ix, &[caller])
    }

    pub fn state_address(&self) -> Pubkey {
        pda::find_state_address(&self.program_id).0
    }

    pub fn authority_pda(&self) -> (Pubkey, u8) {
        pda::find_authority_address(&self.program_id)
    }

    pub fn account(&self, key: &Pubkey) -> Option<Account> {
        self.svm.get_account(key)
    }

    /// The stored record, if the state account holds one.
    pub fn state(&self) -> Option<ProxyState> {
        let account = self.account(&self.state_address())?;
        if account.data.len() != ProxyState::LEN {
            return None;
        }
        ProxyState::try_from_slice(&account.data).ok()
    }

    pub fn scaled_config(&self) -> ScaledUiAmountConfig {
        let data = self.account(&self.mint).unwrap().data;
        let field = |start: usize, len: usize| &data[SCALED_CONFIG_OFFSET + start..][..len];
        ScaledUiAmountConfig {
            authority: Pubkey::try_from(field(0, 32)).unwrap(),
            multiplier: f64::from_le_bytes(field(32, 8).try_into().unwrap()),
            new_multiplier_effective_timestamp: i64::from_le_bytes(field(40, 8).try_into().unwrap()),
            new_multiplier: f64::from_le_bytes(field(48, 8).try_into().unwrap()),
        }
    }
}
