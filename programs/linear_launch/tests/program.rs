//! Drives the compiled instruction handlers through a local bank: account
//! constraints, CPIs into the token and system programs, return data and
//! error codes as a client would see them.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::entrypoint::ProgramResult;
use anchor_lang::solana_program::program_pack::Pack;
use anchor_lang::solana_program::{instruction::Instruction, system_instruction};
use anchor_lang::{AccountDeserialize, InstructionData, ToAccountMetas};
use anchor_spl::associated_token::{
    get_associated_token_address, spl_associated_token_account::instruction::create_associated_token_account,
};
use anchor_spl::token::spl_token;
use linear_launch::constants::{LAUNCH_AUTHORITY_SEED, LAUNCH_STATE_SEED, VAULT_SOL_SEED};
use linear_launch::curve::TradeQuote;
use linear_launch::errors::LaunchError;
use linear_launch::state::{Launch, LaunchParams};
use solana_program_test::{processor, ProgramTest, ProgramTestContext};
use solana_sdk::{
    instruction::InstructionError,
    signature::{Keypair, Signer},
    transaction::{Transaction, TransactionError},
};

const DECIMALS: u8 = 9;
const ONE_UNIT: u64 = 1_000_000_000;
const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

fn process_instruction<'a, 'b, 'c, 'd>(
    program_id: &'a Pubkey,
    accounts: &'b [AccountInfo<'c>],
    data: &'d [u8],
) -> ProgramResult {
    // the generated entrypoint ties the slice and account lifetimes together
    let accounts = Box::leak(Box::new(accounts.to_vec()));
    linear_launch::entry(program_id, accounts, data)
}

async fn start() -> ProgramTestContext {
    let mut program_test = ProgramTest::new("linear_launch", linear_launch::ID, processor!(process_instruction));
    program_test.prefer_bpf(false);
    program_test.start_with_context().await
}

fn params() -> LaunchParams {
    LaunchParams {
        base_price: 1_000_000,
        slope: 100_000,
        fee_bps: 300,
        creator_fee_bps: 100,
        graduation_target: 1_000 * LAMPORTS_PER_SOL,
        initial_supply: 1_000,
    }
}

async fn send(
    ctx: &mut ProgramTestContext,
    instructions: &[Instruction],
    signers: &[&Keypair],
) -> std::result::Result<(), TransactionError> {
    let blockhash = ctx.get_new_latest_blockhash().await.unwrap();
    let mut all_signers: Vec<&Keypair> = vec![&ctx.payer];
    all_signers.extend_from_slice(signers);
    let tx = Transaction::new_signed_with_payer(instructions, Some(&ctx.payer.pubkey()), &all_signers, blockhash);
    ctx.banks_client.process_transaction(tx).await.map_err(|e| e.unwrap())
}

fn launch_error(err: LaunchError) -> TransactionError {
    TransactionError::InstructionError(
        0,
        InstructionError::Custom(anchor_lang::error::ERROR_CODE_OFFSET + err as u32),
    )
}

async fn lamports(ctx: &mut ProgramTestContext, key: Pubkey) -> u64 {
    ctx.banks_client.get_balance(key).await.unwrap()
}

async fn token_balance(ctx: &mut ProgramTestContext, key: Pubkey) -> u64 {
    let account = ctx.banks_client.get_account(key).await.unwrap().unwrap();
    spl_token::state::Account::unpack(&account.data).unwrap().amount
}

async fn fetch_launch(ctx: &mut ProgramTestContext, key: Pubkey) -> Launch {
    let account = ctx.banks_client.get_account(key).await.unwrap().unwrap();
    Launch::try_deserialize(&mut account.data.as_slice()).unwrap()
}

async fn fund(ctx: &mut ProgramTestContext, to: Pubkey, amount: u64) {
    let ix = system_instruction::transfer(&ctx.payer.pubkey(), &to, amount);
    send(ctx, &[ix], &[]).await.unwrap();
}

/// Addresses of one launch, derived from its mint.
struct Fixture {
    mint: Pubkey,
    launch: Pubkey,
    launch_authority: Pubkey,
    vault_sol: Pubkey,
    vault_token: Pubkey,
    creator: Pubkey,
    platform: Pubkey,
}

impl Fixture {
    /// Creates a mint and funds the authority's vault with `supply` whole units.
    async fn new(ctx: &mut ProgramTestContext, supply: u64) -> Self {
        let mint = Keypair::new();
        let payer = ctx.payer.pubkey();
        let (launch_authority, _) =
            Pubkey::find_program_address(&[LAUNCH_AUTHORITY_SEED, mint.pubkey().as_ref()], &linear_launch::ID);
        let (launch, _) = Pubkey::find_program_address(&[LAUNCH_STATE_SEED, mint.pubkey().as_ref()], &linear_launch::ID);
        let (vault_sol, _) = Pubkey::find_program_address(&[VAULT_SOL_SEED, mint.pubkey().as_ref()], &linear_launch::ID);
        let vault_token = get_associated_token_address(&launch_authority, &mint.pubkey());

        let rent = ctx.banks_client.get_rent().await.unwrap();
        let instructions = [
            system_instruction::create_account(
                &payer,
                &mint.pubkey(),
                rent.minimum_balance(spl_token::state::Mint::LEN),
                spl_token::state::Mint::LEN as u64,
                &spl_token::ID,
            ),
            spl_token::instruction::initialize_mint(&spl_token::ID, &mint.pubkey(), &payer, None, DECIMALS).unwrap(),
            create_associated_token_account(&payer, &launch_authority, &mint.pubkey(), &spl_token::ID),
            spl_token::instruction::mint_to(&spl_token::ID, &mint.pubkey(), &vault_token, &payer, &[], supply * ONE_UNIT)
                .unwrap(),
        ];
        send(ctx, &instructions, &[&mint]).await.unwrap();

        // the creator never holds lamports of its own
        let platform = Keypair::new().pubkey();
        fund(ctx, platform, LAMPORTS_PER_SOL).await;

        Self {
            mint: mint.pubkey(),
            launch,
            launch_authority,
            vault_sol,
            vault_token,
            creator: Keypair::new().pubkey(),
            platform,
        }
    }

    fn initialize(&self, payer: Pubkey, params: LaunchParams) -> Instruction {
        Instruction {
            program_id: linear_launch::ID,
            accounts: linear_launch::accounts::InitializeLaunch {
                payer,
                creator: self.creator,
                platform_fee_recipient: self.platform,
                mint: self.mint,
                launch_authority: self.launch_authority,
                launch: self.launch,
                vault_sol: self.vault_sol,
                vault_token: self.vault_token,
                token_program: spl_token::ID,
                associated_token_program: anchor_spl::associated_token::ID,
                system_program: anchor_lang::system_program::ID,
            }
            .to_account_metas(None),
            data: linear_launch::instruction::InitializeLaunch { params }.data(),
        }
    }

    fn trade_accounts(&self, trader: Pubkey, vault_token: Pubkey) -> Vec<AccountMeta> {
        linear_launch::accounts::TradeLaunch {
            trader,
            mint: self.mint,
            launch: self.launch,
            vault_sol: self.vault_sol,
            launch_authority: self.launch_authority,
            vault_token,
            trader_token: get_associated_token_address(&trader, &self.mint),
            token_program: spl_token::ID,
            associated_token_program: anchor_spl::associated_token::ID,
            system_program: anchor_lang::system_program::ID,
        }
        .to_account_metas(None)
    }

    fn buy(&self, trader: Pubkey, units: u64, max_cost: u64) -> Instruction {
        Instruction {
            program_id: linear_launch::ID,
            accounts: self.trade_accounts(trader, self.vault_token),
            data: linear_launch::instruction::Buy { units, max_cost }.data(),
        }
    }

    fn sell(&self, trader: Pubkey, units: u64, min_payout: u64) -> Instruction {
        Instruction {
            program_id: linear_launch::ID,
            accounts: self.trade_accounts(trader, self.vault_token),
            data: linear_launch::instruction::Sell { units, min_payout }.data(),
        }
    }

    fn withdraw_fees(&self, caller: Pubkey, creator: Pubkey) -> Instruction {
        Instruction {
            program_id: linear_launch::ID,
            accounts: linear_launch::accounts::WithdrawFees {
                caller,
                launch: self.launch,
                vault_sol: self.vault_sol,
                creator,
                platform_fee_recipient: self.platform,
                system_program: anchor_lang::system_program::ID,
            }
            .to_account_metas(None),
            data: linear_launch::instruction::WithdrawFees {}.data(),
        }
    }

    async fn quote(&self, ctx: &mut ProgramTestContext, data: Vec<u8>) -> TradeQuote {
        let ix = Instruction {
            program_id: linear_launch::ID,
            accounts: linear_launch::accounts::QuoteLaunch { launch: self.launch }.to_account_metas(None),
            data,
        };
        let blockhash = ctx.get_new_latest_blockhash().await.unwrap();
        let tx = Transaction::new_signed_with_payer(&[ix], Some(&ctx.payer.pubkey()), &[&ctx.payer], blockhash);
        let simulation = ctx.banks_client.simulate_transaction(tx).await.unwrap();
        assert!(matches!(simulation.result, Some(Ok(()))));

        let mut bytes = simulation.simulation_details.unwrap().return_data.unwrap().data;
        // the runtime trims trailing zero bytes from return data
        bytes.resize(5 * std::mem::size_of::<u64>(), 0);
        TradeQuote::try_from_slice(&bytes).unwrap()
    }

    async fn quote_buy(&self, ctx: &mut ProgramTestContext, units: u64) -> TradeQuote {
        self.quote(ctx, linear_launch::instruction::QuoteBuy { units }.data()).await
    }

    async fn quote_sell(&self, ctx: &mut ProgramTestContext, units: u64) -> TradeQuote {
        self.quote(ctx, linear_launch::instruction::QuoteSell { units }.data()).await
    }
}

#[tokio::test]
async fn launch_trade_and_withdraw_through_the_program() {
    let mut ctx = start().await;
    let fx = Fixture::new(&mut ctx, 1_000).await;
    let payer = ctx.payer.pubkey();
    let floor = ctx.banks_client.get_rent().await.unwrap().minimum_balance(0);

    send(&mut ctx, &[fx.initialize(payer, params())], &[]).await.unwrap();
    assert_eq!(lamports(&mut ctx, fx.vault_sol).await, floor);

    let buyer = Keypair::new();
    fund(&mut ctx, buyer.pubkey(), 10 * LAMPORTS_PER_SOL).await;

    let quote = fx.quote_buy(&mut ctx, 20).await;
    assert_eq!(quote.gross, 39_000_000);
    assert_eq!(quote.platform_fee, 1_170_000);
    assert_eq!(quote.creator_fee, 390_000);

    send(&mut ctx, &[fx.buy(buyer.pubkey(), 20, quote.gross)], &[&buyer]).await.unwrap();
    let buyer_token = get_associated_token_address(&buyer.pubkey(), &fx.mint);
    assert_eq!(token_balance(&mut ctx, buyer_token).await, 20 * ONE_UNIT);
    assert_eq!(lamports(&mut ctx, fx.vault_sol).await, floor + 39_000_000);

    let quote = fx.quote_sell(&mut ctx, 5).await;
    assert_eq!(quote.gross, 13_500_000);
    assert_eq!(quote.net, 12_960_000);

    let before = lamports(&mut ctx, buyer.pubkey()).await;
    send(&mut ctx, &[fx.sell(buyer.pubkey(), 5, quote.net)], &[&buyer]).await.unwrap();
    assert_eq!(lamports(&mut ctx, buyer.pubkey()).await, before + quote.net);
    assert_eq!(token_balance(&mut ctx, buyer_token).await, 15 * ONE_UNIT);

    let launch = fetch_launch(&mut ctx, fx.launch).await;
    assert_eq!(launch.tokens_sold, 15);
    assert_eq!(launch.platform_fee_accrued, 1_575_000);
    assert_eq!(launch.creator_fee_accrued, 525_000);
    assert_eq!(
        lamports(&mut ctx, fx.vault_sol).await,
        floor + launch.reserves + launch.platform_fee_accrued + launch.creator_fee_accrued
    );

    // creator's share is below the rent-exempt minimum of an empty account
    assert!(launch.creator_fee_accrued < floor);
    let platform_before = lamports(&mut ctx, fx.platform).await;
    send(&mut ctx, &[fx.withdraw_fees(payer, fx.creator)], &[]).await.unwrap();
    assert_eq!(lamports(&mut ctx, fx.platform).await, platform_before + 1_575_000);
    assert_eq!(lamports(&mut ctx, fx.creator).await, 0);

    let launch = fetch_launch(&mut ctx, fx.launch).await;
    assert_eq!(launch.platform_fee_accrued, 0);
    assert_eq!(launch.creator_fee_accrued, 525_000);

    let err = send(&mut ctx, &[fx.initialize(payer, params())], &[]).await.unwrap_err();
    assert_eq!(err, launch_error(LaunchError::AlreadyInitialized));
}

#[tokio::test]
async fn mismatched_accounts_are_rejected() {
    let mut ctx = start().await;
    let fx = Fixture::new(&mut ctx, 1_000).await;
    let payer = ctx.payer.pubkey();
    send(&mut ctx, &[fx.initialize(payer, params())], &[]).await.unwrap();

    let buyer = Keypair::new();
    fund(&mut ctx, buyer.pubkey(), 10 * LAMPORTS_PER_SOL).await;
    send(&mut ctx, &[fx.buy(buyer.pubkey(), 10, u64::MAX)], &[&buyer]).await.unwrap();

    let stranger = Keypair::new();
    fund(&mut ctx, stranger.pubkey(), LAMPORTS_PER_SOL).await;
    let err = send(&mut ctx, &[fx.sell(stranger.pubkey(), 1, 0)], &[&stranger]).await.unwrap_err();
    assert_eq!(err, launch_error(LaunchError::InsufficientTokenBalance));

    let buyer_token = get_associated_token_address(&buyer.pubkey(), &fx.mint);
    let wrong_vault = Instruction {
        program_id: linear_launch::ID,
        accounts: fx.trade_accounts(buyer.pubkey(), buyer_token),
        data: linear_launch::instruction::Buy { units: 1, max_cost: u64::MAX }.data(),
    };
    let err = send(&mut ctx, &[wrong_vault], &[&buyer]).await.unwrap_err();
    assert_eq!(err, launch_error(LaunchError::InvalidVault));

    let err = send(&mut ctx, &[fx.withdraw_fees(payer, fx.platform)], &[]).await.unwrap_err();
    assert_eq!(err, launch_error(LaunchError::InvalidCreator));
}

#[tokio::test]
async fn initialize_requires_the_supply_in_the_vault() {
    let mut ctx = start().await;
    let fx = Fixture::new(&mut ctx, 100).await;
    let payer = ctx.payer.pubkey();

    let err = send(&mut ctx, &[fx.initialize(payer, params())], &[]).await.unwrap_err();
    assert_eq!(err, launch_error(LaunchError::VaultUnderfunded));

    let launch = ctx.banks_client.get_account(fx.launch).await.unwrap();
    assert!(launch.is_none());
}
