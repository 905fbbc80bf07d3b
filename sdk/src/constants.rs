//! Protocol constants shared by every builder.
//!
//! Program ids per deployment, batching limits, and the fixed dimensions of
//! the on-chain market layout.

use solana_sdk::pubkey::Pubkey;

/// Zeta program id on mainnet.
pub const ZETA_PROGRAM_ID_MAINNET: Pubkey =
    solana_sdk::pubkey!("ZETAxsqBRek56DhiGXrn75yj2NHU3aYUnxvHXpkf3aD");

/// Zeta program id on devnet and localnet.
pub const ZETA_PROGRAM_ID_DEVNET: Pubkey =
    solana_sdk::pubkey!("BG3oRikW8d16YjUEmX3ZxHm9SiJzrGtMhsSR8aCw1Cd7");

/// Order-book (dex) program id on mainnet.
pub const DEX_PROGRAM_ID_MAINNET: Pubkey =
    solana_sdk::pubkey!("zDEXqXEG7gAyxb1Kg9mK5fPnUdENCGKzWrM21RMdWRq");

/// Order-book (dex) program id on devnet and localnet.
pub const DEX_PROGRAM_ID_DEVNET: Pubkey =
    solana_sdk::pubkey!("5CmWtUihvSrJpaUrpJ3H1jUa9DRjYz4v2xs6c3EgQWMf");

/// Oracle backup (Chainlink store) program id.
pub const CHAINLINK_PROGRAM_ID: Pubkey =
    solana_sdk::pubkey!("HEvSKofvBgfaexv23kMabbYqxasxU3mQ4ibBMEmJWHny");

/// SPL Token program ID.
pub const TOKEN_PROGRAM_ID: Pubkey =
    solana_sdk::pubkey!("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");

/// System program ID.
pub const SYSTEM_PROGRAM_ID: Pubkey = solana_sdk::pubkey!("11111111111111111111111111111111");

/// Rent sysvar.
pub const RENT_SYSVAR_ID: Pubkey =
    solana_sdk::pubkey!("SysvarRent111111111111111111111111111111111");

/// Maximum number of seeds in one program address derivation.
pub const MAX_SEEDS: usize = 16;

/// Maximum length of a single derivation seed in bytes.
pub const MAX_SEED_LEN: usize = 32;

/// Maximum order tag length in bytes.
pub const MAX_ORDER_TAG_LENGTH: usize = 4;

/// Tag attached to orders when the caller supplies none.
pub const DEFAULT_ORDER_TAG: &str = "SDK";

/// Remaining accounts per settlement / funding transaction.
pub const MAX_SETTLEMENT_ACCOUNTS: usize = 20;

/// Open-orders accounts per order-book fund settlement transaction.
pub const MAX_SETTLE_ACCOUNTS: usize = 12;

/// Strikes listed per expiry.
pub const NUM_STRIKES: usize = 11;

/// Calls and puts for every strike plus the expiry's future.
pub const PRODUCTS_PER_EXPIRY: usize = NUM_STRIKES * 2 + 1;

/// Points on the volatility surface.
pub const VOLATILITY_POINTS: usize = 5;

/// Decimal places of quote-currency native amounts.
pub const PLATFORM_PRECISION: u32 = 6;

/// Decimal places of position sizes.
pub const POSITION_PRECISION: u32 = 3;

/// Dex request queue allocation (payload plus padding).
pub const REQUEST_QUEUE_SPACE: u64 = 5120 + 12;

/// Dex event queue allocation.
pub const EVENT_QUEUE_SPACE: u64 = 262_144 + 12;

/// Dex bids / asks slab allocation.
pub const ORDERBOOK_SIDE_SPACE: u64 = 65_536 + 12;

/// Upper bound on the dex vault-signer nonce search.
pub const MAX_VAULT_SIGNER_NONCE: u64 = 256;
