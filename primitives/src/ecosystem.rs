//! Ecosystem constants for the jobs treasury pallets.
//!
//! This module centralizes system-level constants: dedicated pallet IDs for
//! deriving custody and caller accounts, and the fundamental economic
//! parameters shared by the treasury, escrow and strategy pallets.

/// Balance type alias for consistency across the ecosystem.
///
/// All amounts are denominated in the smallest unit of the single custodial
/// stable token.
pub type Balance = u128;

/// Job identifier, monotonically assigned and never reused.
pub type JobId = u64;

/// Opaque escrow handle identifier, releasable exactly once.
pub type EscrowHandleId = u64;

/// Pallet identifiers for deriving pallet-owned accounts.
///
/// These IDs are used by Polkadot SDK's `PalletId::into_account_truncating()`
/// to deterministically generate the custody account and the caller accounts
/// the treasury authorizes.
pub mod pallet_ids {
  /// Jobs Treasury pallet ID (token custody account)
  pub const TREASURY_PALLET_ID: &[u8; 8] = b"jbstrsry";

  /// Job Escrow pallet ID (authorized lock/release caller, stake custody)
  pub const JOB_ESCROW_PALLET_ID: &[u8; 8] = b"jobescrw";

  /// Yield Strategy pallet ID (authorized deploy/recall controller)
  pub const YIELD_STRATEGY_PALLET_ID: &[u8; 8] = b"yldstrat";
}

/// Economic parameters shared across the pallets.
pub mod params {
  use super::Balance;

  /// Basis point denominator: 10_000 bps = 100%.
  ///
  /// Every percentage in the system — allocation splits and platform fees —
  /// is expressed in integer basis points against this denominator.
  pub const BPS_DENOMINATOR: u32 = 10_000;

  /// Default platform fee retained on job completion (5%).
  pub const DEFAULT_PLATFORM_FEE_BPS: u32 = 500;

  /// Default minimum collateral an agent must stake to register
  /// (100 tokens at 6 decimals).
  pub const DEFAULT_MIN_AGENT_STAKE: Balance = 100_000_000;

  /// Reputation score floor.
  pub const SCORE_MIN: u32 = 0;

  /// Reputation score ceiling.
  pub const SCORE_MAX: u32 = 1_000;

  /// Reputation score assigned at agent registration.
  pub const SCORE_START: u32 = 500;

  /// Reputation gained per completed job.
  pub const SCORE_COMPLETION_BONUS: u32 = 25;

  /// Reputation lost per dispute resolved against the agent.
  pub const SCORE_DISPUTE_PENALTY: u32 = 100;
}
