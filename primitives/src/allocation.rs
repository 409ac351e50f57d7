//! Allocation policy: a validated four-bucket percentage split.
//!
//! The policy is pure data. It is constructed through [`AllocationPolicy::try_new`]
//! and is immutable afterwards — governance replaces the whole value with a new
//! validated instance, never mutates it field by field.

use crate::{
  Balance, YieldProtocol,
  ecosystem::params::BPS_DENOMINATOR,
};
use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};
use sp_arithmetic::{Rounding, helpers_128bit::multiply_by_rational_with_rounding};

/// Percentage split of managed funds across the three deployable protocols
/// plus the idle reserve, in basis points.
///
/// Invariant: the four shares sum to exactly [`BPS_DENOMINATOR`].
#[derive(
  Clone,
  Copy,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Encode,
  Eq,
  MaxEncodedLen,
  PartialEq,
  TypeInfo,
  Serialize,
  Deserialize,
)]
pub struct AllocationPolicy {
  /// Share deployed to the Aave-style lending pool
  pub aave_bps: u32,
  /// Share deployed to the Compound-style lending market
  pub compound_bps: u32,
  /// Share deployed to the AMM liquidity pool
  pub lp_pool_bps: u32,
  /// Share kept idle in the treasury
  pub reserve_bps: u32,
}

/// Target amounts per bucket derived from a policy, summing exactly to the
/// managed total that produced them.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TargetAmounts {
  pub aave: Balance,
  pub compound: Balance,
  pub lp_pool: Balance,
  pub reserve: Balance,
}

impl TargetAmounts {
  pub fn for_protocol(&self, protocol: YieldProtocol) -> Balance {
    match protocol {
      YieldProtocol::Aave => self.aave,
      YieldProtocol::Compound => self.compound,
      YieldProtocol::LpPool => self.lp_pool,
    }
  }
}

impl AllocationPolicy {
  /// Validate a four-bucket split.
  ///
  /// Returns `None` unless the shares sum to exactly [`BPS_DENOMINATOR`].
  /// Shares are unsigned, so negative values are unrepresentable; the sum is
  /// taken in u64 so it cannot wrap.
  pub fn try_new(aave_bps: u32, compound_bps: u32, lp_pool_bps: u32, reserve_bps: u32) -> Option<Self> {
    let total =
      aave_bps as u64 + compound_bps as u64 + lp_pool_bps as u64 + reserve_bps as u64;
    if total != BPS_DENOMINATOR as u64 {
      return None;
    }
    Some(Self { aave_bps, compound_bps, lp_pool_bps, reserve_bps })
  }

  /// Basis points for one deployable protocol.
  pub fn bps_for(&self, protocol: YieldProtocol) -> u32 {
    match protocol {
      YieldProtocol::Aave => self.aave_bps,
      YieldProtocol::Compound => self.compound_bps,
      YieldProtocol::LpPool => self.lp_pool_bps,
    }
  }

  /// Compute per-bucket target amounts for a managed total.
  ///
  /// Each deployable bucket is floored; the rounding residual lands in the
  /// reserve, so the four targets always sum exactly to `total_managed`.
  pub fn target_amounts(&self, total_managed: Balance) -> TargetAmounts {
    let share = |bps: u32| -> Balance {
      // bps <= BPS_DENOMINATOR, so the result fits in u128 and the
      // non-zero denominator makes the helper infallible here.
      multiply_by_rational_with_rounding(
        total_managed,
        bps as u128,
        BPS_DENOMINATOR as u128,
        Rounding::Down,
      )
      .unwrap_or(0)
    };
    let aave = share(self.aave_bps);
    let compound = share(self.compound_bps);
    let lp_pool = share(self.lp_pool_bps);
    let reserve = total_managed
      .saturating_sub(aave)
      .saturating_sub(compound)
      .saturating_sub(lp_pool);
    TargetAmounts { aave, compound, lp_pool, reserve }
  }
}

/// The pre-governance policy keeps everything idle.
impl Default for AllocationPolicy {
  fn default() -> Self {
    Self { aave_bps: 0, compound_bps: 0, lp_pool_bps: 0, reserve_bps: BPS_DENOMINATOR }
  }
}
