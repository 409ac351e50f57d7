//! Yield Strategy Pallet
//!
//! Governs the allocation policy for the treasury's managed funds and drives
//! rebalancing and yield harvesting through the treasury's custody interface.
//!
//! Policy changes and fund movement are deliberately separate operations:
//! `set_policy` replaces the validated split atomically and moves nothing,
//! `rebalance` derives deltas from whatever policy is current and applies
//! them step by step. A rebalance is not one transaction across venues —
//! each per-protocol step is individually atomic and failed steps are
//! reported for a targeted retry.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use pallet::*;

#[cfg(test)]
pub mod mock;

#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

pub mod weights;
pub use weights::WeightInfo;

use frame::deps::sp_runtime::{DispatchError, DispatchResult};
use primitives::{Balance, YieldProtocol};

/// Treasury custody operations the strategy engine drives.
///
/// Bound to the jobs treasury pallet by runtime glue; the engine's own
/// pallet account is the caller identity the treasury authorizes.
pub trait TreasuryCustody<AccountId> {
  /// Funds neither escrowed nor deployed.
  fn idle_balance() -> Balance;

  /// Recorded principal on one protocol.
  fn deployed_balance(protocol: YieldProtocol) -> Balance;

  /// Move idle funds into a protocol.
  fn deploy(caller: &AccountId, protocol: YieldProtocol, amount: Balance) -> DispatchResult;

  /// Recall deployed funds back to idle.
  fn recall(caller: &AccountId, protocol: YieldProtocol, amount: Balance) -> DispatchResult;

  /// Harvest accrued yield; returns `(harvested, shortfall)`.
  fn harvest(
    caller: &AccountId,
    protocol: YieldProtocol,
  ) -> Result<(Balance, Balance), DispatchError>;
}

/// No-op `TreasuryCustody` for configurations without a treasury.
impl<AccountId> TreasuryCustody<AccountId> for () {
  fn idle_balance() -> Balance {
    0
  }

  fn deployed_balance(_: YieldProtocol) -> Balance {
    0
  }

  fn deploy(_: &AccountId, _: YieldProtocol, _: Balance) -> DispatchResult {
    Err(DispatchError::Other("TreasuryCustody not configured"))
  }

  fn recall(_: &AccountId, _: YieldProtocol, _: Balance) -> DispatchResult {
    Err(DispatchError::Other("TreasuryCustody not configured"))
  }

  fn harvest(
    _: &AccountId,
    _: YieldProtocol,
  ) -> Result<(Balance, Balance), DispatchError> {
    Err(DispatchError::Other("TreasuryCustody not configured"))
  }
}

#[frame::pallet]
pub mod pallet {
  use super::{TreasuryCustody, WeightInfo};
  use alloc::vec::Vec;
  use frame::deps::sp_runtime::traits::AccountIdConversion;
  use frame::prelude::*;
  use polkadot_sdk::frame_support::PalletId;
  use primitives::{AllocationPolicy, Balance, YieldProtocol};

  /// Configuration trait for the yield strategy pallet
  #[pallet::config]
  pub trait Config: frame_system::Config<RuntimeEvent: From<Event<Self>>> {
    /// Custody interface of the treasury holding the managed funds
    type Treasury: TreasuryCustody<Self::AccountId>;

    /// Origin that can replace the policy and trigger rebalances
    type AdminOrigin: EnsureOrigin<Self::RuntimeOrigin>;

    /// The pallet ID deriving the engine's caller account
    #[pallet::constant]
    type PalletId: Get<PalletId>;

    /// Maximum number of archived policies kept for audit
    #[pallet::constant]
    type MaxPolicyHistory: Get<u32>;

    /// Weight information for extrinsics
    type WeightInfo: WeightInfo;
  }

  #[pallet::pallet]
  pub struct Pallet<T>(PhantomData<T>);

  /// Outcome of a single rebalance step.
  #[derive(
    Clone, Copy, Encode, Decode, DecodeWithMemTracking, Eq, PartialEq, RuntimeDebug, TypeInfo,
    MaxEncodedLen,
  )]
  pub enum StepOutcome {
    /// Funds moved into the protocol
    Deployed,
    /// Funds recalled from the protocol
    Recalled,
    /// Already on target, nothing to move
    Unchanged,
    /// The adapter rejected the move; retry once it recovers
    AdapterFailed,
    /// Idle funds were escrowed away before this step; retry when idle recovers
    IdleShortfall,
  }

  /// One per-protocol entry of a rebalance report.
  #[derive(
    Clone, Copy, Encode, Decode, DecodeWithMemTracking, Eq, PartialEq, RuntimeDebug, TypeInfo,
    MaxEncodedLen,
  )]
  pub struct RebalanceStep {
    pub protocol: YieldProtocol,
    /// Magnitude of the intended delta
    pub amount: Balance,
    pub outcome: StepOutcome,
  }

  impl RebalanceStep {
    /// Whether the step still needs a retry.
    pub fn needs_retry(&self) -> bool {
      matches!(
        self.outcome,
        StepOutcome::AdapterFailed | StepOutcome::IdleShortfall
      )
    }
  }

  /// An archived policy and the block it was replaced at.
  #[derive(
    Clone, Copy, Encode, Decode, DecodeWithMemTracking, Eq, PartialEq, RuntimeDebug, TypeInfo,
    MaxEncodedLen,
  )]
  pub struct PolicyRecord<BlockNumber> {
    pub policy: AllocationPolicy,
    pub replaced_at: BlockNumber,
  }

  /// The active allocation policy. Defaults to 100% reserve (nothing
  /// deployed) until governance sets a split.
  #[pallet::storage]
  #[pallet::getter(fn current_policy)]
  pub type CurrentPolicy<T: Config> = StorageValue<_, AllocationPolicy, ValueQuery>;

  /// Prior policies, oldest first, for audit. Oldest entries are evicted
  /// once the bound is reached.
  #[pallet::storage]
  #[pallet::getter(fn policy_history)]
  pub type PolicyHistory<T: Config> = StorageValue<
    _,
    BoundedVec<PolicyRecord<BlockNumberFor<T>>, T::MaxPolicyHistory>,
    ValueQuery,
  >;

  #[pallet::event]
  #[pallet::generate_deposit(pub(super) fn deposit_event)]
  pub enum Event<T: Config> {
    /// The allocation policy was replaced
    PolicyUpdated {
      previous: AllocationPolicy,
      current: AllocationPolicy,
    },
    /// A rebalance ran; failed steps form the retry set
    RebalanceExecuted {
      total_managed: Balance,
      steps: Vec<RebalanceStep>,
    },
    /// Yield was harvested from a protocol into the idle pool
    YieldHarvested { protocol: YieldProtocol, amount: Balance },
    /// A deployed position is worth less than its recorded principal
    YieldShortfall { protocol: YieldProtocol, amount: Balance },
  }

  #[pallet::error]
  pub enum Error<T> {
    /// The proposed split does not sum to exactly 10_000 basis points
    InvalidAllocation,
    /// Total deploy deltas exceed the currently idle funds
    InsufficientIdleFunds,
  }

  #[pallet::call]
  impl<T: Config> Pallet<T> {
    /// Replace the allocation policy.
    ///
    /// Validates the split and swaps the stored value atomically; the
    /// previous policy is archived. No funds move — trigger `rebalance`
    /// separately.
    #[pallet::call_index(0)]
    #[pallet::weight(T::WeightInfo::set_policy())]
    pub fn set_policy(
      origin: OriginFor<T>,
      aave_bps: u32,
      compound_bps: u32,
      lp_pool_bps: u32,
      reserve_bps: u32,
    ) -> DispatchResult {
      T::AdminOrigin::ensure_origin(origin)?;
      let current = AllocationPolicy::try_new(aave_bps, compound_bps, lp_pool_bps, reserve_bps)
        .ok_or(Error::<T>::InvalidAllocation)?;
      let previous = CurrentPolicy::<T>::get();
      PolicyHistory::<T>::mutate(|history| {
        if history.is_full() && !history.is_empty() {
          history.remove(0);
        }
        let _ = history.try_push(PolicyRecord {
          policy: previous,
          replaced_at: <frame_system::Pallet<T>>::block_number(),
        });
      });
      CurrentPolicy::<T>::put(current);
      Self::deposit_event(Event::PolicyUpdated { previous, current });
      Ok(())
    }

    /// Move idle/deployed funds toward the current policy targets.
    ///
    /// Targets are derived once from `idle + Σ deployed`; deltas are applied
    /// in the fixed protocol order so a replay is deterministic. Steps are
    /// individually atomic: an adapter failure or an idle shortfall fails
    /// that step only and already-applied moves stay applied. The emitted
    /// report enumerates every step — callers retry the failed subset by
    /// simply re-issuing `rebalance`, which re-derives the remaining deltas.
    #[pallet::call_index(1)]
    #[pallet::weight(T::WeightInfo::rebalance())]
    pub fn rebalance(origin: OriginFor<T>) -> DispatchResult {
      T::AdminOrigin::ensure_origin(origin)?;
      let policy = CurrentPolicy::<T>::get();
      let idle_start = T::Treasury::idle_balance();
      let deployed_start: Balance = YieldProtocol::DEPLOY_ORDER
        .iter()
        .map(|p| T::Treasury::deployed_balance(*p))
        .fold(0, |acc, b| acc.saturating_add(b));
      let total_managed = idle_start.saturating_add(deployed_start);
      let targets = policy.target_amounts(total_managed);

      // The invariant makes an overdraw impossible for pure deploys, but a
      // reshuffle ordered deploy-before-recall could exceed idle; refuse it
      // up front rather than half-apply.
      let required: Balance = YieldProtocol::DEPLOY_ORDER
        .iter()
        .map(|p| {
          let target = targets.for_protocol(*p);
          target.saturating_sub(T::Treasury::deployed_balance(*p))
        })
        .fold(0, |acc, d| acc.saturating_add(d));
      ensure!(required <= idle_start, Error::<T>::InsufficientIdleFunds);

      let caller = Self::account_id();
      let mut steps = Vec::with_capacity(YieldProtocol::DEPLOY_ORDER.len());
      for protocol in YieldProtocol::DEPLOY_ORDER {
        let current = T::Treasury::deployed_balance(protocol);
        let target = targets.for_protocol(protocol);
        let step = if target > current {
          let delta = target.saturating_sub(current);
          // Idle is re-read per step: funds may have been escrowed since
          // the targets were derived.
          if T::Treasury::idle_balance() < delta {
            RebalanceStep {
              protocol,
              amount: delta,
              outcome: StepOutcome::IdleShortfall,
            }
          } else {
            match T::Treasury::deploy(&caller, protocol, delta) {
              Ok(()) => RebalanceStep {
                protocol,
                amount: delta,
                outcome: StepOutcome::Deployed,
              },
              Err(_) => RebalanceStep {
                protocol,
                amount: delta,
                outcome: StepOutcome::AdapterFailed,
              },
            }
          }
        } else if current > target {
          let delta = current.saturating_sub(target);
          match T::Treasury::recall(&caller, protocol, delta) {
            Ok(()) => RebalanceStep {
              protocol,
              amount: delta,
              outcome: StepOutcome::Recalled,
            },
            Err(_) => RebalanceStep {
              protocol,
              amount: delta,
              outcome: StepOutcome::AdapterFailed,
            },
          }
        } else {
          RebalanceStep {
            protocol,
            amount: 0,
            outcome: StepOutcome::Unchanged,
          }
        };
        steps.push(step);
      }
      Self::deposit_event(Event::RebalanceExecuted { total_managed, steps });
      Ok(())
    }

    /// Harvest accrued yield from one protocol into the idle pool.
    ///
    /// Permissionless: harvesting only crystallizes gains. A venue-side loss
    /// is reported and left for governance to act on.
    #[pallet::call_index(2)]
    #[pallet::weight(T::WeightInfo::harvest_yield())]
    pub fn harvest_yield(origin: OriginFor<T>, protocol: YieldProtocol) -> DispatchResult {
      let _who = ensure_signed(origin)?;
      let caller = Self::account_id();
      let (earned, shortfall) = T::Treasury::harvest(&caller, protocol)?;
      if earned > 0 {
        Self::deposit_event(Event::YieldHarvested { protocol, amount: earned });
      } else if shortfall > 0 {
        Self::deposit_event(Event::YieldShortfall { protocol, amount: shortfall });
      }
      Ok(())
    }
  }

  impl<T: Config> Pallet<T> {
    /// The engine's caller account, authorized by the treasury as its
    /// strategy controller.
    pub fn account_id() -> T::AccountId {
      T::PalletId::get().into_account_truncating()
    }
  }
}
