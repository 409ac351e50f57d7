//! Jobs Treasury Pallet
//!
//! Sole custodian of the platform's stable-token pool. Tracks idle, escrowed
//! and deployed sub-balances under a single solvency invariant, hands out
//! single-use escrow handles to authorized caller components, and executes
//! yield deployments through configured protocol adapters.
//!
//! Every balance mutation in the system funnels through this pallet; the
//! escrow and strategy pallets hold references (job ids, protocol ids,
//! escrow handles), never funds.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use pallet::*;


#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

pub mod weights;
pub use weights::WeightInfo;

use frame::deps::sp_runtime::{DispatchError, DispatchResult};
use primitives::{Balance, YieldProtocol};

/// Protocol adapter contract, one implementation per runtime.
///
/// Adapters move stable tokens between the custody account and an external
/// yield venue and report the venue-side value of the deployed position.
/// Calls are bounded synchronous steps with no internal retry; a failed call
/// must leave the venue position untouched.
pub trait ProtocolAdapter<AccountId> {
  /// Move `amount` from `who` into the protocol's yield position.
  fn deposit(who: &AccountId, protocol: YieldProtocol, amount: Balance) -> DispatchResult;

  /// Move `amount` out of the protocol's yield position back to `who`.
  fn withdraw(who: &AccountId, protocol: YieldProtocol, amount: Balance) -> DispatchResult;

  /// Current venue-side value of the deployed position (principal plus any
  /// accrued yield, minus any realized loss).
  fn current_value(protocol: YieldProtocol) -> Balance;
}

/// No-op `ProtocolAdapter` for runtimes without yield venues.
impl<AccountId> ProtocolAdapter<AccountId> for () {
  fn deposit(_: &AccountId, _: YieldProtocol, _: Balance) -> DispatchResult {
    Err(DispatchError::Other("ProtocolAdapter not configured"))
  }

  fn withdraw(_: &AccountId, _: YieldProtocol, _: Balance) -> DispatchResult {
    Err(DispatchError::Other("ProtocolAdapter not configured"))
  }

  fn current_value(_: YieldProtocol) -> Balance {
    0
  }
}

/// Helper for benchmarking — creates the stable asset and funds accounts in
/// benchmark context.
#[cfg(feature = "runtime-benchmarks")]
pub trait BenchmarkHelper<AccountId> {
  fn create_stable_asset() -> frame::deps::sp_runtime::DispatchResult;
  fn fund_account(who: &AccountId, amount: Balance) -> frame::deps::sp_runtime::DispatchResult;
}

#[cfg(feature = "runtime-benchmarks")]
impl<AccountId> BenchmarkHelper<AccountId> for () {
  fn create_stable_asset() -> frame::deps::sp_runtime::DispatchResult {
    Ok(())
  }
  fn fund_account(_who: &AccountId, _amount: Balance) -> frame::deps::sp_runtime::DispatchResult {
    Ok(())
  }
}

#[frame::pallet]
pub mod pallet {
  use super::{ProtocolAdapter, WeightInfo};
  use frame::deps::{
    frame_support::traits::{
      Contains,
      fungibles::{Inspect as FungiblesInspect, Mutate as FungiblesMutate},
      tokens::Preservation,
    },
    sp_runtime::{
      DispatchError,
      traits::{AccountIdConversion, Zero},
    },
  };
  use frame::prelude::*;
  use polkadot_sdk::frame_support::PalletId;
  use primitives::{Balance, EscrowHandleId, JobId, YieldProtocol};

  /// Configuration trait for the jobs treasury pallet
  #[pallet::config]
  pub trait Config: frame_system::Config<RuntimeEvent: From<Event<Self>>> {
    /// The assets pallet holding the custodial stable token
    type Assets: FungiblesInspect<Self::AccountId, AssetId = u32, Balance = u128>
      + FungiblesMutate<Self::AccountId, AssetId = u32, Balance = u128>;

    /// Asset id of the custodial stable token
    #[pallet::constant]
    type StableAsset: Get<u32>;

    /// The pallet ID deriving the custody account
    #[pallet::constant]
    type PalletId: Get<PalletId>;

    /// Membership set of callers permitted to lock and release escrow
    type AuthorizedCallers: Contains<Self::AccountId>;

    /// Account permitted to move funds between idle and deployed
    #[pallet::constant]
    type StrategyController: Get<Self::AccountId>;

    /// Adapters executing deposits and withdrawals on the yield venues
    type Adapters: ProtocolAdapter<Self::AccountId>;

    /// Weight information for extrinsics
    type WeightInfo: WeightInfo;

    /// Benchmark helper for asset setup in benchmark context
    #[cfg(feature = "runtime-benchmarks")]
    type BenchmarkHelper: crate::BenchmarkHelper<Self::AccountId>;
  }

  #[pallet::pallet]
  pub struct Pallet<T>(PhantomData<T>);

  /// A single-use escrow lock binding a locked amount to a job.
  ///
  /// Released locks are retained with `released = true` so a replayed
  /// release is distinguishable from a release of an unknown handle.
  #[derive(
    Clone, Encode, Decode, DecodeWithMemTracking, Eq, PartialEq, RuntimeDebug, TypeInfo,
    MaxEncodedLen,
  )]
  pub struct EscrowLock<AccountId> {
    /// Locked amount in stable-token units
    pub amount: Balance,
    /// Job this lock funds
    pub job_id: JobId,
    /// Depositor whose contribution funded the lock
    pub funder: AccountId,
    /// Whether the lock has been released (exactly-once)
    pub released: bool,
  }

  /// Total stable tokens under treasury accounting
  #[pallet::storage]
  #[pallet::getter(fn total_balance)]
  pub type TotalBalance<T: Config> = StorageValue<_, Balance, ValueQuery>;

  /// Funds neither escrowed nor deployed
  #[pallet::storage]
  #[pallet::getter(fn idle_balance)]
  pub type IdleBalance<T: Config> = StorageValue<_, Balance, ValueQuery>;

  /// Funds locked for jobs awaiting completion or dispute resolution
  #[pallet::storage]
  #[pallet::getter(fn escrowed_balance)]
  pub type EscrowedBalance<T: Config> = StorageValue<_, Balance, ValueQuery>;

  /// Principal deployed per yield protocol
  #[pallet::storage]
  #[pallet::getter(fn deployed_balance)]
  pub type DeployedBalance<T: Config> =
    StorageMap<_, Blake2_128Concat, YieldProtocol, Balance, ValueQuery>;

  /// Per-depositor contribution to pool funds.
  ///
  /// Escrowed amounts are tracked per lock, not here; a depositor's entry
  /// drops when their contribution is locked for a job and recovers on
  /// refund.
  #[pallet::storage]
  #[pallet::getter(fn depositor_balance)]
  pub type DepositorBalances<T: Config> =
    StorageMap<_, Blake2_128Concat, T::AccountId, Balance, ValueQuery>;

  /// Escrow locks by handle
  #[pallet::storage]
  #[pallet::getter(fn escrow_lock)]
  pub type EscrowLocks<T: Config> =
    StorageMap<_, Blake2_128Concat, EscrowHandleId, EscrowLock<T::AccountId>, OptionQuery>;

  /// Next escrow handle id, monotonic, never reused
  #[pallet::storage]
  #[pallet::getter(fn next_escrow_handle)]
  pub type NextEscrowHandle<T: Config> = StorageValue<_, EscrowHandleId, ValueQuery>;

  /// Lifetime yield harvested into the pool
  #[pallet::storage]
  #[pallet::getter(fn total_yield_earned)]
  pub type TotalYieldEarned<T: Config> = StorageValue<_, Balance, ValueQuery>;

  #[pallet::event]
  #[pallet::generate_deposit(pub(super) fn deposit_event)]
  pub enum Event<T: Config> {
    /// A depositor added funds to the pool
    FundsDeposited { depositor: T::AccountId, amount: Balance },
    /// A depositor withdrew idle funds from the pool
    FundsWithdrawn { depositor: T::AccountId, amount: Balance },
    /// Idle funds were locked for a job
    EscrowLocked {
      handle: EscrowHandleId,
      job_id: JobId,
      funder: T::AccountId,
      amount: Balance,
    },
    /// An escrow lock was paid out externally
    EscrowReleased {
      handle: EscrowHandleId,
      job_id: JobId,
      amount: Balance,
    },
    /// An escrow lock was returned to a depositor's idle contribution
    EscrowRefunded {
      handle: EscrowHandleId,
      job_id: JobId,
      beneficiary: T::AccountId,
      amount: Balance,
    },
    /// Idle funds were deployed to a yield protocol
    FundsDeployed { protocol: YieldProtocol, amount: Balance },
    /// Deployed funds were recalled back to idle
    FundsRecalled { protocol: YieldProtocol, amount: Balance },
    /// Yield was harvested into the idle pool
    YieldHarvested {
      protocol: YieldProtocol,
      amount: Balance,
      total_yield_earned: Balance,
    },
    /// A deployed position is worth less than its recorded principal.
    /// Reported for manual policy action, never auto-corrected.
    YieldShortfallObserved { protocol: YieldProtocol, shortfall: Balance },
  }

  #[pallet::error]
  pub enum Error<T> {
    /// Amount must be positive
    InvalidAmount,
    /// Caller is not permitted to perform this custody operation
    UnauthorizedCaller,
    /// Idle funds cannot cover the requested amount
    InsufficientIdleFunds,
    /// Deployed funds on the protocol cannot cover the requested amount
    InsufficientDeployedFunds,
    /// The depositor's recorded contribution cannot cover the requested amount
    InsufficientDepositorFunds,
    /// No escrow lock exists for the handle
    UnknownEscrowHandle,
    /// The escrow lock was already released
    EscrowAlreadyReleased,
    /// Release payouts do not sum to the locked amount
    PayoutMismatch,
    /// A protocol adapter call failed; retry once the adapter recovers
    AdapterUnavailable,
  }


  #[pallet::call]
  impl<T: Config> Pallet<T> {
    /// Deposit stable tokens into the pool.
    ///
    /// Funds land in the idle sub-balance and are credited to the
    /// depositor's contribution for later job funding or withdrawal.
    #[pallet::call_index(0)]
    #[pallet::weight(T::WeightInfo::deposit())]
    pub fn deposit(origin: OriginFor<T>, amount: Balance) -> DispatchResult {
      let who = ensure_signed(origin)?;
      ensure!(!amount.is_zero(), Error::<T>::InvalidAmount);
      Self::transfer_stable(&who, &Self::account_id(), amount)?;
      TotalBalance::<T>::mutate(|b| *b = b.saturating_add(amount));
      IdleBalance::<T>::mutate(|b| *b = b.saturating_add(amount));
      DepositorBalances::<T>::mutate(&who, |b| *b = b.saturating_add(amount));
      Self::deposit_event(Event::FundsDeposited { depositor: who, amount });
      Ok(())
    }

    /// Withdraw idle stable tokens from the pool.
    ///
    /// Bounded by both the caller's recorded contribution and the idle
    /// sub-balance — funds currently deployed must be recalled by a
    /// rebalance before they can leave custody.
    #[pallet::call_index(1)]
    #[pallet::weight(T::WeightInfo::withdraw())]
    pub fn withdraw(origin: OriginFor<T>, amount: Balance) -> DispatchResult {
      let who = ensure_signed(origin)?;
      ensure!(!amount.is_zero(), Error::<T>::InvalidAmount);
      ensure!(
        DepositorBalances::<T>::get(&who) >= amount,
        Error::<T>::InsufficientDepositorFunds
      );
      ensure!(
        IdleBalance::<T>::get() >= amount,
        Error::<T>::InsufficientIdleFunds
      );
      Self::transfer_stable(&Self::account_id(), &who, amount)?;
      TotalBalance::<T>::mutate(|b| *b = b.saturating_sub(amount));
      IdleBalance::<T>::mutate(|b| *b = b.saturating_sub(amount));
      DepositorBalances::<T>::mutate(&who, |b| *b = b.saturating_sub(amount));
      Self::deposit_event(Event::FundsWithdrawn { depositor: who, amount });
      Ok(())
    }
  }

  impl<T: Config> Pallet<T> {
    /// The custody account holding all pooled stable tokens.
    pub fn account_id() -> T::AccountId {
      T::PalletId::get().into_account_truncating()
    }

    /// Total funds under strategy management: idle plus deployed, escrow
    /// excluded.
    pub fn total_managed() -> Balance {
      let deployed: Balance = YieldProtocol::DEPLOY_ORDER
        .iter()
        .map(|p| DeployedBalance::<T>::get(p))
        .fold(0, |acc, b| acc.saturating_add(b));
      IdleBalance::<T>::get().saturating_add(deployed)
    }

    fn ensure_authorized(caller: &T::AccountId) -> DispatchResult {
      ensure!(
        T::AuthorizedCallers::contains(caller),
        Error::<T>::UnauthorizedCaller
      );
      Ok(())
    }

    fn ensure_strategy_controller(caller: &T::AccountId) -> DispatchResult {
      ensure!(
        *caller == T::StrategyController::get(),
        Error::<T>::UnauthorizedCaller
      );
      Ok(())
    }

    fn transfer_stable(from: &T::AccountId, to: &T::AccountId, amount: Balance) -> DispatchResult {
      if amount.is_zero() {
        return Ok(());
      }
      T::Assets::transfer(
        T::StableAsset::get(),
        from,
        to,
        amount,
        Preservation::Expendable,
      )
      .map(|_| ())
    }

    /// Lock idle funds for a job on behalf of an authorized caller.
    ///
    /// Debits the funder's recorded contribution so the per-depositor
    /// accounting stays tied to pool funds. Returns the opaque handle the
    /// caller must present to release the lock — exactly once.
    pub fn lock_escrow(
      caller: &T::AccountId,
      funder: &T::AccountId,
      amount: Balance,
      job_id: JobId,
    ) -> Result<EscrowHandleId, DispatchError> {
      Self::ensure_authorized(caller)?;
      ensure!(!amount.is_zero(), Error::<T>::InvalidAmount);
      ensure!(
        IdleBalance::<T>::get() >= amount,
        Error::<T>::InsufficientIdleFunds
      );
      ensure!(
        DepositorBalances::<T>::get(funder) >= amount,
        Error::<T>::InsufficientDepositorFunds
      );
      let handle = NextEscrowHandle::<T>::mutate(|id| {
        let handle = *id;
        *id = id.saturating_add(1);
        handle
      });
      IdleBalance::<T>::mutate(|b| *b = b.saturating_sub(amount));
      EscrowedBalance::<T>::mutate(|b| *b = b.saturating_add(amount));
      DepositorBalances::<T>::mutate(funder, |b| *b = b.saturating_sub(amount));
      EscrowLocks::<T>::insert(
        handle,
        EscrowLock {
          amount,
          job_id,
          funder: funder.clone(),
          released: false,
        },
      );
      Self::deposit_event(Event::EscrowLocked {
        handle,
        job_id,
        funder: funder.clone(),
        amount,
      });
      Ok(handle)
    }

    /// Release an escrow lock as external payouts.
    ///
    /// The payout amounts must sum exactly to the locked amount; the check
    /// runs before any transfer so a mismatch leaves state untouched.
    pub fn release_escrow(
      caller: &T::AccountId,
      handle: EscrowHandleId,
      payouts: &[(T::AccountId, Balance)],
    ) -> DispatchResult {
      Self::ensure_authorized(caller)?;
      let mut lock =
        EscrowLocks::<T>::get(handle).ok_or(Error::<T>::UnknownEscrowHandle)?;
      ensure!(!lock.released, Error::<T>::EscrowAlreadyReleased);
      let payout_total = payouts
        .iter()
        .fold(0u128, |acc, (_, amount)| acc.saturating_add(*amount));
      ensure!(payout_total == lock.amount, Error::<T>::PayoutMismatch);
      let custody = Self::account_id();
      for (beneficiary, amount) in payouts {
        Self::transfer_stable(&custody, beneficiary, *amount)?;
      }
      EscrowedBalance::<T>::mutate(|b| *b = b.saturating_sub(lock.amount));
      TotalBalance::<T>::mutate(|b| *b = b.saturating_sub(lock.amount));
      lock.released = true;
      let (job_id, amount) = (lock.job_id, lock.amount);
      EscrowLocks::<T>::insert(handle, lock);
      Self::deposit_event(Event::EscrowReleased { handle, job_id, amount });
      Ok(())
    }

    /// Release an escrow lock back into the pool, crediting the
    /// beneficiary's idle contribution.
    pub fn refund_escrow_to_idle(
      caller: &T::AccountId,
      handle: EscrowHandleId,
      beneficiary: &T::AccountId,
    ) -> Result<Balance, DispatchError> {
      Self::ensure_authorized(caller)?;
      let mut lock =
        EscrowLocks::<T>::get(handle).ok_or(Error::<T>::UnknownEscrowHandle)?;
      ensure!(!lock.released, Error::<T>::EscrowAlreadyReleased);
      EscrowedBalance::<T>::mutate(|b| *b = b.saturating_sub(lock.amount));
      IdleBalance::<T>::mutate(|b| *b = b.saturating_add(lock.amount));
      DepositorBalances::<T>::mutate(beneficiary, |b| *b = b.saturating_add(lock.amount));
      lock.released = true;
      let (job_id, amount) = (lock.job_id, lock.amount);
      EscrowLocks::<T>::insert(handle, lock);
      Self::deposit_event(Event::EscrowRefunded {
        handle,
        job_id,
        beneficiary: beneficiary.clone(),
        amount,
      });
      Ok(amount)
    }

    /// Move idle funds into a yield protocol.
    ///
    /// The adapter call runs first; the ledger only moves once the venue has
    /// accepted the funds, so a failed adapter leaves state unchanged.
    pub fn deploy_to(
      caller: &T::AccountId,
      protocol: YieldProtocol,
      amount: Balance,
    ) -> DispatchResult {
      Self::ensure_strategy_controller(caller)?;
      ensure!(!amount.is_zero(), Error::<T>::InvalidAmount);
      ensure!(
        IdleBalance::<T>::get() >= amount,
        Error::<T>::InsufficientIdleFunds
      );
      T::Adapters::deposit(&Self::account_id(), protocol, amount)
        .map_err(|_| Error::<T>::AdapterUnavailable)?;
      IdleBalance::<T>::mutate(|b| *b = b.saturating_sub(amount));
      DeployedBalance::<T>::mutate(protocol, |b| *b = b.saturating_add(amount));
      Self::deposit_event(Event::FundsDeployed { protocol, amount });
      Ok(())
    }

    /// Recall deployed funds from a yield protocol back to idle.
    pub fn withdraw_from(
      caller: &T::AccountId,
      protocol: YieldProtocol,
      amount: Balance,
    ) -> DispatchResult {
      Self::ensure_strategy_controller(caller)?;
      ensure!(!amount.is_zero(), Error::<T>::InvalidAmount);
      ensure!(
        DeployedBalance::<T>::get(protocol) >= amount,
        Error::<T>::InsufficientDeployedFunds
      );
      T::Adapters::withdraw(&Self::account_id(), protocol, amount)
        .map_err(|_| Error::<T>::AdapterUnavailable)?;
      DeployedBalance::<T>::mutate(protocol, |b| *b = b.saturating_sub(amount));
      IdleBalance::<T>::mutate(|b| *b = b.saturating_add(amount));
      Self::deposit_event(Event::FundsRecalled { protocol, amount });
      Ok(())
    }

    /// Harvest yield from a protocol into the idle pool.
    ///
    /// Compares the venue-side value against the recorded principal. A
    /// surplus is withdrawn through the adapter and credited to idle; the
    /// principal stays deployed. A deficit is returned to the caller and
    /// reported, but never subtracted — loss handling is a policy decision.
    ///
    /// Returns `(harvested, shortfall)`; at most one of the two is non-zero.
    pub fn harvest_from(
      caller: &T::AccountId,
      protocol: YieldProtocol,
    ) -> Result<(Balance, Balance), DispatchError> {
      Self::ensure_strategy_controller(caller)?;
      let recorded = DeployedBalance::<T>::get(protocol);
      let value = T::Adapters::current_value(protocol);
      if value > recorded {
        let earned = value.saturating_sub(recorded);
        T::Adapters::withdraw(&Self::account_id(), protocol, earned)
          .map_err(|_| Error::<T>::AdapterUnavailable)?;
        IdleBalance::<T>::mutate(|b| *b = b.saturating_add(earned));
        TotalBalance::<T>::mutate(|b| *b = b.saturating_add(earned));
        let lifetime = TotalYieldEarned::<T>::mutate(|t| {
          *t = t.saturating_add(earned);
          *t
        });
        Self::deposit_event(Event::YieldHarvested {
          protocol,
          amount: earned,
          total_yield_earned: lifetime,
        });
        Ok((earned, 0))
      } else {
        let shortfall = recorded.saturating_sub(value);
        if !shortfall.is_zero() {
          Self::deposit_event(Event::YieldShortfallObserved { protocol, shortfall });
        }
        Ok((0, shortfall))
      }
    }
  }

  /// Genesis configuration — keeps the custody account alive with a provider
  /// reference.
  #[pallet::genesis_config]
  #[derive(frame::prelude::DefaultNoBound)]
  pub struct GenesisConfig<T: Config> {
    #[serde(skip)]
    pub _marker: core::marker::PhantomData<T>,
  }

  #[pallet::genesis_build]
  impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
    fn build(&self) {
      frame_system::Pallet::<T>::inc_providers(&Pallet::<T>::account_id());
    }
  }
}
