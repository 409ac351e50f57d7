//! Job Escrow Pallet
//!
//! Owns the job state machine and the agent registry. Every job's payment is
//! locked in the treasury for the whole of its live lifetime (Open, Assigned,
//! Disputed) and released exactly once on the way into a terminal state
//! (Completed, Refunded). The pallet never touches balances itself — all
//! fund movement goes through the treasury's custody interface, with this
//! pallet's account as the authorized caller.

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
use primitives::{Balance, EscrowHandleId, JobId};

/// Maximum length of a deliverable reference (URI or content hash).
pub const MAX_DELIVERABLE_LEN: u32 = 512;

/// Treasury custody operations the escrow ledger drives.
///
/// Bound to the jobs treasury pallet by runtime glue; this pallet's account
/// must be a member of the treasury's authorization registry.
pub trait PaymentCustody<AccountId> {
  /// Lock `amount` of the funder's idle contribution for a job.
  fn lock(
    caller: &AccountId,
    funder: &AccountId,
    amount: Balance,
    job_id: JobId,
  ) -> Result<EscrowHandleId, DispatchError>;

  /// Release a lock as external payouts summing exactly to the locked amount.
  fn release(
    caller: &AccountId,
    handle: EscrowHandleId,
    payouts: &[(AccountId, Balance)],
  ) -> DispatchResult;

  /// Release a lock back into the pool, crediting the beneficiary's idle
  /// contribution.
  fn refund_to_idle(
    caller: &AccountId,
    handle: EscrowHandleId,
    beneficiary: &AccountId,
  ) -> Result<Balance, DispatchError>;
}

/// No-op `PaymentCustody` for configurations without a treasury.
impl<AccountId> PaymentCustody<AccountId> for () {
  fn lock(
    _: &AccountId,
    _: &AccountId,
    _: Balance,
    _: JobId,
  ) -> Result<EscrowHandleId, DispatchError> {
    Err(DispatchError::Other("PaymentCustody not configured"))
  }

  fn release(
    _: &AccountId,
    _: EscrowHandleId,
    _: &[(AccountId, Balance)],
  ) -> DispatchResult {
    Err(DispatchError::Other("PaymentCustody not configured"))
  }

  fn refund_to_idle(
    _: &AccountId,
    _: EscrowHandleId,
    _: &AccountId,
  ) -> Result<Balance, DispatchError> {
    Err(DispatchError::Other("PaymentCustody not configured"))
  }
}

/// Helper for benchmarking — funds accounts and seeds the treasury pool in
/// benchmark context.
#[cfg(feature = "runtime-benchmarks")]
pub trait BenchmarkHelper<AccountId> {
  fn fund_account(who: &AccountId, amount: Balance) -> frame::deps::sp_runtime::DispatchResult;
  fn seed_pool(depositor: &AccountId, amount: Balance)
  -> frame::deps::sp_runtime::DispatchResult;
}

#[cfg(feature = "runtime-benchmarks")]
impl<AccountId> BenchmarkHelper<AccountId> for () {
  fn fund_account(_: &AccountId, _: Balance) -> frame::deps::sp_runtime::DispatchResult {
    Ok(())
  }
  fn seed_pool(_: &AccountId, _: Balance) -> frame::deps::sp_runtime::DispatchResult {
    Ok(())
  }
}

#[frame::pallet]
pub mod pallet {
  use super::{MAX_DELIVERABLE_LEN, PaymentCustody, WeightInfo};
  use frame::deps::{
    frame_support::traits::{
      fungibles::{Inspect as FungiblesInspect, Mutate as FungiblesMutate},
      tokens::Preservation,
    },
    sp_runtime::traits::{AccountIdConversion, Zero},
  };
  use frame::prelude::*;
  use polkadot_sdk::frame_support::PalletId;
  use primitives::{
    Balance, EscrowHandleId, JobId,
    ecosystem::params::{
      BPS_DENOMINATOR, SCORE_COMPLETION_BONUS, SCORE_DISPUTE_PENALTY, SCORE_MAX, SCORE_MIN,
      SCORE_START,
    },
  };

  /// Configuration trait for the job escrow pallet
  #[pallet::config]
  pub trait Config: frame_system::Config<RuntimeEvent: From<Event<Self>>> {
    /// The assets pallet holding the stable token used for agent stakes
    type Assets: FungiblesInspect<Self::AccountId, AssetId = u32, Balance = u128>
      + FungiblesMutate<Self::AccountId, AssetId = u32, Balance = u128>;

    /// Asset id of the stable token
    #[pallet::constant]
    type StableAsset: Get<u32>;

    /// The pallet ID deriving the caller/stake account
    #[pallet::constant]
    type PalletId: Get<PalletId>;

    /// Custody interface of the treasury escrowing job payments
    type Custody: PaymentCustody<Self::AccountId>;

    /// Account receiving platform fees on job completion
    #[pallet::constant]
    type PlatformAccount: Get<Self::AccountId>;

    /// Platform fee in basis points of the job payment
    #[pallet::constant]
    type PlatformFeeBps: Get<u32>;

    /// Minimum collateral an agent must stake to register
    #[pallet::constant]
    type MinAgentStake: Get<Balance>;

    /// Origin deciding disputes; the adjudication itself is external
    type ArbitrationOrigin: EnsureOrigin<Self::RuntimeOrigin>;

    /// Weight information for extrinsics
    type WeightInfo: WeightInfo;

    /// Benchmark helper for funding accounts in benchmark context
    #[cfg(feature = "runtime-benchmarks")]
    type BenchmarkHelper: crate::BenchmarkHelper<Self::AccountId>;
  }

  #[pallet::pallet]
  pub struct Pallet<T>(PhantomData<T>);

  /// Lifecycle state of a job. Completed and Refunded are terminal.
  #[derive(
    Clone, Copy, Encode, Decode, DecodeWithMemTracking, Eq, PartialEq, RuntimeDebug, TypeInfo,
    MaxEncodedLen,
  )]
  pub enum JobStatus {
    Open,
    Assigned,
    Completed,
    Disputed,
    Refunded,
  }

  /// Which side a dispute was resolved for.
  #[derive(
    Clone, Copy, Encode, Decode, DecodeWithMemTracking, Eq, PartialEq, RuntimeDebug, TypeInfo,
    MaxEncodedLen,
  )]
  pub enum DisputeWinner {
    /// The agent is paid as if the job completed normally
    Agent,
    /// The creator recovers the full escrow
    Creator,
  }

  /// A job and its escrow reference.
  ///
  /// Invariant: `escrow` is `Some` exactly while the status is live (Open,
  /// Assigned, Disputed) and `None` once terminal.
  #[derive(
    Clone, Encode, Decode, DecodeWithMemTracking, Eq, PartialEq, RuntimeDebug, TypeInfo,
    MaxEncodedLen,
  )]
  pub struct JobRecord<AccountId, BlockNumber> {
    pub creator: AccountId,
    pub agent: Option<AccountId>,
    pub payment: Balance,
    pub deadline: BlockNumber,
    pub status: JobStatus,
    pub escrow: Option<EscrowHandleId>,
    pub created_at: BlockNumber,
    pub deliverable: Option<BoundedVec<u8, ConstU32<MAX_DELIVERABLE_LEN>>>,
  }

  /// A registered agent's collateral and track record.
  ///
  /// Records are deactivated, never deleted, so reputation survives stake
  /// churn and re-registration cannot reset it.
  #[derive(
    Clone, Encode, Decode, DecodeWithMemTracking, Eq, PartialEq, RuntimeDebug, TypeInfo,
    MaxEncodedLen,
  )]
  pub struct AgentRecord<BlockNumber> {
    /// Collateral held by the pallet account, separate from job escrow
    pub stake: Balance,
    /// Reputation score on the 0..=1000 scale
    pub reputation: u32,
    /// Whether the agent can currently be assigned jobs
    pub active: bool,
    pub completed_jobs: u32,
    /// Disputes resolved against the agent
    pub failed_jobs: u32,
    pub registered_at: BlockNumber,
  }

  impl<BlockNumber> AgentRecord<BlockNumber> {
    /// Completed share of all settled engagements, in basis points.
    /// Zero until the first engagement settles.
    pub fn success_rate_bps(&self) -> u32 {
      let settled = self.completed_jobs.saturating_add(self.failed_jobs);
      if settled == 0 {
        return 0;
      }
      ((self.completed_jobs as u64 * BPS_DENOMINATOR as u64) / settled as u64) as u32
    }
  }

  /// Jobs by id
  #[pallet::storage]
  #[pallet::getter(fn job)]
  pub type Jobs<T: Config> = StorageMap<
    _,
    Blake2_128Concat,
    JobId,
    JobRecord<T::AccountId, BlockNumberFor<T>>,
    OptionQuery,
  >;

  /// Next job id, monotonic, never reused
  #[pallet::storage]
  #[pallet::getter(fn next_job_id)]
  pub type NextJobId<T: Config> = StorageValue<_, JobId, ValueQuery>;

  /// Registered agents by account
  #[pallet::storage]
  #[pallet::getter(fn agent)]
  pub type Agents<T: Config> =
    StorageMap<_, Blake2_128Concat, T::AccountId, AgentRecord<BlockNumberFor<T>>, OptionQuery>;

  #[pallet::event]
  #[pallet::generate_deposit(pub(super) fn deposit_event)]
  pub enum Event<T: Config> {
    /// An agent registered with collateral
    AgentRegistered { agent: T::AccountId, stake: Balance },
    /// An agent added collateral
    AgentStakeIncreased { agent: T::AccountId, amount: Balance, stake: Balance },
    /// An agent withdrew collateral
    AgentUnstaked { agent: T::AccountId, amount: Balance, stake: Balance },
    /// An agent dropped below the minimum stake and was deactivated
    AgentDeactivated { agent: T::AccountId },
    /// An agent rejoined the active set after topping up collateral
    AgentReactivated { agent: T::AccountId },
    /// An agent exited voluntarily, recovering all collateral
    AgentRetired { agent: T::AccountId, refunded: Balance },
    /// A job was created and its payment escrowed
    JobCreated {
      job_id: JobId,
      creator: T::AccountId,
      payment: Balance,
      deadline: BlockNumberFor<T>,
    },
    /// An agent was assigned to a job
    AgentAssigned { job_id: JobId, agent: T::AccountId },
    /// A job completed; escrow paid out minus the platform fee
    JobCompleted {
      job_id: JobId,
      agent: T::AccountId,
      payout: Balance,
      fee: Balance,
    },
    /// A job entered dispute; escrow stays locked
    JobDisputed { job_id: JobId, raised_by: T::AccountId },
    /// A dispute was decided by the arbitration origin
    DisputeResolved { job_id: JobId, winner: DisputeWinner },
    /// A job's escrow returned to the creator
    JobRefunded { job_id: JobId, creator: T::AccountId, amount: Balance },
  }

  #[pallet::error]
  pub enum Error<T> {
    /// Payment must be positive
    InvalidPayment,
    /// Deadline must lie in the future
    InvalidDeadline,
    /// No job exists under this id
    JobNotFound,
    /// Operation requires an Open job
    JobNotOpen,
    /// Operation requires an Assigned job
    JobNotAssigned,
    /// Operation requires a Disputed job
    JobNotDisputed,
    /// Only Open and Disputed jobs can be refunded
    JobNotRefundable,
    /// Only the job creator may perform this operation
    NotJobCreator,
    /// Only the creator or the assigned agent may perform this operation
    NotJobParticipant,
    /// The account has no agent record
    AgentNotRegistered,
    /// The account already has an agent record
    AgentAlreadyRegistered,
    /// The agent is not active
    AgentInactive,
    /// Stake below the required minimum
    InsufficientStake,
    /// A live job carries an escrow handle; its absence is a corrupt record
    EscrowMissing,
  }

  #[pallet::call]
  impl<T: Config> Pallet<T> {
    /// Register as an agent by staking collateral.
    #[pallet::call_index(0)]
    #[pallet::weight(T::WeightInfo::register_agent())]
    pub fn register_agent(origin: OriginFor<T>, stake: Balance) -> DispatchResult {
      let who = ensure_signed(origin)?;
      ensure!(
        !Agents::<T>::contains_key(&who),
        Error::<T>::AgentAlreadyRegistered
      );
      ensure!(stake >= T::MinAgentStake::get(), Error::<T>::InsufficientStake);
      Self::transfer_stable(&who, &Self::account_id(), stake)?;
      Agents::<T>::insert(
        &who,
        AgentRecord {
          stake,
          reputation: SCORE_START,
          active: true,
          completed_jobs: 0,
          failed_jobs: 0,
          registered_at: <frame_system::Pallet<T>>::block_number(),
        },
      );
      Self::deposit_event(Event::AgentRegistered { agent: who, stake });
      Ok(())
    }

    /// Add collateral to an existing agent record.
    ///
    /// Topping back up to the minimum reactivates a deactivated agent.
    #[pallet::call_index(1)]
    #[pallet::weight(T::WeightInfo::increase_stake())]
    pub fn increase_stake(origin: OriginFor<T>, amount: Balance) -> DispatchResult {
      let who = ensure_signed(origin)?;
      ensure!(!amount.is_zero(), Error::<T>::InsufficientStake);
      Agents::<T>::try_mutate(&who, |maybe| {
        let agent = maybe.as_mut().ok_or(Error::<T>::AgentNotRegistered)?;
        Self::transfer_stable(&who, &Self::account_id(), amount)?;
        agent.stake = agent.stake.saturating_add(amount);
        Self::deposit_event(Event::AgentStakeIncreased {
          agent: who.clone(),
          amount,
          stake: agent.stake,
        });
        if !agent.active && agent.stake >= T::MinAgentStake::get() {
          agent.active = true;
          Self::deposit_event(Event::AgentReactivated { agent: who.clone() });
        }
        Ok(())
      })
    }

    /// Withdraw collateral.
    ///
    /// Dropping below the minimum deactivates the agent; the record is kept.
    #[pallet::call_index(2)]
    #[pallet::weight(T::WeightInfo::unstake())]
    pub fn unstake(origin: OriginFor<T>, amount: Balance) -> DispatchResult {
      let who = ensure_signed(origin)?;
      ensure!(!amount.is_zero(), Error::<T>::InsufficientStake);
      Agents::<T>::try_mutate(&who, |maybe| {
        let agent = maybe.as_mut().ok_or(Error::<T>::AgentNotRegistered)?;
        ensure!(agent.stake >= amount, Error::<T>::InsufficientStake);
        Self::transfer_stable(&Self::account_id(), &who, amount)?;
        agent.stake = agent.stake.saturating_sub(amount);
        Self::deposit_event(Event::AgentUnstaked {
          agent: who.clone(),
          amount,
          stake: agent.stake,
        });
        if agent.active && agent.stake < T::MinAgentStake::get() {
          agent.active = false;
          Self::deposit_event(Event::AgentDeactivated { agent: who.clone() });
        }
        Ok(())
      })
    }

    /// Exit voluntarily, recovering all collateral. The record stays,
    /// deactivated, preserving the track record.
    #[pallet::call_index(3)]
    #[pallet::weight(T::WeightInfo::retire_agent())]
    pub fn retire_agent(origin: OriginFor<T>) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Agents::<T>::try_mutate(&who, |maybe| {
        let agent = maybe.as_mut().ok_or(Error::<T>::AgentNotRegistered)?;
        let refunded = agent.stake;
        Self::transfer_stable(&Self::account_id(), &who, refunded)?;
        agent.stake = 0;
        agent.active = false;
        Self::deposit_event(Event::AgentRetired { agent: who.clone(), refunded });
        Ok(())
      })
    }

    /// Create a job, locking its payment from the creator's idle
    /// contribution in the treasury.
    ///
    /// If the lock fails no job record is created.
    #[pallet::call_index(4)]
    #[pallet::weight(T::WeightInfo::create_job())]
    pub fn create_job(
      origin: OriginFor<T>,
      payment: Balance,
      deadline: BlockNumberFor<T>,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      ensure!(!payment.is_zero(), Error::<T>::InvalidPayment);
      let now = <frame_system::Pallet<T>>::block_number();
      ensure!(deadline > now, Error::<T>::InvalidDeadline);
      // The id is only consumed once the lock has succeeded: a refused lock
      // leaves no trace of the job.
      let job_id = NextJobId::<T>::get();
      let handle = T::Custody::lock(&Self::account_id(), &who, payment, job_id)?;
      NextJobId::<T>::put(job_id.saturating_add(1));
      Jobs::<T>::insert(
        job_id,
        JobRecord {
          creator: who.clone(),
          agent: None,
          payment,
          deadline,
          status: JobStatus::Open,
          escrow: Some(handle),
          created_at: now,
          deliverable: None,
        },
      );
      Self::deposit_event(Event::JobCreated {
        job_id,
        creator: who,
        payment,
        deadline,
      });
      Ok(())
    }

    /// Assign an active agent to an Open job (creator only).
    #[pallet::call_index(5)]
    #[pallet::weight(T::WeightInfo::assign_agent())]
    pub fn assign_agent(origin: OriginFor<T>, job_id: JobId, agent: T::AccountId) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Jobs::<T>::try_mutate(job_id, |maybe| {
        let job = maybe.as_mut().ok_or(Error::<T>::JobNotFound)?;
        ensure!(job.status == JobStatus::Open, Error::<T>::JobNotOpen);
        ensure!(who == job.creator, Error::<T>::NotJobCreator);
        let record = Agents::<T>::get(&agent).ok_or(Error::<T>::AgentNotRegistered)?;
        ensure!(record.active, Error::<T>::AgentInactive);
        job.agent = Some(agent.clone());
        job.status = JobStatus::Assigned;
        Self::deposit_event(Event::AgentAssigned { job_id, agent });
        Ok(())
      })
    }

    /// Accept the deliverable and settle an Assigned job (creator only).
    ///
    /// Releases the escrow exactly once: payment minus the platform fee to
    /// the agent, the fee to the platform account. A job that already
    /// settled fails the status check without moving funds again.
    #[pallet::call_index(6)]
    #[pallet::weight(T::WeightInfo::complete_job())]
    pub fn complete_job(
      origin: OriginFor<T>,
      job_id: JobId,
      deliverable: BoundedVec<u8, ConstU32<MAX_DELIVERABLE_LEN>>,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Jobs::<T>::try_mutate(job_id, |maybe| {
        let job = maybe.as_mut().ok_or(Error::<T>::JobNotFound)?;
        ensure!(job.status == JobStatus::Assigned, Error::<T>::JobNotAssigned);
        ensure!(who == job.creator, Error::<T>::NotJobCreator);
        let agent = job.agent.clone().ok_or(Error::<T>::EscrowMissing)?;
        let handle = job.escrow.take().ok_or(Error::<T>::EscrowMissing)?;
        let (payout, fee) = Self::split_fee(job.payment);
        T::Custody::release(
          &Self::account_id(),
          handle,
          &[(agent.clone(), payout), (T::PlatformAccount::get(), fee)],
        )?;
        job.status = JobStatus::Completed;
        job.deliverable = Some(deliverable);
        Self::note_completion(&agent);
        Self::deposit_event(Event::JobCompleted { job_id, agent, payout, fee });
        Ok(())
      })
    }

    /// Raise a dispute on an Assigned job (creator or assigned agent).
    ///
    /// The escrow stays locked until the arbitration origin resolves it.
    #[pallet::call_index(7)]
    #[pallet::weight(T::WeightInfo::dispute_job())]
    pub fn dispute_job(origin: OriginFor<T>, job_id: JobId) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Jobs::<T>::try_mutate(job_id, |maybe| {
        let job = maybe.as_mut().ok_or(Error::<T>::JobNotFound)?;
        ensure!(job.status == JobStatus::Assigned, Error::<T>::JobNotAssigned);
        let is_participant =
          who == job.creator || job.agent.as_ref() == Some(&who);
        ensure!(is_participant, Error::<T>::NotJobParticipant);
        job.status = JobStatus::Disputed;
        Self::deposit_event(Event::JobDisputed { job_id, raised_by: who });
        Ok(())
      })
    }

    /// Decide a Disputed job. The decision authority is external; this is
    /// only the settlement hook.
    ///
    /// An agent win settles like a completion (fee applied); a creator win
    /// refunds the full escrow and penalizes the agent.
    #[pallet::call_index(8)]
    #[pallet::weight(T::WeightInfo::resolve_dispute())]
    pub fn resolve_dispute(
      origin: OriginFor<T>,
      job_id: JobId,
      winner: DisputeWinner,
    ) -> DispatchResult {
      T::ArbitrationOrigin::ensure_origin(origin)?;
      Jobs::<T>::try_mutate(job_id, |maybe| {
        let job = maybe.as_mut().ok_or(Error::<T>::JobNotFound)?;
        ensure!(job.status == JobStatus::Disputed, Error::<T>::JobNotDisputed);
        let agent = job.agent.clone().ok_or(Error::<T>::EscrowMissing)?;
        let handle = job.escrow.take().ok_or(Error::<T>::EscrowMissing)?;
        match winner {
          DisputeWinner::Agent => {
            let (payout, fee) = Self::split_fee(job.payment);
            T::Custody::release(
              &Self::account_id(),
              handle,
              &[(agent.clone(), payout), (T::PlatformAccount::get(), fee)],
            )?;
            job.status = JobStatus::Completed;
            Self::note_completion(&agent);
          }
          DisputeWinner::Creator => {
            let amount =
              T::Custody::refund_to_idle(&Self::account_id(), handle, &job.creator)?;
            job.status = JobStatus::Refunded;
            Self::note_dispute_loss(&agent);
            Self::deposit_event(Event::JobRefunded {
              job_id,
              creator: job.creator.clone(),
              amount,
            });
          }
        }
        Self::deposit_event(Event::DisputeResolved { job_id, winner });
        Ok(())
      })
    }

    /// Refund a job's escrow to the creator.
    ///
    /// Open jobs are cancelled by their creator. Disputed jobs can only be
    /// refunded by the arbitration origin — a unilateral creator refund
    /// would bypass arbitration. Deadlines are not enforced automatically;
    /// a stale Open job exits through this call.
    #[pallet::call_index(9)]
    #[pallet::weight(T::WeightInfo::refund_job())]
    pub fn refund_job(origin: OriginFor<T>, job_id: JobId) -> DispatchResult {
      Jobs::<T>::try_mutate(job_id, |maybe| {
        let job = maybe.as_mut().ok_or(Error::<T>::JobNotFound)?;
        let disputed = match job.status {
          JobStatus::Open => {
            let who = ensure_signed(origin)?;
            ensure!(who == job.creator, Error::<T>::NotJobCreator);
            false
          }
          JobStatus::Disputed => {
            T::ArbitrationOrigin::ensure_origin(origin)?;
            true
          }
          _ => return Err(Error::<T>::JobNotRefundable.into()),
        };
        let handle = job.escrow.take().ok_or(Error::<T>::EscrowMissing)?;
        let amount =
          T::Custody::refund_to_idle(&Self::account_id(), handle, &job.creator)?;
        if disputed {
          if let Some(agent) = job.agent.clone() {
            Self::note_dispute_loss(&agent);
          }
        }
        job.status = JobStatus::Refunded;
        Self::deposit_event(Event::JobRefunded {
          job_id,
          creator: job.creator.clone(),
          amount,
        });
        Ok(())
      })
    }
  }

  impl<T: Config> Pallet<T> {
    /// The pallet account: authorized treasury caller and stake custodian.
    pub fn account_id() -> T::AccountId {
      T::PalletId::get().into_account_truncating()
    }

    /// Platform fee split for a payment: `(payout, fee)`.
    fn split_fee(payment: Balance) -> (Balance, Balance) {
      // Fee can never exceed the payment even with a misconfigured bps value.
      let fee = payment
        .saturating_mul(T::PlatformFeeBps::get() as u128)
        .checked_div(BPS_DENOMINATOR as u128)
        .unwrap_or(0)
        .min(payment);
      (payment.saturating_sub(fee), fee)
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

    fn note_completion(agent: &T::AccountId) {
      Agents::<T>::mutate(agent, |maybe| {
        if let Some(record) = maybe {
          record.completed_jobs = record.completed_jobs.saturating_add(1);
          record.reputation = record
            .reputation
            .saturating_add(SCORE_COMPLETION_BONUS)
            .min(SCORE_MAX);
        }
      });
    }

    fn note_dispute_loss(agent: &T::AccountId) {
      Agents::<T>::mutate(agent, |maybe| {
        if let Some(record) = maybe {
          record.failed_jobs = record.failed_jobs.saturating_add(1);
          record.reputation = record
            .reputation
            .saturating_sub(SCORE_DISPUTE_PENALTY)
            .max(SCORE_MIN);
        }
      });
    }
  }

  /// Genesis configuration — keeps the stake custody account alive with a
  /// provider reference.
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
