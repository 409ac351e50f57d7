//! Authorization Registry Pallet
//!
//! Owner-managed membership set of accounts permitted to request escrow locks
//! and releases on the treasury. Absence from the set is the default: deny.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use pallet::*;

#[cfg(test)]
mod mock;

#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

pub mod weights;
pub use weights::WeightInfo;

#[frame::pallet]
pub mod pallet {
  use super::WeightInfo;
  use alloc::vec::Vec;
  use frame::prelude::*;
  use polkadot_sdk::frame_support::traits::Contains;

  /// Configuration trait for the authorization registry pallet
  #[pallet::config]
  pub trait Config: frame_system::Config<RuntimeEvent: From<Event<Self>>> {
    /// Origin that can add and revoke authorized callers
    type AdminOrigin: EnsureOrigin<Self::RuntimeOrigin>;

    /// Maximum number of authorized callers
    #[pallet::constant]
    type MaxCallers: Get<u32>;

    /// Weight information for extrinsics
    type WeightInfo: WeightInfo;
  }

  #[pallet::pallet]
  pub struct Pallet<T>(PhantomData<T>);

  /// Membership set of callers permitted to request treasury locks/releases
  #[pallet::storage]
  #[pallet::getter(fn authorized_callers)]
  pub type AuthorizedCallers<T: Config> =
    StorageValue<_, BoundedVec<T::AccountId, T::MaxCallers>, ValueQuery>;

  #[pallet::event]
  #[pallet::generate_deposit(pub(super) fn deposit_event)]
  pub enum Event<T: Config> {
    /// A caller was added to the authorized set
    CallerAuthorized { caller: T::AccountId },
    /// A caller was removed from the authorized set
    CallerRevoked { caller: T::AccountId },
  }

  #[pallet::error]
  pub enum Error<T> {
    /// The authorized caller set is full
    TooManyCallers,
  }

  #[pallet::call]
  impl<T: Config> Pallet<T> {
    /// Add a caller to the authorized set (owner only).
    ///
    /// Adding a caller that is already a member is a no-op.
    #[pallet::call_index(0)]
    #[pallet::weight(T::WeightInfo::add_authorized())]
    pub fn add_authorized(origin: OriginFor<T>, caller: T::AccountId) -> DispatchResult {
      T::AdminOrigin::ensure_origin(origin)?;
      let added = AuthorizedCallers::<T>::try_mutate(|callers| {
        if callers.contains(&caller) {
          return Ok(false);
        }
        callers
          .try_push(caller.clone())
          .map_err(|_| Error::<T>::TooManyCallers)?;
        Ok::<bool, Error<T>>(true)
      })?;
      if added {
        Self::deposit_event(Event::CallerAuthorized { caller });
      }
      Ok(())
    }

    /// Remove a caller from the authorized set (owner only).
    ///
    /// Revoking a caller that is not a member is a no-op.
    #[pallet::call_index(1)]
    #[pallet::weight(T::WeightInfo::revoke_authorized())]
    pub fn revoke_authorized(origin: OriginFor<T>, caller: T::AccountId) -> DispatchResult {
      T::AdminOrigin::ensure_origin(origin)?;
      let removed = AuthorizedCallers::<T>::mutate(|callers| {
        let before = callers.len();
        callers.retain(|c| c != &caller);
        callers.len() != before
      });
      if removed {
        Self::deposit_event(Event::CallerRevoked { caller });
      }
      Ok(())
    }
  }

  impl<T: Config> Pallet<T> {
    /// Whether an account is permitted to request treasury locks/releases.
    pub fn is_authorized(who: &T::AccountId) -> bool {
      AuthorizedCallers::<T>::get().contains(who)
    }
  }

  /// Capability-set view consumed by the treasury: membership decides, the
  /// treasury never learns what kind of component a caller is.
  impl<T: Config> Contains<T::AccountId> for Pallet<T> {
    fn contains(who: &T::AccountId) -> bool {
      Self::is_authorized(who)
    }
  }

  #[pallet::genesis_config]
  #[derive(frame::prelude::DefaultNoBound)]
  pub struct GenesisConfig<T: Config> {
    /// Callers authorized from genesis
    pub initial_callers: Vec<T::AccountId>,
  }

  #[pallet::genesis_build]
  impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
    fn build(&self) {
      let callers: BoundedVec<T::AccountId, T::MaxCallers> = self
        .initial_callers
        .clone()
        .try_into()
        .expect("genesis caller list exceeds MaxCallers");
      AuthorizedCallers::<T>::put(callers);
    }
  }
}
