use crate::*;
use polkadot_sdk::frame_benchmarking::v2::*;
use polkadot_sdk::frame_system::RawOrigin;

#[benchmarks]
mod benches {
  use super::*;

  #[benchmark]
  fn add_authorized() {
    let caller: T::AccountId = account("caller", 0, 0);

    #[extrinsic_call]
    add_authorized(RawOrigin::Root, caller.clone());

    assert!(Pallet::<T>::is_authorized(&caller));
  }

  #[benchmark]
  fn revoke_authorized() {
    let caller: T::AccountId = account("caller", 0, 0);
    Pallet::<T>::add_authorized(RawOrigin::Root.into(), caller.clone())
      .expect("pre-authorization failed");

    #[extrinsic_call]
    revoke_authorized(RawOrigin::Root, caller.clone());

    assert!(!Pallet::<T>::is_authorized(&caller));
  }

  #[cfg(test)]
  use crate::mock::{Test, new_test_ext};
  #[cfg(test)]
  impl_benchmark_test_suite!(Pallet, new_test_ext(), Test);
}
