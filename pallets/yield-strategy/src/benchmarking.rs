use crate::*;
use polkadot_sdk::frame_benchmarking::v2::*;
use polkadot_sdk::frame_support::BoundedVec;
use polkadot_sdk::frame_system;
use polkadot_sdk::frame_system::RawOrigin;
use primitives::YieldProtocol;

#[benchmarks]
mod benches {
  use super::*;

  #[benchmark]
  fn set_policy() {
    // Worst case: the history is full and the oldest entry is evicted.
    let record = PolicyRecord {
      policy: primitives::AllocationPolicy::default(),
      replaced_at: frame_system::Pallet::<T>::block_number(),
    };
    let mut history: BoundedVec<_, T::MaxPolicyHistory> = BoundedVec::new();
    while history.try_push(record).is_ok() {}
    PolicyHistory::<T>::put(history);

    #[extrinsic_call]
    set_policy(RawOrigin::Root, 4_000, 3_000, 2_000, 1_000);

    assert_eq!(Pallet::<T>::current_policy().aave_bps, 4_000);
  }

  #[benchmark]
  fn rebalance() {
    // With no managed funds every step is a no-op; adapter-bound weight is
    // charged on the treasury side.
    #[extrinsic_call]
    rebalance(RawOrigin::Root);
  }

  #[benchmark]
  fn harvest_yield() {
    let who: T::AccountId = whitelisted_caller();

    #[extrinsic_call]
    harvest_yield(RawOrigin::Signed(who), YieldProtocol::Aave);
  }

  #[cfg(test)]
  use crate::mock::{Test, new_test_ext};
  #[cfg(test)]
  impl_benchmark_test_suite!(Pallet, new_test_ext(), Test);
}
