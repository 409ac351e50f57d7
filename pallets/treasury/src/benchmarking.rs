use crate::*;
use polkadot_sdk::frame_benchmarking::v2::*;
use polkadot_sdk::frame_system::RawOrigin;

#[benchmarks]
mod benches {
  use super::*;

  #[benchmark]
  fn deposit() {
    let who: T::AccountId = whitelisted_caller();
    T::BenchmarkHelper::create_stable_asset().expect("stable asset setup failed");
    T::BenchmarkHelper::fund_account(&who, 1_000_000).expect("funding failed");

    #[extrinsic_call]
    deposit(RawOrigin::Signed(who.clone()), 500_000);

    assert_eq!(Pallet::<T>::depositor_balance(&who), 500_000);
  }

  #[benchmark]
  fn withdraw() {
    let who: T::AccountId = whitelisted_caller();
    T::BenchmarkHelper::create_stable_asset().expect("stable asset setup failed");
    T::BenchmarkHelper::fund_account(&who, 1_000_000).expect("funding failed");
    Pallet::<T>::deposit(RawOrigin::Signed(who.clone()).into(), 500_000)
      .expect("pre-deposit failed");

    #[extrinsic_call]
    withdraw(RawOrigin::Signed(who.clone()), 200_000);

    assert_eq!(Pallet::<T>::depositor_balance(&who), 300_000);
  }

  #[cfg(test)]
  use crate::mock::{Test, new_test_ext};
  #[cfg(test)]
  impl_benchmark_test_suite!(Pallet, new_test_ext(), Test);
}
