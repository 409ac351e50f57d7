use crate::*;
use frame::prelude::BlockNumberFor;
use polkadot_sdk::frame_benchmarking::v2::*;
use polkadot_sdk::frame_support::BoundedVec;
use polkadot_sdk::frame_system;
use polkadot_sdk::frame_system::RawOrigin;

fn prepare_agent<T: Config>(index: u32) -> T::AccountId {
  let agent: T::AccountId = account("agent", index, 0);
  let stake = T::MinAgentStake::get();
  T::BenchmarkHelper::fund_account(&agent, stake).expect("agent funding failed");
  Pallet::<T>::register_agent(RawOrigin::Signed(agent.clone()).into(), stake)
    .expect("agent registration failed");
  agent
}

fn prepare_creator<T: Config>() -> T::AccountId {
  let creator: T::AccountId = whitelisted_caller();
  T::BenchmarkHelper::seed_pool(&creator, 1_000_000).expect("pool seeding failed");
  creator
}

fn deadline<T: Config>() -> BlockNumberFor<T> {
  frame_system::Pallet::<T>::block_number() + 1_000u32.into()
}

#[benchmarks]
mod benches {
  use super::*;

  #[benchmark]
  fn register_agent() {
    let agent: T::AccountId = account("agent", 0, 0);
    let stake = T::MinAgentStake::get();
    T::BenchmarkHelper::fund_account(&agent, stake).expect("agent funding failed");

    #[extrinsic_call]
    register_agent(RawOrigin::Signed(agent.clone()), stake);

    assert!(Pallet::<T>::agent(&agent).is_some());
  }

  #[benchmark]
  fn increase_stake() {
    let agent = prepare_agent::<T>(0);
    T::BenchmarkHelper::fund_account(&agent, 1_000).expect("agent funding failed");

    #[extrinsic_call]
    increase_stake(RawOrigin::Signed(agent), 1_000);
  }

  #[benchmark]
  fn unstake() {
    let agent = prepare_agent::<T>(0);

    // Worst case: the withdrawal also deactivates the agent.
    #[extrinsic_call]
    unstake(RawOrigin::Signed(agent.clone()), 1);

    assert!(!Pallet::<T>::agent(&agent).unwrap().active);
  }

  #[benchmark]
  fn retire_agent() {
    let agent = prepare_agent::<T>(0);

    #[extrinsic_call]
    retire_agent(RawOrigin::Signed(agent.clone()));

    assert_eq!(Pallet::<T>::agent(&agent).unwrap().stake, 0);
  }

  #[benchmark]
  fn create_job() {
    let creator = prepare_creator::<T>();
    let deadline = deadline::<T>();

    #[extrinsic_call]
    create_job(RawOrigin::Signed(creator), 100_000, deadline);

    assert!(Pallet::<T>::job(0).is_some());
  }

  #[benchmark]
  fn assign_agent() {
    let creator = prepare_creator::<T>();
    let agent = prepare_agent::<T>(0);
    Pallet::<T>::create_job(RawOrigin::Signed(creator.clone()).into(), 100_000, deadline::<T>())
      .expect("job creation failed");

    #[extrinsic_call]
    assign_agent(RawOrigin::Signed(creator), 0, agent);
  }

  #[benchmark]
  fn complete_job() {
    let creator = prepare_creator::<T>();
    let agent = prepare_agent::<T>(0);
    Pallet::<T>::create_job(RawOrigin::Signed(creator.clone()).into(), 100_000, deadline::<T>())
      .expect("job creation failed");
    Pallet::<T>::assign_agent(RawOrigin::Signed(creator.clone()).into(), 0, agent)
      .expect("assignment failed");
    let deliverable = BoundedVec::truncate_from(alloc::vec![0u8; MAX_DELIVERABLE_LEN as usize]);

    #[extrinsic_call]
    complete_job(RawOrigin::Signed(creator), 0, deliverable);
  }

  #[benchmark]
  fn dispute_job() {
    let creator = prepare_creator::<T>();
    let agent = prepare_agent::<T>(0);
    Pallet::<T>::create_job(RawOrigin::Signed(creator.clone()).into(), 100_000, deadline::<T>())
      .expect("job creation failed");
    Pallet::<T>::assign_agent(RawOrigin::Signed(creator.clone()).into(), 0, agent)
      .expect("assignment failed");

    #[extrinsic_call]
    dispute_job(RawOrigin::Signed(creator), 0);
  }

  #[benchmark]
  fn resolve_dispute() {
    let creator = prepare_creator::<T>();
    let agent = prepare_agent::<T>(0);
    Pallet::<T>::create_job(RawOrigin::Signed(creator.clone()).into(), 100_000, deadline::<T>())
      .expect("job creation failed");
    Pallet::<T>::assign_agent(RawOrigin::Signed(creator.clone()).into(), 0, agent)
      .expect("assignment failed");
    Pallet::<T>::dispute_job(RawOrigin::Signed(creator).into(), 0)
      .expect("dispute failed");

    #[extrinsic_call]
    resolve_dispute(RawOrigin::Root, 0, DisputeWinner::Creator);
  }

  #[benchmark]
  fn refund_job() {
    let creator = prepare_creator::<T>();
    Pallet::<T>::create_job(RawOrigin::Signed(creator.clone()).into(), 100_000, deadline::<T>())
      .expect("job creation failed");

    #[extrinsic_call]
    refund_job(RawOrigin::Signed(creator), 0);
  }

  #[cfg(test)]
  use crate::mock::{Test, new_test_ext};
  #[cfg(test)]
  impl_benchmark_test_suite!(Pallet, new_test_ext(), Test);
}
