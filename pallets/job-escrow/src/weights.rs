#![cfg_attr(rustfmt, rustfmt_skip)]
#![allow(unused_parens)]
#![allow(unused_imports)]
#![allow(missing_docs)]

use polkadot_sdk::frame_support::{traits::Get, weights::Weight};
use core::marker::PhantomData;

pub trait WeightInfo {
	fn register_agent() -> Weight;
	fn increase_stake() -> Weight;
	fn unstake() -> Weight;
	fn retire_agent() -> Weight;
	fn create_job() -> Weight;
	fn assign_agent() -> Weight;
	fn complete_job() -> Weight;
	fn dispute_job() -> Weight;
	fn resolve_dispute() -> Weight;
	fn refund_job() -> Weight;
}

pub struct SubstrateWeight<T>(PhantomData<T>);
impl<T: polkadot_sdk::frame_system::Config> WeightInfo for SubstrateWeight<T> {
	fn register_agent() -> Weight {
		Weight::from_parts(45_000_000, 3500)
			.saturating_add(T::DbWeight::get().reads(3))
			.saturating_add(T::DbWeight::get().writes(3))
	}
	fn increase_stake() -> Weight {
		Weight::from_parts(40_000_000, 3500)
			.saturating_add(T::DbWeight::get().reads(3))
			.saturating_add(T::DbWeight::get().writes(3))
	}
	fn unstake() -> Weight {
		Weight::from_parts(40_000_000, 3500)
			.saturating_add(T::DbWeight::get().reads(3))
			.saturating_add(T::DbWeight::get().writes(3))
	}
	fn retire_agent() -> Weight {
		Weight::from_parts(40_000_000, 3500)
			.saturating_add(T::DbWeight::get().reads(3))
			.saturating_add(T::DbWeight::get().writes(3))
	}
	fn create_job() -> Weight {
		Weight::from_parts(70_000_000, 5000)
			.saturating_add(T::DbWeight::get().reads(7))
			.saturating_add(T::DbWeight::get().writes(7))
	}
	fn assign_agent() -> Weight {
		Weight::from_parts(25_000_000, 3000)
			.saturating_add(T::DbWeight::get().reads(2))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn complete_job() -> Weight {
		Weight::from_parts(90_000_000, 6000)
			.saturating_add(T::DbWeight::get().reads(8))
			.saturating_add(T::DbWeight::get().writes(8))
	}
	fn dispute_job() -> Weight {
		Weight::from_parts(25_000_000, 3000)
			.saturating_add(T::DbWeight::get().reads(1))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn resolve_dispute() -> Weight {
		Weight::from_parts(90_000_000, 6000)
			.saturating_add(T::DbWeight::get().reads(8))
			.saturating_add(T::DbWeight::get().writes(8))
	}
	fn refund_job() -> Weight {
		Weight::from_parts(70_000_000, 5000)
			.saturating_add(T::DbWeight::get().reads(6))
			.saturating_add(T::DbWeight::get().writes(6))
	}
}

impl WeightInfo for () {
	fn register_agent() -> Weight {
		Weight::from_parts(45_000_000, 3500)
	}
	fn increase_stake() -> Weight {
		Weight::from_parts(40_000_000, 3500)
	}
	fn unstake() -> Weight {
		Weight::from_parts(40_000_000, 3500)
	}
	fn retire_agent() -> Weight {
		Weight::from_parts(40_000_000, 3500)
	}
	fn create_job() -> Weight {
		Weight::from_parts(70_000_000, 5000)
	}
	fn assign_agent() -> Weight {
		Weight::from_parts(25_000_000, 3000)
	}
	fn complete_job() -> Weight {
		Weight::from_parts(90_000_000, 6000)
	}
	fn dispute_job() -> Weight {
		Weight::from_parts(25_000_000, 3000)
	}
	fn resolve_dispute() -> Weight {
		Weight::from_parts(90_000_000, 6000)
	}
	fn refund_job() -> Weight {
		Weight::from_parts(70_000_000, 5000)
	}
}
