use crate as pallet_authorization_registry;
use polkadot_sdk::frame_support::{construct_runtime, derive_impl, traits::ConstU32};
use polkadot_sdk::frame_system;
use polkadot_sdk::sp_runtime::{
  BuildStorage,
  testing::H256,
  traits::{BlakeTwo256, IdentityLookup},
};

type Block = frame_system::mocking::MockBlock<Test>;

construct_runtime!(
  pub struct Test {
    System: frame_system,
    AuthorizationRegistry: pallet_authorization_registry,
  }
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Test {
  type Block = Block;
  type AccountId = u64;
  type Lookup = IdentityLookup<Self::AccountId>;
  type Hash = H256;
  type Hashing = BlakeTwo256;
}

impl pallet_authorization_registry::Config for Test {
  type AdminOrigin = frame_system::EnsureRoot<Self::AccountId>;
  type MaxCallers = ConstU32<4>;
  type WeightInfo = ();
}

pub fn new_test_ext() -> polkadot_sdk::sp_io::TestExternalities {
  let mut t = frame_system::GenesisConfig::<Test>::default()
    .build_storage()
    .unwrap();
  pallet_authorization_registry::GenesisConfig::<Test> {
    initial_callers: vec![1],
  }
  .assimilate_storage(&mut t)
  .unwrap();
  t.into()
}
