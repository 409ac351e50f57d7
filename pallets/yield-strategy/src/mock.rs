extern crate alloc;

use crate as pallet_yield_strategy;
use polkadot_sdk::frame_support::{
  PalletId, construct_runtime, derive_impl,
  traits::{
    ConstU32, ConstU128, Get,
    fungibles::Mutate,
    tokens::{Fortitude, Precision, Preservation},
  },
};
use polkadot_sdk::frame_system;
use polkadot_sdk::sp_runtime::{
  BuildStorage, DispatchError, DispatchResult,
  testing::H256,
  traits::{BlakeTwo256, IdentityLookup},
};
use primitives::YieldProtocol;
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

// State for mock protocol adapters
thread_local! {
    pub static ADAPTER_POSITIONS: RefCell<BTreeMap<YieldProtocol, u128>> = const { RefCell::new(BTreeMap::new()) };
    pub static FAILING_ADAPTERS: RefCell<BTreeSet<YieldProtocol>> = const { RefCell::new(BTreeSet::new()) };
}

pub const STABLE_ASSET: u32 = 1;

pub fn set_adapter_value(protocol: YieldProtocol, value: u128) {
  ADAPTER_POSITIONS.with(|p| p.borrow_mut().insert(protocol, value));
}

pub fn adapter_value(protocol: YieldProtocol) -> u128 {
  ADAPTER_POSITIONS.with(|p| p.borrow().get(&protocol).copied().unwrap_or(0))
}

pub fn set_adapter_failing(protocol: YieldProtocol, failing: bool) {
  FAILING_ADAPTERS.with(|f| {
    if failing {
      f.borrow_mut().insert(protocol);
    } else {
      f.borrow_mut().remove(&protocol);
    }
  });
}

type Block = frame_system::mocking::MockBlock<Test>;

construct_runtime!(
  pub struct Test {
    System: frame_system,
    Balances: polkadot_sdk::pallet_balances,
    Assets: polkadot_sdk::pallet_assets,
    AuthorizationRegistry: pallet_authorization_registry,
    JobsTreasury: pallet_jobs_treasury,
    YieldStrategy: pallet_yield_strategy,
  }
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Test {
  type Block = Block;
  type AccountId = u64;
  type Lookup = IdentityLookup<Self::AccountId>;
  type Hash = H256;
  type Hashing = BlakeTwo256;
  type AccountData = polkadot_sdk::pallet_balances::AccountData<u128>;
}

impl polkadot_sdk::pallet_balances::Config for Test {
  type MaxLocks = ();
  type MaxReserves = ();
  type ReserveIdentifier = [u8; 8];
  type Balance = u128;
  type DustRemoval = ();
  type RuntimeEvent = RuntimeEvent;
  type ExistentialDeposit = ConstU128<1>;
  type AccountStore = System;
  type WeightInfo = ();
  type FreezeIdentifier = ();
  type MaxFreezes = ();
  type RuntimeHoldReason = ();
  type RuntimeFreezeReason = ();
  type DoneSlashHandler = ();
}

impl polkadot_sdk::pallet_assets::Config for Test {
  type RuntimeEvent = RuntimeEvent;
  type Balance = u128;
  type AssetId = u32;
  type AssetIdParameter = u32;
  type Currency = Balances;
  type CreateOrigin = polkadot_sdk::frame_support::traits::AsEnsureOriginWithArg<
    frame_system::EnsureSigned<Self::AccountId>,
  >;
  type ForceOrigin = frame_system::EnsureRoot<Self::AccountId>;
  type AssetDeposit = ConstU128<1>;
  type AssetAccountDeposit = ConstU128<1>;
  type MetadataDepositBase = ConstU128<1>;
  type MetadataDepositPerByte = ConstU128<1>;
  type ApprovalDeposit = ConstU128<1>;
  type StringLimit = ConstU32<50>;
  type Freezer = ();
  type Extra = ();
  type ReserveData = ();
  type CallbackHandle = ();
  type WeightInfo = ();
  type RemoveItemsLimit = ConstU32<5>;
  type Holder = ();
  #[cfg(feature = "runtime-benchmarks")]
  type BenchmarkHelper = ();
}

impl pallet_authorization_registry::Config for Test {
  type AdminOrigin = frame_system::EnsureRoot<Self::AccountId>;
  type MaxCallers = ConstU32<8>;
  type WeightInfo = ();
}

// Mock protocol adapters mirroring real venues: tokens leave custody on
// deploy, return on withdraw, and the venue-side value can drift.
pub struct MockAdapters;
impl pallet_jobs_treasury::ProtocolAdapter<u64> for MockAdapters {
  fn deposit(who: &u64, protocol: YieldProtocol, amount: u128) -> DispatchResult {
    if FAILING_ADAPTERS.with(|f| f.borrow().contains(&protocol)) {
      return Err(DispatchError::Other("adapter offline"));
    }
    <Assets as Mutate<u64>>::burn_from(
      STABLE_ASSET,
      who,
      amount,
      Preservation::Expendable,
      Precision::Exact,
      Fortitude::Polite,
    )?;
    ADAPTER_POSITIONS.with(|p| {
      let mut positions = p.borrow_mut();
      let value = positions.get(&protocol).copied().unwrap_or(0);
      positions.insert(protocol, value.saturating_add(amount));
    });
    Ok(())
  }

  fn withdraw(who: &u64, protocol: YieldProtocol, amount: u128) -> DispatchResult {
    if FAILING_ADAPTERS.with(|f| f.borrow().contains(&protocol)) {
      return Err(DispatchError::Other("adapter offline"));
    }
    let available = adapter_value(protocol);
    if available < amount {
      return Err(DispatchError::Other("adapter position too small"));
    }
    <Assets as Mutate<u64>>::mint_into(STABLE_ASSET, who, amount)?;
    ADAPTER_POSITIONS.with(|p| {
      p.borrow_mut().insert(protocol, available.saturating_sub(amount));
    });
    Ok(())
  }

  fn current_value(protocol: YieldProtocol) -> u128 {
    adapter_value(protocol)
  }
}

pub struct TreasuryPalletIdStub;
impl Get<PalletId> for TreasuryPalletIdStub {
  fn get() -> PalletId {
    PalletId(*primitives::pallet_ids::TREASURY_PALLET_ID)
  }
}

pub struct StrategyPalletIdStub;
impl Get<PalletId> for StrategyPalletIdStub {
  fn get() -> PalletId {
    PalletId(*primitives::pallet_ids::YIELD_STRATEGY_PALLET_ID)
  }
}

/// The treasury authorizes the strategy engine's own account as controller.
pub struct StrategyControllerAccount;
impl Get<u64> for StrategyControllerAccount {
  fn get() -> u64 {
    YieldStrategy::account_id()
  }
}

impl pallet_jobs_treasury::Config for Test {
  type Assets = Assets;
  type StableAsset = ConstU32<STABLE_ASSET>;
  type PalletId = TreasuryPalletIdStub;
  type AuthorizedCallers = AuthorizationRegistry;
  type StrategyController = StrategyControllerAccount;
  type Adapters = MockAdapters;
  type WeightInfo = ();
  #[cfg(feature = "runtime-benchmarks")]
  type BenchmarkHelper = ();
}

// Runtime glue binding the engine to the real treasury pallet.
pub struct TreasuryBridge;
impl pallet_yield_strategy::TreasuryCustody<u64> for TreasuryBridge {
  fn idle_balance() -> u128 {
    JobsTreasury::idle_balance()
  }

  fn deployed_balance(protocol: YieldProtocol) -> u128 {
    JobsTreasury::deployed_balance(protocol)
  }

  fn deploy(caller: &u64, protocol: YieldProtocol, amount: u128) -> DispatchResult {
    JobsTreasury::deploy_to(caller, protocol, amount)
  }

  fn recall(caller: &u64, protocol: YieldProtocol, amount: u128) -> DispatchResult {
    JobsTreasury::withdraw_from(caller, protocol, amount)
  }

  fn harvest(caller: &u64, protocol: YieldProtocol) -> Result<(u128, u128), DispatchError> {
    JobsTreasury::harvest_from(caller, protocol)
  }
}

impl pallet_yield_strategy::Config for Test {
  type Treasury = TreasuryBridge;
  type AdminOrigin = frame_system::EnsureRoot<Self::AccountId>;
  type PalletId = StrategyPalletIdStub;
  type MaxPolicyHistory = ConstU32<16>;
  type WeightInfo = ();
}

pub fn new_test_ext() -> polkadot_sdk::sp_io::TestExternalities {
  let mut t = frame_system::GenesisConfig::<Test>::default()
    .build_storage()
    .unwrap();
  polkadot_sdk::pallet_assets::GenesisConfig::<Test> {
    assets: alloc::vec![(STABLE_ASSET, 1, true, 1)],
    metadata: alloc::vec![],
    accounts: alloc::vec![],
    reserves: alloc::vec![],
    next_asset_id: None,
  }
  .assimilate_storage(&mut t)
  .unwrap();
  pallet_authorization_registry::GenesisConfig::<Test>::default()
    .assimilate_storage(&mut t)
    .unwrap();
  pallet_jobs_treasury::GenesisConfig::<Test>::default()
    .assimilate_storage(&mut t)
    .unwrap();
  ADAPTER_POSITIONS.with(|p| p.borrow_mut().clear());
  FAILING_ADAPTERS.with(|f| f.borrow_mut().clear());
  t.into()
}
