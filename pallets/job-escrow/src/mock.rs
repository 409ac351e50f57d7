extern crate alloc;

use crate as pallet_job_escrow;
use polkadot_sdk::frame_support::{
  PalletId, construct_runtime, derive_impl,
  traits::{ConstU32, ConstU128, Get},
};
use polkadot_sdk::frame_system;
use polkadot_sdk::sp_runtime::{
  BuildStorage, DispatchError, DispatchResult,
  testing::H256,
  traits::{BlakeTwo256, IdentityLookup},
};
use primitives::{EscrowHandleId, JobId};

pub const STABLE_ASSET: u32 = 1;
/// Receives platform fees on job completion.
pub const PLATFORM: u64 = 777;
/// Would-be strategy controller; unused by escrow tests.
pub const STRATEGY_CONTROLLER: u64 = 900;

type Block = frame_system::mocking::MockBlock<Test>;

construct_runtime!(
  pub struct Test {
    System: frame_system,
    Balances: polkadot_sdk::pallet_balances,
    Assets: polkadot_sdk::pallet_assets,
    AuthorizationRegistry: pallet_authorization_registry,
    JobsTreasury: pallet_jobs_treasury,
    JobEscrow: pallet_job_escrow,
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

pub struct TreasuryPalletIdStub;
impl Get<PalletId> for TreasuryPalletIdStub {
  fn get() -> PalletId {
    PalletId(*primitives::pallet_ids::TREASURY_PALLET_ID)
  }
}

pub struct EscrowPalletIdStub;
impl Get<PalletId> for EscrowPalletIdStub {
  fn get() -> PalletId {
    PalletId(*primitives::pallet_ids::JOB_ESCROW_PALLET_ID)
  }
}

pub struct ControllerStub;
impl Get<u64> for ControllerStub {
  fn get() -> u64 {
    STRATEGY_CONTROLLER
  }
}

pub struct PlatformStub;
impl Get<u64> for PlatformStub {
  fn get() -> u64 {
    PLATFORM
  }
}

impl pallet_jobs_treasury::Config for Test {
  type Assets = Assets;
  type StableAsset = ConstU32<STABLE_ASSET>;
  type PalletId = TreasuryPalletIdStub;
  type AuthorizedCallers = AuthorizationRegistry;
  type StrategyController = ControllerStub;
  type Adapters = ();
  type WeightInfo = ();
  #[cfg(feature = "runtime-benchmarks")]
  type BenchmarkHelper = ();
}

// Runtime glue binding the escrow ledger to the real treasury pallet.
pub struct CustodyBridge;
impl pallet_job_escrow::PaymentCustody<u64> for CustodyBridge {
  fn lock(
    caller: &u64,
    funder: &u64,
    amount: u128,
    job_id: JobId,
  ) -> Result<EscrowHandleId, DispatchError> {
    JobsTreasury::lock_escrow(caller, funder, amount, job_id)
  }

  fn release(
    caller: &u64,
    handle: EscrowHandleId,
    payouts: &[(u64, u128)],
  ) -> DispatchResult {
    JobsTreasury::release_escrow(caller, handle, payouts)
  }

  fn refund_to_idle(
    caller: &u64,
    handle: EscrowHandleId,
    beneficiary: &u64,
  ) -> Result<u128, DispatchError> {
    JobsTreasury::refund_escrow_to_idle(caller, handle, beneficiary)
  }
}

impl pallet_job_escrow::Config for Test {
  type Assets = Assets;
  type StableAsset = ConstU32<STABLE_ASSET>;
  type PalletId = EscrowPalletIdStub;
  type Custody = CustodyBridge;
  type PlatformAccount = PlatformStub;
  type PlatformFeeBps = ConstU32<500>;
  type MinAgentStake = ConstU128<100>;
  type ArbitrationOrigin = frame_system::EnsureRoot<Self::AccountId>;
  type WeightInfo = ();
  #[cfg(feature = "runtime-benchmarks")]
  type BenchmarkHelper = BenchHelper;
}

#[cfg(feature = "runtime-benchmarks")]
pub struct BenchHelper;

#[cfg(feature = "runtime-benchmarks")]
impl pallet_job_escrow::BenchmarkHelper<u64> for BenchHelper {
  fn fund_account(who: &u64, amount: u128) -> polkadot_sdk::sp_runtime::DispatchResult {
    use polkadot_sdk::frame_support::traits::fungibles::Mutate;
    <Assets as Mutate<u64>>::mint_into(STABLE_ASSET, who, amount)?;
    Ok(())
  }

  fn seed_pool(depositor: &u64, amount: u128) -> polkadot_sdk::sp_runtime::DispatchResult {
    Self::fund_account(depositor, amount)?;
    JobsTreasury::deposit(RuntimeOrigin::signed(*depositor), amount)
  }
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
  // The escrow pallet account is the treasury's authorized caller.
  pallet_authorization_registry::GenesisConfig::<Test> {
    initial_callers: alloc::vec![JobEscrow::account_id()],
  }
  .assimilate_storage(&mut t)
  .unwrap();
  pallet_jobs_treasury::GenesisConfig::<Test>::default()
    .assimilate_storage(&mut t)
    .unwrap();
  pallet_job_escrow::GenesisConfig::<Test>::default()
    .assimilate_storage(&mut t)
    .unwrap();
  t.into()
}
