use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

/// This enum serves as the single source of truth for yield protocol identity
/// across all pallets, enabling type-safe interactions between the treasury,
/// the yield strategy engine and the protocol adapters.
///
/// The reserve bucket of an allocation policy is deliberately absent: reserve
/// funds are never deployed, they are the residual idle amount by construction.
#[derive(
  Clone,
  Copy,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Encode,
  Eq,
  MaxEncodedLen,
  Ord,
  PartialEq,
  PartialOrd,
  TypeInfo,
  Serialize,
  Deserialize,
)]
pub enum YieldProtocol {
  /// Lending pool adapter (Aave-style)
  Aave,
  /// Lending market adapter (Compound-style)
  Compound,
  /// AMM liquidity pool adapter (Uniswap-style)
  LpPool,
}

impl YieldProtocol {
  /// Fixed order in which rebalance deltas are applied.
  ///
  /// Keeping this order stable makes a rebalance replayable and its effect
  /// independent of any caller-supplied ordering.
  pub const DEPLOY_ORDER: [YieldProtocol; 3] =
    [YieldProtocol::Aave, YieldProtocol::Compound, YieldProtocol::LpPool];
}
