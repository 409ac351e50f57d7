//! Resolution-only stub for the yanked `core2` crate.
//!
//! `core2` is pulled in transitively by `multihash`, which is only reachable
//! through `polkadot-sdk`'s `node` feature (via `polkadot-omni-node-lib`).
//! These pallets never enable that feature, so this crate is resolved but
//! never compiled. It exists solely so Cargo can pick a version for the
//! (all-yanked) `core2` requirement.
#![no_std]
