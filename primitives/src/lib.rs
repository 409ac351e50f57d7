#![cfg_attr(not(feature = "std"), no_std)]

pub mod allocation;
pub mod ecosystem;
pub mod protocols;

pub use allocation::*;
pub use ecosystem::*;
pub use protocols::*;
