#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod error;
pub use error::{ForkChoiceError, PolicyError};

mod traits;
pub use traits::{ChainHeaderReader, ReorgPolicy, TieBreaker};
#[cfg(test)]
pub(crate) use traits::{MockChainHeaderReader, MockTieBreaker};

mod tie;
pub use tie::RandomTieBreaker;

mod ecbp1100;
pub use ecbp1100::{Ecbp1100, polynomial_v};

mod reader;
pub use reader::StoreChainReader;

mod choice;
pub use choice::{ForkChoice, PreserveFn};

#[cfg(test)]
pub(crate) mod test_utils;
