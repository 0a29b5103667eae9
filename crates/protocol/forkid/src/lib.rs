#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/forkline/forkline/issues/")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

mod hash;
pub use hash::ForkHash;

mod id;
pub use id::{ForkId, Head, gather_forks};

mod filter;
pub use filter::{ForkFilter, TIMESTAMP_THRESHOLD, ValidationError};
