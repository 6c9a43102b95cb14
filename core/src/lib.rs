//! Effectful half of `sweepr`: the ICMP transport, hostname lookup, target resolution,
//! the privilege check and the sweep itself.

pub mod network;
pub mod scanner;
pub mod sweep;
pub mod system;
