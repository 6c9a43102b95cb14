//! The **probe abstraction** a sweep depends on.
//!
//! A [`ProbeClient`] sends one echo to one host and reports whether it answered. The
//! sweep only talks to this trait; [`icmp::IcmpProber`] is the raw-socket
//! implementation used by the binary, and tests plug in scripted clients.
//!
//! Ordinary silence from a host is a [`Reachability::Unreachable`] outcome. Only faults
//! of the transport itself surface as a [`ProbeError`].

use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use sweepr_common::error::SweepError;
use sweepr_common::probe::Reachability;
use thiserror::Error;

pub mod icmp;
pub mod resolver;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("failed to open ICMP socket: {0}")]
    Open(#[source] std::io::Error),

    #[error("failed to send echo to {addr}: {source}")]
    Send {
        addr: IpAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to receive echo reply: {0}")]
    Receive(#[source] std::io::Error),

    #[error("probe worker stopped: {0}")]
    Worker(String),
}

impl From<ProbeError> for SweepError {
    fn from(e: ProbeError) -> Self {
        SweepError::Transport(e.to_string())
    }
}

#[async_trait]
pub trait ProbeClient: Send + Sync {
    /// Sends a single echo to `addr` and waits at most `timeout` for its reply.
    async fn probe(&self, addr: IpAddr, timeout: Duration) -> Result<Reachability, ProbeError>;
}
