//! An **ICMP echo** prober over raw sockets.
//!
//! One socket per address family is opened on first use and held for the life of the
//! prober. Each probe sends a single echo request and blocks a worker thread until the
//! matching reply arrives or the timeout elapses.

use std::io;
use std::net::IpAddr;
use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use sweepr_common::probe::Reachability;
use tracing::debug;

use crate::network::icmp::EchoId;
use crate::network::transport::{TransportHandle, TransportType};

use super::{ProbeClient, ProbeError};

type ChannelSlot = Arc<Mutex<Option<TransportHandle>>>;

pub struct IcmpProber {
    v4: ChannelSlot,
    v6: ChannelSlot,
    identifier: u16,
    sequence: AtomicU16,
}

impl Default for IcmpProber {
    fn default() -> Self {
        Self::new()
    }
}

impl IcmpProber {
    pub fn new() -> Self {
        Self {
            v4: Arc::new(Mutex::new(None)),
            v6: Arc::new(Mutex::new(None)),
            identifier: rand::random(),
            sequence: AtomicU16::new(0),
        }
    }

    fn slot(&self, addr: &IpAddr) -> ChannelSlot {
        match addr {
            IpAddr::V4(_) => self.v4.clone(),
            IpAddr::V6(_) => self.v6.clone(),
        }
    }

    fn next_echo_id(&self) -> EchoId {
        EchoId {
            identifier: self.identifier,
            sequence: self.sequence.fetch_add(1, Ordering::Relaxed),
        }
    }
}

#[async_trait]
impl ProbeClient for IcmpProber {
    async fn probe(&self, addr: IpAddr, timeout: Duration) -> Result<Reachability, ProbeError> {
        let slot: ChannelSlot = self.slot(&addr);
        let id: EchoId = self.next_echo_id();

        tokio::task::spawn_blocking(move || echo_once(&slot, addr, id, timeout))
            .await
            .map_err(|e| ProbeError::Worker(e.to_string()))?
    }
}

fn echo_once(
    slot: &Mutex<Option<TransportHandle>>,
    addr: IpAddr,
    id: EchoId,
    timeout: Duration,
) -> Result<Reachability, ProbeError> {
    let mut channel = slot
        .lock()
        .map_err(|_| ProbeError::Worker("ICMP channel lock poisoned".to_string()))?;

    if channel.is_none() {
        let handle = TransportHandle::open(TransportType::for_addr(&addr)).map_err(ProbeError::Open)?;
        *channel = Some(handle);
    }
    let handle: &mut TransportHandle = channel
        .as_mut()
        .ok_or_else(|| ProbeError::Worker("ICMP channel missing".to_string()))?;

    let sent: Instant = Instant::now();
    match handle.send_echo(addr, id) {
        Ok(()) => {}
        Err(e) if is_destination_error(&e) => {
            debug!("echo to {addr} rejected: {e}");
            return Ok(Reachability::Unreachable);
        }
        Err(source) => return Err(ProbeError::Send { addr, source }),
    }

    let answered: bool = handle
        .await_echo_reply(addr, id, sent + timeout)
        .map_err(ProbeError::Receive)?;

    if answered {
        Ok(Reachability::Alive { rtt: sent.elapsed() })
    } else {
        Ok(Reachability::Unreachable)
    }
}

/// Send failures that concern only this destination, not the socket.
///
/// Linux answers an echo to a broadcast address with `EACCES` unless the socket has
/// `SO_BROADCAST`, so `PermissionDenied` here is per host. Opening the socket
/// without privileges fails earlier, in [`TransportHandle::open`].
fn is_destination_error(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::HostUnreachable
            | io::ErrorKind::NetworkUnreachable
            | io::ErrorKind::AddrNotAvailable
            | io::ErrorKind::PermissionDenied
            | io::ErrorKind::InvalidInput
    )
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
