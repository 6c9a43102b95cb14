//! Raw layer-4 ICMP channels.
//!
//! Opening one of these needs root (or `CAP_NET_RAW`). A channel is opened once and
//! reused for every probe of its address family.

use std::io;
use std::net::IpAddr;
use std::time::{Duration, Instant};

use pnet::packet::icmp::IcmpPacket;
use pnet::packet::icmpv6::Icmpv6Packet;
use pnet::packet::ip::IpNextHeaderProtocols;
use pnet::transport::{
    self, TransportChannelType, TransportProtocol, TransportReceiver, TransportSender,
    icmp_packet_iter, icmpv6_packet_iter,
};

use crate::network::icmp::{self, EchoId};

const TRANSPORT_BUFFER_SIZE: usize = 4096;
/// Socket timeouts of zero block forever on some platforms.
const MIN_WAIT: Duration = Duration::from_millis(1);
const CHANNEL_TYPE_ICMP: TransportChannelType =
    TransportChannelType::Layer4(TransportProtocol::Ipv4(IpNextHeaderProtocols::Icmp));
const CHANNEL_TYPE_ICMPV6: TransportChannelType =
    TransportChannelType::Layer4(TransportProtocol::Ipv6(IpNextHeaderProtocols::Icmpv6));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportType {
    IcmpV4,
    IcmpV6,
}

impl TransportType {
    pub fn for_addr(addr: &IpAddr) -> Self {
        match addr {
            IpAddr::V4(_) => TransportType::IcmpV4,
            IpAddr::V6(_) => TransportType::IcmpV6,
        }
    }
}

pub struct TransportHandle {
    transport_type: TransportType,
    tx: TransportSender,
    rx: TransportReceiver,
}

impl TransportHandle {
    pub fn open(transport_type: TransportType) -> io::Result<Self> {
        let (tx, rx) = open_channel(transport_type)?;
        Ok(Self {
            transport_type,
            tx,
            rx,
        })
    }

    pub fn send_echo(&mut self, dest: IpAddr, id: EchoId) -> io::Result<()> {
        let invalid = |e: anyhow::Error| io::Error::new(io::ErrorKind::InvalidData, e.to_string());

        match self.transport_type {
            TransportType::IcmpV4 => {
                let bytes = icmp::create_echo_request_v4(id).map_err(invalid)?;
                let packet = IcmpPacket::new(&bytes)
                    .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "truncated echo request"))?;
                self.tx.send_to(packet, dest)?;
            }
            TransportType::IcmpV6 => {
                let bytes = icmp::create_echo_request_v6(id).map_err(invalid)?;
                let packet = Icmpv6Packet::new(&bytes)
                    .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "truncated echo request"))?;
                self.tx.send_to(packet, dest)?;
            }
        }
        Ok(())
    }

    /// Waits until an echo reply from `source` carrying `id` arrives or `deadline` passes.
    ///
    /// Unrelated packets (other hosts, other identifiers, non-echo ICMP) are dropped.
    /// Returns `Ok(false)` on timeout.
    pub fn await_echo_reply(&mut self, source: IpAddr, id: EchoId, deadline: Instant) -> io::Result<bool> {
        loop {
            let remaining: Duration = deadline.saturating_duration_since(Instant::now());
            if remaining < MIN_WAIT {
                return Ok(false);
            }

            let matched = match self.transport_type {
                TransportType::IcmpV4 => icmp_packet_iter(&mut self.rx)
                    .next_with_timeout(remaining)?
                    .is_some_and(|(packet, addr)| {
                        addr == source && icmp::echo_reply_id_v4(&packet) == Some(id)
                    }),
                TransportType::IcmpV6 => icmpv6_packet_iter(&mut self.rx)
                    .next_with_timeout(remaining)?
                    .is_some_and(|(packet, addr)| {
                        addr == source && icmp::echo_reply_id_v6(&packet) == Some(id)
                    }),
            };

            if matched {
                return Ok(true);
            }
        }
    }
}

fn open_channel(transport_type: TransportType) -> io::Result<(TransportSender, TransportReceiver)> {
    let channel_type: TransportChannelType = match transport_type {
        TransportType::IcmpV4 => CHANNEL_TYPE_ICMP,
        TransportType::IcmpV6 => CHANNEL_TYPE_ICMPV6,
    };
    transport::transport_channel(TRANSPORT_BUFFER_SIZE, channel_type)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
