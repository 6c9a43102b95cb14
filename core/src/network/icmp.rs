//! ICMP and ICMPv6 echo packets.

use anyhow::Context;
use pnet::packet::Packet;
use pnet::packet::icmp::echo_reply::EchoReplyPacket;
use pnet::packet::icmp::echo_request::{IcmpCodes, MutableEchoRequestPacket};
use pnet::packet::icmp::{IcmpPacket, IcmpTypes};
use pnet::packet::icmpv6::echo_reply::EchoReplyPacket as EchoReplyPacketV6;
use pnet::packet::icmpv6::echo_request::MutableEchoRequestPacket as MutableEchoRequestPacketV6;
use pnet::packet::icmpv6::{Icmpv6Code, Icmpv6Packet, Icmpv6Types};
use pnet::util;

pub const ICMP_ECHO_HDR_LEN: usize = 8;
pub const ECHO_PAYLOAD: &[u8] = b"sweepr-echo-req";

/// Identifier and sequence number carried by an echo request or reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EchoId {
    pub identifier: u16,
    pub sequence: u16,
}

pub fn create_echo_request_v4(id: EchoId) -> anyhow::Result<Vec<u8>> {
    let mut buffer: Vec<u8> = vec![0u8; ICMP_ECHO_HDR_LEN + ECHO_PAYLOAD.len()];
    {
        let mut req = MutableEchoRequestPacket::new(&mut buffer).context("creating echo request")?;
        req.set_icmp_type(IcmpTypes::EchoRequest);
        req.set_icmp_code(IcmpCodes::NoCode);
        req.set_identifier(id.identifier);
        req.set_sequence_number(id.sequence);
        req.set_payload(ECHO_PAYLOAD);
        req.set_checksum(0);
        let checksum = util::checksum(req.packet(), 1);
        req.set_checksum(checksum);
    }
    Ok(buffer)
}

/// Builds an ICMPv6 echo request.
///
/// The checksum covers an IPv6 pseudo-header the socket only knows at send time, so the
/// kernel fills it in for raw ICMPv6 sockets.
pub fn create_echo_request_v6(id: EchoId) -> anyhow::Result<Vec<u8>> {
    let mut buffer: Vec<u8> = vec![0u8; ICMP_ECHO_HDR_LEN + ECHO_PAYLOAD.len()];
    {
        let mut req =
            MutableEchoRequestPacketV6::new(&mut buffer).context("creating echo request v6")?;
        req.set_icmpv6_type(Icmpv6Types::EchoRequest);
        req.set_icmpv6_code(Icmpv6Code(0));
        req.set_identifier(id.identifier);
        req.set_sequence_number(id.sequence);
        req.set_payload(ECHO_PAYLOAD);
        req.set_checksum(0);
    }
    Ok(buffer)
}

/// Returns the echo id if `icmp` is an echo reply.
pub fn echo_reply_id_v4(icmp: &IcmpPacket) -> Option<EchoId> {
    if icmp.get_icmp_type() != IcmpTypes::EchoReply {
        return None;
    }
    let reply = EchoReplyPacket::new(icmp.packet())?;
    Some(EchoId {
        identifier: reply.get_identifier(),
        sequence: reply.get_sequence_number(),
    })
}

pub fn echo_reply_id_v6(icmp: &Icmpv6Packet) -> Option<EchoId> {
    if icmp.get_icmpv6_type() != Icmpv6Types::EchoReply {
        return None;
    }
    let reply = EchoReplyPacketV6::new(icmp.packet())?;
    Some(EchoId {
        identifier: reply.get_identifier(),
        sequence: reply.get_sequence_number(),
    })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
