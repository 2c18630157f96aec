//! Field descriptor table: the single source of field-name legality, shared
//! read-only by all compiler passes.

use crate::ast::{IntWidth, TypedValue};
use crate::value;

/// Identity of a recognized DSL field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    IpVersion,
    IpIhl,
    IpTos,
    IpTlen,
    IpId,
    IpFlags,
    IpOffset,
    IpTtl,
    IpProtocol,
    IpChecksum,
    IpSrc,
    IpDst,
    IpPayload,
    TcpSrc,
    TcpDst,
    TcpSeqno,
    TcpAckno,
    TcpSize,
    TcpReserv,
    TcpUrg,
    TcpAck,
    TcpPsh,
    TcpRst,
    TcpSyn,
    TcpFin,
    TcpWsize,
    TcpChecksum,
    TcpUrgp,
    TcpPayload,
    UdpSrc,
    UdpDst,
    UdpSize,
    UdpChecksum,
    UdpPayload,
    IcmpType,
    IcmpCode,
    IcmpChecksum,
    IcmpPayload,
    Signature,
}

/// Protocol layer a field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldGroup {
    Ip,
    Tcp,
    Udp,
    Icmp,
    /// The `signature` pseudo-field.
    Meta,
}

impl FieldId {
    pub fn group(self) -> FieldGroup {
        use FieldId::*;
        match self {
            IpVersion | IpIhl | IpTos | IpTlen | IpId | IpFlags | IpOffset | IpTtl
            | IpProtocol | IpChecksum | IpSrc | IpDst | IpPayload => FieldGroup::Ip,
            TcpSrc | TcpDst | TcpSeqno | TcpAckno | TcpSize | TcpReserv | TcpUrg | TcpAck
            | TcpPsh | TcpRst | TcpSyn | TcpFin | TcpWsize | TcpChecksum | TcpUrgp
            | TcpPayload => FieldGroup::Tcp,
            UdpSrc | UdpDst | UdpSize | UdpChecksum | UdpPayload => FieldGroup::Udp,
            IcmpType | IcmpCode | IcmpChecksum | IcmpPayload => FieldGroup::Icmp,
            Signature => FieldGroup::Meta,
        }
    }

    /// DSL label of this field.
    pub fn label(self) -> &'static str {
        FIELDS
            .iter()
            .find(|d| d.id == self)
            .map(|d| d.label)
            .unwrap_or("")
    }
}

/// How a field's value token is checked and decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Integer that must decode to exactly 4. IPv6 is not supported.
    IpVersion,
    Int(IntWidth),
    Ipv4,
    Str,
}

impl ValueKind {
    /// Pass-1 predicate: does the raw token satisfy this kind?
    pub fn verify(self, token: &str) -> bool {
        match self {
            ValueKind::IpVersion => value::decode_unsigned(token) == Some(4),
            ValueKind::Int(width) => value::fits_width(token, width),
            ValueKind::Ipv4 => value::is_ipv4(token),
            ValueKind::Str => value::is_quoted(token),
        }
    }

    /// Pass-2 decoder. `None` exactly when `verify` would reject the token.
    pub fn decode(self, token: &str) -> Option<TypedValue> {
        match self {
            ValueKind::IpVersion => {
                let v = value::decode_unsigned(token)?;
                (v == 4).then_some(TypedValue::Int {
                    width: IntWidth::U4,
                    value: v,
                })
            }
            ValueKind::Int(width) => {
                let v = value::decode_unsigned(token)?;
                (v <= width.max_value()).then_some(TypedValue::Int { width, value: v })
            }
            ValueKind::Ipv4 => value::decode_ipv4(token).map(TypedValue::Addr),
            ValueKind::Str => value::is_quoted(token)
                .then(|| TypedValue::Bytes(value::decode_quoted(token).into_bytes())),
        }
    }
}

/// One row of the descriptor table.
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    pub label: &'static str,
    pub id: FieldId,
    pub kind: ValueKind,
}

const fn desc(label: &'static str, id: FieldId, kind: ValueKind) -> FieldDescriptor {
    FieldDescriptor { label, id, kind }
}

/// Every recognized field, the `signature` pseudo-field included.
pub const FIELDS: &[FieldDescriptor] = &[
    desc("ip.version", FieldId::IpVersion, ValueKind::IpVersion),
    desc("ip.ihl", FieldId::IpIhl, ValueKind::Int(IntWidth::U4)),
    desc("ip.tos", FieldId::IpTos, ValueKind::Int(IntWidth::U8)),
    desc("ip.tlen", FieldId::IpTlen, ValueKind::Int(IntWidth::U16)),
    desc("ip.id", FieldId::IpId, ValueKind::Int(IntWidth::U16)),
    desc("ip.flags", FieldId::IpFlags, ValueKind::Int(IntWidth::U3)),
    desc("ip.offset", FieldId::IpOffset, ValueKind::Int(IntWidth::U13)),
    desc("ip.ttl", FieldId::IpTtl, ValueKind::Int(IntWidth::U8)),
    desc("ip.protocol", FieldId::IpProtocol, ValueKind::Int(IntWidth::U8)),
    desc("ip.checksum", FieldId::IpChecksum, ValueKind::Int(IntWidth::U16)),
    desc("ip.src", FieldId::IpSrc, ValueKind::Ipv4),
    desc("ip.dst", FieldId::IpDst, ValueKind::Ipv4),
    desc("ip.payload", FieldId::IpPayload, ValueKind::Str),
    desc("tcp.src", FieldId::TcpSrc, ValueKind::Int(IntWidth::U16)),
    desc("tcp.dst", FieldId::TcpDst, ValueKind::Int(IntWidth::U16)),
    desc("tcp.seqno", FieldId::TcpSeqno, ValueKind::Int(IntWidth::U32)),
    desc("tcp.ackno", FieldId::TcpAckno, ValueKind::Int(IntWidth::U32)),
    desc("tcp.size", FieldId::TcpSize, ValueKind::Int(IntWidth::U4)),
    desc("tcp.reserv", FieldId::TcpReserv, ValueKind::Int(IntWidth::U6)),
    desc("tcp.urg", FieldId::TcpUrg, ValueKind::Int(IntWidth::U1)),
    desc("tcp.ack", FieldId::TcpAck, ValueKind::Int(IntWidth::U1)),
    desc("tcp.psh", FieldId::TcpPsh, ValueKind::Int(IntWidth::U1)),
    desc("tcp.rst", FieldId::TcpRst, ValueKind::Int(IntWidth::U1)),
    desc("tcp.syn", FieldId::TcpSyn, ValueKind::Int(IntWidth::U1)),
    desc("tcp.fin", FieldId::TcpFin, ValueKind::Int(IntWidth::U1)),
    desc("tcp.wsize", FieldId::TcpWsize, ValueKind::Int(IntWidth::U16)),
    desc("tcp.checksum", FieldId::TcpChecksum, ValueKind::Int(IntWidth::U16)),
    desc("tcp.urgp", FieldId::TcpUrgp, ValueKind::Int(IntWidth::U16)),
    desc("tcp.payload", FieldId::TcpPayload, ValueKind::Str),
    desc("udp.src", FieldId::UdpSrc, ValueKind::Int(IntWidth::U16)),
    desc("udp.dst", FieldId::UdpDst, ValueKind::Int(IntWidth::U16)),
    desc("udp.size", FieldId::UdpSize, ValueKind::Int(IntWidth::U16)),
    desc("udp.checksum", FieldId::UdpChecksum, ValueKind::Int(IntWidth::U16)),
    desc("udp.payload", FieldId::UdpPayload, ValueKind::Str),
    desc("icmp.type", FieldId::IcmpType, ValueKind::Int(IntWidth::U8)),
    desc("icmp.code", FieldId::IcmpCode, ValueKind::Int(IntWidth::U8)),
    desc("icmp.checksum", FieldId::IcmpChecksum, ValueKind::Int(IntWidth::U16)),
    desc("icmp.payload", FieldId::IcmpPayload, ValueKind::Str),
    desc("signature", FieldId::Signature, ValueKind::Str),
];

/// Find a descriptor by its DSL label.
pub fn lookup(label: &str) -> Option<&'static FieldDescriptor> {
    FIELDS.iter().find(|d| d.label == label)
}
