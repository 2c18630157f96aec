//! Cross-field policy checks over the materialized signature set.
//!
//! Runs once after materialization: every signature must declare IPv4 and
//! its mandatory header fields, and transport-layer fields are only legal
//! when `ip.protocol` says which transport the packet carries.

use crate::ast::{CompiledSet, Signature, TypedValue};
use crate::error::CompileError;
use crate::fields::{FieldGroup, FieldId};

/// Per-protocol required-field rules keyed by the decoded `ip.protocol`
/// value. Empty today: a declared protocol number places no extra
/// requirement on the signature. An entry such as
/// `(6, &[FieldId::TcpSrc, FieldId::TcpDst])` would make TCP signatures
/// require both ports.
const PROTO_RULES: &[(u32, &[FieldId])] = &[];

/// Pass 3: enforce the IP-version and mandatory/forbidden field policies on
/// every signature. The first violation aborts the compilation.
pub fn check_policies(set: &CompiledSet) -> Result<(), CompileError> {
    for signature in set.iter() {
        check_signature(signature)?;
    }
    Ok(())
}

fn check_signature(sig: &Signature) -> Result<(), CompileError> {
    match sig.field(FieldId::IpVersion).and_then(TypedValue::as_u32) {
        Some(4) => {}
        Some(6) => return reject_ipv6(sig),
        _ => {
            return Err(CompileError::MissingOrUnsupportedIpVersion {
                signature: sig.name.clone(),
            })
        }
    }

    for id in [FieldId::IpSrc, FieldId::IpDst] {
        if !sig.has_field(id) {
            return Err(CompileError::MissingRequiredIpv4Field {
                signature: sig.name.clone(),
                label: id.label(),
            });
        }
    }

    match sig.field(FieldId::IpProtocol).and_then(TypedValue::as_u32) {
        Some(protocol) => check_protocol_rules(sig, protocol),
        None => {
            // a transport field is reported before the missing ip.protocol
            check_no_transport_fields(sig)?;
            Err(CompileError::MissingRequiredIpv4Field {
                signature: sig.name.clone(),
                label: FieldId::IpProtocol.label(),
            })
        }
    }
}

/// IPv6 is recognized but permanently unsupported.
fn reject_ipv6(sig: &Signature) -> Result<(), CompileError> {
    Err(CompileError::MissingOrUnsupportedIpVersion {
        signature: sig.name.clone(),
    })
}

fn check_protocol_rules(sig: &Signature, protocol: u32) -> Result<(), CompileError> {
    let required = PROTO_RULES
        .iter()
        .find(|(p, _)| *p == protocol)
        .map(|(_, fields)| *fields)
        .unwrap_or(&[]);
    for &id in required {
        if !sig.has_field(id) {
            return Err(CompileError::MissingRequiredIpv4Field {
                signature: sig.name.clone(),
                label: id.label(),
            });
        }
    }
    Ok(())
}

fn check_no_transport_fields(sig: &Signature) -> Result<(), CompileError> {
    for field in &sig.fields {
        if matches!(
            field.id.group(),
            FieldGroup::Tcp | FieldGroup::Udp | FieldGroup::Icmp
        ) {
            return Err(CompileError::TransportFieldWithoutProtocol {
                signature: sig.name.clone(),
                label: field.id.label(),
            });
        }
    }
    Ok(())
}
