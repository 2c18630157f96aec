//! Format compiled signatures for display.

use crate::ast::{AddrValue, CompiledSet, Signature, TypedValue};

/// Render every signature of a set, one block per signature.
pub fn render_set(set: &CompiledSet) -> String {
    let mut out = String::new();
    for sig in set.iter() {
        out.push_str(&render_signature(sig));
    }
    out
}

/// Render one signature with its fields in declaration order.
pub fn render_signature(sig: &Signature) -> String {
    let mut out = format!("signature {:?} ({} fields)\n", sig.name, sig.fields.len());
    for field in &sig.fields {
        out.push_str(&format!(
            "  {} = {}\n",
            field.id.label(),
            render_value(&field.value)
        ));
    }
    out
}

fn render_value(value: &TypedValue) -> String {
    match value {
        TypedValue::Int { width, value } => format!("{} (u{})", value, width.bits()),
        TypedValue::Addr(AddrValue::Literal(o)) => {
            format!("{}.{}.{}.{}", o[0], o[1], o[2], o[3])
        }
        TypedValue::Addr(AddrValue::Class(class)) => class.label().to_string(),
        TypedValue::Bytes(bytes) => format!("{:?}", String::from_utf8_lossy(bytes)),
    }
}
