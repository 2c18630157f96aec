//! Compiled signature data: typed field values, signatures, and the set
//! handed to the packet builder.

use byteorder::{BigEndian, WriteBytesExt};
use std::collections::HashMap;

use crate::error::CompileError;
use crate::fields::FieldId;

/// Bit-width class of an integer field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntWidth {
    U1,
    U3,
    U4,
    U6,
    U8,
    U13,
    U16,
    U32,
}

impl IntWidth {
    pub fn bits(self) -> u32 {
        match self {
            IntWidth::U1 => 1,
            IntWidth::U3 => 3,
            IntWidth::U4 => 4,
            IntWidth::U6 => 6,
            IntWidth::U8 => 8,
            IntWidth::U13 => 13,
            IntWidth::U16 => 16,
            IntWidth::U32 => 32,
        }
    }

    /// Inclusive upper bound for a value of this width.
    pub fn max_value(self) -> u32 {
        match self.bits() {
            32 => u32::MAX,
            b => (1u32 << b) - 1,
        }
    }

    /// Natural encoded width in bytes: sub-byte classes occupy one byte,
    /// `u13` shares the two-byte form of `u16`.
    pub fn byte_len(self) -> usize {
        match self {
            IntWidth::U1 | IntWidth::U3 | IntWidth::U4 | IntWidth::U6 | IntWidth::U8 => 1,
            IntWidth::U13 | IntWidth::U16 => 2,
            IntWidth::U32 => 4,
        }
    }
}

/// Symbolic address class, resolved to a concrete address later by the
/// packet builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddrClass {
    NorthAmerican,
    SouthAmerican,
    Asian,
    European,
    UserDefined,
}

impl AddrClass {
    pub fn label(self) -> &'static str {
        match self {
            AddrClass::NorthAmerican => "north-american-ip",
            AddrClass::SouthAmerican => "south-american-ip",
            AddrClass::Asian => "asian-ip",
            AddrClass::European => "european-ip",
            AddrClass::UserDefined => "user-defined-ip",
        }
    }
}

/// An IPv4 field value: concrete octets or a symbolic selection class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddrValue {
    Literal([u8; 4]),
    Class(AddrClass),
}

/// A decoded, self-describing field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypedValue {
    Int { width: IntWidth, value: u32 },
    Addr(AddrValue),
    Bytes(Vec<u8>),
}

impl TypedValue {
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            TypedValue::Int { value, .. } => Some(*value),
            _ => None,
        }
    }

    /// Network-order byte form consumed by the packet builder. Integers use
    /// their natural width; a symbolic address has no byte form until the
    /// builder resolves it.
    pub fn to_be_bytes(&self) -> Option<Vec<u8>> {
        match self {
            TypedValue::Int { width, value } => {
                let mut out = Vec::with_capacity(width.byte_len());
                match width.byte_len() {
                    1 => out.write_u8(*value as u8).ok()?,
                    2 => out.write_u16::<BigEndian>(*value as u16).ok()?,
                    _ => out.write_u32::<BigEndian>(*value).ok()?,
                }
                Some(out)
            }
            TypedValue::Addr(AddrValue::Literal(octets)) => Some(octets.to_vec()),
            TypedValue::Addr(AddrValue::Class(_)) => None,
            TypedValue::Bytes(bytes) => Some(bytes.clone()),
        }
    }
}

/// One field of a signature, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValue {
    pub id: FieldId,
    pub value: TypedValue,
}

/// One named packet template. Field order is the source order of the
/// `field = value` pairs (the `signature` pair excluded); the builder may
/// rely on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub name: String,
    pub fields: Vec<FieldValue>,
}

impl Signature {
    /// Value of `id` in this signature, if declared.
    pub fn field(&self, id: FieldId) -> Option<&TypedValue> {
        self.fields.iter().find(|f| f.id == id).map(|f| &f.value)
    }

    pub fn has_field(&self, id: FieldId) -> bool {
        self.field(id).is_some()
    }
}

/// The validated signatures of one compilation, in source order.
///
/// Names are unique across the set; `push` rejects a collision so a caller
/// can never observe two signatures with the same name.
#[derive(Debug, Default)]
pub struct CompiledSet {
    signatures: Vec<Signature>,
    by_name: HashMap<String, usize>,
}

impl CompiledSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, signature: Signature) -> Result<(), CompileError> {
        if self.by_name.contains_key(&signature.name) {
            return Err(CompileError::DuplicateSignatureName {
                name: signature.name,
            });
        }
        self.by_name
            .insert(signature.name.clone(), self.signatures.len());
        self.signatures.push(signature);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Signature> {
        self.by_name.get(name).map(|&i| &self.signatures[i])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Signature> {
        self.signatures.iter()
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }
}

impl<'a> IntoIterator for &'a CompiledSet {
    type Item = &'a Signature;
    type IntoIter = std::slice::Iter<'a, Signature>;

    fn into_iter(self) -> Self::IntoIter {
        self.signatures.iter()
    }
}
