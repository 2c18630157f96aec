//! # pktsig — Packet Signature DSL Compiler
//!
//! Compiles a textual DSL describing network packet signatures (declarative
//! templates for IPv4/TCP/UDP/ICMP headers and payloads) into a typed,
//! validated in-memory set consumable by a packet builder.
//!
//! ## DSL structure
//!
//! A file holds any number of entries; each entry is one signature:
//!
//! ```text
//! # probe template
//! [ signature = "basic-tcp",
//!   ip.version = 4,
//!   ip.src = "192.168.0.1", ip.dst = european-ip,
//!   ip.protocol = 6,
//!   tcp.src = 1025, tcp.dst = 80 ]
//! ```
//!
//! Values are bit-width-checked integers (decimal or `0x` hex), IPv4
//! literals or symbolic address classes, and quoted strings. The `signature`
//! pair names the entry and must be unique file-wide.
//!
//! ## Compilation passes
//!
//! 1. **Syntax/semantic check**: grammar, field legality, per-entry
//!    duplicates, value types; allocates nothing.
//! 2. **Materialization**: builds the typed [`Signature`]s, enforcing
//!    name uniqueness.
//! 3. **Cross-field policies**: IPv4 version and mandatory fields,
//!    transport fields only with a declared `ip.protocol`.
//!
//! Compilation is fail-fast: the first violation aborts the run and the
//! caller receives either a full [`CompiledSet`] or a [`CompileError`],
//! never a partial set.
//!
//! ## Usage
//!
//! ```
//! let set = pktsig::compile(
//!     r#"[ signature = "ping", ip.version = 4, ip.src = "10.0.0.1",
//!          ip.dst = "10.0.0.2", ip.protocol = 1 ]"#,
//! )
//! .unwrap();
//! assert_eq!(set.len(), 1);
//! assert!(set.get("ping").is_some());
//! ```

pub mod ast;
pub mod dump;
pub mod error;
pub mod fields;
pub mod lexer;
pub mod parser;
pub mod validate;
pub mod value;

pub use ast::{AddrClass, AddrValue, CompiledSet, FieldValue, IntWidth, Signature, TypedValue};
pub use error::CompileError;
pub use fields::{FieldDescriptor, FieldGroup, FieldId, ValueKind, FIELDS};
pub use lexer::{Lexer, Token};
pub use parser::{check_source, compile, compile_file};
