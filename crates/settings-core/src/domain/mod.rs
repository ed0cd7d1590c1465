//! Domain types for settings persistence.
//!
//! This module contains pure logic with no file-system or locking
//! dependencies:
//!
//! - **`document`** – the size-bounded JSON document every load and save
//!   goes through.
//! - **`codec`** – the serializer/deserializer pair that maps a concrete
//!   settings type onto the document's root object.
//!
//! Code in outer layers (`service`, `fs`, `persistence`) depends on the
//! domain, but the domain never depends on them.

pub mod codec;
pub mod document;
