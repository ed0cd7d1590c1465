//! Settings types persisted by the demo device.
//!
//! Each type comes with its codec pair, showing the two common styles:
//!
//! - **`light`** – a hand-written, field-wise codec: every member is read with
//!   its own fallback, so a partially valid file keeps whatever it can.
//! - **`mqtt`** – a serde-derived type persisted through
//!   [`settings_core::JsonCodec`], with defaults supplied by
//!   `#[serde(default)]`.

pub mod light;
pub mod mqtt;
