//! eagle-codec - value conversion for Rainforest Eagle packets
//!
//! The gateway sends every value as text. This crate turns that text into
//! numbers and instants:
//!
//! - **Hex fields**: `0x...` strings into `i32` / `f32` ([`hex`])
//! - **Device time**: meter timestamps count from 2000-01-01 ([`epoch`])
//! - **Scaled readings**: `raw * multiplier / divisor` ([`scaled`])
//! - **Display helpers**: best-effort text for reports ([`display`])
//!
//! # Example
//!
//! ```rust
//! use eagle_codec::{compute_scaled_value, EpochConverter};
//!
//! let converter = EpochConverter::new();
//! let t = converter.to_standard_epoch_time("0x1C96BB5D").unwrap();
//! assert_eq!(t.to_rfc3339(), "2015-03-14T09:26:53+00:00");
//!
//! let kw = compute_scaled_value("0x00042d", "0x00000001", "0x000003e8").unwrap();
//! assert!((kw - 1.069).abs() < 1e-6);
//! ```

pub mod display;
pub mod epoch;
pub mod error;
pub mod hex;
pub mod scaled;

// Re-exports for convenience
pub use display::{format_scaled, format_time, DisplayPrecision, TimeZoneMode};
pub use epoch::{EpochConverter, EpochOffset};
pub use error::{HexError, Result};
pub use hex::{is_hex, parse_signed_i32, parse_unsigned_f32, to_decimal_int};
pub use scaled::{compute_scaled_value, price_value};
