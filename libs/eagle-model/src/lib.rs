//! eagle-model - Rainforest Eagle packet records
//!
//! Decodes gateway XML into typed records, renders them as fixed-width text
//! reports and builds local API command requests. Field values stay as raw
//! text until rendering; all interpretation goes through `eagle-codec`.
//!
//! # Example
//!
//! ```rust
//! use eagle_codec::{EpochConverter, TimeZoneMode};
//! use eagle_model::{Packet, ReportRenderer};
//!
//! let xml = "<rainforest macId=\"0xd8d5b90000001234\">\
//!     <TimeCluster><UTCTime>0x1C96BB5D</UTCTime></TimeCluster>\
//!     </rainforest>";
//! let packet = Packet::from_xml(xml).unwrap();
//!
//! let renderer = ReportRenderer::new(EpochConverter::new(), TimeZoneMode::Utc);
//! assert!(renderer.render(&packet).contains("2015-03-14 09:26:53 +0000 UTC"));
//! ```

pub mod command;
pub mod error;
pub mod packet;
pub mod readings;
pub mod records;
pub mod render;

// Re-exports for convenience
pub use command::LocalCommand;
pub use error::{ModelError, Result};
pub use packet::{root_element, Packet, ROOT_ELEMENT};
pub use readings::Reading;
pub use records::{
    BlockPriceDetail, DeviceInfo, FastPollStatus, HistoryData, InstantaneousDemand,
    MessageCluster, MeterInfo, NetworkInfo, PriceCluster, ProfileData, RecordKind, ScheduleInfo,
    Summation, TimeCluster,
};
pub use render::{ReportRenderer, EMPTY_REPORT, HISTORY_BANNER};
