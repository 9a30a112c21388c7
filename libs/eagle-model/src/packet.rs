//! Packet decoding
//!
//! The uploader API wraps records in `<rainforest macId=".." timestamp="..">`,
//! while the local socket API sends each record as its own document. Both
//! decode into a [`Packet`].

use crate::error::{ModelError, Result};
use crate::records::{
    BlockPriceDetail, DeviceInfo, FastPollStatus, HistoryData, InstantaneousDemand,
    MessageCluster, MeterInfo, NetworkInfo, PriceCluster, ProfileData, RecordKind, ScheduleInfo,
    Summation, TimeCluster,
};
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

/// Root element name of uploader packets
pub const ROOT_ELEMENT: &str = "rainforest";

/// Everything one gateway document carries, at most one record per kind
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Packet {
    #[serde(rename = "@macId")]
    pub mac_id: Option<String>,
    #[serde(rename = "@timestamp")]
    pub timestamp: Option<String>,

    #[serde(rename = "CurrentSummationDelivered")]
    pub current: Option<Summation>,
    #[serde(rename = "DeviceInfo")]
    pub device: Option<DeviceInfo>,
    #[serde(rename = "InstantaneousDemand")]
    pub demand: Option<InstantaneousDemand>,
    #[serde(rename = "HistoryData")]
    pub history: Option<HistoryData>,
    #[serde(rename = "MessageCluster")]
    pub message: Option<MessageCluster>,
    #[serde(rename = "MeterInfo")]
    pub meter: Option<MeterInfo>,
    #[serde(rename = "NetworkInfo")]
    pub network: Option<NetworkInfo>,
    #[serde(rename = "FastPollStatus")]
    pub poll: Option<FastPollStatus>,
    #[serde(rename = "PriceCluster")]
    pub price: Option<PriceCluster>,
    #[serde(rename = "BlockPriceDetail")]
    pub price_detail: Option<BlockPriceDetail>,
    #[serde(rename = "ProfileData")]
    pub profile: Option<ProfileData>,
    #[serde(rename = "ScheduleInfo")]
    pub schedule: Option<ScheduleInfo>,
    #[serde(rename = "TimeCluster")]
    pub time: Option<TimeCluster>,
}

impl Packet {
    /// Decode a gateway document
    ///
    /// Accepts a `<rainforest>` packet or a bare record element. Any other
    /// root is rejected with [`ModelError::UnexpectedRoot`].
    pub fn from_xml(xml: &str) -> Result<Self> {
        let root = root_element(xml)?;

        if root == ROOT_ELEMENT {
            let packet: Packet = quick_xml::de::from_str(xml)?;
            debug!(
                mac_id = packet.mac_id.as_deref().unwrap_or(""),
                records = packet.kinds().len(),
                "decoded rainforest packet"
            );
            return Ok(packet);
        }

        let Some(kind) = RecordKind::from_element(&root) else {
            warn!(root = %root, "unexpected root element");
            return Err(ModelError::unexpected_root(root));
        };

        debug!(kind = %kind, "decoding bare record");
        let mut packet = Packet::default();
        match kind {
            RecordKind::CurrentSummationDelivered => packet.current = Some(decode(xml)?),
            RecordKind::DeviceInfo => packet.device = Some(decode(xml)?),
            RecordKind::InstantaneousDemand => packet.demand = Some(decode(xml)?),
            RecordKind::HistoryData => packet.history = Some(decode(xml)?),
            RecordKind::MessageCluster => packet.message = Some(decode(xml)?),
            RecordKind::MeterInfo => packet.meter = Some(decode(xml)?),
            RecordKind::NetworkInfo => packet.network = Some(decode(xml)?),
            RecordKind::FastPollStatus => packet.poll = Some(decode(xml)?),
            RecordKind::PriceCluster => packet.price = Some(decode(xml)?),
            RecordKind::BlockPriceDetail => packet.price_detail = Some(decode(xml)?),
            RecordKind::ProfileData => packet.profile = Some(decode(xml)?),
            RecordKind::ScheduleInfo => packet.schedule = Some(decode(xml)?),
            RecordKind::TimeCluster => packet.time = Some(decode(xml)?),
            // Only appears nested in HistoryData; from_element never yields it
            RecordKind::CurrentSummation => return Err(ModelError::unexpected_root(root)),
        }
        Ok(packet)
    }

    /// Kinds present in this packet, in element order of the schema
    pub fn kinds(&self) -> Vec<RecordKind> {
        let present = [
            (RecordKind::CurrentSummationDelivered, self.current.is_some()),
            (RecordKind::DeviceInfo, self.device.is_some()),
            (RecordKind::InstantaneousDemand, self.demand.is_some()),
            (RecordKind::HistoryData, self.history.is_some()),
            (RecordKind::MessageCluster, self.message.is_some()),
            (RecordKind::MeterInfo, self.meter.is_some()),
            (RecordKind::NetworkInfo, self.network.is_some()),
            (RecordKind::FastPollStatus, self.poll.is_some()),
            (RecordKind::PriceCluster, self.price.is_some()),
            (RecordKind::BlockPriceDetail, self.price_detail.is_some()),
            (RecordKind::ProfileData, self.profile.is_some()),
            (RecordKind::ScheduleInfo, self.schedule.is_some()),
            (RecordKind::TimeCluster, self.time.is_some()),
        ];
        present
            .into_iter()
            .filter_map(|(kind, is_present)| is_present.then_some(kind))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds().is_empty()
    }
}

fn decode<T: DeserializeOwned>(xml: &str) -> Result<T> {
    Ok(quick_xml::de::from_str(xml)?)
}

/// Local name of the first element in the document
pub fn root_element(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) => {
                return Ok(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
            },
            Event::Eof => return Err(ModelError::EmptyDocument),
            // Declaration, comments, whitespace, doctype
            _ => {},
        }
    }
}
