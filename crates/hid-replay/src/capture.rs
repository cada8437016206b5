//! On-disk capture format.
//!
//! A capture is a JSON document listing timestamped raw interrupt reports
//! from one controller, optionally interleaved with rumble requests:
//!
//! ```json
//! {
//!   "vendor_id": "0x045E",
//!   "product_id": "0x02EA",
//!   "captures": [
//!     { "timestamp_us": 0, "data": "0x20 0x00 0x1C 0x0E 0x10 0x00" },
//!     { "timestamp_us": 8000, "data": "...", "rumble": { "low": 16384, "high": 0, "duration_ms": 100 } }
//!   ]
//! }
//! ```

use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use serde::{Deserialize, Serialize};

use openpad_hid_xbox_protocol::{ControllerVariant, variant_for};

use crate::hex::{parse_hex_bytes, parse_hex_u16};

/// Rumble request issued right after the report it is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RumbleStep {
    pub low: u16,
    pub high: u16,
    pub duration_ms: u64,
}

/// A single captured HID report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureReport {
    pub timestamp_us: u64,
    #[serde(default)]
    pub report_id: u8,
    /// Space-separated hex bytes, e.g. `"0x20 0x00 0x1C"`.
    pub data: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rumble: Option<RumbleStep>,
}

impl CaptureReport {
    pub fn bytes(&self) -> Result<Vec<u8>> {
        parse_hex_bytes(&self.data)
            .map_err(|e| anyhow!("capture at {}us: {e}", self.timestamp_us))
    }
}

/// Capture file produced by a report recorder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureFile {
    /// Overrides the wire format inferred from the product id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<ControllerVariant>,
    pub vendor_id: String,
    pub product_id: String,
    pub captures: Vec<CaptureReport>,
}

impl CaptureFile {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("failed to parse capture JSON")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read capture {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("in {}", path.display()))
    }

    pub fn ids(&self) -> Result<(u16, u16)> {
        let vid = parse_hex_u16(&self.vendor_id).map_err(|e| anyhow!("vendor_id: {e}"))?;
        let pid = parse_hex_u16(&self.product_id).map_err(|e| anyhow!("product_id: {e}"))?;
        Ok((vid, pid))
    }

    /// The explicit `variant`, or the one the product id maps to.
    pub fn variant(&self) -> Result<ControllerVariant> {
        if let Some(variant) = self.variant {
            return Ok(variant);
        }
        let (vid, pid) = self.ids()?;
        match variant_for(vid, pid) {
            Some(variant) => Ok(variant),
            None => bail!("unsupported controller {vid:04X}:{pid:04X}; set \"variant\" explicitly"),
        }
    }
}

// ── BDD-style scenario tests ────────────────────────────────────────────────
