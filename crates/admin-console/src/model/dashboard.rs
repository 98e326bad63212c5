use chrono::{Local, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const DAY_FORMAT: &str = "%d-%m-%Y";

/// Inclusive date window for the transaction counters.
///
/// On the wire it is one string, `DD-MM-YYYY-DD-MM-YYYY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid date range {0:?}, expected DD-MM-YYYY-DD-MM-YYYY")]
pub struct DateRangeError(pub String);

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, DateRangeError> {
        if from > to {
            let text = format!("{}-{}", from.format(DAY_FORMAT), to.format(DAY_FORMAT));
            return Err(DateRangeError(text));
        }
        Ok(Self { from, to })
    }

    /// The three months up to and including `today`.
    pub fn last_three_months(today: NaiveDate) -> Self {
        let from = today.checked_sub_months(Months::new(3)).unwrap_or(today);
        Self { from, to: today }
    }

    pub fn last_three_months_from_now() -> Self {
        Self::last_three_months(Local::now().date_naive())
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self::last_three_months_from_now()
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from.format(DAY_FORMAT), self.to.format(DAY_FORMAT))
    }
}

impl FromStr for DateRange {
    type Err = DateRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DateRangeError(s.to_string());
        // Each half is exactly DD-MM-YYYY.
        let s = s.trim();
        let (from, to) = match (s.get(..10), s.get(10..11), s.get(11..)) {
            (Some(from), Some("-"), Some(to)) if to.len() == 10 => (from, to),
            _ => return Err(invalid()),
        };
        let from = NaiveDate::parse_from_str(from, DAY_FORMAT).map_err(|_| invalid())?;
        let to = NaiveDate::parse_from_str(to, DAY_FORMAT).map_err(|_| invalid())?;
        Self::new(from, to).map_err(|_| invalid())
    }
}

/// Body of the dated counter endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct DateRangeQuery {
    pub data: String,
}

impl From<DateRange> for DateRangeQuery {
    fn from(range: DateRange) -> Self {
        Self {
            data: range.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MasterCounts {
    #[serde(deserialize_with = "super::lenient::count")]
    pub total_components: u64,
    #[serde(deserialize_with = "super::lenient::string")]
    pub last_component: String,
    #[serde(deserialize_with = "super::lenient::count")]
    pub total_products: u64,
    #[serde(deserialize_with = "super::lenient::string")]
    pub last_product: String,
    #[serde(deserialize_with = "super::lenient::count")]
    pub total_projects: u64,
    #[serde(deserialize_with = "super::lenient::string")]
    pub last_project: String,
    #[serde(deserialize_with = "super::lenient::count")]
    pub total_vendors: u64,
    #[serde(deserialize_with = "super::lenient::string")]
    pub last_vendor: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionCounts {
    #[serde(rename = "totalRejection", deserialize_with = "super::lenient::string")]
    pub total_rejection: String,
    #[serde(rename = "lastRejection", deserialize_with = "super::lenient::string")]
    pub last_rejection: String,
    #[serde(rename = "totalConsumption", deserialize_with = "super::lenient::string")]
    pub total_consumption: String,
    #[serde(rename = "lastConsumption", deserialize_with = "super::lenient::string")]
    pub last_consumption: String,
    #[serde(rename = "totalJWchallan", deserialize_with = "super::lenient::string")]
    pub total_jw_challan: String,
    #[serde(rename = "lastJWchallan", deserialize_with = "super::lenient::string")]
    pub last_jw_challan: String,
    #[serde(rename = "totalPO", deserialize_with = "super::lenient::string")]
    pub total_po: String,
    #[serde(rename = "lastPO", deserialize_with = "super::lenient::string")]
    pub last_po: String,
    #[serde(rename = "totalJW_PO", deserialize_with = "super::lenient::string")]
    pub total_jw_po: String,
    #[serde(rename = "lastJW_PO", deserialize_with = "super::lenient::string")]
    pub last_jw_po: String,
    #[serde(rename = "totalMFG", deserialize_with = "super::lenient::string")]
    pub total_mfg: String,
    #[serde(rename = "lastMFG", deserialize_with = "super::lenient::string")]
    pub last_mfg: String,
    #[serde(rename = "totalFGin", deserialize_with = "super::lenient::string")]
    pub total_fg_in: String,
    #[serde(rename = "lastFGin", deserialize_with = "super::lenient::string")]
    pub last_fg_in: String,
    #[serde(rename = "totalFGout", deserialize_with = "super::lenient::string")]
    pub total_fg_out: String,
    #[serde(rename = "lastFGout", deserialize_with = "super::lenient::string")]
    pub last_fg_out: String,
}

/// Gate pass counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatePassCounts {
    #[serde(rename = "totalRGP", deserialize_with = "super::lenient::string")]
    pub total_rgp: String,
    #[serde(rename = "lastRGP", deserialize_with = "super::lenient::string")]
    pub last_rgp: String,
    #[serde(rename = "totalNRGP", deserialize_with = "super::lenient::string")]
    pub total_nrgp: String,
    #[serde(rename = "lastNRGP", deserialize_with = "super::lenient::string")]
    pub last_nrgp: String,
    #[serde(rename = "totalRGP_DCchallan", deserialize_with = "super::lenient::string")]
    pub total_dc_challan: String,
    #[serde(rename = "lastDCchallan", deserialize_with = "super::lenient::string")]
    pub last_dc_challan: String,
    #[serde(rename = "totalGatePass", deserialize_with = "super::lenient::string")]
    pub total_gate_pass: String,
}

/// Material inward counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinCounts {
    #[serde(rename = "totalMIN", deserialize_with = "super::lenient::string")]
    pub total_min: String,
    #[serde(rename = "lastMin", deserialize_with = "super::lenient::string")]
    pub last_min: String,
    #[serde(rename = "totalPOMin", deserialize_with = "super::lenient::string")]
    pub total_po_min: String,
    #[serde(rename = "lastPOMin", deserialize_with = "super::lenient::string")]
    pub last_po_min: String,
    #[serde(rename = "totalJWMin", deserialize_with = "super::lenient::string")]
    pub total_jw_min: String,
    #[serde(rename = "lastJWMin", deserialize_with = "super::lenient::string")]
    pub last_jw_min: String,
    #[serde(rename = "totalNormalMIN", deserialize_with = "super::lenient::string")]
    pub total_normal_min: String,
    #[serde(rename = "lastNormalMin", deserialize_with = "super::lenient::string")]
    pub last_normal_min: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PendingCounts {
    #[serde(rename = "pendingPO", deserialize_with = "super::lenient::string")]
    pub pending_po: String,
    #[serde(rename = "pendingJW_PO", deserialize_with = "super::lenient::string")]
    pub pending_jw_po: String,
    #[serde(rename = "pendingPPR", deserialize_with = "super::lenient::string")]
    pub pending_ppr: String,
    #[serde(rename = "pendingFG", deserialize_with = "super::lenient::string")]
    pub pending_fg: String,
    #[serde(rename = "pendingMRapproval", deserialize_with = "super::lenient::string")]
    pub pending_mr_approval: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopProduct {
    #[serde(rename = "productSku", default)]
    pub sku: String,
    #[serde(rename = "totalmfgQuantity", default)]
    pub total_mfg_quantity: f64,
    #[serde(rename = "productName", default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopMfgProducts {
    #[serde(rename = "topProducts", default)]
    pub top_products: Vec<TopProduct>,
}

/// Everything the operations dashboard shows. A section is `None` when the
/// backend answered without data for it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImsDashboard {
    pub master: Option<MasterCounts>,
    pub transactions: Option<TransactionCounts>,
    pub gate_pass: Option<GatePassCounts>,
    pub min: Option<MinCounts>,
    pub pending: Option<PendingCounts>,
    pub top_mfg: Option<TopMfgProducts>,
}
