use serde::{Deserialize, Serialize};

/// Monthly row of `/api/leaves/summary/:id`. CL is casual leave, SL sick leave.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveMonth {
    #[serde(default, rename = "usedCL")]
    pub used_cl: f64,
    #[serde(default, rename = "usedSL")]
    pub used_sl: f64,
    #[serde(default, rename = "balanceCL")]
    pub balance_cl: f64,
    #[serde(default, rename = "balanceSL")]
    pub balance_sl: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeaveSummary {
    pub used: f64,
    pub left: f64,
}

impl LeaveSummary {
    /// Usage is summed over all months; the balance is the latest month's.
    pub fn from_months(months: &[LeaveMonth]) -> Option<Self> {
        let last = months.last()?;
        let used = months.iter().map(|m| m.used_cl + m.used_sl).sum();
        Some(Self {
            used,
            left: last.balance_cl + last.balance_sl,
        })
    }
}
