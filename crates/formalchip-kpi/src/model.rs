//! The `kpi.json` report shape.

use formalchip_report::GateVerdict;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpiReport {
    pub run_id: String,
    pub first_iteration_property_count: u32,
    pub first_iteration_placeholder_count: u32,
    pub first_iteration_meaningful_count: u32,
    pub time_to_first_meaningful_properties_min: Option<f64>,
    pub baseline_reduction_percent: Option<f64>,
    pub meets_time_reduction_target: bool,
    pub bug_found: bool,
    pub coverage_hits: u32,
    pub overall_success: bool,
    pub gate: GateVerdict,
}
