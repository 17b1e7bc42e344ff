use super::OptimizeReport;

pub fn to_json(report: &OptimizeReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
