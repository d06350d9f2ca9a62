use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JobStats {
    pub total_jobs: usize,
    pub total_yardage: f64,
    pub total_revenue: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HoursStats {
    pub entries: usize,
    pub total_hours: f64,
    pub total_pay: f64,
}
