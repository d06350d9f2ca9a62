use serde::Serialize;

/// Job template: any crew can log work against an active template.
#[derive(Debug, Clone, Serialize)]
pub struct JobTemplate {
    pub id: String,
    pub job_name: String,
    pub active: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Priced sub-unit of a job template. `total` is computed by the store.
#[derive(Debug, Clone, Serialize)]
pub struct JobElevation {
    pub id: String,
    pub job_id: String,
    pub elevation_name: String,
    pub yardage: f64,
    pub rate: f64,
    pub total: f64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobWithElevations {
    #[serde(flatten)]
    pub job: JobTemplate,
    pub job_elevations: Vec<JobElevation>,
}

#[derive(Debug, Clone, Default)]
pub struct JobTemplateUpdate {
    pub job_name: Option<String>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct ElevationInput {
    pub job_id: String,
    pub elevation_name: String,
    pub yardage: f64,
    pub rate: f64,
}

#[derive(Debug, Clone, Default)]
pub struct ElevationUpdate {
    pub elevation_name: Option<String>,
    pub yardage: Option<f64>,
    pub rate: Option<f64>,
}
