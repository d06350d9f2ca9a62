use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Crew {
    pub id: String,
    pub name: String,
    pub trade_id: Option<String>,
    pub trade_name: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default)]
pub struct CrewInput {
    pub name: String,
    pub trade_id: Option<String>,
}
