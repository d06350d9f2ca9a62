use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Trade {
    pub id: String,
    pub trade_name: String,
    pub department_id: Option<String>,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default)]
pub struct TradeInput {
    pub trade_name: String,
    pub department_id: Option<String>,
    pub description: Option<String>,
}
