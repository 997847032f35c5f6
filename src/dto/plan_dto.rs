use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::plan::{Plan, PlanPatch, PlanType};

// Payload enviado em POST/PUT de planos (valores com ponto decimal)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub description: String,
    #[serde(rename = "type")]
    pub plan_type: PlanType,
    pub spaces: i64,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancel_value: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: bool,
}

impl PlanPayload {
    // Plano local equivalente ao payload, com o id informado
    pub fn to_plan(&self, id: i64) -> Plan {
        Plan {
            id: Some(id),
            description: self.description.clone(),
            plan_type: self.plan_type,
            spaces: self.spaces,
            spaces_busy: None,
            spaces_available: None,
            value: self.value.clone(),
            cancel_value: self.cancel_value.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            status: self.status,
        }
    }
}

// Response de PUT /garages/{code}/plans/{id}
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GarageScopedUpdateResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub updated: Option<PlanPatch>,
    #[serde(default)]
    pub http_code: Option<u16>,
}
