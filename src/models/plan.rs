//! Modelo de Plan
//!
//! Um plano é uma faixa de mensalidade oferecida por uma garagem, com
//! capacidade de vagas e período de validade. Os campos seguem o JSON da
//! API SmartPark (camelCase, valores monetários como string decimal).

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Tipo de veículo do plano
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum PlanType {
    #[default]
    Carro,
    Moto,
}

/// Plano principal - mapeia o objeto `Plan` da API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub description: String,
    #[serde(rename = "type", default)]
    pub plan_type: PlanType,
    pub spaces: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spaces_busy: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spaces_available: Option<i64>,
    #[serde(deserialize_with = "decimal_string")]
    pub value: String,
    #[serde(
        default,
        deserialize_with = "optional_decimal_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub cancel_value: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default = "default_status")]
    pub status: bool,
}

/// Patch parcial devolvido pelo endpoint de atualização por garagem
/// (`updated: Partial<Plan>`)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanPatch {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type", default)]
    pub plan_type: Option<PlanType>,
    #[serde(default)]
    pub spaces: Option<i64>,
    #[serde(default)]
    pub spaces_busy: Option<i64>,
    #[serde(default)]
    pub spaces_available: Option<i64>,
    #[serde(default, deserialize_with = "optional_decimal_string")]
    pub value: Option<String>,
    #[serde(default, deserialize_with = "optional_decimal_string")]
    pub cancel_value: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: Option<bool>,
}

impl Plan {
    /// Vagas disponíveis; sem contador próprio, `spaces - spacesBusy`
    pub fn spaces_available_or_default(&self) -> i64 {
        self.spaces_available
            .unwrap_or_else(|| self.spaces - self.spaces_busy.unwrap_or(0))
    }

    /// Aplicar um patch parcial por cima do plano
    pub fn apply_patch(&mut self, patch: PlanPatch) {
        if let Some(id) = patch.id {
            self.id = Some(id);
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(plan_type) = patch.plan_type {
            self.plan_type = plan_type;
        }
        if let Some(spaces) = patch.spaces {
            self.spaces = spaces;
        }
        if patch.spaces_busy.is_some() {
            self.spaces_busy = patch.spaces_busy;
        }
        if patch.spaces_available.is_some() {
            self.spaces_available = patch.spaces_available;
        }
        if let Some(value) = patch.value {
            self.value = value;
        }
        if patch.cancel_value.is_some() {
            self.cancel_value = patch.cancel_value;
        }
        if let Some(start_date) = patch.start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = patch.end_date {
            self.end_date = end_date;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

fn default_status() -> bool {
    true
}

// O backend às vezes devolve valores monetários como número JSON
fn decimal_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "valor monetário inválido: {}",
            other
        ))),
    }
}

fn optional_decimal_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = decimal_string(deserializer)?;
    Ok(if value.is_empty() { None } else { Some(value) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Plan {
        serde_json::from_value(json!({
            "id": 1,
            "description": "Mensal Carro",
            "type": "Carro",
            "spaces": 20,
            "spacesBusy": 5,
            "value": "150.00",
            "startDate": "2025-01-01",
            "endDate": "2025-12-31",
            "status": true
        }))
        .unwrap()
    }

    #[test]
    fn test_deserialize_plan_from_api() {
        let plan = sample();
        assert_eq!(plan.id, Some(1));
        assert_eq!(plan.plan_type, PlanType::Carro);
        assert_eq!(plan.value, "150.00");
        assert_eq!(plan.cancel_value, None);
        assert_eq!(plan.start_date, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    }

    #[test]
    fn test_numeric_money_is_accepted() {
        let plan: Plan = serde_json::from_value(json!({
            "id": 2,
            "description": "Moto",
            "type": "Moto",
            "spaces": 3,
            "value": 99.9,
            "cancelValue": 10,
            "startDate": "2025-01-01",
            "endDate": "2025-02-01"
        }))
        .unwrap();
        assert_eq!(plan.value, "99.9");
        assert_eq!(plan.cancel_value.as_deref(), Some("10"));
        assert!(plan.status);
    }

    #[test]
    fn test_spaces_available_defaults_to_difference() {
        let mut plan = sample();
        assert_eq!(plan.spaces_available_or_default(), 15);
        plan.spaces_available = Some(7);
        assert_eq!(plan.spaces_available_or_default(), 7);
    }

    #[test]
    fn test_apply_patch_only_touches_present_fields() {
        let mut plan = sample();
        plan.apply_patch(PlanPatch {
            description: Some("Mensal Premium".to_string()),
            status: Some(false),
            ..Default::default()
        });
        assert_eq!(plan.description, "Mensal Premium");
        assert!(!plan.status);
        assert_eq!(plan.spaces, 20);
        assert_eq!(plan.value, "150.00");
    }

    #[test]
    fn test_serialize_uses_wire_names() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["type"], "Carro");
        assert_eq!(value["startDate"], "2025-01-01");
        assert_eq!(value["spacesBusy"], 5);
        assert!(value.get("cancelValue").is_none());
    }
}
