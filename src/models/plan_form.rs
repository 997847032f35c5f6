//! Valores do formulário de plano
//!
//! Representação de edição (valores monetários já formatados para exibição)
//! compartilhada entre o validador e o controlador do formulário.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::plan::PlanType;

/// Modo do formulário
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: i64 },
}

impl FormMode {
    pub fn is_create(&self) -> bool {
        matches!(self, FormMode::Create)
    }
}

/// Campos validados do formulário
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "camelCase")]
pub enum PlanField {
    Description,
    Spaces,
    Value,
    CancelValue,
    StartDate,
    EndDate,
}

impl PlanField {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanField::Description => "description",
            PlanField::Spaces => "spaces",
            PlanField::Value => "value",
            PlanField::CancelValue => "cancelValue",
            PlanField::StartDate => "startDate",
            PlanField::EndDate => "endDate",
        }
    }
}

/// Valores correntes do formulário
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanFormValues {
    pub description: String,
    pub plan_type: PlanType,
    pub spaces: Option<i64>,
    /// Formato de exibição, ex. `"1.234,56"`
    pub value: String,
    pub cancel_value: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: bool,
}

impl Default for PlanFormValues {
    fn default() -> Self {
        Self {
            description: String::new(),
            plan_type: PlanType::Carro,
            spaces: None,
            value: String::new(),
            cancel_value: String::new(),
            start_date: None,
            end_date: None,
            status: true,
        }
    }
}

/// Alteração de um único campo vinda da UI
#[derive(Debug, Clone, PartialEq)]
pub enum FieldChange {
    Description(String),
    Type(PlanType),
    Spaces(Option<i64>),
    /// Texto cru digitado; é reformatado como moeda
    Value(String),
    CancelValue(String),
    StartDate(Option<NaiveDate>),
    EndDate(Option<NaiveDate>),
    Status(bool),
}

impl FieldChange {
    /// Campo validado afetado pela alteração (tipo e status não são validados)
    pub fn field(&self) -> Option<PlanField> {
        match self {
            FieldChange::Description(_) => Some(PlanField::Description),
            FieldChange::Spaces(_) => Some(PlanField::Spaces),
            FieldChange::Value(_) => Some(PlanField::Value),
            FieldChange::CancelValue(_) => Some(PlanField::CancelValue),
            FieldChange::StartDate(_) => Some(PlanField::StartDate),
            FieldChange::EndDate(_) => Some(PlanField::EndDate),
            FieldChange::Type(_) | FieldChange::Status(_) => None,
        }
    }
}
