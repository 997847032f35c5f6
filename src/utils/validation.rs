//! Validação do formulário de plano
//!
//! Funções puras por campo. Cada uma devolve `Ok(())` ou um
//! `ValidationError` com código estável e mensagem legível em português;
//! `validate_plan_form` junta tudo num mapa campo -> erro.

use std::borrow::Cow;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use validator::{ValidationError, ValidationErrors};

use crate::models::plan_form::{FormMode, PlanField, PlanFormValues};
use crate::utils::currency::parse_formatted;

pub const REQUIRED: &str = "required";
pub const TOO_SHORT: &str = "too_short";
pub const NOT_POSITIVE: &str = "not_positive";
pub const TOO_LARGE: &str = "too_large";
pub const END_BEFORE_START: &str = "end_before_start";
pub const START_IN_PAST: &str = "start_in_past";

pub const DESCRIPTION_MIN_LEN: usize = 3;
pub const MAX_SPACES: i64 = 1000;
const MAX_MONEY_INTEGER_DIGITS: usize = 5;

/// Erros por campo; vazio significa formulário válido
pub type FieldErrors = BTreeMap<PlanField, ValidationError>;

fn field_error(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

/// Limite superior de valores monetários (99.999,99)
pub fn max_money() -> Decimal {
    Decimal::new(9_999_999, 2)
}

/// Descrição: obrigatória, ao menos 3 caracteres sem espaços nas pontas
pub fn validate_description(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(field_error(REQUIRED, "Descrição é obrigatória"));
    }
    let len = trimmed.chars().count();
    if len < DESCRIPTION_MIN_LEN {
        let mut error = field_error(TOO_SHORT, "Descrição deve ter pelo menos 3 caracteres");
        error.add_param("min".into(), &DESCRIPTION_MIN_LEN);
        error.add_param("actual".into(), &len);
        return Err(error);
    }
    Ok(())
}

/// Vagas: maior que zero e no máximo 1000
pub fn validate_spaces(value: Option<i64>) -> Result<(), ValidationError> {
    let spaces = value.unwrap_or(0);
    validate_positive(spaces)
        .map_err(|_| field_error(NOT_POSITIVE, "Número de vagas deve ser maior que zero"))?;
    if spaces > MAX_SPACES {
        let mut error = field_error(TOO_LARGE, "Número de vagas não pode exceder 1000");
        error.add_param("max".into(), &MAX_SPACES);
        return Err(error);
    }
    Ok(())
}

/// Valor monetário no formato de exibição.
///
/// `label` entra na mensagem ("Valor", "Valor de cancelamento"). Campo vazio
/// só é aceito quando `required` é falso.
pub fn validate_money(display: &str, label: &str, required: bool) -> Result<(), ValidationError> {
    if display.trim().is_empty() && !required {
        return Ok(());
    }
    if integer_digits(display) > MAX_MONEY_INTEGER_DIGITS {
        return Err(too_large_money(label));
    }
    let amount = parse_formatted(display).unwrap_or(Decimal::ZERO);
    if validate_positive(amount).is_err() {
        return Err(field_error(NOT_POSITIVE, format!("{} deve ser maior que zero", label)));
    }
    if amount > max_money() {
        return Err(too_large_money(label));
    }
    Ok(())
}

fn too_large_money(label: &str) -> ValidationError {
    let mut error = field_error(TOO_LARGE, format!("{} não pode exceder R$ 99.999,99", label));
    error.add_param("max".into(), &max_money().to_string());
    error
}

// Dígitos significativos da parte inteira; não depende do limite do Decimal
fn integer_digits(display: &str) -> usize {
    let integer = display.split(',').next().unwrap_or_default();
    integer
        .chars()
        .filter(|c| c.is_ascii_digit())
        .skip_while(|c| *c == '0')
        .count()
}

/// Data inicial: obrigatória; na criação não pode estar no passado
pub fn validate_start_date(
    start: Option<NaiveDate>,
    mode: FormMode,
    today: NaiveDate,
) -> Result<(), ValidationError> {
    let start = start.ok_or_else(|| field_error(REQUIRED, "Data de início é obrigatória"))?;
    if mode.is_create() && start < today {
        let mut error = field_error(START_IN_PAST, "Data de início não pode ser anterior a hoje");
        error.add_param("today".into(), &today.to_string());
        return Err(error);
    }
    Ok(())
}

/// Data final: obrigatória e estritamente depois da inicial
pub fn validate_end_date(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<(), ValidationError> {
    let end = end.ok_or_else(|| field_error(REQUIRED, "Data de término é obrigatória"))?;
    if let Some(start) = start {
        if end <= start {
            let mut error = field_error(
                END_BEFORE_START,
                "Data de término deve ser posterior à data de início",
            );
            error.add_param("start".into(), &start.to_string());
            return Err(error);
        }
    }
    Ok(())
}

/// Validar um valor positivo
pub fn validate_positive<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value <= T::zero() {
        let mut error = ValidationError::new("positive");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar o formulário inteiro (executado uma vez, no submit)
pub fn validate_plan_form(values: &PlanFormValues, mode: FormMode, today: NaiveDate) -> FieldErrors {
    let checks = [
        (PlanField::Description, validate_description(&values.description)),
        (PlanField::Spaces, validate_spaces(values.spaces)),
        (PlanField::Value, validate_money(&values.value, "Valor", true)),
        (
            PlanField::CancelValue,
            validate_money(&values.cancel_value, "Valor de cancelamento", false),
        ),
        (
            PlanField::StartDate,
            validate_start_date(values.start_date, mode, today),
        ),
        (
            PlanField::EndDate,
            validate_end_date(values.start_date, values.end_date),
        ),
    ];

    checks
        .into_iter()
        .filter_map(|(field, result)| result.err().map(|e| (field, e)))
        .collect()
}

/// Converter para `ValidationErrors` do crate validator
pub fn to_validation_errors(errors: &FieldErrors) -> ValidationErrors {
    let mut all = ValidationErrors::new();
    for (field, error) in errors {
        all.add(field.as_str(), error.clone());
    }
    all
}

/// Mensagem exibida para um erro de campo
pub fn message_of(error: &ValidationError) -> String {
    error
        .message
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| error.code.to_string())
}
