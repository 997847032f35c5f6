//! Controlador do formulário de plano (modal de criar/editar)
//!
//! O estado do formulário é uma struct serializável com transições puras
//! (`reset`, `apply_field_change`, `apply_validation_result`). O controlador
//! valida no submit, monta o payload, chama a persistência e entrega o
//! plano resultante ao reconciliador (garagem aberta ou lista global).

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::config::environment::PlanFormConfig;
use crate::dto::plan_dto::PlanPayload;
use crate::models::plan::Plan;
use crate::models::plan_form::{FieldChange, FormMode, PlanField, PlanFormValues};
use crate::services::clock::Clock;
use crate::services::connectivity::ConnectivityProbe;
use crate::services::notifications::{Notifier, MSG_PLAN_CREATED, MSG_PLAN_UPDATED};
use crate::services::plan_persistence::{PlanPersistence, PlanScope, WriteRoute};
use crate::services::plan_reconciler::{GarageView, PlanList, SessionTicket};
use crate::utils::currency::{display_from_wire, format_currency, to_wire_decimal};
use crate::utils::errors::FailureKind;
use crate::utils::validation::{message_of, validate_plan_form, FieldErrors};

/// Estado completo do formulário
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanFormState {
    pub mode: FormMode,
    pub values: PlanFormValues,
    pub errors: BTreeMap<PlanField, String>,
    /// Plano original em edição (preserva ocupação no plano local)
    pub original: Option<Plan>,
    pub open: bool,
}

impl Default for PlanFormState {
    fn default() -> Self {
        Self {
            mode: FormMode::Create,
            values: PlanFormValues::default(),
            errors: BTreeMap::new(),
            original: None,
            open: false,
        }
    }
}

impl PlanFormState {
    /// Reabrir com valores padrão (criação) ou os do plano (edição)
    pub fn reset(&mut self, plan: Option<&Plan>) {
        self.errors.clear();
        self.open = true;

        match plan {
            Some(plan) => {
                self.values = PlanFormValues {
                    description: plan.description.clone(),
                    plan_type: plan.plan_type,
                    spaces: Some(plan.spaces),
                    value: display_from_wire(&plan.value),
                    cancel_value: plan
                        .cancel_value
                        .as_deref()
                        .map(display_from_wire)
                        .unwrap_or_default(),
                    start_date: Some(plan.start_date),
                    end_date: Some(plan.end_date),
                    status: plan.status,
                };
                self.mode = match plan.id {
                    Some(id) => FormMode::Edit { id },
                    None => FormMode::Create,
                };
                self.original = Some(plan.clone());
            }
            None => {
                self.values = PlanFormValues::default();
                self.mode = FormMode::Create;
                self.original = None;
            }
        }
    }

    /// Aplicar a edição de um campo; limpa só o erro desse campo
    pub fn apply_field_change(&mut self, change: FieldChange) {
        if let Some(field) = change.field() {
            self.errors.remove(&field);
        }
        match change {
            FieldChange::Description(description) => self.values.description = description,
            FieldChange::Type(plan_type) => self.values.plan_type = plan_type,
            FieldChange::Spaces(spaces) => self.values.spaces = spaces,
            FieldChange::Value(raw) => self.values.value = format_currency(&raw),
            FieldChange::CancelValue(raw) => self.values.cancel_value = format_currency(&raw),
            FieldChange::StartDate(date) => self.values.start_date = date,
            FieldChange::EndDate(date) => self.values.end_date = date,
            FieldChange::Status(status) => self.values.status = status,
        }
    }

    /// Substituir os erros pelos da validação; devolve `true` se válido
    pub fn apply_validation_result(&mut self, errors: &FieldErrors) -> bool {
        self.errors = errors
            .iter()
            .map(|(field, error)| (*field, message_of(error)))
            .collect();
        self.errors.is_empty()
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Payload de rede; `None` se faltar algum campo obrigatório
    pub fn build_payload(&self) -> Option<PlanPayload> {
        let cancel_value = to_wire_decimal(&self.values.cancel_value);
        Some(PlanPayload {
            id: match self.mode {
                FormMode::Edit { id } => Some(id),
                FormMode::Create => None,
            },
            description: self.values.description.trim().to_string(),
            plan_type: self.values.plan_type,
            spaces: self.values.spaces?,
            value: to_wire_decimal(&self.values.value),
            cancel_value: if cancel_value.is_empty() { None } else { Some(cancel_value) },
            start_date: self.values.start_date?,
            end_date: self.values.end_date?,
            status: self.values.status,
        })
    }
}

/// Resultado de um submit
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Formulário fechado; nada a fazer
    NotOpen,
    /// Validação bloqueou o envio (sem rede, sem toast)
    Invalid(FieldErrors),
    Saved { plan: Plan, route: WriteRoute },
    /// Falha persistindo; `plan` é o plano reconciliado otimisticamente
    Failed {
        kind: FailureKind,
        plan: Option<Plan>,
    },
}

pub struct PlanFormController {
    persistence: PlanPersistence,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    connectivity: Arc<dyn ConnectivityProbe>,
    config: PlanFormConfig,
    target: ReconcileTarget,
    ticket: Option<SessionTicket>,
    state: PlanFormState,
}

/// Dono da coleção que recebe o plano salvo
enum ReconcileTarget {
    Nothing,
    Garage(GarageView),
    List(PlanList),
}

impl PlanFormController {
    pub fn new(
        persistence: PlanPersistence,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
        connectivity: Arc<dyn ConnectivityProbe>,
        config: PlanFormConfig,
    ) -> Self {
        Self {
            persistence,
            notifier,
            clock,
            connectivity,
            config,
            target: ReconcileTarget::Nothing,
            ticket: None,
            state: PlanFormState::default(),
        }
    }

    /// Ligar o formulário à visão da garagem (fluxo por garagem)
    pub fn with_view(mut self, view: GarageView) -> Self {
        self.target = ReconcileTarget::Garage(view);
        self
    }

    /// Ligar o formulário a uma lista de planos (fluxo global)
    pub fn with_list(mut self, list: PlanList) -> Self {
        self.target = ReconcileTarget::List(list);
        self
    }

    pub fn state(&self) -> &PlanFormState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.open
    }

    /// Abrir em modo criação
    pub async fn open_create(&mut self) {
        self.open(None).await;
    }

    /// Abrir em modo edição com os valores do plano
    pub async fn open_edit(&mut self, plan: &Plan) {
        self.open(Some(plan)).await;
    }

    async fn open(&mut self, plan: Option<&Plan>) {
        self.ticket = match &self.target {
            ReconcileTarget::Garage(view) => view.ticket().await,
            _ => None,
        };
        self.state.reset(plan);
        debug!(
            mode = ?self.state.mode,
            garage_code = ?self.garage_code(),
            "📝 Formulário de plano aberto"
        );
    }

    pub fn change(&mut self, change: FieldChange) {
        self.state.apply_field_change(change);
    }

    pub fn close(&mut self) {
        self.state.close();
    }

    fn garage_code(&self) -> Option<i64> {
        self.ticket.map(|t| t.garage_code)
    }

    /// Validar, persistir, reconciliar e fechar.
    ///
    /// Depois de passar na validação o formulário sempre fecha, com sucesso
    /// ou falha.
    pub async fn submit(&mut self) -> SubmitOutcome {
        if !self.state.open {
            return SubmitOutcome::NotOpen;
        }

        let mode = self.state.mode;
        let errors = validate_plan_form(&self.state.values, mode, self.clock.today());
        if !self.state.apply_validation_result(&errors) {
            debug!(fields = ?errors.keys().collect::<Vec<_>>(), "📝 Validação bloqueou o envio");
            return SubmitOutcome::Invalid(errors);
        }
        let payload = match self.state.build_payload() {
            Some(payload) => payload,
            None => return SubmitOutcome::Invalid(errors),
        };

        let scope = PlanScope::from(self.garage_code());
        let result = match mode {
            FormMode::Create => self.persistence.create(scope, &payload).await,
            FormMode::Edit { id } => self.persistence.update(scope, id, &payload).await,
        };

        let outcome = match result {
            Ok(saved) => {
                let plan = match saved.plan.filter(|p| p.id.is_some()) {
                    Some(plan) => self.keep_occupancy(plan),
                    None => self.local_plan(&payload),
                };
                self.notifier.success(match mode {
                    FormMode::Create => MSG_PLAN_CREATED,
                    FormMode::Edit { .. } => MSG_PLAN_UPDATED,
                });
                self.hand_to_reconciler(plan.clone()).await;
                SubmitOutcome::Saved {
                    plan,
                    route: saved.route,
                }
            }
            Err(e) => {
                let kind = FailureKind::classify(&e, self.connectivity.is_online());
                error!(
                    garage_code = ?scope.garage_code(),
                    plan_id = ?payload.id,
                    ?payload,
                    error = %e,
                    ?kind,
                    "❌ Falha ao salvar plano"
                );
                self.notifier.error(kind.user_message());

                let plan = if self.config.optimistic_reconciliation_on_failure {
                    let plan = self.local_plan(&payload);
                    self.hand_to_reconciler(plan.clone()).await;
                    Some(plan)
                } else {
                    None
                };
                SubmitOutcome::Failed { kind, plan }
            }
        };

        self.state.close();
        outcome
    }

    // Plano local: payload + id (o da edição ou um provisório)
    fn local_plan(&self, payload: &PlanPayload) -> Plan {
        let id = payload.id.unwrap_or_else(|| self.clock.synthetic_id());
        self.keep_occupancy(payload.to_plan(id))
    }

    // Contadores de ocupação ausentes vêm do plano original
    fn keep_occupancy(&self, mut plan: Plan) -> Plan {
        if let Some(original) = &self.state.original {
            if plan.spaces_busy.is_none() {
                plan.spaces_busy = original.spaces_busy;
            }
            if plan.spaces_available.is_none() {
                plan.spaces_available = original.spaces_available;
            }
        }
        plan
    }

    async fn hand_to_reconciler(&self, plan: Plan) {
        match (&self.target, &self.ticket) {
            (ReconcileTarget::Garage(view), Some(ticket)) => {
                view.apply(ticket, plan).await;
            }
            (ReconcileTarget::List(list), _) => {
                list.apply(plan).await;
            }
            _ => info!(plan_id = ?plan.id, "ℹ️ Plano salvo sem coleção aberta"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::plan::PlanType;
    use crate::utils::validation::validate_plan_form;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn existing_plan() -> Plan {
        Plan {
            id: Some(1),
            description: "Mensal".to_string(),
            plan_type: PlanType::Moto,
            spaces: 30,
            spaces_busy: Some(10),
            spaces_available: Some(20),
            value: "1500.5".to_string(),
            cancel_value: Some("50.00".to_string()),
            start_date: date(2020, 1, 1),
            end_date: date(2020, 12, 31),
            status: false,
        }
    }

    #[test]
    fn test_reset_for_create_uses_defaults() {
        let mut state = PlanFormState::default();
        state.errors.insert(PlanField::Description, "x".to_string());
        state.reset(None);

        assert!(state.open);
        assert_eq!(state.mode, FormMode::Create);
        assert_eq!(state.values, PlanFormValues::default());
        assert!(state.errors.is_empty());
    }

    #[test]
    fn test_reset_for_edit_formats_money_for_display() {
        let mut state = PlanFormState::default();
        state.reset(Some(&existing_plan()));

        assert_eq!(state.mode, FormMode::Edit { id: 1 });
        assert_eq!(state.values.value, "1.500,50");
        assert_eq!(state.values.cancel_value, "50,00");
        assert_eq!(state.values.plan_type, PlanType::Moto);
        assert!(!state.values.status);
    }

    #[test]
    fn test_field_change_clears_only_that_error() {
        let mut state = PlanFormState::default();
        state.reset(None);
        let errors = validate_plan_form(&state.values, state.mode, date(2026, 10, 19));
        assert!(!state.apply_validation_result(&errors));
        assert!(state.errors.contains_key(&PlanField::Value));

        state.apply_field_change(FieldChange::Value("1234".to_string()));
        assert_eq!(state.values.value, "12,34");
        assert!(!state.errors.contains_key(&PlanField::Value));
        assert!(state.errors.contains_key(&PlanField::Description));
    }

    #[test]
    fn test_type_change_does_not_touch_errors() {
        let mut state = PlanFormState::default();
        state.errors.insert(PlanField::Spaces, "erro".to_string());
        state.apply_field_change(FieldChange::Type(PlanType::Moto));
        assert_eq!(state.errors.len(), 1);
    }

    #[test]
    fn test_build_payload_converts_money_and_strips_id_on_create() {
        let mut state = PlanFormState::default();
        state.reset(None);
        state.apply_field_change(FieldChange::Description("Plano Teste".to_string()));
        state.apply_field_change(FieldChange::Spaces(Some(10)));
        state.apply_field_change(FieldChange::Value("1234".to_string()));
        state.apply_field_change(FieldChange::StartDate(Some(date(2099, 1, 1))));
        state.apply_field_change(FieldChange::EndDate(Some(date(2099, 12, 31))));

        let payload = state.build_payload().unwrap();
        assert_eq!(payload.id, None);
        assert_eq!(payload.value, "12.34");
        assert_eq!(payload.cancel_value, None);
        assert_eq!(payload.spaces, 10);
    }

    #[test]
    fn test_build_payload_keeps_id_on_edit() {
        let mut state = PlanFormState::default();
        state.reset(Some(&existing_plan()));
        let payload = state.build_payload().unwrap();
        assert_eq!(payload.id, Some(1));
        assert_eq!(payload.value, "1500.50");
        assert_eq!(payload.cancel_value.as_deref(), Some("50.00"));
    }

    #[test]
    fn test_state_is_serializable() {
        let mut state = PlanFormState::default();
        state.reset(Some(&existing_plan()));
        let json = serde_json::to_string(&state).unwrap();
        let back: PlanFormState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
