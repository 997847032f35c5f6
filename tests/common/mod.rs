#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Local, NaiveDate, TimeZone};

use smartpark_admin::clients::PlanApi;
use smartpark_admin::config::PlanFormConfig;
use smartpark_admin::controllers::PlanFormController;
use smartpark_admin::dto::plan_dto::{GarageScopedUpdateResponse, PlanPayload};
use smartpark_admin::models::garage::{Garage, GarageFilters};
use smartpark_admin::models::plan::{Plan, PlanType};
use smartpark_admin::services::{ConnectivityFlag, FixedClock, PlanPersistence, RecordingNotifier};
use smartpark_admin::utils::errors::ApiError;

/// Chamada registrada pela API falsa
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListGarages,
    GetGarage(i64),
    CreatePlan(PlanPayload),
    CreateGaragePlan(i64, PlanPayload),
    UpdatePlan(i64, PlanPayload),
    UpdateGaragePlan(i64, i64, PlanPayload),
}

/// API em memória com respostas configuráveis
pub struct FakePlanApi {
    pub calls: Mutex<Vec<Call>>,
    pub garage: Mutex<Option<Garage>>,
    pub create_result: Mutex<Result<Option<Plan>, ApiError>>,
    pub update_result: Mutex<Result<Option<Plan>, ApiError>>,
    pub scoped_update_result: Mutex<Result<GarageScopedUpdateResponse, ApiError>>,
}

impl Default for FakePlanApi {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            garage: Mutex::new(None),
            create_result: Mutex::new(Ok(None)),
            update_result: Mutex::new(Ok(None)),
            scoped_update_result: Mutex::new(Ok(scoped_success())),
        }
    }
}

impl FakePlanApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_garage(self, garage: Garage) -> Self {
        *self.garage.lock().unwrap() = Some(garage);
        self
    }

    pub fn on_create(self, result: Result<Option<Plan>, ApiError>) -> Self {
        *self.create_result.lock().unwrap() = result;
        self
    }

    pub fn on_update(self, result: Result<Option<Plan>, ApiError>) -> Self {
        *self.update_result.lock().unwrap() = result;
        self
    }

    pub fn on_scoped_update(self, result: Result<GarageScopedUpdateResponse, ApiError>) -> Self {
        *self.scoped_update_result.lock().unwrap() = result;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl PlanApi for FakePlanApi {
    async fn list_garages(&self, _filters: &GarageFilters) -> Result<Vec<Garage>, ApiError> {
        self.record(Call::ListGarages);
        Ok(self.garage.lock().unwrap().clone().into_iter().collect())
    }

    async fn get_garage(&self, code: i64) -> Result<Garage, ApiError> {
        self.record(Call::GetGarage(code));
        self.garage
            .lock()
            .unwrap()
            .clone()
            .filter(|g| g.code == code)
            .ok_or_else(|| ApiError::NotFound(format!("garage {}", code)))
    }

    async fn create_plan(&self, payload: &PlanPayload) -> Result<Option<Plan>, ApiError> {
        self.record(Call::CreatePlan(payload.clone()));
        self.create_result.lock().unwrap().clone()
    }

    async fn create_garage_plan(
        &self,
        code: i64,
        payload: &PlanPayload,
    ) -> Result<Option<Plan>, ApiError> {
        self.record(Call::CreateGaragePlan(code, payload.clone()));
        self.create_result.lock().unwrap().clone()
    }

    async fn update_plan(&self, id: i64, payload: &PlanPayload) -> Result<Option<Plan>, ApiError> {
        self.record(Call::UpdatePlan(id, payload.clone()));
        self.update_result.lock().unwrap().clone()
    }

    async fn update_garage_plan(
        &self,
        code: i64,
        id: i64,
        payload: &PlanPayload,
    ) -> Result<GarageScopedUpdateResponse, ApiError> {
        self.record(Call::UpdateGaragePlan(code, id, payload.clone()));
        self.scoped_update_result.lock().unwrap().clone()
    }
}

pub fn scoped_success() -> GarageScopedUpdateResponse {
    GarageScopedUpdateResponse {
        success: true,
        message: "Plano atualizado".to_string(),
        updated: None,
        http_code: None,
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Relógio fixo em 2026-10-19 12:00 (hora local)
pub fn fixed_clock() -> FixedClock {
    FixedClock(Local.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap())
}

pub fn plan(id: i64, description: &str) -> Plan {
    Plan {
        id: Some(id),
        description: description.to_string(),
        plan_type: PlanType::Carro,
        spaces: 20,
        spaces_busy: Some(5),
        spaces_available: Some(15),
        value: "150.00".to_string(),
        cancel_value: None,
        start_date: date(2026, 1, 1),
        end_date: date(2026, 12, 31),
        status: true,
    }
}

pub fn garage(code: i64, plans: Vec<Plan>) -> Garage {
    Garage {
        code,
        name: "Garagem Centro".to_string(),
        address: Some("Rua Augusta, 100".to_string()),
        city: Some("São Paulo".to_string()),
        uf: Some("SP".to_string()),
        branch: None,
        regional: None,
        total_parking_space: 100,
        parking_space_busy: 40,
        parking_space_available: 60,
        digital_monthly_payer: Some(true),
        plans,
    }
}

/// Dependências do controlador montadas para os testes
pub struct Harness {
    pub api: Arc<FakePlanApi>,
    pub notifier: Arc<RecordingNotifier>,
    pub connectivity: Arc<ConnectivityFlag>,
}

impl Harness {
    pub fn new(api: FakePlanApi) -> Self {
        Self {
            api: Arc::new(api),
            notifier: Arc::new(RecordingNotifier::new()),
            connectivity: Arc::new(ConnectivityFlag::default()),
        }
    }

    pub fn controller(&self) -> PlanFormController {
        self.controller_with(PlanFormConfig::default())
    }

    pub fn controller_with(&self, config: PlanFormConfig) -> PlanFormController {
        PlanFormController::new(
            PlanPersistence::new(self.api.clone()),
            self.notifier.clone(),
            Arc::new(fixed_clock()),
            self.connectivity.clone(),
            config,
        )
    }

    /// Mensagens dos toasts emitidos até agora
    pub fn messages(&self) -> Vec<String> {
        self.notifier
            .take()
            .into_iter()
            .map(|n| n.message)
            .collect()
    }
}
