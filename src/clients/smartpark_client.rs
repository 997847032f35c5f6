//! Cliente HTTP para a API SmartPark
//!
//! Este módulo contém o trait `PlanApi` (a superfície REST consumida pelo
//! painel) e a implementação com `reqwest`.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::config::environment::EnvironmentConfig;
use crate::dto::plan_dto::{GarageScopedUpdateResponse, PlanPayload};
use crate::models::garage::{Garage, GarageFilters};
use crate::models::plan::{Plan, PlanPatch};
use crate::utils::errors::{ApiError, AppResult};

/// Superfície REST de garagens e planos
#[async_trait]
pub trait PlanApi: Send + Sync {
    /// `GET /garages`
    async fn list_garages(&self, filters: &GarageFilters) -> Result<Vec<Garage>, ApiError>;

    /// `GET /garages/{code}`
    async fn get_garage(&self, code: i64) -> Result<Garage, ApiError>;

    /// `POST /plans`; `None` quando o corpo não traz um plano com id
    async fn create_plan(&self, payload: &PlanPayload) -> Result<Option<Plan>, ApiError>;

    /// `POST /garages/{code}/plans`
    async fn create_garage_plan(
        &self,
        code: i64,
        payload: &PlanPayload,
    ) -> Result<Option<Plan>, ApiError>;

    /// `PUT /plans/{id}`
    async fn update_plan(&self, id: i64, payload: &PlanPayload) -> Result<Option<Plan>, ApiError>;

    /// `PUT /garages/{code}/plans/{id}`
    async fn update_garage_plan(
        &self,
        code: i64,
        id: i64,
        payload: &PlanPayload,
    ) -> Result<GarageScopedUpdateResponse, ApiError>;
}

/// Cliente HTTP para a API SmartPark
#[derive(Clone)]
pub struct SmartParkClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl SmartParkClient {
    /// Criar cliente a partir da configuração
    pub fn new(config: &EnvironmentConfig) -> AppResult<Self> {
        let client = Client::builder().timeout(config.http_timeout()).build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
            token: config.api_token.clone(),
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self
            .client
            .request(method, url)
            .header("Accept", "application/json");
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send_value(&self, builder: RequestBuilder) -> Result<Value, ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        debug!("📡 SmartPark response status: {}", status);

        if !status.is_success() {
            return Err(ApiError::from_status(status, body));
        }
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let value = self.send_value(builder).await?;
        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Plano gravado a partir do corpo da resposta.
///
/// Sem id no corpo devolve `None`. Com id, um corpo parcial é mesclado
/// sobre o payload enviado, preservando o id do servidor.
pub fn plan_from_body(body: Value, payload: &PlanPayload) -> Option<Plan> {
    let id = body.get("id").and_then(|id| match id {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })?;

    if let Ok(plan) = serde_json::from_value::<Plan>(body.clone()) {
        return Some(plan);
    }

    let mut plan = payload.to_plan(id);
    match serde_json::from_value::<PlanPatch>(body) {
        Ok(patch) => plan.apply_patch(PlanPatch { id: Some(id), ..patch }),
        Err(e) => debug!("📡 Corpo parcial sem campos de plano legíveis: {}", e),
    }
    Some(plan)
}

#[async_trait]
impl PlanApi for SmartParkClient {
    async fn list_garages(&self, filters: &GarageFilters) -> Result<Vec<Garage>, ApiError> {
        let builder = self
            .request(Method::GET, "/garages")
            .query(&filters.query_pairs());
        self.send_json(builder).await
    }

    async fn get_garage(&self, code: i64) -> Result<Garage, ApiError> {
        let builder = self.request(Method::GET, &format!("/garages/{}", code));
        self.send_json(builder).await
    }

    async fn create_plan(&self, payload: &PlanPayload) -> Result<Option<Plan>, ApiError> {
        let builder = self.request(Method::POST, "/plans").json(payload);
        Ok(plan_from_body(self.send_value(builder).await?, payload))
    }

    async fn create_garage_plan(
        &self,
        code: i64,
        payload: &PlanPayload,
    ) -> Result<Option<Plan>, ApiError> {
        let builder = self
            .request(Method::POST, &format!("/garages/{}/plans", code))
            .json(payload);
        Ok(plan_from_body(self.send_value(builder).await?, payload))
    }

    async fn update_plan(&self, id: i64, payload: &PlanPayload) -> Result<Option<Plan>, ApiError> {
        let builder = self
            .request(Method::PUT, &format!("/plans/{}", id))
            .json(payload);
        Ok(plan_from_body(self.send_value(builder).await?, payload))
    }

    async fn update_garage_plan(
        &self,
        code: i64,
        id: i64,
        payload: &PlanPayload,
    ) -> Result<GarageScopedUpdateResponse, ApiError> {
        let builder = self
            .request(Method::PUT, &format!("/garages/{}/plans/{}", code, id))
            .json(payload);
        self.send_json(builder).await
    }
}
