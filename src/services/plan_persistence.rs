//! Persistência de planos
//!
//! Escolhe entre a superfície global (`/plans`) e a da garagem
//! (`/garages/{code}/plans`). Na atualização pela garagem, um "não
//! encontrado" leva ao endpoint global; qualquer outra falha sobe direto.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::clients::PlanApi;
use crate::dto::plan_dto::PlanPayload;
use crate::models::plan::Plan;
use crate::utils::errors::{ApiError, PersistenceError};

const MSG_UPDATE_REJECTED: &str = "Falha ao atualizar plano";

/// Contexto da escrita: com ou sem garagem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanScope {
    Global,
    Garage(i64),
}

impl From<Option<i64>> for PlanScope {
    fn from(code: Option<i64>) -> Self {
        code.map(PlanScope::Garage).unwrap_or(PlanScope::Global)
    }
}

impl PlanScope {
    pub fn garage_code(&self) -> Option<i64> {
        match self {
            PlanScope::Global => None,
            PlanScope::Garage(code) => Some(*code),
        }
    }
}

/// Endpoint que efetivamente gravou o plano
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteRoute {
    Global,
    Garage,
    /// Garagem respondeu "não encontrado"; gravado pelo endpoint global
    GlobalFallback,
}

/// Resultado de uma escrita bem-sucedida
#[derive(Debug, Clone, PartialEq)]
pub struct SavedPlan {
    /// Plano devolvido (ou mesclado); `None` se o servidor não trouxe um com id
    pub plan: Option<Plan>,
    pub route: WriteRoute,
}

#[derive(Clone)]
pub struct PlanPersistence {
    api: Arc<dyn PlanApi>,
}

impl PlanPersistence {
    pub fn new(api: Arc<dyn PlanApi>) -> Self {
        Self { api }
    }

    /// Criar plano no endpoint do escopo
    pub async fn create(
        &self,
        scope: PlanScope,
        payload: &PlanPayload,
    ) -> Result<SavedPlan, PersistenceError> {
        let garage_code = scope.garage_code();
        info!(?garage_code, ?payload, "📤 Criando plano");

        let result = match scope {
            PlanScope::Global => self
                .api
                .create_plan(payload)
                .await
                .map(|plan| SavedPlan { plan, route: WriteRoute::Global }),
            PlanScope::Garage(code) => self
                .api
                .create_garage_plan(code, payload)
                .await
                .map(|plan| SavedPlan { plan, route: WriteRoute::Garage }),
        };

        match result {
            Ok(saved) => {
                let plan_id = saved.plan.as_ref().and_then(|p| p.id);
                info!(?garage_code, ?plan_id, route = ?saved.route, "✅ Plano criado");
                Ok(saved)
            }
            Err(e) => {
                error!(?garage_code, ?payload, error = %e, "❌ Erro ao criar plano");
                Err(e.into())
            }
        }
    }

    /// Atualizar plano; no escopo da garagem tenta primeiro o endpoint dela
    pub async fn update(
        &self,
        scope: PlanScope,
        id: i64,
        payload: &PlanPayload,
    ) -> Result<SavedPlan, PersistenceError> {
        let garage_code = scope.garage_code();
        info!(?garage_code, plan_id = id, ?payload, "📤 Atualizando plano");

        let result = match scope {
            PlanScope::Global => self
                .try_global(id, payload)
                .await
                .map(|plan| SavedPlan { plan, route: WriteRoute::Global })
                .map_err(PersistenceError::from),
            PlanScope::Garage(code) => match self.try_scoped(code, id, payload).await {
                Ok(plan) => Ok(SavedPlan {
                    plan: Some(plan),
                    route: WriteRoute::Garage,
                }),
                Err(scoped) if scoped.is_not_found() => self.on_not_found(scoped, id, payload).await,
                Err(scoped) => Err(scoped.into()),
            },
        };

        match &result {
            Ok(saved) => info!(?garage_code, plan_id = id, route = ?saved.route, "✅ Plano atualizado"),
            Err(e) => error!(?garage_code, plan_id = id, ?payload, error = %e, "❌ Erro ao atualizar plano"),
        }
        result
    }

    /// `PUT /garages/{code}/plans/{id}`, mesclando o patch `updated` no payload
    pub async fn try_scoped(&self, code: i64, id: i64, payload: &PlanPayload) -> Result<Plan, ApiError> {
        let response = self.api.update_garage_plan(code, id, payload).await?;

        if !response.success {
            let message = if response.message.trim().is_empty() {
                MSG_UPDATE_REJECTED.to_string()
            } else {
                response.message
            };
            return Err(match response.http_code {
                Some(404) => ApiError::NotFound(message),
                _ => ApiError::UpdateRejected(message),
            });
        }

        let mut plan = payload.to_plan(id);
        if let Some(patch) = response.updated {
            plan.apply_patch(patch);
        }
        Ok(plan)
    }

    /// `PUT /plans/{id}`
    pub async fn try_global(&self, id: i64, payload: &PlanPayload) -> Result<Option<Plan>, ApiError> {
        self.api.update_plan(id, payload).await
    }

    async fn on_not_found(
        &self,
        scoped: ApiError,
        id: i64,
        payload: &PlanPayload,
    ) -> Result<SavedPlan, PersistenceError> {
        warn!(plan_id = id, error = %scoped, "⚠️ Endpoint da garagem não encontrado, usando endpoint global");
        match self.try_global(id, payload).await {
            Ok(plan) => Ok(SavedPlan {
                plan,
                route: WriteRoute::GlobalFallback,
            }),
            Err(global) => Err(PersistenceError::EndpointsUnavailable { scoped, global }),
        }
    }
}
