//! Reconciliação em memória dos planos da garagem
//!
//! `reconcile` é o único caminho de mutação da coleção de planos: substitui
//! a entrada de mesmo id ou anexa no final. `GarageView` é o dono da
//! coleção enquanto uma garagem está aberta; ao fechar, tudo é descartado.
//! `PlanList` guarda os planos do fluxo global.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::clients::PlanApi;
use crate::models::garage::Garage;
use crate::models::plan::Plan;
use crate::utils::errors::ApiError;

/// Efeito da reconciliação sobre a coleção
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciled {
    Replaced(usize),
    Appended,
}

/// Substituir por id ou anexar no final
pub fn reconcile(plans: &mut Vec<Plan>, incoming: Plan) -> Reconciled {
    let position = incoming
        .id
        .and_then(|id| plans.iter().position(|p| p.id == Some(id)));

    match position {
        Some(index) => {
            plans[index] = incoming;
            Reconciled::Replaced(index)
        }
        None => {
            plans.push(incoming);
            Reconciled::Appended
        }
    }
}

/// Identifica uma abertura específica da visão da garagem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTicket {
    pub garage_code: i64,
    generation: u64,
}

#[derive(Debug, Default)]
struct ViewState {
    garage: Option<Garage>,
    generation: u64,
}

/// Visão da garagem carregada (drawer de detalhes)
#[derive(Clone, Default)]
pub struct GarageView {
    state: Arc<RwLock<ViewState>>,
}

impl GarageView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buscar a garagem e abrir a visão com seus planos
    pub async fn open(&self, api: &dyn PlanApi, code: i64) -> Result<SessionTicket, ApiError> {
        let garage = api.get_garage(code).await?;
        Ok(self.open_with(garage).await)
    }

    /// Abrir a visão com uma garagem já carregada
    pub async fn open_with(&self, garage: Garage) -> SessionTicket {
        let mut state = self.state.write().await;
        state.generation += 1;
        let ticket = SessionTicket {
            garage_code: garage.code,
            generation: state.generation,
        };
        info!(garage_code = garage.code, plans = garage.plans.len(), "🏢 Garagem aberta");
        state.garage = Some(garage);
        ticket
    }

    /// Recarregar do servidor (ação explícita do chamador)
    pub async fn reload(&self, api: &dyn PlanApi) -> Result<(), ApiError> {
        let code = match self.garage_code().await {
            Some(code) => code,
            None => return Ok(()),
        };
        let garage = api.get_garage(code).await?;

        let mut state = self.state.write().await;
        match state.garage.as_mut() {
            Some(current) if current.code == code => {
                debug!(garage_code = code, plans = garage.plans.len(), "🔄 Garagem recarregada");
                *current = garage;
            }
            _ => warn!(garage_code = code, "⚠️ Recarga descartada: a garagem foi fechada"),
        }
        Ok(())
    }

    /// Fechar a visão e descartar os planos
    pub async fn close(&self) {
        let mut state = self.state.write().await;
        if let Some(garage) = state.garage.take() {
            info!(garage_code = garage.code, "🚪 Garagem fechada");
        }
        state.generation += 1;
    }

    /// Ticket da abertura atual, se houver garagem aberta
    pub async fn ticket(&self) -> Option<SessionTicket> {
        let state = self.state.read().await;
        state.garage.as_ref().map(|garage| SessionTicket {
            garage_code: garage.code,
            generation: state.generation,
        })
    }

    /// Reconciliar um plano na coleção aberta.
    ///
    /// Devolve `None` quando o ticket não corresponde mais à abertura atual
    /// (visão fechada ou reaberta); o plano é descartado.
    pub async fn apply(&self, ticket: &SessionTicket, plan: Plan) -> Option<Reconciled> {
        let mut state = self.state.write().await;
        let generation = state.generation;
        match state.garage.as_mut() {
            Some(garage) if generation == ticket.generation => {
                let plan_id = plan.id;
                let effect = reconcile(&mut garage.plans, plan);
                debug!(garage_code = garage.code, ?plan_id, ?effect, "🔁 Plano reconciliado");
                Some(effect)
            }
            _ => {
                warn!(
                    garage_code = ticket.garage_code,
                    plan_id = ?plan.id,
                    "⚠️ Plano descartado: a garagem não está mais aberta"
                );
                None
            }
        }
    }

    pub async fn garage(&self) -> Option<Garage> {
        self.state.read().await.garage.clone()
    }

    pub async fn garage_code(&self) -> Option<i64> {
        self.state.read().await.garage.as_ref().map(|g| g.code)
    }

    /// Planos na ordem atual; vazio se fechada
    pub async fn plans(&self) -> Vec<Plan> {
        self.state
            .read()
            .await
            .garage
            .as_ref()
            .map(|g| g.plans.clone())
            .unwrap_or_default()
    }
}

/// Lista de planos fora do contexto de uma garagem (fluxo global)
#[derive(Clone, Default)]
pub struct PlanList {
    plans: Arc<RwLock<Vec<Plan>>>,
}

impl PlanList {
    pub fn new(plans: Vec<Plan>) -> Self {
        Self {
            plans: Arc::new(RwLock::new(plans)),
        }
    }

    pub async fn apply(&self, plan: Plan) -> Reconciled {
        reconcile(&mut *self.plans.write().await, plan)
    }

    pub async fn plans(&self) -> Vec<Plan> {
        self.plans.read().await.clone()
    }
}
