//! Modelo de Garage
//!
//! A garagem é a raiz do agregado: dados descritivos, contadores de vagas
//! e a coleção ordenada de planos (ordem da resposta do servidor).

use serde::{Deserialize, Serialize};

use super::plan::Plan;

/// Garagem com planos embutidos - mapeia `GET /garages/{code}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Garage {
    pub code: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub uf: Option<String>,
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default)]
    pub regional: Option<String>,
    #[serde(default)]
    pub total_parking_space: i64,
    #[serde(default)]
    pub parking_space_busy: i64,
    #[serde(default)]
    pub parking_space_available: i64,
    #[serde(default)]
    pub digital_monthly_payer: Option<bool>,
    #[serde(default)]
    pub plans: Vec<Plan>,
}

/// Filtros da listagem de garagens
#[derive(Debug, Clone, Default)]
pub struct GarageFilters {
    pub search: Option<String>,
    pub digital_monthly_payer: Option<bool>,
}

impl GarageFilters {
    /// Parâmetros de query; só entram os filtros presentes
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(search) = self.search.as_deref().map(str::trim) {
            if !search.is_empty() {
                pairs.push(("search", search.to_string()));
            }
        }
        if let Some(flag) = self.digital_monthly_payer {
            pairs.push(("digitalMonthlyPayer", flag.to_string()));
        }
        pairs
    }
}
