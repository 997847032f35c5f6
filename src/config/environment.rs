//! Configuração de variáveis de ambiente
//!
//! Este módulo lê a configuração do cliente SmartPark a partir do ambiente
//! (com `.env` carregado pelo `dotenvy` no `main`).

use std::env;
use std::time::Duration;

use crate::utils::errors::{AppError, AppResult};

pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Configuração do ambiente
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub api_base_url: String,
    /// Token de sessão enviado como `Authorization: Bearer`
    pub api_token: Option<String>,
    pub http_timeout_secs: u64,
    pub optimistic_reconciliation_on_failure: bool,
}

/// Política do formulário de plano
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanFormConfig {
    /// Reconciliar o plano local mesmo quando o servidor falha
    pub optimistic_reconciliation_on_failure: bool,
}

impl Default for PlanFormConfig {
    fn default() -> Self {
        Self {
            optimistic_reconciliation_on_failure: true,
        }
    }
}

impl EnvironmentConfig {
    /// Carregar das variáveis de ambiente do processo
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Carregar a partir de uma função de busca (permite testar sem tocar no ambiente)
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup("SMARTPARK_API_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .ok_or_else(|| AppError::Config("SMARTPARK_API_URL must be set".to_string()))?;

        let http_timeout_secs = match lookup("SMARTPARK_HTTP_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                AppError::Config(format!(
                    "SMARTPARK_HTTP_TIMEOUT_SECS must be a valid number, got '{}'",
                    raw
                ))
            })?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        let optimistic_reconciliation_on_failure = match lookup("OPTIMISTIC_RECONCILIATION_ON_FAILURE") {
            Some(raw) => parse_flag(&raw).ok_or_else(|| {
                AppError::Config(format!(
                    "OPTIMISTIC_RECONCILIATION_ON_FAILURE must be true or false, got '{}'",
                    raw
                ))
            })?,
            None => true,
        };

        Ok(Self {
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            api_base_url,
            api_token: lookup("SMARTPARK_API_TOKEN").filter(|t| !t.trim().is_empty()),
            http_timeout_secs,
            optimistic_reconciliation_on_failure,
        })
    }

    /// Verificar se estamos em modo desenvolvimento
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar se estamos em modo produção
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn plan_form_config(&self) -> PlanFormConfig {
        PlanFormConfig {
            optimistic_reconciliation_on_failure: self.optimistic_reconciliation_on_failure,
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
