//! Sistema de tratamento de erros
//!
//! Este módulo define os erros da aplicação, os erros de transporte da API
//! SmartPark e a classificação de falhas em mensagens para o usuário.

use http::StatusCode;
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

/// Erros principais da aplicação
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Resultado tipado para operações que podem falhar
pub type AppResult<T> = Result<T, AppError>;

/// Falha de uma única chamada REST
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Network Error: {0}")]
    Network(String),

    #[error("timeout: {0}")]
    Timeout(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("HTTP {status}: {body}")]
    Http { status: StatusCode, body: String },

    #[error("Request error: {0}")]
    Request(String),

    #[error("Invalid response body: {0}")]
    Decode(String),

    /// `success: false` numa resposta bem formada
    #[error("{0}")]
    UpdateRejected(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }

    /// Erro a partir de um status HTTP sem sucesso
    pub fn from_status(status: StatusCode, body: String) -> Self {
        if status == StatusCode::NOT_FOUND {
            ApiError::NotFound(body)
        } else {
            ApiError::Http { status, body }
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout(e.to_string())
        } else if e.is_connect() {
            ApiError::Network(e.to_string())
        } else if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            ApiError::from_status(status, e.to_string())
        } else {
            ApiError::Request(e.to_string())
        }
    }
}

/// Falha do adaptador de persistência
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PersistenceError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Endpoint da garagem respondeu "não encontrado" e o global também falhou
    #[error("Falha ao atualizar plano. Endpoints não disponíveis. (garagem: {scoped}; global: {global})")]
    EndpointsUnavailable { scoped: ApiError, global: ApiError },
}

pub const MSG_NETWORK: &str = "Não foi possível conectar ao servidor. Verifique sua conexão.";
pub const MSG_TIMEOUT: &str = "Tempo limite excedido. Tente novamente.";
pub const MSG_TRANSPORT: &str = "Erro de comunicação com o servidor.";
pub const MSG_ENDPOINTS_UNAVAILABLE: &str = "Falha ao atualizar plano. Endpoints não disponíveis.";
pub const MSG_UNEXPECTED: &str = "Ocorreu um erro inesperado. Tente novamente.";

lazy_static! {
    static ref NETWORK_SIGNATURE: Regex = Regex::new(
        r"(?i)(network\s*error|failed to fetch|err_network|err_internet_disconnected|econnrefused|econnreset|connection refused|enotfound)"
    )
    .expect("network signature regex");
    static ref TIMEOUT_SIGNATURE: Regex = Regex::new(r"(?i)time\s*out|timed out").expect("timeout signature regex");
}

/// Categoria de falha mostrada ao usuário, em ordem de prioridade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Network,
    Timeout,
    Transport,
    EndpointsUnavailable,
    Unexpected,
}

impl FailureKind {
    /// Classificar uma falha de persistência.
    ///
    /// Sem conexão (`online == false`) tudo vira `Network`. Depois valem as
    /// assinaturas de rede e de timeout na mensagem, e só então o tipo do erro.
    pub fn classify(error: &PersistenceError, online: bool) -> Self {
        if !online {
            return FailureKind::Network;
        }
        match error {
            PersistenceError::Api(api) => Self::classify_api(api),
            PersistenceError::EndpointsUnavailable { global, .. } => match Self::classify_api(global) {
                kind @ (FailureKind::Network | FailureKind::Timeout) => kind,
                _ => FailureKind::EndpointsUnavailable,
            },
        }
    }

    fn classify_api(error: &ApiError) -> Self {
        match error {
            ApiError::Network(_) => FailureKind::Network,
            ApiError::Timeout(_) => FailureKind::Timeout,
            other => {
                let message = other.to_string();
                if NETWORK_SIGNATURE.is_match(&message) {
                    FailureKind::Network
                } else if TIMEOUT_SIGNATURE.is_match(&message) {
                    FailureKind::Timeout
                } else {
                    match other {
                        ApiError::NotFound(_) | ApiError::Http { .. } | ApiError::Request(_) => {
                            FailureKind::Transport
                        }
                        _ => FailureKind::Unexpected,
                    }
                }
            }
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            FailureKind::Network => MSG_NETWORK,
            FailureKind::Timeout => MSG_TIMEOUT,
            FailureKind::Transport => MSG_TRANSPORT,
            FailureKind::EndpointsUnavailable => MSG_ENDPOINTS_UNAVAILABLE,
            FailureKind::Unexpected => MSG_UNEXPECTED,
        }
    }
}
