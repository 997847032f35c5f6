//! Configuração do projeto
//!
//! Este módulo contém as variáveis de ambiente e a política do
//! formulário de plano.

pub mod environment;

pub use environment::*;
