//! Utilidades do sistema
//!
//! Este módulo contém utilidades para tratamento de erros, validação
//! do formulário de plano e formatação de moeda.

pub mod currency;
pub mod errors;
pub mod validation;
