//! Modelos do sistema
//!
//! Este módulo contém as entidades de domínio do painel SmartPark:
//! garagens, planos e os valores do formulário de plano.

pub mod garage;
pub mod plan;
pub mod plan_form;
