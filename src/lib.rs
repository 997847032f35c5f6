//! SmartPark admin - núcleo do painel de garagens
//!
//! Validação e formatação do formulário de planos, persistência via API
//! REST SmartPark e reconciliação em memória dos planos da garagem aberta.

pub mod clients;
pub mod config;
pub mod controllers;
pub mod dto;
pub mod models;
pub mod services;
pub mod utils;
