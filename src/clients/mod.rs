//! Clients - HTTP Clients for External APIs
//!
//! Este módulo contém o cliente HTTP da API REST SmartPark.

pub mod smartpark_client;

pub use smartpark_client::{plan_from_body, PlanApi, SmartParkClient};
