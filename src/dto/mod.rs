pub mod plan_dto;
