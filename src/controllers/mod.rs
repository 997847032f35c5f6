pub mod plan_form_controller;

pub use plan_form_controller::{PlanFormController, PlanFormState, SubmitOutcome};
