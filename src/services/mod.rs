//! Services module
//!
//! Este módulo contém a lógica de negócio do formulário de planos:
//! persistência via API, reconciliação em memória, notificações e os
//! colaboradores de ambiente (relógio e conectividade).

pub mod clock;
pub mod connectivity;
pub mod notifications;
pub mod plan_persistence;
pub mod plan_reconciler;

pub use clock::{Clock, FixedClock, SystemClock};
pub use connectivity::{ConnectivityFlag, ConnectivityProbe};
pub use notifications::{Notification, NotificationLevel, Notifier, RecordingNotifier};
pub use plan_persistence::{PlanPersistence, PlanScope, SavedPlan, WriteRoute};
pub use plan_reconciler::{reconcile, GarageView, PlanList, Reconciled, SessionTicket};
