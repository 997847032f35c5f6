use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use chrono::NaiveDate;
use dotenvy::dotenv;
use tracing::info;

use smartpark_admin::clients::{PlanApi, SmartParkClient};
use smartpark_admin::config::EnvironmentConfig;
use smartpark_admin::controllers::{PlanFormController, SubmitOutcome};
use smartpark_admin::models::garage::{Garage, GarageFilters};
use smartpark_admin::models::plan_form::FieldChange;
use smartpark_admin::services::{
    ConnectivityFlag, GarageView, NotificationLevel, PlanPersistence, RecordingNotifier,
    SystemClock,
};
use smartpark_admin::utils::errors::AppError;
use smartpark_admin::utils::validation::{message_of, to_validation_errors};

const USAGE: &str = "uso:
  smartpark-admin garages [busca] [--digital]
  smartpark-admin garage <code>
  smartpark-admin create-plan <code|-> <descrição> <vagas> <valor-em-centavos> <início> <fim>
  smartpark-admin update-plan <code> <id> [campo=valor ...]   (description, spaces, value, cancel, start, end, status)";

#[tokio::main]
async fn main() -> Result<()> {
    // Carregar variáveis de ambiente
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = EnvironmentConfig::from_env()?;
    info!("🅿️ SmartPark admin - API em {}", config.api_base_url);

    let client = Arc::new(SmartParkClient::new(&config)?);
    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        Some("garages") => list_garages(client.as_ref(), &args[1..]).await,
        Some("garage") => show_garage(client.as_ref(), &args[1..]).await,
        Some("create-plan") => create_plan(client, &config, &args[1..]).await,
        Some("update-plan") => update_plan(client, &config, &args[1..]).await,
        _ => {
            eprintln!("{}", USAGE);
            Ok(())
        }
    }
}

async fn list_garages(api: &dyn PlanApi, args: &[String]) -> Result<()> {
    let filters = GarageFilters {
        search: args.iter().find(|a| !a.starts_with("--")).cloned(),
        digital_monthly_payer: args.iter().any(|a| a == "--digital").then_some(true),
    };
    let garages = api.list_garages(&filters).await.map_err(AppError::from)?;
    for garage in &garages {
        println!(
            "{:>6}  {:<30} {:<20} {:>4}/{:<4} vagas livres",
            garage.code,
            garage.name,
            garage.city.as_deref().unwrap_or("-"),
            garage.parking_space_available,
            garage.total_parking_space
        );
    }
    println!("{} garagem(ns)", garages.len());
    Ok(())
}

async fn show_garage(api: &dyn PlanApi, args: &[String]) -> Result<()> {
    let code = parse_code(args.first())?;
    let garage = api.get_garage(code).await.map_err(AppError::from)?;
    print_garage(&garage);
    Ok(())
}

fn print_garage(garage: &Garage) {
    println!("{} - {}", garage.code, garage.name);
    println!(
        "  {} {} {}",
        garage.address.as_deref().unwrap_or(""),
        garage.city.as_deref().unwrap_or(""),
        garage.uf.as_deref().unwrap_or("")
    );
    println!(
        "  vagas: {} total, {} ocupadas, {} livres",
        garage.total_parking_space, garage.parking_space_busy, garage.parking_space_available
    );
    for plan in &garage.plans {
        println!(
            "  [{}] {:<25} {:?} {:>4} vagas ({} livres) R$ {}  {} -> {}  {}",
            plan.id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string()),
            plan.description,
            plan.plan_type,
            plan.spaces,
            plan.spaces_available_or_default(),
            plan.value,
            plan.start_date,
            plan.end_date,
            if plan.status { "ativo" } else { "inativo" }
        );
    }
}

fn build_controller(
    client: Arc<SmartParkClient>,
    config: &EnvironmentConfig,
    notifier: Arc<RecordingNotifier>,
) -> PlanFormController {
    PlanFormController::new(
        PlanPersistence::new(client),
        notifier,
        Arc::new(SystemClock),
        Arc::new(ConnectivityFlag::default()),
        config.plan_form_config(),
    )
}

async fn create_plan(client: Arc<SmartParkClient>, config: &EnvironmentConfig, args: &[String]) -> Result<()> {
    if args.len() < 6 {
        bail!("{}", USAGE);
    }
    let notifier = Arc::new(RecordingNotifier::new());
    let mut controller = build_controller(client.clone(), config, notifier.clone());

    let view = GarageView::new();
    if args[0] != "-" {
        let code = parse_code(args.first())?;
        view.open(client.as_ref(), code).await.map_err(AppError::from)?;
        controller = controller.with_view(view.clone());
    }

    controller.open_create().await;
    controller.change(FieldChange::Description(args[1].clone()));
    controller.change(FieldChange::Spaces(args[2].trim().parse().ok()));
    controller.change(FieldChange::Value(args[3].clone()));
    controller.change(FieldChange::StartDate(parse_date(&args[4])?));
    controller.change(FieldChange::EndDate(parse_date(&args[5])?));

    finish(controller.submit().await, &notifier, &view).await
}

async fn update_plan(client: Arc<SmartParkClient>, config: &EnvironmentConfig, args: &[String]) -> Result<()> {
    let code = parse_code(args.first())?;
    let id: i64 = args
        .get(1)
        .ok_or_else(|| anyhow!("{}", USAGE))?
        .parse()
        .context("id do plano inválido")?;

    let notifier = Arc::new(RecordingNotifier::new());
    let view = GarageView::new();
    view.open(client.as_ref(), code).await.map_err(AppError::from)?;
    let plan = view
        .plans()
        .await
        .into_iter()
        .find(|p| p.id == Some(id))
        .ok_or_else(|| anyhow!("plano {} não encontrado na garagem {}", id, code))?;

    let mut controller = build_controller(client, config, notifier.clone()).with_view(view.clone());
    controller.open_edit(&plan).await;

    for assignment in &args[2..] {
        let (field, value) = assignment
            .split_once('=')
            .ok_or_else(|| anyhow!("esperado campo=valor, recebido '{}'", assignment))?;
        let change = match field {
            "description" => FieldChange::Description(value.to_string()),
            "spaces" => FieldChange::Spaces(value.trim().parse().ok()),
            "value" => FieldChange::Value(value.to_string()),
            "cancel" => FieldChange::CancelValue(value.to_string()),
            "start" => FieldChange::StartDate(parse_date(value)?),
            "end" => FieldChange::EndDate(parse_date(value)?),
            "status" => FieldChange::Status(value == "true" || value == "ativo"),
            other => bail!("campo desconhecido: {}", other),
        };
        controller.change(change);
    }

    finish(controller.submit().await, &notifier, &view).await
}

async fn finish(outcome: SubmitOutcome, notifier: &RecordingNotifier, view: &GarageView) -> Result<()> {
    for notification in notifier.take() {
        match notification.level {
            NotificationLevel::Success => println!("✅ {}", notification.message),
            NotificationLevel::Error => println!("❌ {}", notification.message),
        }
    }

    match outcome {
        SubmitOutcome::Invalid(errors) => {
            for (field, error) in &errors {
                println!("  {}: {}", field.as_str(), message_of(error));
            }
            Err(AppError::Validation(to_validation_errors(&errors)).into())
        }
        SubmitOutcome::Saved { .. } | SubmitOutcome::Failed { .. } => {
            if let Some(garage) = view.garage().await {
                print_garage(&garage);
            }
            Ok(())
        }
        SubmitOutcome::NotOpen => Ok(()),
    }
}

fn parse_code(arg: Option<&String>) -> Result<i64> {
    arg.ok_or_else(|| anyhow!("{}", USAGE))?
        .parse()
        .context("código da garagem inválido")
}

fn parse_date(raw: &str) -> Result<Option<NaiveDate>> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map(Some)
        .with_context(|| format!("data inválida '{}', use AAAA-MM-DD", raw))
}
