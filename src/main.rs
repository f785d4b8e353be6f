use dotenvy::dotenv;
use iou_ledger::{
    Result,
    config::{self, Settings},
    core::{export, seed, totals},
    money::DisplayOptions,
};
use sea_orm::DatabaseConnection;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const CONFIG_PATH: &str = "config.toml";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    if let Err(e) = run().await {
        error!("Ledger failed: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let settings = config::load_settings(CONFIG_PATH)?;
    let database_url = config::get_database_url(settings.database_url.as_deref());

    let db = config::create_connection(&database_url)
        .await
        .inspect_err(|e| error!("Failed to open database: {e}"))?;
    config::migrate(&db).await?;
    info!("Database ready");

    if settings.seed_demo_data {
        seed::seed_if_empty(&db, settings.auto_settle_threshold).await?;
    }

    log_summary(&db).await?;

    if let Some(path) = &settings.export_path {
        export::write_snapshot(&db, path).await?;
    }

    log_settings(&settings);
    Ok(())
}

async fn log_summary(db: &DatabaseConnection) -> Result<()> {
    let dashboard = totals::get_dashboard_totals(db).await?;
    info!(
        total_iou = %dashboard.total_iou.format_for_display(DisplayOptions::default()),
        total_uom = %dashboard.total_uom.format_for_display(DisplayOptions::default()),
        net = %dashboard.net.format_for_display(DisplayOptions::signed()),
        position = ?dashboard.net_position(),
        "Dashboard"
    );

    for person in totals::get_person_totals(db).await? {
        info!(
            name = %person.name,
            iou = %person.iou_total,
            uom = %person.uom_total,
            net = %person.net.format_for_display(DisplayOptions::signed()),
            "Person totals"
        );
    }
    Ok(())
}

fn log_settings(settings: &Settings) {
    info!(
        auto_settle_threshold = %settings.auto_settle_threshold,
        seed_demo_data = settings.seed_demo_data,
        "Ledger settings"
    );
}
