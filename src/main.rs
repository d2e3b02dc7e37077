//src/main.rs

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use coursehub::{
    build_router,
    config::{AppState, Settings},
    db::{CourseRepository, PurchaseRepository},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logger: RUST_LOG manda, "info" se não vier nada
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // Se a configuração falhar, a aplicação não deve iniciar.
    let settings = Settings::from_env()?;
    let db_pool = settings.connect().await?;

    // Faz o app rodar as migrações do SQLx na inicialização
    sqlx::migrate!().run(&db_pool).await?;
    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let purchase_repo = PurchaseRepository::new(db_pool.clone());
    let course_repo = CourseRepository::new(db_pool);
    let app_state = AppState::new(
        Arc::new(purchase_repo),
        Arc::new(course_repo),
        settings.currency_symbol.clone(),
    );

    let app = build_router(app_state);

    // Inicia o servidor
    let listener = TcpListener::bind(&settings.server_addr).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
