// src/config.rs

use crate::{
    db::{CourseStore, PurchaseStore},
    services::{CourseService, DashboardService, PurchaseService},
};
use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, sync::Arc, time::Duration};

// Configuração lida do ambiente (.env em desenvolvimento)
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub server_addr: String,
    pub db_max_connections: u32,
    pub currency_symbol: String,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let server_addr = env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());
        let db_max_connections = match env::var("DB_MAX_CONNECTIONS") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("DB_MAX_CONNECTIONS inválido: {}", raw))?,
            Err(_) => 5,
        };
        let currency_symbol = env::var("CURRENCY_SYMBOL").unwrap_or_else(|_| "₹".to_string());

        Ok(Self {
            database_url,
            server_addr,
            db_max_connections,
            currency_symbol,
        })
    }

    // Conecta ao banco, usando '?' para propagar erros em vez de dar panic
    pub async fn connect(&self) -> anyhow::Result<PgPool> {
        let db_pool = PgPoolOptions::new()
            .max_connections(self.db_max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&self.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");
        Ok(db_pool)
    }
}

#[derive(Clone)]
pub struct AppState {
    pub dashboard_service: DashboardService,
    pub course_service: CourseService,
    pub purchase_service: PurchaseService,
    pub currency_symbol: String,
}

impl AppState {
    // --- Monta o gráfico de dependências ---
    pub fn new(
        purchases: Arc<dyn PurchaseStore>,
        courses: Arc<dyn CourseStore>,
        currency_symbol: impl Into<String>,
    ) -> Self {
        Self {
            dashboard_service: DashboardService::new(purchases.clone()),
            course_service: CourseService::new(courses.clone()),
            purchase_service: PurchaseService::new(purchases, courses),
            currency_symbol: currency_symbol.into(),
        }
    }
}
