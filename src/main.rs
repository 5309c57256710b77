mod config;
mod domain;
mod infrastructure;
mod presentation;
mod usecase;

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;

use crate::{
    config::AppConfig,
    infrastructure::{
        dynamodb_user_store::DynamoDbUserStore, pbkdf2_password_hasher::Pbkdf2PasswordHasher,
    },
    presentation::handlers::user_handler::create_user_router,
    usecase::{
        authenticate_user_usecase::AuthenticateUserUsecase, create_user_usecase::CreateUserUsecase,
        get_user_usecase::GetUserUsecase,
    },
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "user_service=debug,axum=info".to_string());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = AppConfig::from_env();
    let store = DynamoDbUserStore::new(&config.store).await;
    let password_hasher = Pbkdf2PasswordHasher::new();

    let create_service = CreateUserUsecase::new(store.clone(), password_hasher.clone());
    let get_service = GetUserUsecase::new(store.clone());
    let login_service = AuthenticateUserUsecase::new(store, password_hasher);

    let app = Router::new().nest(
        "/api",
        create_user_router(create_service, get_service, login_service),
    );

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    tracing::info!("listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
