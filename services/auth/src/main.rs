use sea_orm::Database;
use tracing::info;
use url::Url;

use storefront_auth::config::AuthConfig;
use storefront_auth::infra::mail::MailTransport;
use storefront_auth::router::build_router;
use storefront_auth::state::AppState;
use storefront_core::config::Config;
use storefront_core::tracing::init_tracing;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = AuthConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let identity_provider_url =
        Url::parse(&config.identity_provider_url).expect("invalid IDENTITY_PROVIDER_URL");
    let customer_directory_url =
        Url::parse(&config.customer_directory_url).expect("invalid CUSTOMER_DIRECTORY_URL");
    let reset_link_base = Url::parse(config.app_url()).expect("invalid FRONTEND_URL");

    let mailer = MailTransport::from_settings(config.smtp(), &config.smtp_from)
        .expect("invalid SMTP configuration");

    let http = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()
        .expect("failed to build HTTP client");

    let state = AppState {
        db,
        http,
        identity_provider_url,
        customer_directory_url,
        mailer,
        jwt_secret: config.jwt_secret,
        cookie_domain: config.cookie_domain,
        reset_link_base,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.auth_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("auth service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
