use std::sync::Arc;

use anyhow::Context;

use homecare_onboarding::backend::{AuthContext, HttpBackend, ProfileBackend};
use homecare_onboarding::config::OnboardingConfig;
use homecare_onboarding::error::ConfigError;
use homecare_onboarding::onboarding::{OnboardingFlow, OnboardingRouteState, onboarding_routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = OnboardingConfig::from_env()?;

    let token = std::env::var("ONBOARDING_AUTH_TOKEN")
        .map_err(|_| ConfigError::MissingEnvVar("ONBOARDING_AUTH_TOKEN".to_string()))?;
    let auth = AuthContext::new(token);

    eprintln!("Homecare onboarding v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Backend: {}", config.api_base_url);
    eprintln!(
        "   Auto-save: {}ms forms, {}ms uploads",
        config.autosave_delay.as_millis(),
        config.upload_autosave_delay.as_millis()
    );
    eprintln!(
        "   Status API: http://0.0.0.0:{}/api/onboarding/session",
        config.status_port
    );

    let backend: Arc<dyn ProfileBackend> = Arc::new(HttpBackend::from_config(&config)?);
    let flow = OnboardingFlow::new(backend, auth, config.clone());

    match flow.refresh().await {
        Ok(session) => eprintln!(
            "   Progress: {}% complete, current step {}\n",
            session.percent_complete, session.frontier
        ),
        Err(e) if e.is_stale_token() => {
            return Err(e).context("Session token rejected by the backend");
        }
        Err(e) => eprintln!("   Progress unavailable ({e}); starting from prescreen\n"),
    }

    let app = onboarding_routes(OnboardingRouteState {
        tracker: flow.tracker(),
    });
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.status_port))
        .await
        .with_context(|| format!("Failed to bind status port {}", config.status_port))?;
    tracing::info!(port = config.status_port, "Onboarding status server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .context("Status server failed")?;

    Ok(())
}
