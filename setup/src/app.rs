use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Error};
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use translator_application::{TranslationLimits, TranslationUseCase, TranslationUseCaseImpl};
use translator_configuration::AppConfig;
use translator_domain::{RecognitionPort, TranslationPort};
use translator_http_server::{create_router, HttpState};
use translator_infra_asr_http::{HttpRecognitionAdapter, HttpRecognitionConfig};
use translator_infra_translate_http::{HttpTranslationAdapter, HttpTranslationConfig};

pub async fn build_and_run(config: AppConfig) -> Result<(), Error> {
    let app = Application::new(config).await?;
    app.run().await
}

pub struct Application {
    pub config: AppConfig,
    router: Router,
}

impl Application {
    pub async fn new(config: AppConfig) -> Result<Self, Error> {
        let service = &config.service;
        tracing::info!(
            recognition_url = %service.recognition.base_url,
            recognition_model = %service.recognition.model,
            recognition_language = %service.recognition.language,
            translation_url = %service.translation.base_url,
            max_upload_bytes = service.limits.max_upload_bytes,
            max_text_chars = service.limits.max_text_chars,
            "initializing voice translator"
        );

        let recognition: Arc<dyn RecognitionPort> =
            Arc::new(HttpRecognitionAdapter::new(HttpRecognitionConfig {
                base_url: service.recognition.base_url.clone(),
                model: service.recognition.model.clone(),
                api_key: service.recognition.api_key.clone(),
                connect_timeout: Duration::from_millis(service.recognition.connect_timeout_ms),
                request_timeout: Duration::from_millis(service.recognition.request_timeout_ms),
            })?);
        let translation: Arc<dyn TranslationPort> =
            Arc::new(HttpTranslationAdapter::new(HttpTranslationConfig {
                base_url: service.translation.base_url.clone(),
                api_key: service.translation.api_key.clone(),
                source_language: service.translation.source_language.clone(),
                language_aliases: service.translation.language_aliases.clone(),
                connect_timeout: Duration::from_millis(service.translation.connect_timeout_ms),
                request_timeout: Duration::from_millis(service.translation.request_timeout_ms),
            })?);

        let limits = TranslationLimits {
            max_upload_bytes: service.limits.max_upload_bytes,
            max_text_chars: service.limits.max_text_chars,
            upstream_timeout: Duration::from_millis(service.limits.upstream_timeout_ms),
        };
        let usecase: Arc<dyn TranslationUseCase> = Arc::new(
            TranslationUseCaseImpl::new(recognition, translation, limits)
                .with_recognition_language(Some(service.recognition.language.clone()))
                .with_staging_dir(service.staging.dir.clone()),
        );

        let router = create_router(
            HttpState::new(usecase),
            &config.cors,
            service.limits.max_request_bytes,
        )?;

        Ok(Self { config, router })
    }

    pub async fn run(self) -> Result<(), Error> {
        let bind_addr = format!("{}:{}", self.config.server.host, self.config.server.port);
        let listener = TcpListener::bind(&bind_addr)
            .await
            .with_context(|| format!("failed to bind {bind_addr}"))?;
        self.serve(listener, shutdown_signal()).await
    }

    /// Serves on an already bound listener until `shutdown` resolves.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local_addr = listener.local_addr()?;
        tracing::info!(
            addr = %local_addr,
            allowed_origins = ?self.config.cors.allowed_origins,
            "starting voice translator HTTP routes"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|err| anyhow::anyhow!("server error: {err}"))?;

        tracing::info!("voice translator stopped");
        Ok(())
    }
}

/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
