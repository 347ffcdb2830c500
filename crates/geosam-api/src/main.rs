use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use geosam_core::ports::{AutomaticSegmenter, PromptSegmenter, TileFetcher};
use geosam_core::tiles::XyzTileFetcher;
use geosam_model::{HttpSegmenter, MockSegmenter, MockTileFetcher};

use geosam_api::router::create_router;
use geosam_api::state::{AppState, ArtifactPaths};
use geosam_api::ApiConfig;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "geosam_api=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env();

    tracing::info!(
        port = config.port,
        tile_source = %config.tile_source,
        zoom = config.zoom,
        data_dir = %config.data_dir.display(),
        "Starting GeoSAM API server"
    );

    // Segmentation backend based on GEOSAM_INFERENCE_URL
    let (automatic, prompt): (Arc<dyn AutomaticSegmenter>, Arc<dyn PromptSegmenter>) =
        match &config.inference_url {
            Some(url) => {
                tracing::info!(url = %url, "Using remote inference server");
                let segmenter = Arc::new(HttpSegmenter::new(url.clone()));
                (segmenter.clone(), segmenter)
            }
            None => {
                tracing::info!(
                    "Using mock segmenter (set GEOSAM_INFERENCE_URL for a real model)"
                );
                let segmenter = Arc::new(MockSegmenter::new());
                (segmenter.clone(), segmenter)
            }
        };

    let fetcher: Arc<dyn TileFetcher> = if config.offline_tiles {
        tracing::info!("Serving synthetic tiles (GEOSAM_OFFLINE_TILES is set)");
        Arc::new(MockTileFetcher::new())
    } else {
        Arc::new(XyzTileFetcher::new())
    };

    let state = Arc::new(AppState::new(
        ArtifactPaths::new(config.data_dir.clone()),
        fetcher,
        automatic,
        prompt,
        config.tile_source.clone(),
        config.zoom,
    ));

    let cors = CorsLayer::new()
        .allow_origin(config.cors_origin.parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let app = create_router(state).layer(cors).layer(TraceLayer::new_for_http());

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();

    tracing::info!("Listening on {}", addr);
    tracing::info!("CORS enabled for {}", config.cors_origin);

    axum::serve(listener, app).await.unwrap();
}
