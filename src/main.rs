/**
 * ClipTube Auth Server Entry Point
 *
 * Binary entry point for the authentication and session service. Loads
 * environment configuration, initializes tracing and serves the Axum app.
 */

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    eprintln!("[STARTUP] Setting RUST_LOG={}", env_filter);

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&env_filter))
        .init();

    tracing::info!("Server initialization started");

    // Create the Axum app
    let app = cliptube_auth::server::create_app().await;

    let port = cliptube_auth::server::config::server_port();
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    eprintln!("[STARTUP] Starting server on {}", addr);
    tracing::info!("Starting server on {}", addr);

    // Run the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    eprintln!("[STARTUP] Listening on http://127.0.0.1:{}", port);
    axum::serve(listener, app).await?;

    Ok(())
}
