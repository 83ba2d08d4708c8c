use anyhow::Result;
use dotenvy::dotenv;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use vehiculos_client::client::HttpVehicleApi;
use vehiculos_client::config::environment::ClientConfig;
use vehiculos_client::controllers::VehicleListClient;
use vehiculos_client::events::{parse_command, EventLoop, UiEvent};
use vehiculos_client::view::TerminalView;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Logging a stderr para no mezclarlo con la tabla
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("🚗 Gestión de Vehículos - cliente de terminal");

    let config = ClientConfig::from_env()?;
    info!("🌐 API: {}", config.collection_url());

    let api = HttpVehicleApi::new(&config)?;
    let view = TerminalView::new(std::io::stdout(), config.color);
    let controller = VehicleListClient::new(api, view);

    let (tx, rx) = mpsc::channel::<UiEvent>(32);

    tokio::spawn(async move {
        if tx.send(UiEvent::Help).await.is_err() {
            return;
        }

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            let event = match lines.next_line().await {
                Ok(Some(line)) => match parse_command(&line) {
                    Some(event) => event,
                    None => continue,
                },
                Ok(None) => UiEvent::Quit,
                Err(e) => {
                    debug!("Error leyendo stdin: {}", e);
                    UiEvent::Quit
                }
            };

            let quit = event == UiEvent::Quit;
            if tx.send(event).await.is_err() || quit {
                break;
            }
        }
    });

    EventLoop::new(controller).run(rx).await;

    info!("✅ Sesión terminada");
    Ok(())
}
