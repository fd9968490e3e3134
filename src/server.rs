//! Server initialization and startup logic for scenelens.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use scenelens_config::{Config, InputBackend, IntrospectionConfig, LoggingConfig};
use scenelens_core::{ActionFacade, EngineSettings, LiveViewport, QueryEngine, SceneError};
use scenelens_protocols::InputDispatcher;
use scenelens_tools::{DryRunDispatcher, EnigoDispatcher, IntrospectionCommands, LineDispatcher};

/// Get the .scenelens directory path.
pub(crate) fn scenelens_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".scenelens"))
        .unwrap_or_else(|| PathBuf::from(".scenelens"))
}

/// Initialize tracing with console output and an optional daily log file.
///
/// `RUST_LOG` overrides the configured level. Console output goes to stderr
/// so `query` can print JSON on stdout.
pub(crate) fn init_tracing(logging: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let console = fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);

    let file = if logging.file {
        let log_dir = logging
            .directory
            .clone()
            .unwrap_or_else(|| scenelens_dir().join("logs"));
        std::fs::create_dir_all(&log_dir)?;

        let file_appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix("scenelens")
            .filename_suffix("log")
            .max_log_files(30)
            .build(&log_dir)?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        // Keep the writer alive for the whole process.
        static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
            std::sync::OnceLock::new();
        let _ = GUARD.set(guard);

        Some(fmt::layer().with_writer(non_blocking).with_ansi(false))
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console)
        .with(file)
        .init();

    Ok(())
}

pub(crate) fn engine_settings(config: &IntrospectionConfig) -> EngineSettings {
    EngineSettings {
        root: config.root_graph_key.as_str().into(),
        depth_limit: config.depth_limit,
        host_timeout: Duration::from_millis(config.host_timeout_ms),
    }
}

/// Viewport preloaded from a scene file, or empty.
pub(crate) fn load_viewport(scene: Option<&Path>) -> Result<Arc<LiveViewport>, SceneError> {
    match scene {
        Some(path) => Ok(Arc::new(LiveViewport::load_scene_file(path)?)),
        None => Ok(Arc::new(LiveViewport::new())),
    }
}

/// Wire viewport, engine, input and commands into one dispatcher.
pub(crate) fn build_dispatcher(
    config: &Config,
    viewport: Arc<LiveViewport>,
    dry_run: bool,
) -> Result<LineDispatcher, Box<dyn std::error::Error>> {
    let engine = Arc::new(QueryEngine::new(
        viewport.clone(),
        viewport,
        engine_settings(&config.introspection),
    ));

    let input: Arc<dyn InputDispatcher> = match (dry_run, config.input.backend) {
        (true, _) | (_, InputBackend::DryRun) => Arc::new(DryRunDispatcher),
        (false, InputBackend::Enigo) => Arc::new(EnigoDispatcher::new()),
    };

    let facade = ActionFacade::new(engine, input)
        .with_origin(config.input.origin_x, config.input.origin_y);
    let registry = IntrospectionCommands::new(Arc::new(facade)).into_registry()?;
    info!(actions = ?registry.list_actions(), "Commands registered");

    Ok(LineDispatcher::new(Arc::new(registry)))
}

/// Run the TCP line server in foreground.
pub(crate) async fn run_server(
    host: &str,
    port: u16,
    dispatcher: LineDispatcher,
) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting scenelens v{}", env!("CARGO_PKG_VERSION"));

    let listener = TcpListener::bind((host, port)).await?;
    info!("Listening on {}", listener.local_addr()?);

    let dispatcher = Arc::new(dispatcher);
    loop {
        tokio::select! {
            accepted = listener.accept() => {
                let (stream, peer) = accepted?;
                debug!(peer = %peer, "Connection accepted");
                let dispatcher = dispatcher.clone();
                tokio::spawn(async move {
                    if let Err(e) = serve_connection(stream, dispatcher).await {
                        warn!(peer = %peer, error = %e, "Connection closed with error");
                    }
                    debug!(peer = %peer, "Connection closed");
                });
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down");
                return Ok(());
            }
        }
    }
}

/// Answer every non-blank line with one JSON line until the peer hangs up.
///
/// Lines are read as raw bytes so a line that is not UTF-8 gets an error
/// body instead of ending the connection.
pub(crate) async fn serve_connection<S>(
    stream: S,
    dispatcher: Arc<LineDispatcher>,
) -> std::io::Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let (reader, mut writer) = tokio::io::split(stream);
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            return Ok(());
        }
        let line = trim_line_end(&buf);
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        let mut response = dispatcher.handle_bytes(line).await;
        response.push('\n');
        if let Err(e) = writer.write_all(response.as_bytes()).await {
            error!(error = %e, "Failed to write response");
            return Err(e);
        }
        writer.flush().await?;
    }
}

fn trim_line_end(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tokio::io::duplex;

    use scenelens_protocols::types::{Bounds, GraphNode, SemanticElement};

    fn dry_run_dispatcher(viewport: Arc<LiveViewport>) -> Arc<LineDispatcher> {
        Arc::new(build_dispatcher(&Config::default(), viewport, true).unwrap())
    }

    #[test]
    fn test_engine_settings_from_config() {
        let config = IntrospectionConfig {
            root_graph_key: "scene_root".to_string(),
            depth_limit: 4,
            host_timeout_ms: 250,
        };

        let settings = engine_settings(&config);
        assert_eq!(settings.root.as_str(), "scene_root");
        assert_eq!(settings.depth_limit, 4);
        assert_eq!(settings.host_timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_load_viewport_missing_file() {
        let result = load_viewport(Some(Path::new("/definitely/not/here.json")));
        assert!(matches!(result, Err(SceneError::Io(_))));
    }

    #[tokio::test]
    async fn test_connection_answers_each_line() {
        let viewport = Arc::new(LiveViewport::new());
        viewport.put_graph(GraphNode::new("_root_"));
        viewport.register_element(
            &SemanticElement::new("ok", "button", Bounds::new(0.0, 0.0, 10.0, 10.0), "_root_")
                .clickable(),
        );
        let dispatcher = dry_run_dispatcher(viewport);

        let (client, server) = duplex(4096);
        let task = tokio::spawn(serve_connection(server, dispatcher));

        let (read_half, mut write_half) = tokio::io::split(client);
        write_half
            .write_all(
                b"{\"action\":\"find_clickable\"}\n\nnot json\n{\"action\":\"click_element\",\"element_id\":\"ok\"}\n",
            )
            .await
            .unwrap();
        write_half.shutdown().await.unwrap();

        let mut lines = BufReader::new(read_half).lines();
        let mut bodies = Vec::new();
        while let Some(line) = lines.next_line().await.unwrap() {
            bodies.push(serde_json::from_str::<Value>(&line).unwrap());
        }
        task.await.unwrap().unwrap();

        assert_eq!(bodies.len(), 3);
        assert_eq!(bodies[0]["count"], 1);
        assert_eq!(bodies[1]["status"], "error");
        assert_eq!(bodies[2]["clicked_at"], serde_json::json!({"x": 5, "y": 5}));
    }

    #[tokio::test]
    async fn test_connection_survives_invalid_utf8() {
        let viewport = Arc::new(LiveViewport::new());
        viewport.put_graph(GraphNode::new("_root_"));
        let dispatcher = dry_run_dispatcher(viewport);

        let (client, server) = duplex(4096);
        let task = tokio::spawn(serve_connection(server, dispatcher));

        let (read_half, mut write_half) = tokio::io::split(client);
        write_half
            .write_all(b"{\"action\":\"find_clickable\"}\n\xff\xfe\n{\"action\":\"find_clickable\"}\r\n")
            .await
            .unwrap();
        write_half.shutdown().await.unwrap();

        let mut lines = BufReader::new(read_half).lines();
        let mut bodies = Vec::new();
        while let Some(line) = lines.next_line().await.unwrap() {
            bodies.push(serde_json::from_str::<Value>(&line).unwrap());
        }
        task.await.unwrap().unwrap();

        assert_eq!(bodies.len(), 3);
        assert_eq!(bodies[0]["status"], "ok");
        assert_eq!(bodies[1]["status"], "error");
        assert_eq!(bodies[1]["kind"], "invalid_params");
        assert_eq!(bodies[2]["status"], "ok");
        assert_eq!(bodies[2]["count"], 0);
    }

    #[test]
    fn test_trim_line_end() {
        assert_eq!(trim_line_end(b"abc\r\n"), b"abc");
        assert_eq!(trim_line_end(b"abc\n"), b"abc");
        assert_eq!(trim_line_end(b"abc"), b"abc");
    }
}
