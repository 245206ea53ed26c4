//! CLI subcommand handlers.

use crate::client::{PredictionClient, prediction_from_response, read_record};
use crate::{Commands, ConfigAction};
use cardiorisk_core::gateway::{GatewayServer, Predictor, run_gateway};
use cardiorisk_core::{AssessmentReport, CardioConfig};
use cardiorisk_ml::{FeatureEncoder, SCHEMA};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// Handle a CLI subcommand.
pub async fn handle_command(command: Commands, config: CardioConfig) -> anyhow::Result<()> {
    match command {
        Commands::Serve { host, port, model } => {
            handle_serve(config, host, port, model).await
        }
        Commands::Predict { input, url } => {
            handle_predict(&input, &service_url(url, &config)).await
        }
        Commands::Assess { input, url, output } => {
            handle_assess(&input, &service_url(url, &config), output).await
        }
        Commands::Encode { input } => handle_encode(&input),
        Commands::Schema => {
            handle_schema();
            Ok(())
        }
        Commands::Config { action } => handle_config(action, &config),
    }
}

/// `--url` if given, otherwise the configured server address.
fn service_url(url: Option<String>, config: &CardioConfig) -> String {
    url.unwrap_or_else(|| format!("http://{}", config.server.bind_addr()))
}

async fn handle_serve(
    mut config: CardioConfig,
    host: Option<String>,
    port: Option<u16>,
    model: Option<PathBuf>,
) -> anyhow::Result<()> {
    // Apply CLI overrides
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    if let Some(model) = model {
        config.model.path = model;
    }

    for warning in config.validate() {
        warn!("{}", warning);
    }

    let predictor = Predictor::from_config(&config)
        .map_err(|e| anyhow::anyhow!("Failed to start: {}", e))?;
    info!(
        model = ?predictor.model(),
        validation = ?predictor.validation_mode(),
        "Predictor ready"
    );

    let gateway = Arc::new(GatewayServer::new(config.server, predictor));
    run_gateway(gateway).await?;
    Ok(())
}

async fn handle_predict(input: &Path, url: &str) -> anyhow::Result<()> {
    let record = read_record(input)?;
    let resp = PredictionClient::new(url).predict(&record).await?;
    let prediction = prediction_from_response(&resp);

    println!(
        "Heart disease risk: {} ({})",
        prediction.label.label(),
        prediction.label.code()
    );
    if let Some(confidence) = prediction.confidence() {
        println!("Confidence: {:.1}%", confidence * 100.0);
    }
    Ok(())
}

async fn handle_assess(input: &Path, url: &str, output: Option<PathBuf>) -> anyhow::Result<()> {
    let record = read_record(input)?;
    let resp = PredictionClient::new(url).assess(&record).await?;
    let prediction = prediction_from_response(&resp.prediction);
    let report = AssessmentReport::with_recommendations(record, prediction, resp.recommendations);

    let path = output.unwrap_or_else(|| PathBuf::from(report.default_file_name()));
    std::fs::write(&path, report.render_text())?;

    print!("{}", report);
    println!();
    println!("Report saved to: {}", path.display());
    Ok(())
}

fn handle_encode(input: &Path) -> anyhow::Result<()> {
    let record = read_record(input)?;
    let features = FeatureEncoder::new().encode(&record);
    let width = SCHEMA.iter().map(|c| c.name().len()).max().unwrap_or(0);
    for (column, value) in features.iter_named() {
        println!("{:>2}  {:<width$}  {}", column.index(), column.name(), value);
    }
    Ok(())
}

fn handle_schema() {
    println!("{} columns:", SCHEMA.len());
    for column in SCHEMA {
        let kind = if column.is_indicator() {
            "indicator"
        } else {
            "numeric"
        };
        println!("{:>2}  {:<18} {}", column.index(), column.name(), kind);
    }
}

fn handle_config(action: ConfigAction, config: &CardioConfig) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            let toml_str = config
                .to_toml()
                .map_err(|e| anyhow::anyhow!("Failed to render config: {}", e))?;
            println!("{}", toml_str);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_url_defaults_to_configured_server() {
        let mut config = CardioConfig::default();
        assert_eq!(service_url(None, &config), "http://127.0.0.1:8000");

        config.server.port = 9100;
        assert_eq!(service_url(None, &config), "http://127.0.0.1:9100");
        assert_eq!(
            service_url(Some("http://risk.internal".into()), &config),
            "http://risk.internal"
        );
    }

    #[test]
    fn test_encode_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patient.json");
        std::fs::write(
            &path,
            r#"{"age": 40, "sex": 1, "ChestPainType": 0, "RestingBp": 80.0,
                "Cholesterol": 100.0, "FastingBS": 0, "RestingECG": 0, "MaxHR": 60,
                "ExerciseAngina": 0, "Oldpeak": 0.0, "ST_Slope": 0}"#,
        )
        .unwrap();
        assert!(handle_encode(&path).is_ok());
        assert!(handle_encode(&dir.path().join("missing.json")).is_err());
    }

    #[tokio::test]
    async fn test_serve_fails_without_model() {
        let mut config = CardioConfig::default();
        config.model.path = "/nonexistent/heart_model.json".into();
        let err = handle_serve(config, None, Some(0), None).await.unwrap_err();
        assert!(err.to_string().contains("Failed to start"));
    }
}
