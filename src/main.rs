use clap::Parser;
use region_intake::core::auth::issue_token;
use region_intake::utils::{logger, validation::Validate};
use region_intake::{CliConfig, Command, LocalStore, RequestIntake, TokenVerifier, ZipResolver};
use serde_json::Value;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting region-intake CLI");
    if config.verbose {
        tracing::debug!("Data path: {}, command: {:?}", config.data_path, config.command);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let store = LocalStore::new(config.data_path.clone());
    let jwt_key = config.jwt_key.clone().unwrap_or_default();

    let response = match &config.command {
        Command::ResolveZip { zip } => {
            let zip = zip.clone().map(Value::String);
            ZipResolver::new(&store).handle(zip.as_ref()).await
        }
        Command::SubmitRequest { .. } => {
            let verifier = TokenVerifier::new(&jwt_key);
            let body = config.command.request_body();
            RequestIntake::new(&store, &verifier)
                .handle(body.as_ref())
                .await
        }
        Command::IssueToken {
            subject,
            ttl_seconds,
        } => {
            let token = issue_token(&jwt_key, subject, *ttl_seconds)?;
            println!("{}", token);
            return Ok(());
        }
    };

    println!("{}", response.to_json());

    // 非 2xx 回應以非零狀態碼結束
    if !response.is_success() {
        std::process::exit(match response.status {
            400..=499 => 2,
            _ => 1,
        });
    }

    Ok(())
}
