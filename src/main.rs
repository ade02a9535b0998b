use clap::Parser;
use page_access::config::check_file::CheckFile;
use page_access::utils::{logger, validation::Validate};
use page_access::{
    AccessError, AccessValidationClient, AccessValidator, BatchSummary, BatchValidator, CliConfig,
    ClientSettings, Command, ConfigProvider,
};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 解析配置：檔案 + 命令列覆寫
    let settings = match cli.resolve() {
        Ok(settings) => settings,
        Err(e) => exit_with(&e),
    };

    logger::init_cli_logger(settings.verbose, settings.json_logs);
    tracing::debug!("Resolved settings: {}", settings.redacted());

    let code = match run(&cli.command, &settings).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(
                "❌ page-access failed: {} (Category: {:?})",
                e,
                e.category()
            );
            exit_with(&e)
        }
    };

    std::process::exit(code);
}

async fn run(command: &Command, settings: &ClientSettings) -> page_access::Result<i32> {
    let client = AccessValidationClient::from_config(settings)?;

    match command {
        Command::Check(check) => match client.validate(check).await {
            Ok(()) => {
                println!("✅ {}: granted", check);
                Ok(0)
            }
            Err(e) if e.is_denied() => {
                println!("⛔ {}: {}", check, e.user_friendly_message());
                Ok(e.exit_code())
            }
            Err(e) => Err(e),
        },
        Command::Batch { file } => {
            let check_file = CheckFile::from_file(file)?;
            check_file.validate()?;

            let batch = BatchValidator::new(Arc::new(client), settings.concurrent_requests());
            let outcomes = batch.run(check_file.checks).await?;

            for outcome in &outcomes {
                match &outcome.result {
                    Ok(()) => println!("✅ {}: granted", outcome.check),
                    Err(e) => println!("⛔ {}: {}", outcome.check, e.user_friendly_message()),
                }
            }

            let summary = BatchSummary::from_outcomes(&outcomes);
            println!(
                "📊 {} checks: {} granted, {} denied, {} failed",
                summary.total, summary.granted, summary.denied, summary.failed
            );

            Ok(summary.exit_code())
        }
    }
}

fn exit_with(e: &AccessError) -> ! {
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}
