use std::sync::Arc;

use lab_coach::assessor::Assessor;
use lab_coach::config::{GmailSettings, LlmSettings};
use lab_coach::console;
use lab_coach::llm::create_provider;
use lab_coach::mail::GmailMailer;
use lab_coach::session::SessionManager;

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

    let llm_settings = LlmSettings::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        eprintln!("  export ANTHROPIC_API_KEY=sk-ant-... (or OPENAI_API_KEY with LAB_COACH_LLM_BACKEND=openai)");
        std::process::exit(1);
    });

    let gmail_settings = GmailSettings::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        eprintln!("  Gmail sending needs GOOGLE_CLIENT_ID, GOOGLE_CLIENT_SECRET,");
        eprintln!("  GOOGLE_REFRESH_TOKEN and LAB_COACH_FROM_ADDRESS");
        std::process::exit(1);
    });

    eprintln!("🔬 Lab Coach v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Model: {}", llm_settings.model);
    eprintln!("   From:  {}\n", gmail_settings.from_address);

    let llm = create_provider(&llm_settings)?;
    let mailer = Arc::new(GmailMailer::new(gmail_settings));
    let manager = SessionManager::new(Assessor::new(llm), mailer);

    console::run(&manager).await
}
