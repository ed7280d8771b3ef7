use std::{env, path::Path, sync::Arc};

use tracing::{error, info};

use hwb_core::{
    config::{self, Config},
    domain::Cursor,
    messaging::port::MessagingPort,
    notifier::Notifier,
    poller::HomeworkPoller,
    ports::HomeworkSource,
    retry::RetryPolicy,
};
use hwb_practicum::PracticumClient;
use hwb_telegram::TelegramMessenger;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    config::load_dotenv_if_present(Path::new(".env"));
    hwb_core::logging::init("hwb", &config::log_file_from_env());

    let (mut poller, policy) = match assemble(|key| env::var(key).ok()) {
        Ok(parts) => parts,
        Err(e) => {
            error!("Cannot start: {e}");
            return Err(e.into());
        }
    };

    policy.run_forever(&mut poller).await;

    Ok(())
}

/// Validate configuration, then build the API client, messenger and poll loop.
///
/// Credentials are checked before any client exists.
fn assemble(
    lookup: impl Fn(&str) -> Option<String>,
) -> hwb_core::Result<(HomeworkPoller, RetryPolicy)> {
    info!("Checking required tokens");
    let cfg = Config::from_lookup(lookup)?;

    let client = PracticumClient::from_config(&cfg)?;
    info!(
        "Polling {} every {}s, notifying chat {}",
        client.endpoint(),
        cfg.retry_period.as_secs(),
        cfg.telegram_chat_id
    );

    let source: Arc<dyn HomeworkSource> = Arc::new(client);
    let messenger: Arc<dyn MessagingPort> =
        Arc::new(TelegramMessenger::from_token(cfg.telegram_token.clone()));
    let notifier = Notifier::new(messenger, cfg.telegram_chat_id.clone());

    let poller = HomeworkPoller::new(source, notifier, Cursor::now());
    Ok((poller, RetryPolicy::fixed(cfg.retry_period)))
}
