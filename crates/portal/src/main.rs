use anyhow::Context;
use serde_json::json;

use intranet_portal::{DirectoryAuthenticator, FixedLatency, PortalConfig, Session, UserDirectory};
use intranet_tasks::TaskBoard;

fn main() -> anyhow::Result<()> {
    intranet_observability::init();

    let config = PortalConfig::from_env();
    let policy = config.load_policy().context("failed to load access policy")?;

    let login = std::env::var("INTRANET_LOGIN").unwrap_or_else(|_| {
        tracing::warn!("INTRANET_LOGIN not set; using demo account 'anna'");
        "anna".to_string()
    });
    let password = std::env::var("INTRANET_PASSWORD").unwrap_or_else(|_| {
        tracing::warn!("INTRANET_PASSWORD not set; using demo password");
        "anna123".to_string()
    });

    let directory = UserDirectory::demo().context("failed to build demo directory")?;
    let authenticator = FixedLatency::new(DirectoryAuthenticator::new(directory), config.auth_latency);
    let session = Session::login(&authenticator, &login, &password).context("login failed")?;

    let board = TaskBoard::demo();
    let dashboard = json!({
        "user": session.user(),
        "role_label": session.role().label(),
        "home": session.home_layout(&policy),
        "analytics": session.analytics_scope(&policy),
        "menu": session.menu(&policy),
        "tasks": board.columns(&policy, session.user()),
    });
    println!("{}", serde_json::to_string_pretty(&dashboard)?);

    session.end();
    Ok(())
}
