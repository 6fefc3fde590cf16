use std::{path::Path, time::Duration};

use bilidaily_api::{BiliClient, ResponseExt};
use bilidaily_config::update_cookie;
use bilidaily_models::{
    errors::{RuntimeError, SendableError},
    web::qr_status,
};
use log::{debug, info, warn};

const POLL_INTERVAL: Duration = Duration::from_secs(3);
const MAX_POLLS: u32 = 60;

/// Walks the passport QR flow and stores the resulting cookie.
///
/// Returns `false` when the code expires or nobody confirms it in time.
pub async fn qr_login(client: &BiliClient, config_path: &Path) -> Result<bool, SendableError> {
    let code = client
        .qrcode_generate()
        .await?
        .into_data("qrcode.generate")?;

    println!("Open this link with the bilibili app and confirm the login:");
    println!("{}", code.url);

    for attempt in 1..=MAX_POLLS {
        tokio::time::sleep(POLL_INTERVAL).await;

        let poll = client.qrcode_poll(&code.qrcode_key).await?;
        let cookie = poll.cookie_string();
        let status = poll.response.into_data("qrcode.poll")?;

        match status.code {
            qr_status::WAITING => debug!("Waiting for scan ({}/{})", attempt, MAX_POLLS),
            qr_status::SCANNED => info!("Scanned, confirm the login in the app"),
            qr_status::EXPIRED => {
                warn!("QR code expired");
                return Ok(false);
            }
            qr_status::CONFIRMED => {
                if cookie.is_empty() {
                    return Err(RuntimeError::boxed("qrcode.poll", "login confirmed but no cookie was set"));
                }
                client.session().set_cookie(cookie.clone());
                update_cookie(config_path, &cookie)?;
                info!("Login confirmed, cookie saved to {}", config_path.display());
                return Ok(true);
            }
            other => warn!("Unexpected QR status {}: {}", other, status.message),
        }
    }

    warn!("No confirmation after {} polls", MAX_POLLS);
    Ok(false)
}
