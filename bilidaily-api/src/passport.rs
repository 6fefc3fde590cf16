use bilidaily_models::web::{ApiResponse, QrCodeData, QrPollData};
use reqwest::{header::SET_COOKIE, Method};

use crate::{client::BiliClient, endpoints::Host, error::Result};

/// A QR poll result plus the cookies the passport host set alongside it.
#[derive(Debug)]
pub struct QrPoll {
    pub response: ApiResponse<QrPollData>,
    pub cookies: Vec<String>,
}

impl QrPoll {
    /// `name=value` pairs joined into a request cookie string.
    pub fn cookie_string(&self) -> String {
        self.cookies.join("; ")
    }
}

impl BiliClient {
    pub async fn qrcode_generate(&self) -> Result<ApiResponse<QrCodeData>> {
        self.get(Host::Passport, "/x/passport-login/web/qrcode/generate", vec![])
            .await
    }

    pub async fn qrcode_poll(&self, key: &str) -> Result<QrPoll> {
        let url = self.url(Host::Passport, "/x/passport-login/web/qrcode/poll")?;
        let query = vec![("qrcode_key", key.to_string())];
        let response = self.execute(Method::GET, url.clone(), &query, None).await?;

        let cookies = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .filter_map(|value| value.split(';').next())
            .map(|pair| pair.trim().to_string())
            .filter(|pair| pair.contains('='))
            .collect();

        let response = Self::decode(url, response).await?;
        Ok(QrPoll { response, cookies })
    }
}
