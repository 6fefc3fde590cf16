use serde::{Deserialize, Serialize};

/// Envelope shared by every platform endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub ttl: Option<i64>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn is_ok(&self) -> bool {
        self.code == 0
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LevelInfo {
    #[serde(default)]
    pub current_level: u32,
    #[serde(default)]
    pub current_exp: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavData {
    #[serde(rename = "isLogin", default)]
    pub is_login: bool,
    #[serde(default)]
    pub uname: String,
    #[serde(default)]
    pub mid: i64,
    #[serde(default)]
    pub level_info: LevelInfo,
    #[serde(rename = "vipType", default)]
    pub vip_type: i32,
    #[serde(rename = "vipStatus", default)]
    pub vip_status: i32,
    #[serde(default)]
    pub money: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinBalance {
    #[serde(default)]
    pub money: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoOwner {
    #[serde(default)]
    pub mid: i64,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoPage {
    #[serde(default)]
    pub cid: i64,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub part: String,
    #[serde(default)]
    pub duration: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoInfo {
    #[serde(alias = "id")]
    pub aid: i64,
    #[serde(default)]
    pub bvid: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub duration: u64,
    #[serde(default)]
    pub pages: Vec<VideoPage>,
    #[serde(default)]
    pub owner: Option<VideoOwner>,
}

impl VideoInfo {
    pub fn first_cid(&self) -> i64 {
        self.pages.first().map(|p| p.cid).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingData {
    #[serde(default)]
    pub list: Vec<VideoInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendData {
    #[serde(default)]
    pub item: Vec<VideoInfo>,
}

/// The view endpoint has been observed both wrapping the record in `View` and returning it bare.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VideoViewData {
    Wrapped {
        #[serde(rename = "View")]
        view: VideoInfo,
    },
    Plain(VideoInfo),
}

impl VideoViewData {
    pub fn into_video(self) -> VideoInfo {
        match self {
            VideoViewData::Wrapped { view } => view,
            VideoViewData::Plain(video) => video,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinAddData {
    #[serde(default)]
    pub like: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QrCodeData {
    pub url: String,
    pub qrcode_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QrPollData {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default)]
    pub timestamp: i64,
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

/// Poll status codes returned inside `QrPollData::code`.
pub mod qr_status {
    pub const CONFIRMED: i64 = 0;
    pub const EXPIRED: i64 = 86038;
    pub const SCANNED: i64 = 86090;
    pub const WAITING: i64 = 86101;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_data_accepts_wrapped_and_plain_shapes() {
        let wrapped: VideoViewData =
            serde_json::from_str(r#"{"View":{"aid":1,"bvid":"BV1","title":"a","duration":90}}"#)
                .unwrap();
        assert_eq!(wrapped.into_video().aid, 1);

        let plain: VideoViewData =
            serde_json::from_str(r#"{"aid":2,"bvid":"BV2","title":"b","duration":90}"#).unwrap();
        assert_eq!(plain.into_video().bvid, "BV2");
    }

    #[test]
    fn recommend_items_use_id_as_aid() {
        let data: RecommendData =
            serde_json::from_str(r#"{"item":[{"id":42,"bvid":"BV42","title":"t","duration":120}]}"#)
                .unwrap();
        assert_eq!(data.item[0].aid, 42);
    }

    #[test]
    fn error_envelope_without_data_parses() {
        let response: ApiResponse<NavData> =
            serde_json::from_str(r#"{"code":-101,"message":"not logged in","ttl":1}"#).unwrap();
        assert!(!response.is_ok());
        assert!(response.data.is_none());
    }

    fn decode<T: serde::de::DeserializeOwned>(body: &str) -> ApiResponse<T> {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn envelopes_decode_for_payloads_without_default() {
        let ranking: ApiResponse<RankingData> =
            decode(r#"{"code":0,"message":"0","data":{"list":[{"aid":7,"bvid":"BV7"}]}}"#);
        assert_eq!(ranking.data.unwrap().list[0].aid, 7);

        let poll: ApiResponse<QrPollData> = decode(r#"{"code":0}"#);
        assert!(poll.is_ok());
        assert!(poll.data.is_none());
        assert!(poll.message.is_empty());
    }
}
