use bilidaily_models::web::{
    ApiResponse, CoinAddData, CoinBalance, NavData, RankingData, RecommendData, VideoViewData,
};
use chrono::Utc;
use serde_json::Value;

use crate::{client::BiliClient, endpoints::Host, error::Result};

/// One progress report for a simulated playback.
#[derive(Debug, Clone)]
pub struct Heartbeat {
    pub aid: i64,
    pub bvid: String,
    pub cid: Option<i64>,
    pub played_seconds: u64,
}

/// Playback start report.
#[derive(Debug, Clone)]
pub struct ClickReport {
    pub aid: i64,
    pub cid: i64,
    pub bvid: String,
}

impl BiliClient {
    /// Identity, level and VIP state of the session owner.
    pub async fn nav(&self) -> Result<ApiResponse<NavData>> {
        self.get(Host::Api, "/x/web-interface/nav", vec![]).await
    }

    pub async fn coin_balance(&self) -> Result<ApiResponse<CoinBalance>> {
        self.get(Host::Account, "/site/getCoin", vec![]).await
    }

    /// Experience earned from coins today; every coin is worth 10.
    pub async fn today_coin_exp(&self) -> Result<ApiResponse<i64>> {
        self.get(Host::Api, "/x/web-interface/coin/today/exp", vec![]).await
    }

    pub async fn ranking(&self) -> Result<ApiResponse<RankingData>> {
        self.get(
            Host::Api,
            "/x/web-interface/ranking/v2",
            vec![("rid", "0".into()), ("type", "all".into())],
        )
        .await
    }

    pub async fn recommend(&self, page_size: u32) -> Result<ApiResponse<RecommendData>> {
        self.get(
            Host::Api,
            "/x/web-interface/index/top/rcmd",
            vec![
                ("fresh_type", "3".into()),
                ("version", "1".into()),
                ("ps", page_size.to_string()),
            ],
        )
        .await
    }

    pub async fn video_view(&self, bvid: &str) -> Result<ApiResponse<VideoViewData>> {
        self.get(Host::Api, "/x/web-interface/view", vec![("bvid", bvid.to_string())])
            .await
    }

    pub async fn add_coin(
        &self,
        aid: i64,
        multiply: u32,
        select_like: bool,
    ) -> Result<ApiResponse<CoinAddData>> {
        let form = vec![
            ("aid", aid.to_string()),
            ("multiply", multiply.to_string()),
            ("select_like", u8::from(select_like).to_string()),
            ("cross_domain", "true".into()),
            ("csrf", self.session().csrf()),
        ];
        self.post_form(Host::Api, "/x/web-interface/coin/add", form).await
    }

    pub async fn share(&self, aid: i64) -> Result<ApiResponse<Value>> {
        let form = vec![("aid", aid.to_string()), ("csrf", self.session().csrf())];
        self.post_form(Host::Api, "/x/web-interface/share/add", form).await
    }

    pub async fn click_h5(&self, report: &ClickReport) -> Result<ApiResponse<Value>> {
        let now = Utc::now().timestamp().to_string();
        let form = vec![
            ("aid", report.aid.to_string()),
            ("cid", report.cid.to_string()),
            ("bvid", report.bvid.clone()),
            ("part", "1".into()),
            ("lv", "0".into()),
            ("ftime", now.clone()),
            ("stime", now),
            ("type", "3".into()),
            ("sub_type", "0".into()),
            ("refer_url", "https://www.bilibili.com/".into()),
            ("csrf", self.session().csrf()),
        ];
        self.post_form(Host::Api, "/x/click-interface/click/web/h5", form).await
    }

    pub async fn heartbeat(&self, beat: &Heartbeat) -> Result<ApiResponse<Value>> {
        let start_ts = Utc::now().timestamp() - beat.played_seconds as i64;
        let mut form = vec![
            ("aid", beat.aid.to_string()),
            ("bvid", beat.bvid.clone()),
            ("mid", "0".into()),
            ("csrf", self.session().csrf()),
            ("played_time", beat.played_seconds.to_string()),
            ("realtime", beat.played_seconds.to_string()),
            ("start_ts", start_ts.to_string()),
            ("type", "3".into()),
            ("dt", "2".into()),
            ("play_type", "1".into()),
        ];
        if let Some(cid) = beat.cid {
            form.push(("cid", cid.to_string()));
        }
        self.post_form(Host::Api, "/x/click-interface/web/heartbeat", form).await
    }
}
