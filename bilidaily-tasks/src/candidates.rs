use bilidaily_api::{BiliClient, ResponseExt, Result};
use bilidaily_models::web::VideoInfo;
use rand::{seq::SliceRandom, Rng};

pub(crate) async fn ranking(client: &BiliClient) -> Result<Vec<VideoInfo>> {
    Ok(client.ranking().await?.into_data("ranking")?.list)
}

pub(crate) async fn recommend(client: &BiliClient, page_size: u32) -> Result<Vec<VideoInfo>> {
    Ok(client.recommend(page_size).await?.into_data("recommend")?.item)
}

pub(crate) fn shuffled(mut videos: Vec<VideoInfo>) -> Vec<VideoInfo> {
    videos.shuffle(&mut rand::thread_rng());
    videos
}

/// A random pick among the first `within` videos.
pub(crate) fn pick_near_top(mut videos: Vec<VideoInfo>, within: usize) -> Option<VideoInfo> {
    if videos.is_empty() {
        return None;
    }
    let upper = within.clamp(1, videos.len());
    let index = rand::thread_rng().gen_range(0..upper);
    Some(videos.swap_remove(index))
}
