use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{stage} rejected ({errcode}): {errmsg}")]
    Service {
        stage: &'static str,
        errcode: i64,
        errmsg: String,
    },
}
