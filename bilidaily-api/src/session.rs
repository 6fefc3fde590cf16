use parking_lot::RwLock;

/// Owning handle over the session cookie shared by every request.
#[derive(Debug, Default)]
pub struct Session {
    cookie: RwLock<String>,
}

impl Session {
    pub fn new(cookie: impl Into<String>) -> Self {
        Self {
            cookie: RwLock::new(cookie.into()),
        }
    }

    pub fn cookie(&self) -> String {
        self.cookie.read().clone()
    }

    pub fn set_cookie(&self, cookie: impl Into<String>) {
        *self.cookie.write() = cookie.into();
    }

    pub fn is_empty(&self) -> bool {
        self.cookie.read().trim().is_empty()
    }

    /// The `bili_jct` cookie doubles as the CSRF token for write endpoints.
    pub fn csrf(&self) -> String {
        self.value("bili_jct").unwrap_or_default()
    }

    pub fn value(&self, name: &str) -> Option<String> {
        self.cookie.read().split(';').find_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            (key == name).then(|| value.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csrf_is_read_from_bili_jct() {
        let session = Session::new("SESSDATA=abc; bili_jct=token123; DedeUserID=42");
        assert_eq!(session.csrf(), "token123");
        assert_eq!(session.value("DedeUserID").as_deref(), Some("42"));
    }

    #[test]
    fn missing_csrf_is_empty() {
        let session = Session::new("SESSDATA=abc");
        assert_eq!(session.csrf(), "");

        session.set_cookie("bili_jct=new");
        assert_eq!(session.csrf(), "new");
        assert!(!session.is_empty());
    }
}
