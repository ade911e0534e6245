//! Resource retrieval for components and page fragments.
//!
//! [`Fetcher`] is the async seam between the behaviors and wherever the site
//! is hosted:
//!
//! | Fetcher | Source | Missing resource |
//! |---------|--------|------------------|
//! | [`MemoryFetcher`] | in-memory map | 404 |
//! | [`DirFetcher`] | site directory on disk | 404 |
//! | [`HttpFetcher`] | HTTP host | response status |
//!
//! A non-success status is an error; there are no retries and no timeouts
//! beyond the transport's own.

use std::{
    cell::RefCell,
    collections::HashMap,
    future::Future,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid resource url `{url}`: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("request for `{url}` failed: {message}")]
    Transport { url: String, message: String },

    #[error("`{url}` responded with status {status}")]
    Status { url: String, status: u16 },
}

impl FetchError {
    /// HTTP-like status of the failure, when there is one.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Retrieves markup for a URL.
pub trait Fetcher {
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<String, FetchError>>;
}

impl<F: Fetcher + ?Sized> Fetcher for &F {
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<String, FetchError>> {
        (**self).fetch(url)
    }
}

/// Site-relative resource path of a URL, with `base_path` removed.
fn site_path(url: &Url, base_path: &str) -> String {
    let path = urlencoding::decode(url.path())
        .map_or_else(|_| url.path().to_owned(), |s| s.into_owned());
    let base = base_path.trim_end_matches('/');
    let path = match path.strip_prefix(base) {
        Some(rest) if !base.is_empty() && (rest.is_empty() || rest.starts_with('/')) => rest,
        _ => &path,
    };
    path.trim_start_matches('/').to_owned()
}

// ============================================================================
// In-memory
// ============================================================================

/// Serves resources from a map keyed by site-relative path.
///
/// Every request is recorded, which makes it handy for asserting how often a
/// resource was fetched.
#[derive(Debug, Default)]
pub struct MemoryFetcher {
    resources: HashMap<String, Result<String, u16>>,
    requests: RefCell<Vec<String>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `path` (leading slash optional).
    pub fn with(mut self, path: &str, body: impl Into<String>) -> Self {
        self.resources
            .insert(path.trim_start_matches('/').to_owned(), Ok(body.into()));
        self
    }

    /// Answer `path` with a failure status.
    pub fn with_status(mut self, path: &str, status: u16) -> Self {
        self.resources
            .insert(path.trim_start_matches('/').to_owned(), Err(status));
        self
    }

    /// Site-relative paths requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl Fetcher for MemoryFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        let path = site_path(url, "");
        self.requests.borrow_mut().push(path.clone());
        match self.resources.get(&path) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(status)) => Err(FetchError::Status {
                url: url.to_string(),
                status: *status,
            }),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}

// ============================================================================
// Directory
// ============================================================================

/// Serves resources from a site directory, the way a static host would.
///
/// Directory requests resolve to their `index.html`.
#[derive(Debug, Clone)]
pub struct DirFetcher {
    root: PathBuf,
    base_path: String,
}

impl DirFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            base_path: String::new(),
        }
    }

    /// Strip `base_path` from request paths before mapping them to files.
    pub fn with_base_path(mut self, base_path: &str) -> Self {
        base_path.clone_into(&mut self.base_path);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn local_path(&self, url: &Url) -> PathBuf {
        let relative = site_path(url, &self.base_path);
        let path = self.root.join(&relative);
        if relative.is_empty() || relative.ends_with('/') || path.is_dir() {
            path.join("index.html")
        } else {
            path
        }
    }
}

impl Fetcher for DirFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        let path = self.local_path(url);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|err| match err.kind() {
                ErrorKind::NotFound => FetchError::Status {
                    url: url.to_string(),
                    status: 404,
                },
                _ => FetchError::Transport {
                    url: url.to_string(),
                    message: format!("{}: {err}", path.display()),
                },
            })
    }
}

// ============================================================================
// HTTP
// ============================================================================

/// Fetches over HTTP with a shared client.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        let transport = |err: reqwest::Error| FetchError::Transport {
            url: url.to_string(),
            message: err.to_string(),
        };

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        response.text().await.map_err(transport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn url(path: &str) -> Url {
        Url::parse("http://localhost/").unwrap().join(path).unwrap()
    }

    #[test]
    fn test_site_path() {
        assert_eq!(site_path(&url("/components/header.html"), ""), "components/header.html");
        assert_eq!(
            site_path(&url("/portfolio/components/header.html"), "/portfolio"),
            "components/header.html"
        );
        assert_eq!(site_path(&url("/my%20page.html"), ""), "my page.html");
        assert_eq!(site_path(&url("/portfolios/x.html"), "/portfolio"), "portfolios/x.html");
    }

    #[test]
    fn test_fetch_error_status() {
        let err = FetchError::Status {
            url: "http://localhost/x".into(),
            status: 404,
        };
        assert_eq!(err.status(), Some(404));
        assert!(err.to_string().contains("404"));
    }

    #[tokio::test]
    async fn test_memory_fetcher() {
        let fetcher = MemoryFetcher::new()
            .with("components/header.html", "<header></header>")
            .with_status("/components/footer.html", 500);

        let header = fetcher.fetch(&url("/components/header.html")).await.unwrap();
        assert_eq!(header, "<header></header>");

        let footer = fetcher.fetch(&url("/components/footer.html")).await.unwrap_err();
        assert_eq!(footer.status(), Some(500));

        let missing = fetcher.fetch(&url("/nope.html")).await.unwrap_err();
        assert_eq!(missing.status(), Some(404));

        assert_eq!(
            fetcher.requests(),
            ["components/header.html", "components/footer.html", "nope.html"]
        );
    }

    #[tokio::test]
    async fn test_dir_fetcher() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("components")).unwrap();
        fs::create_dir_all(dir.path().join("blog")).unwrap();
        fs::write(dir.path().join("components/header.html"), "<header>h</header>").unwrap();
        fs::write(dir.path().join("index.html"), "root").unwrap();
        fs::write(dir.path().join("blog/index.html"), "blog").unwrap();

        let fetcher = DirFetcher::new(dir.path());
        assert_eq!(
            fetcher.fetch(&url("/components/header.html")).await.unwrap(),
            "<header>h</header>"
        );
        assert_eq!(fetcher.fetch(&url("/")).await.unwrap(), "root");
        assert_eq!(fetcher.fetch(&url("/blog")).await.unwrap(), "blog");
        assert_eq!(fetcher.fetch(&url("/blog/")).await.unwrap(), "blog");

        let err = fetcher.fetch(&url("/components/footer.html")).await.unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn test_dir_fetcher_base_path() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("components")).unwrap();
        fs::write(dir.path().join("components/footer.html"), "<footer></footer>").unwrap();

        let fetcher = DirFetcher::new(dir.path()).with_base_path("/portfolio");
        let body = fetcher
            .fetch(&url("/portfolio/components/footer.html"))
            .await
            .unwrap();
        assert_eq!(body, "<footer></footer>");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_http_fetcher() {
        let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
        let addr = server.server_addr().to_ip().unwrap();

        let handle = std::thread::spawn(move || {
            for _ in 0..2 {
                let Ok(request) = server.recv() else { break };
                let response = if request.url() == "/components/header.html" {
                    tiny_http::Response::from_string("<header>remote</header>")
                } else {
                    tiny_http::Response::from_string("missing").with_status_code(tiny_http::StatusCode(404))
                };
                request.respond(response).unwrap();
            }
        });

        let base = Url::parse(&format!("http://{addr}/")).unwrap();
        let fetcher = HttpFetcher::new();

        let body = fetcher
            .fetch(&base.join("components/header.html").unwrap())
            .await
            .unwrap();
        assert_eq!(body, "<header>remote</header>");

        let err = fetcher
            .fetch(&base.join("components/footer.html").unwrap())
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(404));

        handle.join().unwrap();
    }
}
