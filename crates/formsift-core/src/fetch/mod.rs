//! Resolving source identifiers into document bytes.

mod file;
#[cfg(feature = "http")]
mod http;

pub use file::FileFetcher;
#[cfg(feature = "http")]
pub use http::HttpFetcher;

use std::future::Future;
use std::path::PathBuf;

use tracing::debug;
use url::Url;

use crate::error::FetchError;
use crate::models::config::FetchConfig;

/// Result type for fetch operations.
pub type Result<T> = std::result::Result<T, FetchError>;

/// Trait for anything that turns a source identifier into bytes.
pub trait DocumentFetcher {
    /// Fetch the raw bytes behind `source`.
    fn fetch(&self, source: &str) -> impl Future<Output = Result<Vec<u8>>>;
}

/// Where a source identifier points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    /// An http or https URL.
    Remote(Url),
    /// A local file, given as a path or `file://` URL.
    Local(PathBuf),
}

impl SourceLocation {
    /// Parse a source identifier.
    ///
    /// Anything that is not an absolute URL is treated as a local path.
    /// Single-letter schemes are drive letters, not URLs.
    pub fn parse(source: &str) -> Result<Self> {
        match Url::parse(source) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Ok(Self::Remote(url)),
            Ok(url) if url.scheme() == "file" => url
                .to_file_path()
                .map(Self::Local)
                .map_err(|_| FetchError::UnsupportedScheme(source.to_string())),
            Ok(url) if url.scheme().len() > 1 => {
                Err(FetchError::UnsupportedScheme(url.scheme().to_string()))
            }
            _ => Ok(Self::Local(PathBuf::from(source))),
        }
    }
}

/// Fetcher dispatching on the source scheme.
pub struct SourceFetcher {
    file: FileFetcher,
    #[cfg(feature = "http")]
    http: HttpFetcher,
}

impl SourceFetcher {
    /// Build a fetcher for all supported schemes.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        Ok(Self {
            file: FileFetcher::new(config.max_bytes),
            #[cfg(feature = "http")]
            http: HttpFetcher::new(config)?,
        })
    }
}

impl DocumentFetcher for SourceFetcher {
    async fn fetch(&self, source: &str) -> Result<Vec<u8>> {
        let location = SourceLocation::parse(source)?;
        debug!("Fetching {:?}", location);

        match location {
            SourceLocation::Local(path) => self.file.read(&path).await,
            #[cfg(feature = "http")]
            SourceLocation::Remote(url) => self.http.get(url).await,
            #[cfg(not(feature = "http"))]
            SourceLocation::Remote(url) => Err(FetchError::UnsupportedScheme(url.scheme().to_string())),
        }
    }
}

/// Reject bodies larger than `limit` (0 = unlimited).
pub(crate) fn check_size(size: usize, limit: usize) -> Result<()> {
    if limit > 0 && size > limit {
        return Err(FetchError::TooLarge { size, limit });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_remote() {
        let location = SourceLocation::parse("https://example.org/990.pdf").unwrap();
        assert!(matches!(location, SourceLocation::Remote(url) if url.host_str() == Some("example.org")));
    }

    #[test]
    fn test_parse_local_path() {
        assert_eq!(
            SourceLocation::parse("filings/990.pdf").unwrap(),
            SourceLocation::Local(PathBuf::from("filings/990.pdf"))
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_parse_file_url() {
        assert_eq!(
            SourceLocation::parse("file:///tmp/990.pdf").unwrap(),
            SourceLocation::Local(PathBuf::from("/tmp/990.pdf"))
        );
    }

    #[test]
    fn test_parse_unsupported_scheme() {
        let err = SourceLocation::parse("ftp://example.org/990.pdf").unwrap_err();
        assert!(matches!(err, FetchError::UnsupportedScheme(scheme) if scheme == "ftp"));
    }

    #[test]
    fn test_check_size() {
        assert!(check_size(10, 0).is_ok());
        assert!(check_size(10, 10).is_ok());
        assert!(matches!(check_size(11, 10), Err(FetchError::TooLarge { size: 11, limit: 10 })));
    }

    #[tokio::test]
    async fn test_source_fetcher_reads_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        std::fs::write(&path, "Form 990").unwrap();

        let fetcher = SourceFetcher::new(&FetchConfig::default()).unwrap();
        let bytes = fetcher.fetch(path.to_str().unwrap()).await.unwrap();
        assert_eq!(bytes, b"Form 990");
    }
}
