//! Engine fetcher
//!
//! Downloads one file (by default the Stockfish.js build from unpkg) into
//! the app's tree so the browser can load it same-origin. A single GET, no
//! retry: the result is either the complete file or an error.

mod error;

pub use error::FetchError;

use futures_util::StreamExt;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;

use crate::config::{FetchSettings, STOCKFISH_DESTINATION, STOCKFISH_URL};
use crate::logger;

const USER_AGENT: &str = concat!("chesssim-tools/", env!("CARGO_PKG_VERSION"));

/// What to download and where to put it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTask {
    pub url: String,
    pub destination: PathBuf,
}

impl FetchTask {
    pub fn new(url: impl Into<String>, destination: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            destination: destination.into(),
        }
    }

    /// `stockfish.js` 10.0.2 into `stockfish/stockfish.js`
    pub fn stockfish() -> Self {
        Self::new(STOCKFISH_URL, STOCKFISH_DESTINATION)
    }

    pub fn from_config(settings: &FetchSettings) -> Self {
        Self::new(settings.url.clone(), settings.destination.clone())
    }
}

/// HTTP client wrapper for engine downloads
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    pub fn new(connect_timeout: Duration, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client })
    }

    pub fn from_config(settings: &FetchSettings) -> Result<Self, FetchError> {
        Self::new(
            Duration::from_secs(settings.connect_timeout),
            Duration::from_secs(settings.timeout),
        )
    }

    /// Download `task.url` to `task.destination`, returning the byte count.
    ///
    /// The body is streamed into a `.part` sibling that replaces the
    /// destination only once complete, so an existing file is overwritten
    /// on success and left untouched on failure. The partial file is removed
    /// on any error.
    pub async fn download(&self, task: &FetchTask) -> Result<u64, FetchError> {
        ensure_parent_dir(&task.destination).await?;

        let response = self.client.get(&task.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let part_path = partial_path(&task.destination);
        let result = match write_body(&part_path, response).await {
            Ok(written) => fs::rename(&part_path, &task.destination)
                .await
                .map(|()| written)
                .map_err(FetchError::from),
            Err(e) => Err(e),
        };

        if result.is_err() {
            remove_partial(&part_path).await;
        }
        result
    }
}

/// Download one file, reporting progress on the console.
///
/// Never panics on network or filesystem trouble: every failure becomes a
/// printed message and `false`.
pub async fn fetch_and_save(fetcher: &Fetcher, task: &FetchTask) -> bool {
    let name = task.destination.display();
    println!("Downloading {name} from {}...", task.url);

    match fetcher.download(task).await {
        Ok(_) => {
            println!("{}", success_message(&task.destination));
            true
        }
        Err(e) => {
            println!("{}", failure_message(&task.destination, &e));
            false
        }
    }
}

fn success_message(destination: &Path) -> String {
    format!("✅ Successfully downloaded {}", destination.display())
}

fn failure_message(destination: &Path, err: &FetchError) -> String {
    format!("❌ Failed to download {}: {err}", destination.display())
}

/// Create the parent directory of `path` if it is missing.
///
/// Idempotent: an existing directory is not an error, and a bare file name
/// has nothing to create.
pub async fn ensure_parent_dir(path: &Path) -> Result<(), FetchError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).await?;
            Ok(())
        }
        _ => Ok(()),
    }
}

fn partial_path(destination: &Path) -> PathBuf {
    let mut name = OsString::from(destination.as_os_str());
    name.push(".part");
    PathBuf::from(name)
}

async fn write_body(path: &Path, response: reqwest::Response) -> Result<u64, FetchError> {
    let mut file = File::create(path).await?;
    let mut stream = response.bytes_stream();
    let mut written = 0u64;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }

    file.flush().await?;
    Ok(written)
}

async fn remove_partial(path: &Path) {
    match fs::remove_file(path).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => logger::log_warning(&format!(
            "Could not remove partial download '{}': {e}",
            path.display()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::testing::spawn_server;
    use std::fs as stdfs;

    const ENGINE: &[u8] = b"var Stockfish = function() { /* engine */ };";

    fn fetcher() -> Fetcher {
        Fetcher::new(Duration::from_secs(2), Duration::from_secs(10)).unwrap()
    }

    fn origin() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        stdfs::write(dir.path().join("stockfish.js"), ENGINE).unwrap();
        dir
    }

    #[test]
    fn test_default_task() {
        let task = FetchTask::stockfish();
        assert_eq!(task.url, "https://unpkg.com/stockfish.js@10.0.2/stockfish.js");
        assert_eq!(task.destination, PathBuf::from("stockfish/stockfish.js"));
    }

    #[test]
    fn test_partial_path() {
        assert_eq!(
            partial_path(Path::new("stockfish/stockfish.js")),
            PathBuf::from("stockfish/stockfish.js.part")
        );
    }

    #[tokio::test]
    async fn test_ensure_parent_dir_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("stockfish/stockfish.js");

        ensure_parent_dir(&dest).await.unwrap();
        ensure_parent_dir(&dest).await.unwrap();
        assert!(dir.path().join("stockfish").is_dir());

        ensure_parent_dir(Path::new("stockfish.js")).await.unwrap();
    }

    #[tokio::test]
    async fn test_download_overwrites_existing_file() {
        let site = origin();
        let (addr, _stop) = spawn_server(site.path()).await;

        let out = tempfile::tempdir().unwrap();
        let dest = out.path().join("stockfish/stockfish.js");
        stdfs::create_dir_all(dest.parent().unwrap()).unwrap();
        stdfs::write(&dest, b"stale content that is longer than the engine file, by a lot").unwrap();

        let task = FetchTask::new(format!("http://{addr}/stockfish.js"), &dest);
        let written = fetcher().download(&task).await.unwrap();

        assert_eq!(written, ENGINE.len() as u64);
        assert_eq!(stdfs::read(&dest).unwrap(), ENGINE);
        assert!(!partial_path(&dest).exists());
    }

    #[tokio::test]
    async fn test_fetch_and_save_creates_directory() {
        let site = origin();
        let (addr, _stop) = spawn_server(site.path()).await;

        let out = tempfile::tempdir().unwrap();
        let dest = out.path().join("stockfish/stockfish.js");
        let task = FetchTask::new(format!("http://{addr}/stockfish.js"), &dest);

        assert!(fetch_and_save(&fetcher(), &task).await);
        assert_eq!(stdfs::read(&dest).unwrap(), ENGINE);
    }

    #[tokio::test]
    async fn test_not_found_leaves_existing_file() {
        let site = origin();
        let (addr, _stop) = spawn_server(site.path()).await;

        let out = tempfile::tempdir().unwrap();
        let dest = out.path().join("stockfish.js");
        stdfs::write(&dest, b"previous build").unwrap();

        let task = FetchTask::new(format!("http://{addr}/missing.js"), &dest);
        let err = fetcher().download(&task).await.unwrap_err();

        assert!(matches!(err, FetchError::Status(404)));
        assert_eq!(stdfs::read(&dest).unwrap(), b"previous build");
        assert!(!partial_path(&dest).exists());
    }

    #[test]
    fn test_console_messages() {
        let dest = Path::new("stockfish/stockfish.js");
        assert_eq!(
            success_message(dest),
            "✅ Successfully downloaded stockfish/stockfish.js"
        );
        assert_eq!(
            failure_message(dest, &FetchError::Status(404)),
            format!("❌ Failed to download stockfish/stockfish.js: {}", FetchError::Status(404))
        );
    }

    #[tokio::test]
    async fn test_truncated_body_keeps_previous_file() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        // Origin promises 100 bytes, sends 10, then hangs up
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 4096];
            let _ = stream.read(&mut buf).await;
            stream
                .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\n0123456789")
                .await
                .unwrap();
            stream.shutdown().await.unwrap();
        });

        let out = tempfile::tempdir().unwrap();
        let dest = out.path().join("stockfish.js");
        stdfs::write(&dest, b"previous build").unwrap();

        let task = FetchTask::new(format!("http://{addr}/stockfish.js"), &dest);
        let err = fetcher().download(&task).await.unwrap_err();

        assert!(matches!(err, FetchError::Network(_)), "{err:?}");
        assert_eq!(stdfs::read(&dest).unwrap(), b"previous build");
        assert!(!partial_path(&dest).exists());
    }

    #[tokio::test]
    async fn test_parent_is_a_file() {
        let site = origin();
        let (addr, _stop) = spawn_server(site.path()).await;

        let out = tempfile::tempdir().unwrap();
        stdfs::write(out.path().join("stockfish"), b"not a directory").unwrap();
        let dest = out.path().join("stockfish/stockfish.js");
        let task = FetchTask::new(format!("http://{addr}/stockfish.js"), &dest);

        let err = fetcher().download(&task).await.unwrap_err();
        assert!(matches!(err, FetchError::Filesystem(_)), "{err:?}");
        assert_eq!(err.category(), "filesystem");

        assert!(!fetch_and_save(&fetcher(), &task).await);
        assert_eq!(stdfs::read(out.path().join("stockfish")).unwrap(), b"not a directory");
    }

    #[tokio::test]
    async fn test_unreachable_host_returns_false() {
        // Grab a free port, then close it so nothing is listening
        let listener = crate::server::create_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let out = tempfile::tempdir().unwrap();
        let dest = out.path().join("stockfish/stockfish.js");
        let task = FetchTask::new(format!("http://{addr}/stockfish.js"), &dest);

        let err = fetcher().download(&task).await.unwrap_err();
        assert_eq!(err.category(), "network");

        assert!(!fetch_and_save(&fetcher(), &task).await);
        assert!(!dest.exists());
        assert!(!partial_path(&dest).exists());
    }
}
