/// Service configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. In
/// production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// openSenseMap API base URL.
    pub sensemap_base_url: String,
    /// Fixed list of station (box) identifiers to aggregate over.
    pub station_ids: Vec<String>,
    /// Valkey/Redis connection URL.
    pub valkey_url: String,
    /// Valkey connection pool size.
    pub valkey_pool_size: usize,
    /// Bucket the archiver writes snapshots to.
    pub archive_bucket: String,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
}

/// Default station set: four public openSenseMap boxes.
const DEFAULT_STATION_IDS: &str = "5eba5fbad46fb8001b799786,5c21ff8f919bf8001adf2488,5ade1acf223bd80019a1011c,5a8d572dd55e820019ce1a2b";

impl ServiceConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                         |
    /// |------------------------|---------------------------------|
    /// | `HOST`                 | `0.0.0.0`                       |
    /// | `PORT`                 | `3000`                          |
    /// | `SENSEMAP_BASE_URL`    | `https://api.opensensemap.org`  |
    /// | `STATION_IDS`          | four public boxes               |
    /// | `VALKEY_URL`           | `redis://valkey-service:6379`   |
    /// | `VALKEY_POOL_SIZE`     | `8`                             |
    /// | `ARCHIVE_BUCKET`       | `temperature-archive`           |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                            |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let sensemap_base_url = std::env::var("SENSEMAP_BASE_URL")
            .unwrap_or_else(|_| "https://api.opensensemap.org".into());

        let station_ids: Vec<String> = std::env::var("STATION_IDS")
            .unwrap_or_else(|_| DEFAULT_STATION_IDS.into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let valkey_url =
            std::env::var("VALKEY_URL").unwrap_or_else(|_| "redis://valkey-service:6379".into());

        let valkey_pool_size: usize = std::env::var("VALKEY_POOL_SIZE")
            .unwrap_or_else(|_| "8".into())
            .parse()
            .expect("VALKEY_POOL_SIZE must be a valid usize");

        let archive_bucket =
            std::env::var("ARCHIVE_BUCKET").unwrap_or_else(|_| "temperature-archive".into());

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            sensemap_base_url,
            station_ids,
            valkey_url,
            valkey_pool_size,
            archive_bucket,
            request_timeout_secs,
        }
    }
}
