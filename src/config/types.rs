use hls_edge_manifest::{DecisionRules, LineEnding};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub origin: OriginConfig,

    #[serde(default)]
    pub ddr: DdrConfig,

    #[serde(default)]
    pub rewrite: RewriteConfig,

    /// Thresholds for classifying devices
    #[serde(default)]
    pub decision: DecisionRules,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Upstream server that owns the playlists
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OriginConfig {
    /// Base URL requests are forwarded to (required to start the proxy)
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default = "default_origin_timeout")]
    pub timeout_secs: u64,
}

fn default_origin_timeout() -> u64 {
    10
}

impl Default for OriginConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout_secs: default_origin_timeout(),
        }
    }
}

/// Device description repository (user-agent classification service)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DdrConfig {
    /// Classify endpoint; the user agent is sent as the `ua` query parameter
    #[serde(default = "default_ddr_url")]
    pub url: String,

    #[serde(default = "default_ddr_timeout")]
    pub timeout_secs: u64,
}

fn default_ddr_url() -> String {
    "http://127.0.0.1:8081/servlet/classify".to_string()
}

fn default_ddr_timeout() -> u64 {
    5
}

impl Default for DdrConfig {
    fn default() -> Self {
        Self {
            url: default_ddr_url(),
            timeout_secs: default_ddr_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RewriteConfig {
    /// Request paths ending with one of these go through the rewrite pipeline
    #[serde(default = "default_path_suffixes")]
    pub path_suffixes: Vec<String>,

    #[serde(default)]
    pub line_ending: LineEndingMode,
}

fn default_path_suffixes() -> Vec<String> {
    vec![".m3u8".to_string()]
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            path_suffixes: default_path_suffixes(),
            line_ending: LineEndingMode::default(),
        }
    }
}

impl RewriteConfig {
    /// Whether a request path should be rewritten.
    pub fn matches(&self, path: &str) -> bool {
        let path = path.to_ascii_lowercase();
        self.path_suffixes
            .iter()
            .any(|suffix| path.ends_with(&suffix.to_ascii_lowercase()))
    }
}

/// Line terminator of rewritten playlists.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LineEndingMode {
    /// Reuse whatever the upstream playlist uses
    #[default]
    Preserve,
    Lf,
    Crlf,
}

impl LineEndingMode {
    /// Line ending to render with, given the upstream text.
    pub fn resolve(&self, upstream: &str) -> LineEnding {
        match self {
            Self::Preserve => LineEnding::detect(upstream),
            Self::Lf => LineEnding::Lf,
            Self::Crlf => LineEnding::CrLf,
        }
    }
}
