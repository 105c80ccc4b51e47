//! Runtime configuration collected from environment variables.

use std::env;

/// Server and remote-collaborator configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Base URL of the remote agent service
    pub agent_url: String,
    /// Agent identifier; a full ARN is accepted and normalized
    pub agent_id: String,
    /// Agent alias identifier; a full ARN is accepted and normalized
    pub agent_alias_id: String,
    /// Base URL of the report object-store gateway
    pub reports_url: String,
    pub reports_bucket: String,
    /// Listing prefix for report objects
    pub reports_prefix: String,
    /// Local endpoint tried when the remote agent is unavailable
    pub fallback_url: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_agent_url() -> String {
    "http://localhost:9000".to_string()
}

fn default_reports_url() -> String {
    "http://localhost:9100".to_string()
}

fn default_reports_prefix() -> String {
    "BRD_".to_string()
}

fn default_fallback_url() -> String {
    "http://localhost:8080/invocations".to_string()
}

impl Config {
    pub fn from_env() -> Self {
        let host = env::var("BRDCHAT_HOST").unwrap_or_else(|_| default_host());
        let port = env::var("BRDCHAT_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or_else(default_port);
        let agent_url = env::var("BRDCHAT_AGENT_URL").unwrap_or_else(|_| default_agent_url());
        let agent_id = env::var("BRDCHAT_AGENT_ID").unwrap_or_default();
        let agent_alias_id = env::var("BRDCHAT_AGENT_ALIAS_ID").unwrap_or_default();
        let reports_url =
            env::var("BRDCHAT_REPORTS_URL").unwrap_or_else(|_| default_reports_url());
        let reports_bucket = env::var("BRDCHAT_REPORTS_BUCKET").unwrap_or_default();
        let reports_prefix =
            env::var("BRDCHAT_REPORTS_PREFIX").unwrap_or_else(|_| default_reports_prefix());
        let fallback_url =
            env::var("BRDCHAT_FALLBACK_URL").unwrap_or_else(|_| default_fallback_url());

        Self {
            host,
            port,
            agent_url,
            agent_id,
            agent_alias_id,
            reports_url,
            reports_bucket,
            reports_prefix,
            fallback_url,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            agent_url: default_agent_url(),
            agent_id: String::new(),
            agent_alias_id: String::new(),
            reports_url: default_reports_url(),
            reports_bucket: String::new(),
            reports_prefix: default_reports_prefix(),
            fallback_url: default_fallback_url(),
        }
    }
}
