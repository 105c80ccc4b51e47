//! Agent identifier normalization.

use once_cell::sync::Lazy;
use regex::Regex;

static PLAIN_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new("^[0-9a-zA-Z]{10}$").expect("valid regex"));
static ID_RUN: Lazy<Regex> = Lazy::new(|| Regex::new("[0-9a-zA-Z]{10}").expect("valid regex"));

/// Normalize an agent identifier that may be configured as a full ARN.
///
/// A bare 10-character alphanumeric id passes through. For ARN-shaped
/// strings the last 10-character alphanumeric run is taken (the agent id
/// sits at the end of the resource part); when no such run exists the last
/// path segment is stripped to its alphanumeric tail. Anything else is
/// returned unchanged.
pub fn extract_agent_id(agent_id_or_arn: &str) -> String {
    if PLAIN_ID.is_match(agent_id_or_arn) {
        return agent_id_or_arn.to_string();
    }

    if agent_id_or_arn.contains("arn:aws:bedrock") {
        if let Some(found) = ID_RUN.find_iter(agent_id_or_arn).last() {
            return found.as_str().to_string();
        }

        let last_part = agent_id_or_arn
            .rsplit(['/', '_', '-'])
            .next()
            .unwrap_or(agent_id_or_arn);
        let alphanumeric: String = last_part
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .collect();
        let start = alphanumeric.len().saturating_sub(10);
        return alphanumeric[start..].to_string();
    }

    agent_id_or_arn.to_string()
}
