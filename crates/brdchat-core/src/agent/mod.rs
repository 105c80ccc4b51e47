//! Remote agent clients: the trait seam, the HTTP implementation, the local
//! fallback endpoint, and a scripted mock for tests.

pub mod client;
pub mod fallback;
pub mod identifiers;
pub mod mock;

pub use client::{AgentClient, FragmentStream, HttpAgentClient};
pub use fallback::FallbackClient;
pub use identifiers::extract_agent_id;
pub use mock::{MockAgentClient, MockReply};
