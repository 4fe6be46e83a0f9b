pub mod background;
pub mod config;
pub mod daemon;
pub mod ipc;
pub mod override_gate;
pub mod page;
pub mod policy;
pub mod protocol;
pub mod sites;

pub use background::{Badge, BackgroundHandle, BackgroundService, BadgeSink, LogBadgeSink};
pub use daemon::Daemon;
pub use ipc::IpcClient;
pub use override_gate::{OverrideError, OverrideGate};
pub use page::{PageOutcome, PageSession};
pub use policy::{Decision, PolicyResolver};
pub use protocol::{EvaluationReply, Request, Response};
pub use sites::{ContentMatcher, PostPermalink, SiteLists, VideoWatchPage};
