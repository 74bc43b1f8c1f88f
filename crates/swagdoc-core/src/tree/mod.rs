pub mod builder;
pub mod endpoint;
pub mod mount;

pub use builder::{ApiBuilder, RouteTree};
pub use endpoint::{Endpoint, HttpMethod, ParamKind, Parameter, PathTemplate, Route, Segment};
pub use mount::{FrameId, MountFrame, VersionDecl, VersioningStrategy};
