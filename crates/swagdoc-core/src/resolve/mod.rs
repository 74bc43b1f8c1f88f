pub mod base_path;
pub mod nickname;
pub mod path;

pub use base_path::{BasePath, RequestContext, resolve_base_path};
pub use nickname::nickname;
pub use path::{PathPolicy, ResolvedRoute, resolve};
