//! Host-independent page bar core.
//!
//! Nothing in here touches the DOM or the network; the browser binding in
//! `crate::shared` supplies the view, transport and navigator.

pub mod config;
pub mod controller;
pub mod error;
pub mod markup;
pub mod registry;
pub mod state;
pub mod transport;
pub mod url;
pub mod view;
pub mod window;

pub use config::{
    AsyncMode, DeclaredAttributes, HttpMethod, LoadMode, NumericPolicy, PageBarConfig,
    PageBarOptions, Params,
};
pub use controller::{Detachable, PageController, SwitchOutcome};
pub use error::{ExtractionError, PageBarError};
pub use registry::{DetachGuard, PageBarRegistry};
pub use state::PaginationState;
pub use transport::{Navigator, ResponseKind, Transport, TransportRequest, TransportResponse};
pub use view::{PageBarModel, PageBarView};
pub use window::{Controls, NavTarget, PageWindow};
