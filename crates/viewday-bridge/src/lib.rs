//! Message boundary between the sync engine and the remote calendar
//! surface.
//!
//! Inbound messages are origin-validated, parsed into a tagged union, and
//! routed by the [`Dispatcher`] to exactly one handler. Outbound payloads
//! leave through the fire-and-forget [`SurfacePort`] seam. Host
//! capabilities (document picker, note opening, external URLs, periodic
//! notes, user notices) stay behind [`HostActions`] so presentation glue
//! never leaks into the engine.

pub mod dispatcher;
pub mod host;
pub mod meeting;
pub mod messages;
pub mod origin;

pub use dispatcher::Dispatcher;
pub use host::{HostActions, Period};
pub use meeting::MeetingFields;
pub use messages::{InboundMessage, OutboundMessage, SurfacePort};
pub use origin::{is_allowed_origin, ALLOWED_ORIGINS};
