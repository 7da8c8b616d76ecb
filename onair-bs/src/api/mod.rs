//! HTTP API handlers for onair-bs

pub mod banners;
pub mod columnists;
pub mod health;
pub mod schedule;
pub mod selection;
pub mod slots;
pub mod sse;

pub use banners::banner_routes;
pub use columnists::columnist_routes;
pub use health::health_routes;
pub use schedule::schedule_routes;
pub use selection::selection_routes;
pub use slots::slot_routes;
pub use sse::event_stream;
