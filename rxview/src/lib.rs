mod async_error;
mod controller;
mod execution_result;
mod renderer;
mod source;
mod stream_ext;
mod subscription;
mod templates;
mod view_context;
mod view_event;
mod view_state;
pub mod mock;

#[cfg(test)]
mod unit_tests;

pub use async_error::*;
pub use controller::*;
pub use execution_result::*;
pub use renderer::*;
pub use source::*;
pub use stream_ext::*;
pub use templates::*;
pub use view_context::*;
pub use view_event::*;
pub use view_state::*;

/// Values an async source may deliver to a view.
pub trait ViewValue: Clone + Send + Sync + 'static {}

impl<T> ViewValue for T where T: Clone + Send + Sync + 'static {}
