//! Client side of the size chart: the modal on the product page and the lookup that feeds it.

pub mod api;
pub mod controller;
#[cfg(target_arch = "wasm32")]
pub mod dom;
pub mod error;
pub mod modal;
pub mod page;
pub mod toasts;
mod timer;

pub use controller::{ControllerConfig, SizeChartController};
pub use modal::{ModalController, ModalState, Phase};
pub use page::{ElementId, SizeChartPage};
