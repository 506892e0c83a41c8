//! Widget business logic.

mod widget_service;

pub use widget_service::{ContactRequest, WidgetManager, WidgetService};

#[cfg(any(test, feature = "test-utils"))]
pub use widget_service::MockWidgetService;
