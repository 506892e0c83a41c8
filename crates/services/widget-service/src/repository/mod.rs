//! Widget persistence.

mod widget_repository;

pub use widget_repository::{
    ContactOutcome, JobOpeningView, NewBanner, WidgetRepository, WidgetStore,
};

#[cfg(any(test, feature = "test-utils"))]
pub use widget_repository::MockWidgetRepository;
