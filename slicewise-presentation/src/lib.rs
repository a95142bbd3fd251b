#![warn(clippy::uninlined_format_args)]

pub mod plan_presenter;

pub use plan_presenter::PlanPresenter;
