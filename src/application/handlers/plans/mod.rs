//! Plan registry operation handlers.

mod create_plan;
mod delete_plan;
mod get_plan;
mod list_plans;
mod update_plan;

pub use create_plan::{CreatePlanCommand, CreatePlanHandler};
pub use delete_plan::{DeletePlanCommand, DeletePlanHandler};
pub use get_plan::{GetPlanHandler, GetPlanQuery};
pub use list_plans::ListPlansHandler;
pub use update_plan::{UpdatePlanCommand, UpdatePlanHandler};
