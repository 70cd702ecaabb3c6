mod calorie_history;
mod consumed_item;
mod goal;
mod product;
mod workout;

pub use calorie_history::CalorieHistoryItem;
pub use consumed_item::ConsumedItem;
pub use goal::{Goal, GoalId, MemberId};
pub use product::{Product, ProductPage, PRODUCTS_PER_PAGE};
pub use workout::{Exercise, Workout, WorkoutId};
