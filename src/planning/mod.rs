//! Goal planning with closed-form annuity formulas

mod goal;

pub use goal::{plan_goal, pmt, pv, GoalPlan, GoalPlanInput, GoalWindow};
