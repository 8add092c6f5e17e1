//! Systems module - engine stages and the ECS systems that drive them.

pub mod collision;
pub mod debug;
pub mod kinematics;
pub mod logic;
