pub mod role;
pub mod vacation_approval;
pub mod vacation_plan;
pub mod vacation_type;
