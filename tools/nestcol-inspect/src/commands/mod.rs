pub mod arrow;
pub mod columns;
pub mod project;
