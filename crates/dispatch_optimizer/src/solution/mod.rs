pub mod assembler;
pub mod optimization_result;
pub mod route;
pub mod verify;
