pub mod allocation_service;
pub mod chart_service;
pub mod connection_service;
pub mod context_service;
pub mod goal_service;
pub mod simulation_service;
pub mod stats_service;
