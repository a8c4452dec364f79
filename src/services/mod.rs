/// OpenAPI documentation generation.
pub mod documentation;
/// Game recording and lookup.
pub mod game_service;
/// Health check service.
pub mod health_service;
/// Match scheduling.
pub mod match_service;
/// PDF report generation.
pub mod report_service;
/// Team and roster management.
pub mod team_service;
