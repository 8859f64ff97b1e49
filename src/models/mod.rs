//! Request and Response models for the upload API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::UploadRequest;
pub use responses::{
    ClearResponse, ErrorResponse, HealthResponse, ListResponse, SaveResponse, StatsResponse,
    UsageResponse,
};
