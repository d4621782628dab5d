//! lineup-infer — Remote face-inference client.
//!
//! Implements [`FaceAnalyzer`] against an insightface-style HTTP sidecar:
//! the service owns the models, this client ships raw RGB frames and maps
//! the JSON detections back into core types. Model readiness is probed
//! once at connect time; a service without loaded weights never gets a
//! detection request.

mod client;
mod dto;

pub use client::{InferError, RemoteAnalyzer, ServiceStatus};
