//! # GridMesh MCP Server Library
//!
//! MCP (Model Context Protocol) server exposing the GridMesh batch-compute
//! platform as structured tools for AI agents.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `auth`: Per-request credential resolution and masking
//! - `config`: Configuration management
//! - `error`: Tool-facing error taxonomy
//! - `mcp`: JSON-RPC protocol types, tool registry, and the /mcp endpoint
//! - `tools`: The eight tool handlers

pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod mcp;
pub mod tools;
