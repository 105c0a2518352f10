pub mod core;
pub mod history;
pub mod models;
pub mod schema;
pub mod session;
pub mod tools;

// Agents and handoff
pub mod agent;

// External seams
pub mod connection;
pub mod llm;
pub mod prompts;

// Optional components
pub mod cli;
pub mod logging;
