//! Swimlane Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Swimlane BPMN
//! compiler and its command-line front end. It includes:
//!
//! - **Geometry**: Integer points, sizes and bounds ([`geometry`] module)
//! - **Categories**: Shape families and their anchor tables ([`category::Category`])
//! - **Model**: The structural pool/lane/component/flow model ([`model`] module)
//! - **Edits**: Instruction scripts that update a model ([`edit::EditScript`])
//! - **Identifiers**: Injectable id generation ([`identifier::IdGenerator`])

pub mod category;
pub mod edit;
pub mod geometry;
pub mod identifier;
pub mod model;
