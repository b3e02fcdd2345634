//! rota-core
//!
//! Core building blocks for the Rota assignment engine: developer rotation,
//! batch generation, first-accept-wins acceptance, and deadline expiry.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, state, developer, project, batch, candidate, events）
//! - **ports**: 抽象化レイヤー（Clock, IdGenerator, EventSink）
//! - **store**: AssignmentStore port + in-memory implementation（source of truth）
//! - **rotation**: RotationService（generate/refresh/accept/reject）+ selection policy
//! - **expiry**: ExpiryService（deadline sweep）+ in-process sweeper loop
//! - **observability**: serializable status views（counts, batch status）

pub mod domain;
pub mod error;
pub mod expiry;
pub mod observability;
pub mod ports;
pub mod rotation;
pub mod store;

pub use error::RotaError;
