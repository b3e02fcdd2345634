//! Domain identifiers (strongly-typed IDs).
//!
//! ULID ベースの ID + Phantom type パターン。
//! `Id<T>` というジェネリック型で共通実装を提供しつつ、`T` は実行時には
//! 使わない（PhantomData）マーカー型として、コンパイル時の型安全性を提供します。
//! ULID なので生成時刻でソートでき、調整なしで複数ノードから生成できます。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use ulid::Ulid;

/// IdMarker は各 ID 型のマーカー trait
///
/// Display で使うプレフィックス（"proj-", "dev-", ...）を提供します。
pub trait IdMarker: Send + Sync + 'static {
    fn prefix() -> &'static str;
}

/// ジェネリック ID 型
///
/// `T` は PhantomData で、実行時にはメモリを消費しませんが、
/// コンパイル時に型安全性を提供します。`ProjectId` と `BatchId` は
/// 混同できません。
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Id<T: IdMarker> {
    ulid: Ulid,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

impl<T: IdMarker> Id<T> {
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self {
            ulid,
            _marker: PhantomData,
        }
    }

    pub fn as_ulid(&self) -> Ulid {
        self.ulid
    }
}

impl<T: IdMarker> From<Ulid> for Id<T> {
    fn from(ulid: Ulid) -> Self {
        Self::from_ulid(ulid)
    }
}

impl<T: IdMarker> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", T::prefix(), self.ulid)
    }
}

// ========================================
// マーカー型の定義
// ========================================

/// Project のマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Project {}

impl IdMarker for Project {
    fn prefix() -> &'static str {
        "proj-"
    }
}

/// Developer のマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Developer {}

impl IdMarker for Developer {
    fn prefix() -> &'static str {
        "dev-"
    }
}

/// Batch のマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Batch {}

impl IdMarker for Batch {
    fn prefix() -> &'static str {
        "batch-"
    }
}

/// Candidate のマーカー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Candidate {}

impl IdMarker for Candidate {
    fn prefix() -> &'static str {
        "cand-"
    }
}

// ========================================
// Type Alias（使いやすさのため）
// ========================================

/// Identifier of a Project (the unit a client posts and developers accept).
pub type ProjectId = Id<Project>;

/// Identifier of a Developer profile.
pub type DeveloperId = Id<Developer>;

/// Identifier of an AssignmentBatch (one rotation round for a project).
pub type BatchId = Id<Batch>;

/// Identifier of an AssignmentCandidate (one developer within a batch).
pub type CandidateId = Id<Candidate>;
