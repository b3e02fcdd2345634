//! IdGenerator port - ID 生成の抽象化
//!
//! IdGenerator は分散システムで使える ID を生成するためのインターフェースです。
//! テスト容易性のために、trait として抽象化しています。
//!
//! # 実装
//! - **UlidGenerator**: ULID ベース（本番用）

use ulid::Ulid;

use crate::domain::{BatchId, CandidateId, DeveloperId, ProjectId};
use crate::ports::Clock;

/// IdGenerator は分散システムで使える ID を生成
///
/// # ULID の特性
/// - 時刻でソート可能
/// - 分散環境で生成可能（調整不要）
///
/// # Thread Safety
/// - `Send + Sync` を要求（複数スレッドから使える）
pub trait IdGenerator: Send + Sync {
    fn generate_project_id(&self) -> ProjectId;
    fn generate_developer_id(&self) -> DeveloperId;
    fn generate_batch_id(&self) -> BatchId;
    fn generate_candidate_id(&self) -> CandidateId;
}

/// UlidGenerator は ULID ベースの ID 生成器
///
/// Clock を使って現在時刻ベースの ULID を生成します。
/// これにより、テスト時に FixedClock を使って決定的な timestamp 部分を
/// 持つ ID を生成できます。
pub struct UlidGenerator<C> {
    clock: C,
}

impl<C: Clock> UlidGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    fn next(&self) -> Ulid {
        let timestamp_ms = self.clock.now().timestamp_millis() as u64;
        Ulid::from_parts(timestamp_ms, rand::random())
    }
}

impl<C: Clock> IdGenerator for UlidGenerator<C> {
    fn generate_project_id(&self) -> ProjectId {
        ProjectId::from(self.next())
    }

    fn generate_developer_id(&self) -> DeveloperId {
        DeveloperId::from(self.next())
    }

    fn generate_batch_id(&self) -> BatchId {
        BatchId::from(self.next())
    }

    fn generate_candidate_id(&self) -> CandidateId {
        CandidateId::from(self.next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{FixedClock, SystemClock};
    use chrono::{TimeZone, Utc};

    #[test]
    fn ulid_generator_generates_unique_ids() {
        let id_gen = UlidGenerator::new(SystemClock);

        let id1 = id_gen.generate_batch_id();
        let id2 = id_gen.generate_batch_id();

        assert_ne!(id1, id2);
    }

    #[test]
    fn ulid_generator_with_fixed_clock_is_deterministic() {
        let fixed_time = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let clock = FixedClock::new(fixed_time);
        let id_gen = UlidGenerator::new(clock);

        let id1 = id_gen.generate_candidate_id();
        let id2 = id_gen.generate_candidate_id();

        // ランダム部分があるので ID は異なる
        assert_ne!(id1, id2);

        // ただし、timestamp 部分は同じはず
        let timestamp1 = (id1.as_ulid().0 >> 80) as u64;
        let timestamp2 = (id2.as_ulid().0 >> 80) as u64;
        assert_eq!(timestamp1, timestamp2);
        assert_eq!(timestamp1, fixed_time.timestamp_millis() as u64);
    }

    #[test]
    fn different_id_types_are_generated() {
        let id_gen = UlidGenerator::new(SystemClock);

        assert!(id_gen.generate_project_id().to_string().starts_with("proj-"));
        assert!(id_gen.generate_developer_id().to_string().starts_with("dev-"));
        assert!(id_gen.generate_batch_id().to_string().starts_with("batch-"));
        assert!(
            id_gen
                .generate_candidate_id()
                .to_string()
                .starts_with("cand-")
        );
    }
}
