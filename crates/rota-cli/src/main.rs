use std::sync::Arc;

use rota_core::domain::{DeveloperProfile, ExperienceLevel, Skill};
use rota_core::expiry::{ExpiryService, SweeperGroup};
use rota_core::ports::{IdGenerator, SystemClock, TracingEventSink, UlidGenerator};
use rota_core::rotation::{RotationPolicy, RotationService};
use rota_core::store::{AssignmentStore, InMemoryStore};
use tokio::time::{Duration, sleep};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // (A) 部品を用意: store / clock / id generator / event sink
    let store: Arc<InMemoryStore> = Arc::new(InMemoryStore::new());
    let clock = Arc::new(SystemClock);
    let ids = Arc::new(UlidGenerator::new(SystemClock));
    let events = Arc::new(TracingEventSink);

    // デモ用に締切を数秒に縮める（本番 default は 15 分）
    let mut policy = RotationPolicy::default_v1();
    policy.acceptance_window = chrono::Duration::seconds(2);
    policy.sweep_interval = Duration::from_millis(500);

    let rotation = RotationService::new(
        store.clone(),
        clock.clone(),
        ids.clone(),
        events.clone(),
        policy.clone(),
    );
    let expiry = Arc::new(ExpiryService::new(
        store.clone(),
        clock.clone(),
        events.clone(),
    ));

    // (B) 開発者を登録（tier と skill をばらけさせる）
    let roster = [
        ("aiko", ExperienceLevel::Fresher, vec!["rust"]),
        ("ben", ExperienceLevel::Fresher, vec!["rust", "react"]),
        ("chie", ExperienceLevel::Mid, vec!["rust", "sql"]),
        ("dan", ExperienceLevel::Mid, vec!["react"]),
        ("emi", ExperienceLevel::Expert, vec!["rust", "sql", "react"]),
    ];
    for (name, level, skills) in roster {
        let profile = DeveloperProfile::new(
            ids.generate_developer_id(),
            name,
            level,
            skills.into_iter().map(Skill::new).collect(),
        );
        store
            .register_developer(profile)
            .await
            .expect("register developer");
    }

    // (C) プロジェクト投稿 → 最初のバッチ生成
    let project = rotation
        .post_project("marketplace backend", vec![Skill::new("rust")])
        .await
        .expect("post project");
    let batch = rotation
        .generate_batch(project.project_id)
        .await
        .expect("generate batch");
    println!(
        "batch {} generated with {} candidates (deadline {})",
        batch.batch_id,
        batch.len(),
        batch.acceptance_deadline
    );

    // (D) 二人が同時に accept → 勝者は一人だけ（first-accept-wins）
    let a = batch.candidate_ids[0];
    let b = batch.candidate_ids[1];
    let rotation = Arc::new(rotation);
    let (r1, r2) = tokio::join!(
        {
            let rotation = Arc::clone(&rotation);
            tokio::spawn(async move { rotation.accept_candidate(a).await })
        },
        {
            let rotation = Arc::clone(&rotation);
            tokio::spawn(async move { rotation.accept_candidate(b).await })
        },
    );
    for (id, result) in [(a, r1.expect("join")), (b, r2.expect("join"))] {
        match result {
            Ok(c) => println!("{id}: accepted (developer {})", c.developer_id),
            Err(e) => println!("{id}: {e}"),
        }
    }

    // (E) 別プロジェクトで sweeper を回し、締切超過の expiry を見る
    let second = rotation
        .post_project("reporting dashboard", vec![Skill::new("sql")])
        .await
        .expect("post project");
    rotation
        .generate_batch(second.project_id)
        .await
        .expect("generate batch");

    let sweeper = SweeperGroup::spawn(Arc::clone(&expiry), policy.sweep_interval);
    sleep(Duration::from_secs(3)).await; // 締切 2 秒を越えるまで待つ
    sweeper.shutdown_and_join().await;

    let counts = store
        .counts_for_project(second.project_id)
        .await
        .expect("counts");
    println!(
        "project {}: pending={} accepted={} rejected={} expired={}",
        second.project_id, counts.pending, counts.accepted, counts.rejected, counts.expired
    );

    let status = store
        .batch_status(batch.batch_id)
        .await
        .expect("batch status");
    println!(
        "first batch status: {}",
        serde_json::to_string_pretty(&status).expect("serialize status")
    );
}
