use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use subject_reorder::config::EngineConfig;
use subject_reorder::engine::ReorderEngine;
use subject_reorder::persist::LoggingGateway;
use subject_reorder::types::{SectionId, SubjectId, SubjectItem};

/// Demo driver: reorders a sample section against the logging gateway.
#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "subject_reorder=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let items = vec![
        SubjectItem::root(1u64, 1),
        SubjectItem::child(11u64, 1u64, 2),
        SubjectItem::child(12u64, 1u64, 3),
        SubjectItem::root(2u64, 4),
        SubjectItem::child(21u64, 2u64, 5),
        SubjectItem::root(3u64, 6),
    ];

    // A short quiet period keeps the demo snappy.
    let config = EngineConfig::from_env().with_quiet_period(Duration::from_millis(400));
    let engine = ReorderEngine::new(SectionId(1), items, LoggingGateway::new(), config);
    let mut state_rx = engine.subscribe();
    let handle = engine.spawn();

    // Drag subject 3 to the front, then move a child within its group.
    drive_gesture(&handle, SubjectId(3), SubjectId(1)).await;
    drive_gesture(&handle, SubjectId(12), SubjectId(11)).await;

    // Let the quiet period mature and the (logged) save land. The engine
    // starts out clean, so wait for the save notice rather than cleanliness.
    let settled = state_rx
        .wait_for(|state| state.is_clean() && state.notice.is_some())
        .await
        .expect("engine stopped early")
        .clone();

    println!("final ordering:");
    for node in settled.tree() {
        println!("  {:>2}. subject {}", node.subject.order, node.subject.id);
        for child in &node.children {
            println!("      {:>2}. subject {}", child.order, child.id);
        }
    }

    if let Err(error) = handle.detach().await {
        tracing::warn!(%error, "engine already gone");
    }
}

async fn drive_gesture(
    handle: &subject_reorder::engine::ReorderHandle,
    source: SubjectId,
    target: SubjectId,
) {
    if let Err(error) = async {
        handle.drag_start(source).await?;
        handle.drag_over(target).await?;
        handle.drop_on(target).await?;
        handle.drag_end().await
    }
    .await
    {
        tracing::warn!(%error, %source, %target, "gesture dropped");
    }
}
