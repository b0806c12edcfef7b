mod common;

use std::sync::Arc;
use std::time::Duration;

use blueprint_builder::core::{GenerationRequest, GenerationService, TemplateGenerator};
use tokio::runtime::Handle;

use common::texas_fields;

fn service(delay_ms: u64) -> (
    GenerationService,
    tokio::sync::mpsc::UnboundedReceiver<blueprint_builder::core::GenerationCompleted>,
) {
    GenerationService::new(
        Handle::current(),
        Arc::new(TemplateGenerator),
        Duration::from_millis(delay_ms),
    )
}

#[tokio::test(start_paused = true)]
async fn completion_arrives_after_delay() {
    let (mut service, mut completions) = service(1500);
    service.start(GenerationRequest {
        id: 1,
        fields: texas_fields(),
    });
    assert_eq!(service.in_flight(), 1);

    tokio::time::advance(Duration::from_millis(1499)).await;
    tokio::task::yield_now().await;
    assert!(completions.try_recv().is_err());

    let done = completions.recv().await.expect("completion");
    assert_eq!(done.id, 1);
    assert_eq!(done.blueprint.scenario_title, "Test");
    service.acknowledge(done.id);
    assert_eq!(service.in_flight(), 0);
}

#[tokio::test(start_paused = true)]
async fn cancelled_request_never_reports() {
    let (mut service, mut completions) = service(1500);
    service.start(GenerationRequest {
        id: 1,
        fields: texas_fields(),
    });
    service.start(GenerationRequest {
        id: 2,
        fields: texas_fields(),
    });

    assert!(service.cancel(1));
    assert!(!service.cancel(1));

    let done = completions.recv().await.expect("completion");
    assert_eq!(done.id, 2);

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert!(completions.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn dropping_the_service_cancels_everything() {
    let (mut service, mut completions) = service(500);
    service.start(GenerationRequest {
        id: 7,
        fields: texas_fields(),
    });
    drop(service);

    // Every sender is gone once the cancelled task exits.
    assert!(completions.recv().await.is_none());
}

#[tokio::test(start_paused = true)]
async fn delay_changes_apply_to_new_requests() {
    let (mut service, mut completions) = service(5_000);
    service.set_delay(Duration::ZERO);
    assert_eq!(service.delay(), Duration::ZERO);
    service.start(GenerationRequest {
        id: 3,
        fields: texas_fields(),
    });
    let done = completions.recv().await.expect("completion");
    assert_eq!(done.id, 3);
}
