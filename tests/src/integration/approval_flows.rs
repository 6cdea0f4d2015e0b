//! # Approval Flows
//!
//! A caller asks for approval, the surface answers through finalize, and the
//! caller resumes. Snapshots are observed on the real mirror bus.
//!
//! ## Flow Tested:
//!
//! 1. **request_approval → enqueue**: id assigned, snapshot mirrored, popup shown
//! 2. **finalize → resolution**: matching caller resumes exactly once
//! 3. **Unknown ids**: no mutation, no wake-up

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use ag_01_correlation_queue::{QueueError, RequestManagerApi};
    use ag_02_surface_arbiter::InMemoryWindowHost;
    use approval_runtime::{ApprovalContainer, RuntimeConfig};
    use serde_json::{json, Value};
    use shared_bus::{EventFilter, EventTopic, MirrorEvent, Subscription};
    use shared_types::entities::{PendingRequest, RequestId, RequestType};
    use shared_types::ipc::FinalizedRequest;
    use tokio::time::timeout;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn container() -> ApprovalContainer<InMemoryWindowHost> {
        ApprovalContainer::new(RuntimeConfig::default(), Arc::new(InMemoryWindowHost::new()))
    }

    fn snapshots(container: &ApprovalContainer<InMemoryWindowHost>) -> Subscription<Value> {
        container
            .mirror_bus
            .subscribe(EventFilter::topics(vec![EventTopic::PendingRequests]))
    }

    async fn next_snapshot(subscription: &mut Subscription<Value>) -> Vec<PendingRequest<Value>> {
        match timeout(Duration::from_secs(1), subscription.recv()).await {
            Ok(Some(MirrorEvent::PendingRequestsChanged { requests })) => requests,
            other => panic!("expected a pending snapshot, got {other:?}"),
        }
    }

    /// Wait until the queue lists `count` requests.
    async fn wait_for_pending(container: &ApprovalContainer<InMemoryWindowHost>, count: usize) {
        timeout(Duration::from_secs(1), async {
            while container.requests.list().await.unwrap().len() < count {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("requests enqueued in time");
    }

    // =============================================================================
    // INTEGRATION TESTS: ENQUEUE → FINALIZE → RESUME
    // =============================================================================

    #[tokio::test]
    async fn test_sign_request_accepted() {
        let container = container();
        let mut mirror = snapshots(&container);

        let requests = container.requests.clone();
        let caller = tokio::spawn(async move {
            requests
                .request_approval(
                    "signed-message",
                    RequestType::Sign,
                    Some(json!({ "msg": "x" })),
                )
                .await
        });

        let queued = next_snapshot(&mut mirror).await;
        assert_eq!(
            serde_json::to_value(&queued).unwrap(),
            json!([{ "id": "0", "type": "sign", "payload": { "msg": "x" } }])
        );
        assert_eq!(container.requests.list().await.unwrap(), queued);

        let matched = container
            .requests
            .finalize(FinalizedRequest::raw("0", "accept"))
            .await
            .unwrap();
        assert!(matched);

        let resumed = timeout(Duration::from_secs(1), caller).await.unwrap().unwrap();
        assert_eq!(resumed, Ok("signed-message"));
        assert!(next_snapshot(&mut mirror).await.is_empty());
        assert!(container.requests.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reject_carries_no_data() {
        let container = container();
        let requests = container.requests.clone();
        let caller = tokio::spawn(async move {
            requests
                .request_approval(vec![1u8, 2, 3], RequestType::SemaphoreProof, None)
                .await
        });
        wait_for_pending(&container, 1).await;

        container
            .requests
            .finalize(FinalizedRequest::raw("0", "reject"))
            .await
            .unwrap();

        let outcome = timeout(Duration::from_secs(1), caller).await.unwrap().unwrap();
        assert_eq!(outcome, Err(QueueError::Rejected));
    }

    #[tokio::test]
    async fn test_unknown_action_reported_to_caller() {
        let container = container();
        let requests = container.requests.clone();
        let caller =
            tokio::spawn(async move { requests.request_approval((), RequestType::Dummy, None).await });
        wait_for_pending(&container, 1).await;

        container
            .requests
            .finalize(FinalizedRequest::raw("0", "later"))
            .await
            .unwrap();

        let outcome = timeout(Duration::from_secs(1), caller).await.unwrap().unwrap();
        assert_eq!(
            outcome,
            Err(QueueError::UnsupportedAction {
                id: RequestId::FIRST,
                action: "later".to_string()
            })
        );
        assert!(container.requests.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_id_is_a_silent_no_op() {
        let container = container();
        let requests = container.requests.clone();
        let caller = tokio::spawn(async move {
            requests
                .request_approval((), RequestType::ConnectOrigin, None)
                .await
        });
        wait_for_pending(&container, 1).await;
        let before = container.requests.list().await.unwrap();

        let matched = container
            .requests
            .finalize(FinalizedRequest::raw("missing-id", "accept"))
            .await
            .unwrap();

        assert!(!matched);
        assert_eq!(container.requests.list().await.unwrap(), before);
        // The real waiter must not have been woken.
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!caller.is_finished());

        container
            .requests
            .finalize(FinalizedRequest::raw("0", "accept"))
            .await
            .unwrap();
        assert_eq!(caller.await.unwrap(), Ok(()));
    }

    #[tokio::test]
    async fn test_second_finalize_is_a_no_op() {
        let container = container();
        let id = container
            .requests
            .enqueue(RequestType::CreateIdentity, None)
            .await
            .unwrap();

        let first = container
            .requests
            .finalize(FinalizedRequest::new(id, "accept"))
            .await
            .unwrap();
        let second = container
            .requests
            .finalize(FinalizedRequest::new(id, "reject"))
            .await
            .unwrap();

        assert!(first);
        assert!(!second);
        assert_eq!(container.requests.stats().snapshot().unmatched, 1);
    }

    #[tokio::test]
    async fn test_verdict_before_wait_is_not_lost() {
        let container = container();
        let pending = container
            .requests
            .submit(RequestType::RlnProof, None)
            .await
            .unwrap();

        container
            .requests
            .finalize(FinalizedRequest::new(pending.id(), "accept"))
            .await
            .unwrap();

        let outcome = timeout(Duration::from_secs(1), pending.wait("proof"))
            .await
            .unwrap();
        assert_eq!(outcome, Ok("proof"));
        assert_eq!(container.requests.stats().snapshot().accepted, 1);
    }

    #[tokio::test]
    async fn test_unwaited_requests_leave_nothing_behind() {
        let container = container();
        let mut ids = Vec::new();
        for _ in 0..3 {
            ids.push(
                container
                    .requests
                    .enqueue(RequestType::Sign, None)
                    .await
                    .unwrap(),
            );
        }

        for id in &ids {
            assert!(container
                .requests
                .finalize(FinalizedRequest::new(*id, "accept"))
                .await
                .unwrap());
        }

        let stats = container.requests.stats().snapshot();
        assert_eq!(stats.abandoned, 3);
        assert_eq!(stats.accepted, 0);
        assert_eq!(
            container.requests.suspend_until_resolved(ids[0], ()).await,
            Err(QueueError::UnknownRequest { id: ids[0] })
        );
    }

    #[tokio::test]
    async fn test_padded_ids_do_not_resolve_requests() {
        let container = container();
        let requests = container.requests.clone();
        let caller =
            tokio::spawn(async move { requests.request_approval((), RequestType::Sign, None).await });
        wait_for_pending(&container, 1).await;

        for raw in ["+0", "00", " 0"] {
            let matched = container
                .requests
                .finalize(FinalizedRequest::raw(raw, "accept"))
                .await
                .unwrap();
            assert!(!matched, "{raw:?} must not match request 0");
        }
        assert_eq!(container.requests.list().await.unwrap().len(), 1);
        assert!(!caller.is_finished());

        container
            .requests
            .finalize(FinalizedRequest::raw("0", "accept"))
            .await
            .unwrap();
        assert_eq!(caller.await.unwrap(), Ok(()));
    }

    #[tokio::test]
    async fn test_ids_are_distinct_and_increasing() {
        let container = container();
        let mut ids = Vec::new();
        for _ in 0..20 {
            ids.push(
                container
                    .requests
                    .enqueue(RequestType::Dummy, None)
                    .await
                    .unwrap(),
            );
        }

        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
        let listed: Vec<RequestId> = container
            .requests
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(listed, ids);
    }

    #[tokio::test]
    async fn test_concurrent_callers_resolve_independently() {
        let container = container();

        let spawn_caller = |data: &'static str| {
            let requests = container.requests.clone();
            tokio::spawn(async move {
                requests
                    .request_approval(data, RequestType::Sign, Some(json!({ "from": data })))
                    .await
            })
        };
        let first = spawn_caller("first");
        let second = spawn_caller("second");
        wait_for_pending(&container, 2).await;

        let pending = container.requests.list().await.unwrap();
        assert_ne!(pending[0].id, pending[1].id);

        // Resolve whichever request belongs to "second".
        let second_id = pending
            .iter()
            .find(|r| r.payload == Some(json!({ "from": "second" })))
            .map(|r| r.id)
            .unwrap();
        container
            .requests
            .finalize(FinalizedRequest::new(second_id, "accept"))
            .await
            .unwrap();

        assert_eq!(second.await.unwrap(), Ok("second"));
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!first.is_finished());
        assert_eq!(container.requests.list().await.unwrap().len(), 1);

        let first_id = container.requests.list().await.unwrap()[0].id;
        container
            .requests
            .finalize(FinalizedRequest::new(first_id, "accept"))
            .await
            .unwrap();
        assert_eq!(first.await.unwrap(), Ok("first"));
    }

    #[tokio::test]
    async fn test_every_mutation_mirrors_in_order() {
        let container = container();
        let mut mirror = snapshots(&container);

        let a = container.requests.enqueue(RequestType::Sign, None).await.unwrap();
        let b = container.requests.enqueue(RequestType::Dummy, None).await.unwrap();
        container
            .requests
            .finalize(FinalizedRequest::new(a, "reject"))
            .await
            .unwrap();

        let ids = |snapshot: Vec<PendingRequest<Value>>| -> Vec<RequestId> {
            snapshot.into_iter().map(|r| r.id).collect()
        };
        assert_eq!(ids(next_snapshot(&mut mirror).await), vec![a]);
        assert_eq!(ids(next_snapshot(&mut mirror).await), vec![a, b]);
        assert_eq!(ids(next_snapshot(&mut mirror).await), vec![b]);
    }
}
