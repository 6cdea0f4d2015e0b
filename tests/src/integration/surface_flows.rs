//! # Surface Flows
//!
//! Single-flight popup behaviour as seen from request callers: at most one
//! popup for any number of pending requests, reopened when the user closes
//! it, never mistaken for a recycled window id.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use ag_01_correlation_queue::{QueueError, RequestManagerApi};
    use ag_02_surface_arbiter::{
        InMemoryWindowHost, OpenFailure, SurfaceArbiterApi, WindowInfo, WindowKind,
    };
    use approval_runtime::{ApprovalContainer, RuntimeConfig};
    use futures::future::join_all;
    use shared_bus::{EventFilter, EventTopic, MirrorEvent};
    use shared_types::entities::RequestType;
    use shared_types::ipc::FinalizedRequest;
    use tokio::time::timeout;
    use tokio_stream::StreamExt;

    fn setup() -> (ApprovalContainer<InMemoryWindowHost>, Arc<InMemoryWindowHost>) {
        let host = Arc::new(InMemoryWindowHost::new());
        let container = ApprovalContainer::new(RuntimeConfig::default(), Arc::clone(&host));
        (container, host)
    }

    #[tokio::test]
    async fn test_burst_of_requests_opens_one_popup() {
        let (container, host) = setup();

        let enqueues = (0..16).map(|_| {
            let requests = container.requests.clone();
            async move { requests.enqueue(RequestType::Sign, None).await }
        });
        let ids = join_all(enqueues).await;

        assert!(ids.iter().all(Result::is_ok));
        assert_eq!(host.popup_count(), 1);
        assert_eq!(host.open_calls(), 1);
        assert_eq!(host.focus_calls().len(), 15);
    }

    #[tokio::test]
    async fn test_closed_popup_is_reopened() {
        let (container, host) = setup();

        container.requests.enqueue(RequestType::Sign, None).await.unwrap();
        let first = container.arbiter.tracked_surface().await.unwrap();

        assert!(host.close(first));
        container.requests.enqueue(RequestType::Sign, None).await.unwrap();
        let second = container.arbiter.tracked_surface().await.unwrap();

        assert_ne!(first, second);
        assert_eq!(host.popup_count(), 1);
        assert!(host.focus_calls().is_empty());
    }

    #[tokio::test]
    async fn test_recycled_window_id_is_not_reused() {
        let (container, host) = setup();

        container.requests.enqueue(RequestType::Dummy, None).await.unwrap();
        let popup = container.arbiter.tracked_surface().await.unwrap();

        // The user closes the popup and the host hands its id to a normal window.
        host.close(popup);
        host.insert(WindowInfo::new(popup, WindowKind::Normal));

        container.requests.enqueue(RequestType::Dummy, None).await.unwrap();

        let tracked = container.arbiter.tracked_surface().await.unwrap();
        assert_ne!(tracked, popup);
        assert!(host.focus_calls().is_empty());
        assert_eq!(host.popup_count(), 1);
    }

    #[tokio::test]
    async fn test_failed_open_keeps_request_finalizable() {
        let (container, host) = setup();
        host.fail_next_open(OpenFailure::HostDown);

        let err = container
            .requests
            .enqueue(RequestType::ConnectOrigin, None)
            .await
            .unwrap_err();
        assert!(matches!(err, QueueError::SurfaceOpenFailed { .. }));
        assert_eq!(container.requests.list().await.unwrap().len(), 1);
        assert!(container.requests.has_pending().await.unwrap());

        // The next request brings a popup up; it can answer the first one too.
        let second = container
            .requests
            .enqueue(RequestType::Sign, None)
            .await
            .unwrap();
        assert_eq!(host.popup_count(), 1);

        let stranded = container.requests.list().await.unwrap()[0].id;
        assert_ne!(stranded, second);
        assert!(container
            .requests
            .finalize(FinalizedRequest::new(stranded, "accept"))
            .await
            .unwrap());
        assert_eq!(container.requests.stats().snapshot().surface_failures, 1);
    }

    #[tokio::test]
    async fn test_surface_events_follow_snapshots() {
        let (container, host) = setup();
        let mut events = container.mirror_bus.event_stream(EventFilter::all());

        container.requests.enqueue(RequestType::Sign, None).await.unwrap();
        container.requests.enqueue(RequestType::Sign, None).await.unwrap();

        let mut topics = Vec::new();
        for _ in 0..4 {
            let event = timeout(Duration::from_secs(1), events.next())
                .await
                .unwrap()
                .unwrap();
            if let MirrorEvent::SurfaceActivated { opened, .. } = &event {
                topics.push((event.topic(), Some(*opened)));
            } else {
                topics.push((event.topic(), None));
            }
        }

        assert_eq!(
            topics,
            vec![
                (EventTopic::PendingRequests, None),
                (EventTopic::Surface, Some(true)),
                (EventTopic::PendingRequests, None),
                (EventTopic::Surface, Some(false)),
            ]
        );
        assert_eq!(host.open_calls(), 1);
    }
}
