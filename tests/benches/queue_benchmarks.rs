//! # Approval Gate Benchmarks
//!
//! | Target | Measures |
//! |--------|----------|
//! | CorrelationQueue | enqueue + finalize on the bare domain type |
//! | RequestManager | full command round trip through the queue task |

use std::sync::Arc;

use ag_01_correlation_queue::{CorrelationQueue, RequestManagerApi};
use ag_02_surface_arbiter::InMemoryWindowHost;
use approval_runtime::{ApprovalContainer, RuntimeConfig};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::json;
use shared_types::entities::RequestType;
use shared_types::ipc::FinalizedRequest;

fn bench_queue_domain(c: &mut Criterion) {
    let mut group = c.benchmark_group("correlation-queue");

    for depth in [1usize, 10, 100, 1000] {
        group.throughput(Throughput::Elements(depth as u64));
        group.bench_with_input(
            BenchmarkId::new("enqueue_then_finalize_all", depth),
            &depth,
            |b, &depth| {
                b.iter(|| {
                    let mut queue = CorrelationQueue::new();
                    let claimed: Vec<_> = (0..depth)
                        .map_while(|_| {
                            queue
                                .enqueue_claimed(RequestType::Sign, Some(json!({ "msg": "x" })))
                                .ok()
                        })
                        .collect();
                    for (id, _listener) in &claimed {
                        let outcome = queue.finalize(&FinalizedRequest::new(*id, "accept"));
                        black_box(outcome.is_ok());
                    }
                    black_box(queue.is_empty())
                })
            },
        );
    }

    group.finish();
}

fn bench_manager_round_trip(c: &mut Criterion) {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => panic!("tokio runtime: {e}"),
    };
    let container = runtime.block_on(async {
        ApprovalContainer::new(RuntimeConfig::default(), Arc::new(InMemoryWindowHost::new()))
    });

    let requests = &container.requests;
    c.bench_function("request-manager/enqueue_finalize", |b| {
        b.to_async(&runtime).iter(|| async move {
            if let Ok(pending) = requests.submit(RequestType::Dummy, None).await {
                let finalized = requests.finalize(FinalizedRequest::new(pending.id(), "accept"));
                black_box(finalized.await.is_ok());
                black_box(pending.wait(()).await.is_ok());
            }
        })
    });
}

criterion_group!(benches, bench_queue_domain, bench_manager_round_trip);
criterion_main!(benches);
