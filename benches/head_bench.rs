//! Benchmarks for building runs and projecting job heads
//!
//! This benchmark suite measures:
//! - Submission of multi-node runs (spec -> job, id assignment, reference checks)
//! - `Job::head()` projection over large job lists

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use runjob::core::{
    submit_all, GpusRequirements, Job, JobApp, JobSpec, RepoData, Requirements, RunContext,
};
use std::hint::black_box;

/// A master spec followed by `workers` specs pointing at it
fn create_run_specs(workers: usize) -> Vec<JobSpec> {
    let master = JobSpec::new("pytorch/pytorch:2.3")
        .commands(["torchrun --nnodes 4 train.py"])
        .env_var("NCCL_DEBUG", "INFO")
        .port_count(2)
        .apps(vec![JobApp::new(0, "tensorboard"), JobApp::new(1, "api")])
        .requirements(
            Requirements::new()
                .cpus(16)
                .memory_mib(64 * 1024)
                .gpus(GpusRequirements::new().count(8).name("A100"))
                .shm_size("16G"),
        );
    let master_ref = master.job_ref();

    let mut specs = vec![master];
    specs.extend((0..workers).map(|i| {
        JobSpec::new("pytorch/pytorch:2.3")
            .commands([format!("torchrun --node-rank {} train.py", i + 1)])
            .master_job(master_ref.clone())
    }));
    specs
}

fn create_context() -> RunContext {
    RunContext::new(RepoData::new("alice", "vision"), "bench-run", "docker")
}

fn bench_submit_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("submit_all");
    for workers in [1usize, 16, 256] {
        let specs = create_run_specs(workers);
        let ctx = create_context();
        group.throughput(Throughput::Elements((workers + 1) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(workers), &specs, |b, specs| {
            b.iter(|| submit_all(black_box(specs), &ctx).unwrap())
        });
    }
    group.finish();
}

fn bench_head(c: &mut Criterion) {
    let mut group = c.benchmark_group("head");
    for count in [1_000usize, 10_000] {
        let jobs: Vec<Job> = submit_all(&create_run_specs(count - 1), &create_context()).unwrap();
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &jobs, |b, jobs| {
            b.iter(|| jobs.iter().map(|j| j.head()).collect::<Vec<_>>())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_submit_all, bench_head);
criterion_main!(benches);
