//! Benchmarks for connection request assembly.
//!
//! Run benchmarks:
//! ```bash
//! cargo bench --bench assemble_benchmark
//! ```

use bytes::Bytes;
use connreq::{
    assemble, AddressEntry, AdvancedConfig, ClientBuilder, ClientMode, ClientOptions,
    CompressionBackend, CompressionOptions, Credentials, TlsConfig,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn options_with_addresses(count: usize) -> ClientOptions {
    ClientOptions {
        addresses: (0..count)
            .map(|i| AddressEntry::new(format!("tls://10.0.0.{}", i % 255), 7000 + i as u16))
            .collect(),
        credentials: Some(Credentials::password(Some("app".to_string()), "secret")),
        advanced_config: Some(AdvancedConfig {
            tls_config: Some(TlsConfig {
                use_insecure_tls: Some(false),
                root_certs: Some(Bytes::from_static(b"CERTIFICATE_DATA")),
            }),
            ..Default::default()
        }),
        compression: Some(CompressionOptions {
            enabled: Some(true),
            backend: Some(CompressionBackend::Zstd),
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// Benchmark: assembly with a growing seed list.
fn bench_assemble(c: &mut Criterion) {
    let mut group = c.benchmark_group("assemble");

    for count in [1, 6, 64, 512].iter() {
        let options = options_with_addresses(*count);
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &options, |b, options| {
            b.iter(|| assemble(black_box(options), ClientMode::Cluster).expect("assembly failed"));
        });
    }

    group.finish();
}

/// Benchmark: URL import followed by assembly.
fn bench_from_url(c: &mut Criterion) {
    c.bench_function("from_url", |b| {
        b.iter(|| {
            ClientBuilder::from_url(black_box("valkeys://user:pw@cache.internal:6380/2"))
                .and_then(ClientBuilder::build_request)
                .expect("assembly failed")
        });
    });
}

criterion_group!(benches, bench_assemble, bench_from_url);
criterion_main!(benches);
