use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use layerconf::merge::merge_all;
use layerconf::{ConfigLoader, Document, FromEnv, LoadOptions, MapEnv, Merge, Validate, WalkResolver};
use serde::Deserialize;
use serde_json::{json, Value};
use std::fs;

#[derive(Debug, Clone, Default, Deserialize, Merge, Validate, FromEnv)]
#[serde(default)]
struct Settings {
    #[config(env_prefix = "SERVER_")]
    server: Server,
    #[config(env_prefix = "DB_")]
    database: Database,
    #[config(env = "FEATURES")]
    features: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Merge, Validate, FromEnv)]
#[serde(default)]
struct Server {
    #[config(required, env = "HOST")]
    host: String,
    #[config(env = "PORT")]
    port: u16,
    #[config(env = "WORKERS")]
    workers: usize,
}

#[derive(Debug, Clone, Default, Deserialize, Merge, Validate, FromEnv)]
#[serde(default)]
struct Database {
    #[config(required, env = "URL")]
    url: String,
    #[config(env = "POOL")]
    pool: u32,
}

fn layer(i: usize) -> Settings {
    Settings {
        server: Server {
            host: if i % 3 == 0 { format!("host-{i}") } else { String::new() },
            port: if i % 2 == 0 { 0 } else { 8000 + i as u16 },
            workers: i % 5,
        },
        database: Database {
            url: if i % 4 == 0 { format!("postgres://db-{i}") } else { String::new() },
            pool: (i % 7) as u32,
        },
        features: if i % 6 == 0 { vec![format!("f{i}")] } else { Vec::new() },
    }
}

fn bench_struct_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("struct_merge");

    for count in [2, 8, 32] {
        let layers: Vec<Settings> = (0..count).map(layer).collect();
        group.bench_with_input(BenchmarkId::new("layers", count), &layers, |b, layers| {
            b.iter(|| merge_all::<Settings, _>(black_box(layers.iter())));
        });
    }

    group.finish();
}

fn document_layer(i: usize) -> Document {
    let mut services = serde_json::Map::new();
    for s in 0..10 {
        services.insert(
            format!("svc{s}"),
            json!({"port": if (i + s) % 2 == 0 { 0 } else { 9000 + s }, "enabled": i % 2 == 0}),
        );
    }
    Document::from(json!({"name": if i == 0 { "" } else { "app" }, "services": Value::Object(services)}))
}

fn bench_document_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("document_merge");

    for count in [2, 8] {
        let layers: Vec<Document> = (0..count).map(document_layer).collect();
        group.bench_with_input(BenchmarkId::new("layers", count), &layers, |b, layers| {
            b.iter(|| merge_all::<Document, _>(black_box(layers.iter())));
        });
    }

    group.finish();
}

fn bench_validate_and_env(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate_env");

    let settings = layer(1);
    group.bench_function("empty_required_fields", |b| {
        b.iter(|| black_box(&settings).empty_required_fields(""));
    });

    let env = MapEnv::from_iter([
        ("APP_SERVER_HOST", "localhost"),
        ("APP_SERVER_PORT", "8080"),
        ("APP_DB_URL", "postgres://localhost"),
        ("APP_FEATURES", "a,b,c"),
    ]);
    group.bench_function("read_env", |b| {
        b.iter(|| {
            let mut settings = Settings::default();
            settings.read_env(black_box(&env), "APP_", None).unwrap();
            settings
        });
    });

    group.finish();
}

fn bench_load(c: &mut Criterion) {
    let temp_dir = tempfile::tempdir().unwrap();
    let nested = temp_dir.path().join("a/b/c");
    fs::create_dir_all(&nested).unwrap();
    fs::write(
        temp_dir.path().join("settings.yaml"),
        "server:\n  host: localhost\n  port: 8080\ndatabase:\n  url: postgres://localhost\n",
    )
    .unwrap();
    fs::write(nested.join("local.json"), r#"{"server": {"workers": 4}}"#).unwrap();

    let loader = ConfigLoader::new()
        .with_resolver(WalkResolver::new().with_base_dir(&nested))
        .with_env(MapEnv::new());
    let options = LoadOptions::new(["local.json", "settings.yaml"]).with_walk_depth(3);

    c.bench_function("load_two_files_walk_3", |b| {
        b.iter(|| loader.load::<Settings>(black_box(&options)).unwrap());
    });
}

criterion_group!(
    benches,
    bench_struct_merge,
    bench_document_merge,
    bench_validate_and_env,
    bench_load
);
criterion_main!(benches);
