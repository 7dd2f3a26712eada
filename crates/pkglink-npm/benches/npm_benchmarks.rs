//! Benchmarks for package.json key extraction and link resolution.
//!
//! Performance targets:
//! - Parsing small files: < 1ms
//! - Parsing large files (100+ deps): < 20ms
//! - Resolving links against an in-memory node_modules: < 5ms for 25 deps

use criterion::{Criterion, criterion_group, criterion_main};
use pkglink_core::MemoryFileSystem;
use pkglink_npm::links::resolve_links;
use pkglink_npm::parser::parse_package_json;
use pkglink_npm::scope::ScopeLinkMap;
use std::hint::black_box;
use std::path::Path;

/// Small package.json with 5 dependencies.
const SMALL_PACKAGE_JSON: &str = r#"{
  "name": "small-project",
  "version": "1.0.0",
  "dependencies": {
    "express": "^4.18.2",
    "lodash": "^4.17.21",
    "axios": "^1.6.0",
    "dotenv": "^16.0.0",
    "cors": "^2.8.5"
  }
}"#;

/// Medium package.json with 25 dependencies.
const MEDIUM_PACKAGE_JSON: &str = r#"{
  "name": "medium-project",
  "version": "1.0.0",
  "dependencies": {
    "express": "^4.18.2",
    "lodash": "^4.17.21",
    "axios": "^1.6.0",
    "dotenv": "^16.0.0",
    "cors": "^2.8.5",
    "mongoose": "^8.0.0",
    "jsonwebtoken": "^9.0.0",
    "bcryptjs": "^2.4.3",
    "helmet": "^7.0.0",
    "morgan": "^1.10.0",
    "compression": "^1.7.4",
    "winston": "^3.11.0",
    "nodemailer": "^6.9.0",
    "multer": "^1.4.5",
    "sharp": "^0.33.0"
  },
  "devDependencies": {
    "jest": "^29.7.0",
    "supertest": "^6.3.0",
    "eslint": "^8.54.0",
    "prettier": "^3.1.0",
    "nodemon": "^3.0.0",
    "typescript": "^5.3.0",
    "@types/node": "^20.10.0",
    "@types/express": "^4.17.21",
    "ts-node": "^10.9.0",
    "@typescript-eslint/parser": "^6.13.0"
  }
}"#;

/// Large package.json with 100+ dependencies.
fn generate_large_package_json() -> String {
    let mut content = String::from(
        r#"{
  "name": "large-project",
  "version": "1.0.0",
  "dependencies": {
"#,
    );

    for i in 0..70 {
        content.push_str(&format!(
            "    \"package-{}\": \"^{}.{}.0\"{}\n",
            i,
            i % 10,
            i % 20,
            if i < 69 { "," } else { "" }
        ));
    }

    content.push_str("  },\n  \"devDependencies\": {\n");

    for i in 0..30 {
        content.push_str(&format!(
            "    \"dev-package-{}\": \"^{}.{}.0\"{}\n",
            i,
            i % 10,
            i % 20,
            if i < 29 { "," } else { "" }
        ));
    }

    content.push_str("  }\n}");
    content
}

/// Benchmark package.json parsing with different file sizes.
fn bench_npm_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("npm_parsing");

    group.bench_function("small_5_deps", |b| {
        b.iter(|| parse_package_json(black_box(SMALL_PACKAGE_JSON)))
    });

    group.bench_function("medium_25_deps", |b| {
        b.iter(|| parse_package_json(black_box(MEDIUM_PACKAGE_JSON)))
    });

    let large_json = generate_large_package_json();
    group.bench_function("large_100_deps", |b| {
        b.iter(|| parse_package_json(black_box(&large_json)))
    });

    group.finish();
}

/// Benchmark parsing when dependency names also appear in scripts.
fn bench_name_collision(c: &mut Criterion) {
    let collision_json = r#"{
  "name": "collision-test",
  "scripts": {
    "test": "vitest",
    "coverage": "vitest run --coverage"
  },
  "devDependencies": {
    "vitest": "^3.1.4",
    "@vitest/coverage-v8": "^3.1.4"
  }
}"#;

    c.bench_function("name_collision_in_scripts", |b| {
        b.iter(|| parse_package_json(black_box(collision_json)))
    });
}

/// Benchmark full link resolution with half of the packages installed.
fn bench_link_resolution(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let manifest = Path::new("/bench/package.json");

    let mut fs = MemoryFileSystem::new();
    for name in ["express", "axios", "cors", "helmet", "jest", "@types/node"] {
        fs.insert(
            format!("/bench/node_modules/{}/package.json", name),
            format!(r#"{{"name": "{}", "homepage": "https://example.com/{}"}}"#, name, name),
        );
    }

    let scopes: ScopeLinkMap = [("@typescript-eslint", "https://typescript-eslint.io/")]
        .into_iter()
        .collect();

    c.bench_function("resolve_links_medium", |b| {
        b.iter(|| {
            runtime
                .block_on(resolve_links(
                    &fs,
                    &scopes,
                    manifest,
                    black_box(MEDIUM_PACKAGE_JSON),
                ))
                .unwrap()
        })
    });
}

criterion_group!(
    benches,
    bench_npm_parsing,
    bench_name_collision,
    bench_link_resolution
);
criterion_main!(benches);
