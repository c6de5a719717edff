// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::env;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use serde_json::json;

use triton::compile::{
    AdapterFuture, AdapterOutput, AdapterRegistry, AdapterRequest, DatasetAdapter,
};
use triton::dsl::fixtures::MappedParser;
use triton::model::{Distribution, OutputFormat};
use triton::store::FolderStore;
use triton::workspace::{ArtifactSink, ExportArtifact, Workspace, DATASET_MIME};

static TEMP_DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

struct TempDir {
    path: std::path::PathBuf,
}

impl TempDir {
    fn new(prefix: &str) -> Self {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
        let counter = TEMP_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let mut path = env::temp_dir();
        path.push(format!("triton-{prefix}-{}-{nanos}-{counter}", std::process::id()));
        std::fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

struct EchoAdapter;

impl DatasetAdapter for EchoAdapter {
    fn generate<'a>(&'a self, request: AdapterRequest<'a>) -> AdapterFuture<'a> {
        Box::pin(async move {
            let title = request.title;
            Ok(AdapterOutput {
                training: json!({ "dataset": request.source }),
                testing: json!({ "titles": { title: true } }),
            })
        })
    }
}

#[derive(Default)]
struct CollectingSink {
    artifacts: Vec<ExportArtifact>,
}

impl ArtifactSink for CollectingSink {
    fn deliver(&mut self, artifact: ExportArtifact) {
        self.artifacts.push(artifact);
    }
}

fn parser() -> MappedParser {
    MappedParser::new().intent("%[order]('training': '40')", "order", true)
}

fn registry() -> AdapterRegistry {
    let mut adapters = AdapterRegistry::new();
    adapters.register(OutputFormat::Default, EchoAdapter);
    adapters
}

#[test]
fn fresh_store_restores_the_builtin_sample() {
    let tmp = TempDir::new("fresh");

    let mut workspace = Workspace::new(parser(), AdapterRegistry::new())
        .with_persistence(FolderStore::new(tmp.path().join("never-written")));
    workspace.restore();

    assert_eq!(workspace.documents().len(), 1);
    assert_eq!(workspace.active_document().unwrap().title(), "examples.chatito");
    assert!(workspace.validation().is_clean());
}

#[tokio::test]
async fn edited_workspace_survives_an_export_and_a_reopen() {
    let tmp = TempDir::new("roundtrip");
    let dir = tmp.path().join("snapshot");

    let mut workspace = Workspace::new(parser(), registry())
        .with_persistence(FolderStore::new(&dir))
        .with_download_stagger(Duration::ZERO);
    workspace.restore();

    // Edit the sample tab and let the debounced validation fire.
    let t0 = Instant::now();
    workspace.on_edit("%[order]('training': '40')", t0);
    assert!(workspace.validation_pending());
    assert!(workspace.on_tick(t0 + Duration::from_millis(300)));
    assert!(workspace.validation().is_clean());

    // Add a second tab and tune the generator.
    let index = workspace.add_document("orders");
    assert_eq!(index, 1);
    workspace.on_edit("order pizza", t0 + Duration::from_millis(400));
    assert!(workspace.on_tick(t0 + Duration::from_millis(700)));
    workspace.set_distribution(Distribution::Even);

    // Gate, export, inspect the two artifacts.
    assert!(workspace.open_generator());
    let mut sink = CollectingSink::default();
    workspace.export(&mut sink).await;

    assert_eq!(sink.artifacts.len(), 2);
    assert!(sink.artifacts[0].filename.starts_with("training_dataset_"));
    assert!(sink.artifacts[1].filename.starts_with("testing_dataset_"));
    assert_eq!(sink.artifacts[0].mime, DATASET_MIME);

    // The last tab's training output won the primary dataset.
    let training: serde_json::Value = serde_json::from_str(&sink.artifacts[0].body).unwrap();
    assert_eq!(training, json!({ "dataset": "order pizza" }));
    // Both tabs contributed to the merged testing dataset.
    let testing: serde_json::Value = serde_json::from_str(&sink.artifacts[1].body).unwrap();
    assert_eq!(
        testing,
        json!({ "titles": { "examples.chatito": true, "orders.chatito": true } })
    );
    assert_eq!(workspace.preview(), Some(&training));

    drop(workspace);

    // A fresh workspace over the same folder restores the session.
    let mut reopened =
        Workspace::new(parser(), AdapterRegistry::new()).with_persistence(FolderStore::new(&dir));
    reopened.restore();

    assert_eq!(reopened.documents().len(), 2);
    assert_eq!(reopened.documents().get(1).unwrap().title(), "orders.chatito");
    assert_eq!(reopened.documents().get(1).unwrap().text(), "order pizza");
    assert_eq!(reopened.settings().distribution(), Distribution::Even);
    assert_eq!(reopened.active_index(), 0);
    assert_eq!(reopened.preview(), None);
}
