//! Integration tests for the Merge workflow.

use pdfpages::config::Task;
use pdfpages::export::DownloadKind;
use pdfpages::io::DownloadWriter;
use pdfpages::workflow;

use crate::common::{config_for, labels_in_file, labels_of, scratch, write_pdf};

#[tokio::test]
async fn test_merge_two_files_in_order() {
    let dir = scratch();
    let a = write_pdf(dir.path(), "a.pdf", &["a1", "a2"]);
    let b = write_pdf(dir.path(), "b.pdf", &["b1", "b2", "b3"]);

    let config = config_for(Task::Merge { inputs: vec![a, b] }, dir.path());
    let outcome = workflow::execute(&config).await.unwrap();

    assert_eq!(outcome.download.file_name, "merged.pdf");
    assert_eq!(outcome.download.kind, DownloadKind::Pdf);
    assert_eq!(outcome.download.page_count, 5);
    assert_eq!(
        labels_of(&outcome.download.bytes),
        vec!["a1", "a2", "b1", "b2", "b3"]
    );
}

#[tokio::test]
async fn test_merge_input_order_wins() {
    let dir = scratch();
    let a = write_pdf(dir.path(), "a.pdf", &["a1"]);
    let b = write_pdf(dir.path(), "b.pdf", &["b1"]);

    let config = config_for(Task::Merge { inputs: vec![b, a] }, dir.path());
    let outcome = workflow::execute(&config).await.unwrap();

    assert_eq!(labels_of(&outcome.download.bytes), vec!["b1", "a1"]);
}

#[tokio::test]
async fn test_merge_glob_pattern() {
    let dir = scratch();
    write_pdf(dir.path(), "part1.pdf", &["one"]);
    write_pdf(dir.path(), "part2.pdf", &["two"]);
    write_pdf(dir.path(), "other.pdf", &["skip"]);

    let pattern = dir.path().join("part*.pdf");
    let config = config_for(
        Task::Merge {
            inputs: vec![pattern],
        },
        dir.path(),
    );
    let outcome = workflow::execute(&config).await.unwrap();

    assert_eq!(outcome.inputs.len(), 2);
    assert_eq!(labels_of(&outcome.download.bytes), vec!["one", "two"]);
}

#[tokio::test]
async fn test_merge_written_to_output_dir() {
    let dir = scratch();
    let out = dir.path().join("out");
    let a = write_pdf(dir.path(), "a.pdf", &["a1"]);
    let b = write_pdf(dir.path(), "b.pdf", &["b1"]);

    let config = config_for(Task::Merge { inputs: vec![a, b] }, &out);
    let outcome = workflow::execute(&config).await.unwrap();

    let stats = DownloadWriter::new()
        .save(&outcome.download, &config.output_dir)
        .await
        .unwrap();

    assert_eq!(stats.output_path, out.join("merged.pdf"));
    assert_eq!(labels_in_file(&stats.output_path), vec!["a1", "b1"]);
}
