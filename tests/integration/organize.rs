//! Integration tests for the Organize workflow.

use pdfpages::config::Task;
use pdfpages::selection::Edit;
use pdfpages::workflow;

use crate::common::{config_for, labels_of, scratch, write_pdf};

fn edits(text: &[&str]) -> Vec<Edit> {
    text.iter().map(|edit| edit.parse().unwrap()).collect()
}

#[tokio::test]
async fn test_organize_delete_and_move() {
    let dir = scratch();
    let input = write_pdf(dir.path(), "a.pdf", &["p1", "p2", "p3"]);

    let config = config_for(
        Task::Organize {
            input,
            edits: edits(&["delete:2", "move:3:1"]),
        },
        dir.path(),
    );
    let outcome = workflow::execute(&config).await.unwrap();

    assert_eq!(outcome.download.file_name, "organized.pdf");
    assert_eq!(outcome.pages_loaded, 2);
    assert_eq!(labels_of(&outcome.download.bytes), vec!["p3", "p1"]);
}

#[tokio::test]
async fn test_organize_without_edits_is_identity() {
    let dir = scratch();
    let input = write_pdf(dir.path(), "a.pdf", &["p1", "p2", "p3", "p4"]);

    let config = config_for(
        Task::Organize {
            input,
            edits: Vec::new(),
        },
        dir.path(),
    );
    let outcome = workflow::execute(&config).await.unwrap();

    assert_eq!(
        labels_of(&outcome.download.bytes),
        vec!["p1", "p2", "p3", "p4"]
    );
}

#[tokio::test]
async fn test_organize_ignores_edits_on_missing_pages() {
    let dir = scratch();
    let input = write_pdf(dir.path(), "a.pdf", &["p1", "p2"]);

    let config = config_for(
        Task::Organize {
            input,
            edits: edits(&["delete:9", "move:7:1", "move:2:5", "move:2:1"]),
        },
        dir.path(),
    );
    let outcome = workflow::execute(&config).await.unwrap();

    assert_eq!(labels_of(&outcome.download.bytes), vec!["p2", "p1"]);
}
