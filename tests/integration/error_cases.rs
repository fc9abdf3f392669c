//! Integration tests for error handling and edge cases.

use pdfpages::config::{OutputMode, PageRange, Task};
use pdfpages::error::PdfPagesError;
use pdfpages::io::DownloadWriter;
use pdfpages::workflow;
use std::path::PathBuf;

use crate::common::{config_for, scratch, write_pdf};

#[tokio::test]
async fn test_error_merge_single_file() {
    let dir = scratch();
    let a = write_pdf(dir.path(), "a.pdf", &["a1"]);

    let config = config_for(Task::Merge { inputs: vec![a] }, dir.path());
    let err = workflow::execute(&config).await.unwrap_err();

    assert!(matches!(
        err,
        PdfPagesError::TooFewFiles {
            required: 2,
            found: 1
        }
    ));
    assert!(err.is_user_input());
}

#[tokio::test]
async fn test_error_nonexistent_input() {
    let dir = scratch();
    let a = write_pdf(dir.path(), "a.pdf", &["a1"]);

    let config = config_for(
        Task::Merge {
            inputs: vec![a, PathBuf::from("/nonexistent/file.pdf")],
        },
        dir.path(),
    );
    let err = workflow::execute(&config).await.unwrap_err();

    assert!(matches!(err, PdfPagesError::FileNotFound { .. }));
    assert_eq!(err.exit_code(), 2);
}

#[tokio::test]
async fn test_error_not_a_pdf() {
    let dir = scratch();
    let a = write_pdf(dir.path(), "a.pdf", &["a1"]);
    let junk = dir.path().join("junk.pdf");
    std::fs::write(&junk, b"definitely not a pdf").unwrap();

    let config = config_for(Task::Merge { inputs: vec![a, junk] }, dir.path());
    let err = workflow::execute(&config).await.unwrap_err();

    assert!(matches!(err, PdfPagesError::FailedToLoadPdf { ref name, .. } if name == "junk.pdf"));
    assert!(err.is_document_failure());
}

#[tokio::test]
async fn test_error_split_selects_nothing() {
    let dir = scratch();
    let input = write_pdf(dir.path(), "a.pdf", &["p1", "p2"]);

    let config = config_for(
        Task::Split {
            input,
            pages: Some(PageRange::parse("7-9").unwrap()),
            edits: Vec::new(),
            mode: OutputMode::Single,
        },
        dir.path(),
    );
    let err = workflow::execute(&config).await.unwrap_err();

    assert!(matches!(err, PdfPagesError::NothingSelected));
}

#[tokio::test]
async fn test_error_organize_everything_deleted() {
    let dir = scratch();
    let input = write_pdf(dir.path(), "a.pdf", &["p1"]);

    let config = config_for(
        Task::Organize {
            input,
            edits: vec!["delete:1".parse().unwrap()],
        },
        dir.path(),
    );
    let err = workflow::execute(&config).await.unwrap_err();

    assert!(matches!(err, PdfPagesError::NothingSelected));
}

#[tokio::test]
async fn test_error_output_exists() {
    let dir = scratch();
    let a = write_pdf(dir.path(), "a.pdf", &["a1"]);
    let b = write_pdf(dir.path(), "b.pdf", &["b1"]);
    std::fs::write(dir.path().join("merged.pdf"), b"keep me").unwrap();

    let config = config_for(Task::Merge { inputs: vec![a, b] }, dir.path());
    let outcome = workflow::execute(&config).await.unwrap();
    let err = DownloadWriter::new()
        .save(&outcome.download, dir.path())
        .await
        .unwrap_err();

    assert!(matches!(err, PdfPagesError::OutputExists { .. }));
    assert_eq!(
        std::fs::read(dir.path().join("merged.pdf")).unwrap(),
        b"keep me"
    );
}
