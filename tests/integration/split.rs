//! Integration tests for the Split workflow.

use pdfpages::config::{OutputMode, PageRange, Task};
use pdfpages::export::DownloadKind;
use pdfpages::io::DownloadWriter;
use pdfpages::selection::Edit;
use pdfpages::workflow;

use crate::common::{config_for, labels_of, scratch, write_pdf, zip_contents};

const FIVE: [&str; 5] = ["p1", "p2", "p3", "p4", "p5"];

fn split_task(
    input: std::path::PathBuf,
    pages: Option<&str>,
    edits: Vec<Edit>,
    mode: OutputMode,
) -> Task {
    Task::Split {
        input,
        pages: pages.map(|p| PageRange::parse(p).unwrap()),
        edits,
        mode,
    }
}

#[tokio::test]
async fn test_split_single_document() {
    let dir = scratch();
    let input = write_pdf(dir.path(), "a.pdf", &FIVE);

    let config = config_for(
        split_task(input, Some("1,3"), Vec::new(), OutputMode::Single),
        dir.path(),
    );
    let outcome = workflow::execute(&config).await.unwrap();

    assert_eq!(outcome.download.file_name, "a_split.pdf");
    assert_eq!(outcome.download.kind, DownloadKind::Pdf);
    assert_eq!(outcome.pages_loaded, 5);
    assert_eq!(labels_of(&outcome.download.bytes), vec!["p1", "p3"]);
}

#[tokio::test]
async fn test_split_multiple_documents() {
    let dir = scratch();
    let input = write_pdf(dir.path(), "a.pdf", &FIVE);

    let config = config_for(
        split_task(input, Some("2,4"), Vec::new(), OutputMode::Multiple),
        dir.path(),
    );
    let outcome = workflow::execute(&config).await.unwrap();

    assert_eq!(outcome.download.file_name, "a_split.zip");
    assert_eq!(outcome.download.kind, DownloadKind::Zip);
    assert_eq!(
        zip_contents(&outcome.download.bytes),
        vec![
            ("a_page_2.pdf".to_string(), vec!["p2".to_string()]),
            ("a_page_4.pdf".to_string(), vec!["p4".to_string()]),
        ]
    );
}

#[tokio::test]
async fn test_split_edits_after_range() {
    let dir = scratch();
    let input = write_pdf(dir.path(), "Scan.PDF", &FIVE);

    let edits = vec![
        Edit::Toggle { page: 5 },
        Edit::Move {
            page: 5,
            position: 1,
        },
    ];
    let config = config_for(
        split_task(input, Some("1-2"), edits, OutputMode::Single),
        dir.path(),
    );
    let outcome = workflow::execute(&config).await.unwrap();

    assert_eq!(outcome.download.file_name, "Scan_split.pdf");
    assert_eq!(labels_of(&outcome.download.bytes), vec!["p5", "p1", "p2"]);
}

#[tokio::test]
async fn test_split_without_selection_keeps_everything() {
    let dir = scratch();
    let input = write_pdf(dir.path(), "a.pdf", &["p1", "p2"]);

    let config = config_for(
        split_task(input, None, Vec::new(), OutputMode::Single),
        dir.path(),
    );
    let outcome = workflow::execute(&config).await.unwrap();

    assert_eq!(labels_of(&outcome.download.bytes), vec!["p1", "p2"]);
    assert_eq!(outcome.thumbnails.len(), 2);
}

#[tokio::test]
async fn test_split_zip_written_to_disk() {
    let dir = scratch();
    let input = write_pdf(dir.path(), "a.pdf", &FIVE);

    let config = config_for(
        split_task(input, Some("5"), Vec::new(), OutputMode::Multiple),
        dir.path(),
    );
    let outcome = workflow::execute(&config).await.unwrap();
    let stats = DownloadWriter::new()
        .save(&outcome.download, dir.path())
        .await
        .unwrap();

    let bytes = std::fs::read(&stats.output_path).unwrap();
    assert_eq!(
        zip_contents(&bytes),
        vec![("a_page_5.pdf".to_string(), vec!["p5".to_string()])]
    );
}
