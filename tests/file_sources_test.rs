//! Building from files on disk through the same retrievers the CLI uses

use std::fs;

use pagechat::config::Config;
use pagechat::fetch::{FileRetriever, SourceRetriever};
use pagechat::{PageChat, PageChatError};

const RESUME_HTML: &str = r#"
<html>
<body>
    <div id="resume">
        <h1>Sam Rivera</h1>
        <p>Skills &bull; Distributed systems &bull; Compilers and parsers &bull; Technical writing</p>
        <p>Call me on <a href="tel:+44 20 7946 0958">+44 20 7946 0958</a> or write to sam@example.net.</p>
    </div>
    <main><p>This main element should be ignored by the custom selector.</p></main>
</body>
</html>
"#;

#[test]
fn test_build_from_files_with_custom_selector() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resume.html");
    fs::write(&path, RESUME_HTML).unwrap();

    let engine = PageChat::default();
    let source = path.to_str().unwrap().to_string();
    let report = engine.build(&[source], "#resume", &FileRetriever).unwrap();

    assert!(report.sentences > 0);
    let sentences = engine.sentences();
    assert!(sentences.iter().all(|s| !s.contains("ignored")));
    assert!(sentences.contains(&"Compilers and parsers .".to_string()));

    let contact = engine.contact();
    assert_eq!(contact.phone, "+44 20 7946 0958");
    assert_eq!(contact.email, "sam@example.net");

    assert_eq!(engine.answer_text("compilers"), "Compilers and parsers .");
}

#[test]
fn test_source_retriever_reads_local_paths() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resume.html");
    fs::write(&path, RESUME_HTML).unwrap();

    let config = Config::default();
    let retriever = SourceRetriever::from_config(&config);
    let engine = PageChat::from_config(&config);
    engine
        .build(&[path.to_str().unwrap()], &config.selector, &retriever)
        .unwrap();

    // Default selector "main" picks the other block
    assert_eq!(
        engine.sentences(),
        vec!["This main element should be ignored by the custom selector."]
    );
}

#[test]
fn test_missing_file_aborts_build() {
    let dir = tempfile::tempdir().unwrap();
    let present = dir.path().join("present.html");
    fs::write(&present, RESUME_HTML).unwrap();
    let missing = dir.path().join("missing.html");

    let engine = PageChat::default();
    let err = engine
        .build(
            &[present.to_str().unwrap(), missing.to_str().unwrap()],
            "#resume",
            &FileRetriever,
        )
        .unwrap_err();

    assert!(matches!(err, PageChatError::Retrieval { .. }));
    assert!(!engine.is_ready());
}
