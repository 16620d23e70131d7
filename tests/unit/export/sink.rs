use super::*;

fn file(name: &str) -> ExportedFile {
    ExportedFile {
        bytes: vec![1, 2, 3],
        width: 1,
        height: 1,
        file_name: name.to_owned(),
        watermarked: false,
    }
}

#[test]
fn in_memory_sink_collects_files() {
    let mut sink = InMemorySink::default();
    sink.deliver(&file("a.png")).unwrap();
    sink.deliver(&file("b.png")).unwrap();
    let names: Vec<_> = sink.files.iter().map(|f| f.file_name.as_str()).collect();
    assert_eq!(names, ["a.png", "b.png"]);
}

#[test]
fn directory_sink_writes_under_file_name() {
    let dir = std::env::temp_dir().join(format!("shotpolish-sink-{}", std::process::id()));
    let mut sink = DirectorySink::new(dir.join("nested"));
    sink.deliver(&file("shotpolish-1.png")).unwrap();
    let written = sink.last_written().unwrap().to_path_buf();
    assert_eq!(written, dir.join("nested").join("shotpolish-1.png"));
    assert_eq!(std::fs::read(&written).unwrap(), vec![1, 2, 3]);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn directory_sink_reports_write_failures() {
    let dir = std::env::temp_dir().join(format!("shotpolish-sink-file-{}", std::process::id()));
    std::fs::write(&dir, b"not a directory").unwrap();
    let mut sink = DirectorySink::new(&dir);
    let err = sink.deliver(&file("x.png")).unwrap_err();
    assert!(matches!(err, PolishError::SerializationFailure(_)));
    assert!(sink.last_written().is_none());
    let _ = std::fs::remove_file(&dir);
}
