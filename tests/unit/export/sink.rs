use super::*;

fn file(name: &str) -> ExportedFile {
    ExportedFile {
        file_name: name.to_string(),
        width: 1,
        height: 1,
        png: vec![1, 2, 3],
    }
}

#[test]
fn directory_sink_creates_dir_and_overwrites() {
    let dir = PathBuf::from("target").join("directory_sink_unit");
    let _ = std::fs::remove_dir_all(&dir);

    let mut sink = DirectorySink::new(&dir);
    sink.deliver(&file("cover-twitter.png")).unwrap();
    let mut second = file("cover-twitter.png");
    second.png = vec![9];
    sink.deliver(&second).unwrap();

    let path = dir.join("cover-twitter.png");
    assert_eq!(std::fs::read(&path).unwrap(), vec![9]);
    assert_eq!(sink.written(), &[path.clone(), path]);
}

#[test]
fn memory_sink_keeps_order() {
    let mut sink = MemorySink::default();
    sink.deliver(&file("a.png")).unwrap();
    sink.deliver(&file("b.png")).unwrap();
    let names: Vec<_> = sink.files.iter().map(|f| f.file_name.as_str()).collect();
    assert_eq!(names, ["a.png", "b.png"]);
}
