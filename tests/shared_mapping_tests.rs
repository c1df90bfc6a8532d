mod common;

use common::{fixture_path, table};
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use xmlrecords::mapping::LoaderOptions;
use xmlrecords::xml_path::XmlPath;
use xmlrecords::{collect_records, MappingError, SharedMappingTable};

#[test]
fn concurrent_callers_load_exactly_once() {
    let loads = Arc::new(AtomicUsize::new(0));
    let counter = loads.clone();
    let shared = Arc::new(SharedMappingTable::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(table(&[("a->b", "x->y->b", "Name")]))
    }));
    assert!(!shared.is_loaded());

    let barrier = Arc::new(Barrier::new(8));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let shared = shared.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                let table = shared.get().expect("load should succeed");
                let records = collect_records(b"<a><b>hi</b><b>ho</b></a>", &table)
                    .expect("document is well formed");
                records
                    .into_iter()
                    .map(|r| r.label)
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), ["Name", "Name 2"]);
    }
    assert_eq!(loads.load(Ordering::SeqCst), 1);
    assert!(shared.is_loaded());
}

#[test]
fn failed_load_is_returned_and_retried() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let counter = attempts.clone();
    let shared = SharedMappingTable::new(move || {
        if counter.fetch_add(1, Ordering::SeqCst) == 0 {
            Err(MappingError::SourceUnavailable {
                path: PathBuf::from("translations.csv"),
                source: io::Error::new(io::ErrorKind::NotFound, "gone"),
            })
        } else {
            Ok(table(&[("a", "", "A")]))
        }
    });

    assert!(shared.get().is_err());
    assert!(!shared.is_loaded());

    let table = shared.get().expect("second attempt succeeds");
    assert_eq!(table.lookup_label(&XmlPath::parse("a")), Some("A"));
    assert_eq!(attempts.load(Ordering::SeqCst), 2);

    shared.get().unwrap();
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[test]
fn from_file_loads_lazily() {
    let shared = SharedMappingTable::from_file(
        fixture_path("translations.csv"),
        LoaderOptions::default(),
    );
    assert!(!shared.is_loaded());

    let first = shared.get().expect("fixture dictionary should load");
    let second = shared.get().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.len(), 8);
}

#[test]
fn preloaded_table_is_served_as_is() {
    let shared = SharedMappingTable::preloaded(table(&[("a", "", "A")]));
    assert!(shared.is_loaded());
    assert_eq!(shared.get().unwrap().len(), 1);
}
