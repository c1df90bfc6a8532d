use quick_xml::events::Event;
use quick_xml::Reader;
use std::time::{Duration, Instant};
use xmlrecords::mapping::LoaderOptions;
use xmlrecords::{transform, MappingTable};

fn count_xml_events(xml: &[u8]) -> usize {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut count = 0;
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Eof) => break,
            Ok(_) => count += 1,
            Err(e) => panic!("XML error at position {}: {:?}", reader.error_position(), e),
        }
        buf.clear();
    }
    count
}

fn count_records(xml: &[u8], table: &MappingTable) -> usize {
    let mut count = 0;
    for record in transform(xml, table) {
        record.expect("transform failed");
        count += 1;
    }
    count
}

fn summarize(durations: &[Duration]) -> (f64, f64) {
    let secs = durations.iter().map(Duration::as_secs_f64);
    let avg = secs.clone().sum::<f64>() / durations.len() as f64;
    let min = secs.fold(f64::INFINITY, f64::min);
    (avg, min)
}

fn main() {
    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .expect("Usage: bench_walker <xml_file> [mapping_file]");
    let xml = std::fs::read(&path).expect("Failed to read XML file");
    let table = match args.next() {
        Some(mapping) => MappingTable::load_from_file(&mapping, &LoaderOptions::default())
            .expect("Failed to load mapping file"),
        None => MappingTable::empty(),
    };

    let iterations = 5;

    // Baseline: tokenizer only
    let _ = count_xml_events(&xml);
    let mut baseline_durations = Vec::new();
    for i in 0..iterations {
        let start = Instant::now();
        let events = count_xml_events(&xml);
        let elapsed = start.elapsed();
        baseline_durations.push(elapsed);
        println!(
            "Baseline {}: {:.3}s ({} XML events)",
            i + 1,
            elapsed.as_secs_f64(),
            events
        );
    }
    let (baseline_avg, baseline_min) = summarize(&baseline_durations);
    println!("Baseline avg: {:.3}s, min: {:.3}s\n", baseline_avg, baseline_min);

    let _ = count_records(&xml, &table);
    let mut durations = Vec::new();
    for i in 0..iterations {
        let start = Instant::now();
        let records = count_records(&xml, &table);
        let elapsed = start.elapsed();
        durations.push(elapsed);
        println!(
            "Iteration {}: {:.3}s ({} records)",
            i + 1,
            elapsed.as_secs_f64(),
            records
        );
    }

    let (avg, min) = summarize(&durations);
    println!("\nWalker avg: {:.3}s, min: {:.3}s", avg, min);
    println!("Overhead vs baseline: {:.1}x", avg / baseline_avg);
}
