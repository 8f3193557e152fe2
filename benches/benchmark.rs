use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mailevent::{EventExtractor, FixedClock};

const SHORT: &str = "Tuesday, March 15th at 2:00 PM in Conference Room A";

const LONG: &str = "Subject: Quarterly planning\r\n\r\nHi all,\r\n\
Following up on last week's thread. Let's meet on April 2, 2024 at 10:30 AM.\r\n\
Location: Building 4, 2nd floor\r\n\r\n\
If you can't make it in person we'll also be on Zoom, link to follow.\r\n\
Thanks,\r\nAlex\r\n";

const NOTHING: &str = "Thanks for the update, talk soon.";

fn bench_extract(c: &mut Criterion) {
    let now = NaiveDate::from_ymd_opt(2024, 3, 10)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap();
    let extractor = EventExtractor::with_clock(FixedClock(now));

    c.bench_function("extract_short", |b| {
        b.iter(|| extractor.extract(black_box(SHORT)))
    });
    c.bench_function("extract_email", |b| {
        b.iter(|| extractor.extract(black_box(LONG)))
    });
    c.bench_function("extract_nothing", |b| {
        b.iter(|| extractor.extract(black_box(NOTHING)))
    });
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
