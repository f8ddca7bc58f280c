use ballotbox_contract::tally::{count_ballots, select_winner};
use ballotbox_contract::VotingRecord;
use ballotbox_types::VoterId;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_tally(c: &mut Criterion) {
    let options: Vec<String> = (0..16).map(|i| format!("option-{i}")).collect();
    let mut record = VotingRecord::new("bench", &options).unwrap();
    for voter in 0..50_000u32 {
        let option = &options[(voter as usize * 7) % options.len()];
        record
            .cast(VoterId::new(format!("voter-{voter}")), option)
            .unwrap();
    }

    c.bench_function("tally_50k_ballots", |b| {
        b.iter(|| select_winner(&count_ballots(black_box(&record))))
    });
}

criterion_group!(benches, bench_tally);
criterion_main!(benches);
