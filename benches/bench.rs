// Criterion benchmarks for PawLink Match

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pawlink_match::core::{CompatibilityScorer, MatchPolicy, Matcher};
use pawlink_match::models::{PetRecord, PreferenceRecord};

const BREEDS: &[&str] = &["Golden Retriever", "Labrador", "Beagle", "Poodle", "Husky"];
const BEHAVIORS: &[&str] = &["Friendly", "Calm", "Playful", "Energetic", "Shy", "Vocal"];
const ATTRIBUTES: &[&str] = &["Short Coat", "Long Coat", "Hypoallergenic", "Large", "Small"];

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

fn create_candidate(id: usize) -> PetRecord {
    PetRecord {
        pet_id: format!("{:05}", id),
        owner_id: Some(format!("owner{}", id % 97)),
        species: if id % 7 == 0 { "Cat" } else { "Dog" }.to_string(),
        breed: BREEDS[id % BREEDS.len()].to_string(),
        sex: if id % 2 == 0 { "Female" } else { "Male" }.to_string(),
        birthdate: NaiveDate::from_ymd_opt(2012 + (id % 12) as i32, 1 + (id % 12) as u32, 1),
        behaviors: BEHAVIORS.iter().skip(id % 3).take(3).map(|s| s.to_string()).collect(),
        attributes: ATTRIBUTES.iter().skip(id % 4).take(2).map(|s| s.to_string()).collect(),
        active: id % 11 != 0,
    }
}

fn create_requester() -> PetRecord {
    PetRecord {
        pet_id: "requester".to_string(),
        owner_id: Some("me".to_string()),
        species: "Dog".to_string(),
        breed: "Labrador".to_string(),
        sex: "Female".to_string(),
        birthdate: NaiveDate::from_ymd_opt(2020, 4, 1),
        behaviors: vec![],
        attributes: vec![],
        active: true,
    }
}

fn create_preferences() -> PreferenceRecord {
    PreferenceRecord {
        preferred_breed: Some("Golden Retriever".to_string()),
        preferred_sex: Some("Male".to_string()),
        min_age: Some(2.0),
        max_age: Some(7.0),
        preferred_behaviors: Some(vec!["Friendly".to_string(), "Calm".to_string()]),
        preferred_attributes: Some(vec!["Short Coat".to_string()]),
    }
}

fn bench_single_score(c: &mut Criterion) {
    let scorer = CompatibilityScorer::with_default_weights(as_of());
    let candidate = create_candidate(1);
    let requester = create_requester();
    let prefs = create_preferences();

    c.bench_function("score_single_candidate", |b| {
        b.iter(|| scorer.score(black_box(&candidate), black_box(&requester), black_box(&prefs)))
    });
}

fn bench_matching(c: &mut Criterion) {
    let base = Matcher::with_default_weights(as_of());
    let requester = create_requester();
    let prefs = create_preferences();

    let mut group = c.benchmark_group("matching");

    for candidate_count in [10, 100, 1000, 10000].iter() {
        let candidates: Vec<PetRecord> = (0..*candidate_count).map(create_candidate).collect();

        for parallel in [false, true] {
            let matcher = base.with_policy(MatchPolicy { parallel, limit: Some(20), ..MatchPolicy::default() });
            let name = if parallel { "find_matches_parallel" } else { "find_matches_sequential" };

            group.bench_with_input(
                BenchmarkId::new(name, candidate_count),
                candidate_count,
                |b, _| {
                    b.iter(|| {
                        matcher.find_matches(
                            black_box(&requester),
                            black_box(Some(&prefs)),
                            black_box(&candidates),
                        )
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_single_score, bench_matching);

criterion_main!(benches);
