use goodness::{
    evaluate, BatchStatistics, DomainPolicy, Evaluator, GoodnessSummary, OperatingPointTable,
    Ranking, Workload,
};
use rand::SeedableRng;
use rand_chacha::ChaChaRng;
use testing::{random_pairs, UniformRequestDistribution};

const MODEL: &str = "\
9000 8100 7300 6600 5900 5300 4800
0 450 800 1050 1250 1400 1500
0 300 520 690 820 920 990
";

fn model() -> OperatingPointTable {
    MODEL.parse().expect("invalid model")
}

fn random_workload(rng: &mut ChaChaRng, size: usize) -> Workload {
    let distribution = UniformRequestDistribution::new(262_144, 300);
    Workload::try_from_pairs(random_pairs(rng, size, &distribution)).unwrap()
}

#[test]
fn test_best_partition_is_consistent() -> goodness::Result<()> {
    let model = model();
    let mut rng = ChaChaRng::seed_from_u64(2011);
    for size in 0..=6 {
        let workload = random_workload(&mut rng, size);
        let scored = evaluate(&workload, &model)?;
        assert_eq!(scored.len(), 1 << size);
        let best_value = scored
            .iter()
            .filter_map(|s| s.goodness.value())
            .fold(f64::NEG_INFINITY, f64::max);
        let evaluator = Evaluator::new(&model);
        let best = evaluator.best(&workload)?.expect("no finite partition");
        assert_eq!(best.goodness.value(), Some(best_value));
        assert_eq!(Ranking::new(scored).best(), Some(&best));
    }
    Ok(())
}

#[test]
fn test_sequential_throughput_unused_without_sequential_requests() -> goodness::Result<()> {
    // Sequential throughput with no sequential stream is zero in the text format, but it is
    // never needed because the sequential side is empty.
    let model = model();
    let mut rng = ChaChaRng::seed_from_u64(7);
    let workload = random_workload(&mut rng, 5);
    let scored = evaluate(&workload, &model)?;
    assert!(scored.iter().all(|s| !s.goodness.is_degenerate()));
    Ok(())
}

#[test]
fn test_zero_index_throughput_excluded() -> goodness::Result<()> {
    // Index throughput with no index scans is zero, which only matters when all requests run
    // a sequential scan: the index side is then empty.
    let model = model();
    let mut rng = ChaChaRng::seed_from_u64(11);
    let workload = random_workload(&mut rng, 4);
    let ranking = Evaluator::new(&model).rank(&workload)?;
    assert!(ranking.degenerate().is_empty());
    assert_eq!(ranking.ranked().len(), 16);
    Ok(())
}

#[test]
fn test_saturating_model_beyond_domain() -> goodness::Result<()> {
    let mut rng = ChaChaRng::seed_from_u64(13);
    let workload = random_workload(&mut rng, 8);
    assert!(evaluate(&workload, &model()).is_err());
    let model = model().with_policy(DomainPolicy::Saturating);
    let sequential = evaluate(&workload, &model)?;
    let parallel = Evaluator::new(&model).parallel(true).evaluate(&workload)?;
    assert_eq!(sequential, parallel);
    Ok(())
}

#[test]
fn test_batch_statistics() -> goodness::Result<()> {
    let model = model();
    let mut rng = ChaChaRng::seed_from_u64(5);
    let mut batch = BatchStatistics::new();
    for _ in 0..10 {
        let workload = random_workload(&mut rng, 4);
        batch.push(&GoodnessSummary::of(&evaluate(&workload, &model)?));
    }
    assert_eq!(batch.len(), 10);
    let summary = batch.summarize().expect("non-empty batch");
    assert!(summary.min.max <= summary.max.max);
    assert!(summary.median.min <= summary.median.max);
    Ok(())
}
