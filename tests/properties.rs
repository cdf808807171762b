use dice_hist::parse::{Expected, TokenKind};
use dice_hist::{Config, Model, ParseErrorKind, RollContext, SubPoolSizeError};
use rand::{rngs::StdRng, SeedableRng};

const EXPRESSIONS: &[&str] = &[
    "3",
    "d20",
    "2d6+3",
    "d6!2",
    "3d4!+2d8",
    "b1o(2d12)",
    "bo(2d6)",
    "w2o(4d6)+1",
    "b2o(d8+w1o(2d6)+4)",
    "b1o(5d20)",
    "d6!600",
    "d1000000000+2",
];

fn test_rng() -> StdRng {
    StdRng::seed_from_u64(1)
}

fn ctx() -> RollContext<StdRng> {
    RollContext::new(Config::default(), test_rng())
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}

#[test]
fn test_density_sums_to_one() {
    for s in EXPRESSIONS {
        let pool = dice_hist::parse(s).unwrap();
        let dist = ctx().distribution(&pool).unwrap();
        let total: f64 = dist.iter().map(|(_, p)| p).sum();
        assert_close(total, 1.0);
        assert!(dist.iter().all(|(_, p)| p >= 0.0), "{}", s);
        assert_close(dist.at_most(dist.max()), 1.0);
    }
}

#[test]
fn test_support_matches_bounds() {
    for s in EXPRESSIONS {
        let pool = dice_hist::parse(s).unwrap();
        let dist = ctx().distribution(&pool).unwrap();
        if dist.is_exact() {
            assert_eq!(dist.support(), pool.minimum()..=pool.maximum(), "{}", s);
        } else {
            assert!(dist.min() >= pool.minimum(), "{}", s);
            assert!(dist.max() <= pool.maximum(), "{}", s);
        }
    }
}

#[test]
fn test_only_large_sub_pools_are_sampled() {
    let exact = dice_hist::parse("b2o(d8+w1o(2d6)+4)").unwrap();
    assert!(ctx().distribution(&exact).unwrap().is_exact());
    let sampled = dice_hist::parse("b1o(5d20)").unwrap();
    assert!(!ctx().distribution(&sampled).unwrap().is_exact());
}

#[test]
fn test_wide_expressions_are_sampled() {
    let wide = dice_hist::parse("d1000000000+2").unwrap();
    let dist = ctx().distribution(&wide).unwrap();
    assert!(!dist.is_exact());
    assert!(dist.sums().len() <= Config::DEFAULT_SAMPLES.get());

    let underflowing = dice_hist::parse("d6!600").unwrap();
    let dist = ctx().distribution(&underflowing).unwrap();
    assert!(!dist.is_exact());
    assert_close(dist.density(1), 1.0 / 6.0);
}

#[test]
fn test_huge_dice_counts_are_rejected() {
    for s in ["4294967295d6", "10001d6", "d2!4000000000"] {
        let err = dice_hist::parse(s).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::TooManyDice { limit: 10_000 }, "{}", s);
    }
}

#[test]
fn test_rolls_stay_in_bounds() {
    for s in EXPRESSIONS {
        let pool = dice_hist::parse(s).unwrap();
        let mut ctx = ctx();
        for outcome in ctx.rolls(&pool, 1000) {
            let sum = outcome.sum();
            assert!(
                (pool.minimum()..=pool.maximum()).contains(&sum),
                "{} rolled {}",
                s,
                sum
            );
        }
    }
}

#[test]
fn test_two_d6() {
    let pool = dice_hist::parse("2d6").unwrap();
    assert_eq!((pool.minimum(), pool.maximum()), (2, 12));
    let dist = ctx().distribution(&pool).unwrap();
    assert_eq!(dist.total(), 36.0);
    let weights: Vec<_> = dist.support().map(|k| dist.weight(k)).collect();
    assert_eq!(
        weights,
        vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0]
    );
}

#[test]
fn test_best_of_two_d12() {
    let pool = dice_hist::parse("b1o(2d12)").unwrap();
    assert_eq!((pool.minimum(), pool.maximum()), (1, 12));
    let dist = ctx().distribution(&pool).unwrap();
    assert!(dist.is_exact());
    assert_close(dist.density(12), 23.0 / 144.0);
    assert_close(dist.density(1), 1.0 / 144.0);
    assert!(dist.mean() > 6.5);
}

#[test]
fn test_exploding_d6_chain_two() {
    let pool = dice_hist::parse("d6!2").unwrap();
    assert_eq!(pool.maximum(), 12);
    let dist = ctx().distribution(&pool).unwrap();
    assert_eq!(dist.total(), 36.0);
    assert_eq!(dist.weight(12), 1.0);
    assert_eq!(dist.weight(6), 0.0);
}

#[test]
fn test_default_sub_pool_size() {
    let implicit = dice_hist::parse("bo(2d6)").unwrap();
    let explicit = dice_hist::parse("b1o(2d6)").unwrap();
    assert_eq!(implicit, explicit);
    assert_eq!(implicit.textual_form(), "b1o(d6+d6)");
    assert_eq!(
        ctx().distribution(&implicit).unwrap(),
        ctx().distribution(&explicit).unwrap()
    );
}

#[test]
fn test_missing_face_count() {
    let err = dice_hist::parse("d").unwrap_err();
    assert_eq!(err.position, 1);
    assert_eq!(err.found, TokenKind::EndOfInput);
    assert_eq!(
        err.kind,
        ParseErrorKind::UnexpectedToken {
            expected: vec![Expected::Token(TokenKind::Integer)]
        }
    );
}

#[test]
fn test_sub_pool_too_large() {
    let err = dice_hist::parse("b3o(2d6)").unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::SubPool(SubPoolSizeError {
            requested: 3,
            available: 2,
        })
    );
}

#[test]
fn test_parsing_is_deterministic() {
    for s in EXPRESSIONS {
        let a = dice_hist::parse(s).unwrap();
        let b = dice_hist::parse(s).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.minimum(), b.minimum());
        assert_eq!(a.maximum(), b.maximum());
        assert_eq!(a.textual_form(), b.textual_form());
        assert_eq!(
            ctx().distribution(&a).unwrap(),
            ctx().distribution(&b).unwrap()
        );
    }
}

#[test]
fn test_textual_form_round_trips() {
    for s in EXPRESSIONS {
        let pool = dice_hist::parse(s).unwrap();
        let again = dice_hist::parse(&pool.textual_form()).unwrap();
        assert_eq!(pool, again, "{}", s);
    }
}

#[test]
fn test_histogram_sampler() {
    use rand::distributions::Distribution as _;

    let dist = dice_hist::histogram("3d6").unwrap();
    let sampler = dist.sampler().unwrap();
    let mut rng = test_rng();
    for _ in 0..1000 {
        assert!(dist.support().contains(&sampler.sample(&mut rng)));
    }
}
