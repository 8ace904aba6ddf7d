use dftref::dft::transform;
use dftref::fixture::encode;
use dftref::{SequenceGenerator, Wide};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn generated_components_stay_in_range(seed in any::<u64>(), n in 0usize..64) {
        let mut generator = SequenceGenerator::<Wide>::seeded(seed);
        let seq = generator.generate(n);
        prop_assert_eq!(seq.len(), n);
        for c in &seq {
            let c = c.to_f64();
            prop_assert!((-0.5..0.5).contains(&c.re), "re = {}", c.re);
            prop_assert!((-0.5..0.5).contains(&c.im), "im = {}", c.im);
        }
    }

    #[test]
    fn encoded_length_is_sixteen_per_sample(seed in any::<u64>(), n in 0usize..48) {
        let mut generator = SequenceGenerator::<Wide>::seeded(seed);
        let seq = generator.generate(n);
        let out = transform(&seq);
        prop_assert_eq!(out.len(), n);
        prop_assert_eq!(encode(&seq).len(), 16 * n);
        prop_assert_eq!(encode(&out).len(), 16 * n);
    }

    #[test]
    fn same_seed_same_sequence(seed in any::<u64>(), n in 0usize..32) {
        let a = SequenceGenerator::<Wide>::seeded(seed).generate(n);
        let b = SequenceGenerator::<Wide>::seeded(seed).generate(n);
        prop_assert_eq!(encode(&a), encode(&b));
    }
}
