//! Property-based tests for round-robin placement

use proptest::prelude::*;
use qdtestgen::emit::{Generator, GeneratorSettings, MemorySink};
use qdtestgen::plan::{GenerationPlan, SuitePlan, TestSuite};
use qdtestgen::types::{TypeExpression, TypeList};

fn plan_with_lists(sizes: &[usize]) -> GenerationPlan {
    let lists = sizes
        .iter()
        .enumerate()
        .map(|(i, len)| {
            TypeList::new(
                format!("List{}", i),
                (0..*len)
                    .map(|j| TypeExpression::new(format!("T<{}, {}>", i, j)))
                    .collect(),
            )
        })
        .collect();
    GenerationPlan {
        suites: vec![SuitePlan {
            suite: TestSuite::DelegationTest,
            lists,
        }],
    }
}

proptest! {
    #[test]
    fn test_counts_balanced_and_modulo(
        sizes in proptest::collection::vec(0usize..80, 0..12),
        file_limit in 1usize..16,
    ) {
        let settings = GeneratorSettings {
            file_limit,
            ..GeneratorSettings::default()
        };
        let generator = Generator::new(settings).unwrap();
        let mut sink = MemorySink::new(file_limit);
        let report = generator.run(&plan_with_lists(&sizes), &mut sink).unwrap();

        for (i, record) in report.shards.iter().enumerate() {
            prop_assert_eq!(record.counter.value(), i as u64);
            prop_assert_eq!(record.file_index, i % file_limit);
        }
        let counts = report.shards_per_file();
        let max = counts.iter().copied().max().unwrap_or(0);
        let min = counts.iter().copied().min().unwrap_or(0);
        prop_assert!(max - min <= 1);
        prop_assert_eq!(report.total_types, sizes.iter().sum::<usize>());
    }

    /// Identical plans render identical buffers
    #[test]
    fn test_rendering_deterministic(sizes in proptest::collection::vec(0usize..60, 0..8)) {
        let generator = Generator::new(GeneratorSettings::default()).unwrap();
        let plan = plan_with_lists(&sizes);
        let mut a = MemorySink::new(8);
        let mut b = MemorySink::new(8);
        generator.run(&plan, &mut a).unwrap();
        generator.run(&plan, &mut b).unwrap();
        prop_assert_eq!(a.into_contents(), b.into_contents());
    }
}
