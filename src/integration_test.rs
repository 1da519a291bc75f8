#[cfg(test)]
mod integration_tests {
    use std::fmt::Write as _;

    use rand::{Rng, SeedableRng};

    use crate::{Dataset, Engine, EngineConfig, NearbyError, QueryKind, QuestionId, run};

    fn answer(input: &str, config: EngineConfig) -> String {
        let mut out = Vec::new();
        let _ = run(input.as_bytes(), &mut out, config).unwrap();
        String::from_utf8(out).unwrap()
    }

    /// Random dataset shaped like the load-test inputs: sparse topic fan-out,
    /// some empty and some dangling question references.
    fn random_input(seed: u64, topics: usize, questions: usize, queries: usize) -> String {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        let mut input = String::new();
        writeln!(input, "{topics} {questions} {queries}").unwrap();
        for id in 0..topics {
            let x: f64 = rng.random_range(0.0..100.0);
            let y: f64 = rng.random_range(0.0..100.0);
            writeln!(input, "{id} {x:.2} {y:.2}").unwrap();
        }
        for id in 0..questions {
            let qn = rng.random_range(0..10);
            write!(input, "{id} {qn}").unwrap();
            for _ in 0..qn {
                // Occasionally point past the last topic
                let topic = rng.random_range(0..topics + 5);
                write!(input, " {topic}").unwrap();
            }
            input.push('\n');
        }
        for _ in 0..queries {
            let kind = if rng.random_bool(0.5) { "t" } else { "q" };
            let k = rng.random_range(0..40);
            let x: f64 = rng.random_range(-10.0..110.0);
            let y: f64 = rng.random_range(-10.0..110.0);
            writeln!(input, "{kind} {k} {x:.2} {y:.2}").unwrap();
        }
        input
    }

    /// Direct nested scan: proximity-ranked topics outside, every question by
    /// ascending id inside.
    fn nested_scan(dataset: &Dataset, x: f64, y: f64, k: usize, cutoff: usize) -> Vec<QuestionId> {
        let mut ranked: Vec<_> = dataset
            .topics
            .values()
            .map(|t| {
                let dx = x - t.x;
                let dy = y - t.y;
                (t.id, (dx * dx + dy * dy).sqrt())
            })
            .collect();
        ranked.sort_by(|a, b| a.1.total_cmp(&b.1));

        let mut results = Vec::new();
        for &(topic, _) in ranked.iter().take(cutoff) {
            for question in dataset.questions.values() {
                if question.topics.contains(&topic) && !results.contains(&question.id) {
                    results.push(question.id);
                }
            }
        }
        results.truncate(k);
        results
    }

    #[test]
    fn test_topic_query_example() {
        let input = "3 0 1\n0 0 0\n1 10 0\n2 3 0\nt 2 0 0\n";
        assert_eq!(answer(input, EngineConfig::default()), "0 2 \n");
    }

    #[test]
    fn test_question_dedup_example() {
        let input = "2 2 1\n5 0 0\n6 1 0\n0 1 5\n1 2 5 6\nq 5 0 0\n";
        assert_eq!(answer(input, EngineConfig::default()), "0 1 \n");
    }

    #[test]
    fn test_clamping_returns_every_candidate() {
        let input = "3 2 2\n0 0 0\n1 1 1\n2 2 2\n0 1 0\n1 1 2\nt 100 0 0\nq 100 0 0\n";
        assert_eq!(answer(input, EngineConfig::default()), "0 1 2 \n0 1 \n");
    }

    #[test]
    fn test_cutoff_beyond_thousand_topics() {
        // Topic 1000 is the 1001st nearest to the origin
        let mut input = String::from("1001 1 2\n");
        for id in 0..=1000 {
            writeln!(input, "{id} {id} 0").unwrap();
        }
        input.push_str("0 1 1000\n");
        input.push_str("q 5 0 0\n");
        input.push_str("q 5 1000 0\n");

        assert_eq!(answer(&input, EngineConfig::default()), "\n0 \n");

        let widened = EngineConfig::default().with_max_candidate_topics(1001);
        assert_eq!(answer(&input, widened), "0 \n0 \n");
    }

    #[test]
    fn test_empty_topic_question_never_matches() {
        let input = "2 2 2\n0 0 0\n1 5 5\n7 0\n8 1 1\nq 10 0 0\nq 10 5 5\n";
        assert_eq!(answer(input, EngineConfig::default()), "8 \n8 \n");
    }

    #[test]
    fn test_order_preserved_across_queries() {
        let input = "4 2 4\n0 0 0\n1 1 0\n2 2 0\n3 3 0\n0 1 3\n1 2 0 1\nt 4 0 0\nq 0 0 0\nt 1 3 0\nq 2 3 0\n";
        let output = answer(input, EngineConfig::default());
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines, vec!["0 1 2 3 ", "", "3 ", "0 1 "]);
    }

    #[test]
    fn test_malformed_input_writes_nothing() {
        let mut out = Vec::new();
        let result = run("1 0 1\n0 x 0\nt 1 0 0\n".as_bytes(), &mut out, EngineConfig::default());
        assert!(result.is_err(), "Non-numeric coordinate should be fatal");
        assert!(out.is_empty(), "No answers should be written for a rejected dataset");
    }

    #[test]
    fn test_unreadable_input_writes_nothing() {
        let mut out = Vec::new();
        let input: &[u8] = b"1 0 1\n0 0 0\nt 1 \xff 0\n";
        let result = run(input, &mut out, EngineConfig::default());
        assert!(matches!(result, Err(NearbyError::Io(_))), "got {result:?}");
        assert!(out.is_empty(), "No answers should be written after a read error");
    }

    #[test]
    fn test_deterministic_output() {
        let input = random_input(95756739, 300, 200, 100);
        let first = answer(&input, EngineConfig::default());
        let second = answer(&input, EngineConfig::default());
        assert_eq!(first, second);
        assert_eq!(first.lines().count(), 100);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let input = random_input(12345, 500, 300, 200);
        let sequential = answer(&input, EngineConfig::default());
        let parallel = answer(&input, EngineConfig::default().with_parallel(true));
        assert_eq!(sequential, parallel, "Parallel evaluation should not reorder lines");
    }

    #[test]
    fn test_question_queries_match_nested_scan() {
        for (seed, cutoff) in [(1_u64, 1000), (2, 25), (3, 3)] {
            let input = random_input(seed, 200, 150, 60);
            let dataset: Dataset = input.parse().unwrap();
            let engine = Engine::new(&dataset, EngineConfig::default().with_max_candidate_topics(cutoff));

            for query in dataset.queries.iter().filter(|q| q.kind == QueryKind::Question) {
                let expected = nested_scan(&dataset, query.x, query.y, query.required_results, cutoff);
                assert_eq!(
                    engine.answer(query),
                    expected,
                    "seed {seed}, cutoff {cutoff}, query {query:?}"
                );
            }
        }
    }

    #[test]
    fn test_topic_answers_never_exceed_request() {
        let input = random_input(7, 30, 10, 200);
        let dataset: Dataset = input.parse().unwrap();
        let engine = Engine::new(&dataset, EngineConfig::default());

        for query in &dataset.queries {
            let ids = engine.answer(query);
            assert!(ids.len() <= query.required_results, "Answer longer than requested");
            if query.kind == QueryKind::Topic {
                assert_eq!(ids.len(), query.required_results.min(dataset.topics.len()));
            }
        }
    }
}
